//! Blocking child-process execution with captured output.
//!
//! Every native step in the workspace - extracting an archive, running a
//! build, invoking the solver - is one blocking child process. Arguments
//! are always passed as a discrete vector; nothing is routed through a
//! shell.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::Result;

/// Outcome of one child-process invocation.
///
/// `output` is the merged stdout/stderr stream. It is kept even on
/// success so callers can surface diagnostics later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Whether the child exited with status zero.
    pub success: bool,
    /// Merged stdout/stderr text.
    pub output: String,
}

/// A single blocking command invocation.
///
/// # Examples
///
/// ```
/// use gobn_core::CommandSpec;
///
/// let result = CommandSpec::new("echo").arg("hello").run().unwrap();
/// assert!(result.success);
/// assert_eq!(result.output.trim(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    echo: bool,
}

impl CommandSpec {
    /// Creates a command for the given program.
    pub fn new(program: impl Into<OsString>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            echo: false,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Overrides the working directory for the child.
    ///
    /// Only the link step needs this; everything else runs from the
    /// caller's directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Enables incremental echo of the child's stdout through `tracing`.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Runs the command to completion and captures its output.
    ///
    /// stdout and stderr are merged into one diagnostic stream. With echo
    /// enabled, stdout lines are forwarded to `tracing` as they appear;
    /// stderr is drained on a helper thread so neither pipe can fill up
    /// and stall the child.
    ///
    /// # Errors
    ///
    /// Returns `GobnError::Io` if the child cannot be spawned (missing
    /// program, permission denied) or a pipe read fails. A non-zero exit
    /// is not an error here; it is reported via [`RunResult::success`].
    pub fn run(&self) -> Result<RunResult> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::null());
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        if !self.echo {
            let output = command.output()?;
            let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
            merged.push_str(&String::from_utf8_lossy(&output.stderr));
            return Ok(RunResult {
                success: output.status.success(),
                output: merged,
            });
        }

        let mut child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stderr = child.stderr.take();
        let drain = std::thread::spawn(move || {
            let mut buf = String::new();
            if let Some(mut pipe) = stderr {
                let _ = pipe.read_to_string(&mut buf);
            }
            buf
        });

        let mut merged = String::new();
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line?;
                info!(target: "gobn_core::exec", "{line}");
                merged.push_str(&line);
                merged.push('\n');
            }
        }

        let status = child.wait()?;
        if let Ok(err_text) = drain.join() {
            merged.push_str(&err_text);
        }

        Ok(RunResult {
            success: status.success(),
            output: merged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_on_success() {
        let result = CommandSpec::new("echo").arg("structure").run().unwrap();
        assert!(result.success);
        assert_eq!(result.output.trim(), "structure");
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let err = CommandSpec::new("gobn-no-such-program").run().unwrap_err();
        assert!(matches!(err, crate::GobnError::Io(_)));
    }

    #[test]
    fn nonzero_exit_is_reported_not_raised() {
        let result = CommandSpec::new("ls")
            .arg("/gobn-definitely-missing-dir")
            .run()
            .unwrap();
        assert!(!result.success);
        assert!(!result.output.is_empty());
    }

    #[test]
    fn echo_mode_still_captures_output() {
        let result = CommandSpec::new("echo")
            .arg("streamed")
            .echo(true)
            .run()
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output.trim(), "streamed");
    }

    #[cfg(unix)]
    #[test]
    fn current_dir_overrides_the_child_cwd() {
        let dir = tempfile::TempDir::new().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        let result = CommandSpec::new("pwd").current_dir(&canonical).run().unwrap();
        assert!(result.success);
        assert_eq!(std::path::Path::new(result.output.trim()), canonical);
    }
}
