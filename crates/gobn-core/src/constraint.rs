//! Constraint sets and the solver's directive grammar.
//!
//! The solver restricts its structure search with a line-based grammar,
//! one directive per line:
//! - `A<-C` requires the edge C -> A in the learned network
//! - `~A<-C` forbids it
//! - `A,B_|_C` and `A_|_B,C|D` assert (conditional) independence between
//!   comma-joined groups of variables

use indexmap::IndexMap;

use crate::error::{GobnError, Result};

/// Tokens that carry meaning in the directive grammar and are therefore
/// forbidden inside variable names.
pub const RESERVED_TOKENS: [&str; 3] = ["<-", "_|_", "~"];

fn check_name(name: &str) -> Result<()> {
    if RESERVED_TOKENS.iter().any(|token| name.contains(token)) {
        return Err(GobnError::InvalidVariableName { name: name.into() });
    }
    Ok(())
}

fn check_group(group: &[String]) -> Result<()> {
    for name in group {
        check_name(name)?;
    }
    Ok(())
}

fn collect_group<I>(group: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    group.into_iter().map(Into::into).collect()
}

/// One independence statement between groups of variables.
///
/// A two-part statement `lhs _|_ rhs` asserts marginal independence; a
/// three-part statement `lhs _|_ rhs | given` conditions on a third
/// group. Groups may be singletons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Independence {
    lhs: Vec<String>,
    rhs: Vec<String>,
    given: Option<Vec<String>>,
}

impl Independence {
    /// Creates a marginal independence statement.
    ///
    /// # Errors
    ///
    /// Returns `GobnError::InvalidVariableName` if any name contains a
    /// reserved token.
    pub fn new<L, R>(lhs: L, rhs: R) -> Result<Self>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let statement = Independence {
            lhs: collect_group(lhs),
            rhs: collect_group(rhs),
            given: None,
        };
        statement.check()?;
        Ok(statement)
    }

    /// Creates a conditional independence statement.
    pub fn given<L, R, G>(lhs: L, rhs: R, given: G) -> Result<Self>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        let statement = Independence {
            lhs: collect_group(lhs),
            rhs: collect_group(rhs),
            given: Some(collect_group(given)),
        };
        statement.check()?;
        Ok(statement)
    }

    fn check(&self) -> Result<()> {
        check_group(&self.lhs)?;
        check_group(&self.rhs)?;
        if let Some(given) = &self.given {
            check_group(given)?;
        }
        Ok(())
    }

    /// Left-hand variable group.
    pub fn lhs(&self) -> &[String] {
        &self.lhs
    }

    /// Right-hand variable group.
    pub fn rhs(&self) -> &[String] {
        &self.rhs
    }

    /// Conditioning group, if this is a three-part statement.
    pub fn conditioning(&self) -> Option<&[String]> {
        self.given.as_deref()
    }
}

/// Edge and independence requirements for one learning request.
///
/// Edge maps iterate in insertion order, so the encoded directives come
/// out in the order the caller declared them.
///
/// # Examples
///
/// ```
/// use gobn_core::ConstraintSet;
///
/// let mut set = ConstraintSet::new();
/// set.require_edge("C", "A").unwrap();
/// set.require_edge("C", "B").unwrap();
/// assert_eq!(set.encode(), "A<-C\nB<-C\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    required: IndexMap<String, Vec<String>>,
    forbidden: IndexMap<String, Vec<String>>,
    independencies: Vec<Independence>,
}

impl ConstraintSet {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw edge maps and independence statements.
    ///
    /// Validates every name and the required/forbidden disjointness
    /// invariant; on error nothing of the input is retained.
    pub fn from_parts(
        required: IndexMap<String, Vec<String>>,
        forbidden: IndexMap<String, Vec<String>>,
        independencies: Vec<Independence>,
    ) -> Result<Self> {
        let mut set = ConstraintSet::new();
        for (parent, children) in required {
            for child in children {
                set.require_edge(parent.clone(), child)?;
            }
        }
        for (parent, children) in forbidden {
            for child in children {
                set.forbid_edge(parent.clone(), child)?;
            }
        }
        set.independencies = independencies;
        Ok(set)
    }

    /// Requires the edge `parent -> child` in the learned network.
    ///
    /// # Errors
    ///
    /// `InvalidVariableName` on a reserved-token collision, or
    /// `ConflictingConstraint` if the same directed edge is already
    /// forbidden.
    pub fn require_edge(
        &mut self,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Result<()> {
        let (parent, child) = (parent.into(), child.into());
        check_name(&parent)?;
        check_name(&child)?;
        if Self::has_edge(&self.forbidden, &parent, &child) {
            return Err(GobnError::ConflictingConstraint { parent, child });
        }
        self.required.entry(parent).or_default().push(child);
        Ok(())
    }

    /// Forbids the edge `parent -> child` in the learned network.
    pub fn forbid_edge(
        &mut self,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Result<()> {
        let (parent, child) = (parent.into(), child.into());
        check_name(&parent)?;
        check_name(&child)?;
        if Self::has_edge(&self.required, &parent, &child) {
            return Err(GobnError::ConflictingConstraint { parent, child });
        }
        self.forbidden.entry(parent).or_default().push(child);
        Ok(())
    }

    /// Adds an independence statement.
    pub fn add_independence(&mut self, statement: Independence) {
        self.independencies.push(statement);
    }

    fn has_edge(map: &IndexMap<String, Vec<String>>, parent: &str, child: &str) -> bool {
        map.get(parent)
            .is_some_and(|children| children.iter().any(|c| c == child))
    }

    /// Required edges, parent -> children.
    pub fn required(&self) -> &IndexMap<String, Vec<String>> {
        &self.required
    }

    /// Forbidden edges, parent -> children.
    pub fn forbidden(&self) -> &IndexMap<String, Vec<String>> {
        &self.forbidden
    }

    /// Independence statements in insertion order.
    pub fn independencies(&self) -> &[Independence] {
        &self.independencies
    }

    /// Returns true if no directive would be emitted.
    pub fn is_empty(&self) -> bool {
        self.required.values().all(Vec::is_empty)
            && self.forbidden.values().all(Vec::is_empty)
            && self.independencies.is_empty()
    }

    /// Encodes the set into the directive grammar, one directive per line.
    ///
    /// Infallible: every invariant is enforced when the set is built, so
    /// a `ConstraintSet` always has a valid encoding.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (parent, children) in &self.required {
            for child in children {
                out.push_str(child);
                out.push_str("<-");
                out.push_str(parent);
                out.push('\n');
            }
        }
        for (parent, children) in &self.forbidden {
            for child in children {
                out.push('~');
                out.push_str(child);
                out.push_str("<-");
                out.push_str(parent);
                out.push('\n');
            }
        }
        for statement in &self.independencies {
            out.push_str(&statement.lhs.join(","));
            out.push_str("_|_");
            out.push_str(&statement.rhs.join(","));
            if let Some(given) = &statement.given {
                out.push('|');
                out.push_str(&given.join(","));
            }
            out.push('\n');
        }
        out
    }
}
