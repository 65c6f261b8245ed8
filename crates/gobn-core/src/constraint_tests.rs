use indexmap::IndexMap;
use proptest::prelude::*;

use crate::constraint::{ConstraintSet, Independence};
use crate::error::GobnError;

/// Test-side parser for the directive grammar, used to check that
/// encoding loses nothing.
fn parse(text: &str) -> ConstraintSet {
    let mut set = ConstraintSet::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix('~') {
            let (child, parent) = rest.split_once("<-").expect("forbidden edge directive");
            set.forbid_edge(parent, child).unwrap();
        } else if let Some((lhs, rest)) = line.split_once("_|_") {
            let (rhs, given) = match rest.split_once('|') {
                Some((rhs, given)) => (rhs, Some(given)),
                None => (rest, None),
            };
            let statement = match given {
                Some(given) => {
                    Independence::given(lhs.split(','), rhs.split(','), given.split(',')).unwrap()
                }
                None => Independence::new(lhs.split(','), rhs.split(',')).unwrap(),
            };
            set.add_independence(statement);
        } else {
            let (child, parent) = line.split_once("<-").expect("required edge directive");
            set.require_edge(parent, child).unwrap();
        }
    }
    set
}

#[test]
fn required_edges_emit_one_directive_per_child() {
    let mut set = ConstraintSet::new();
    set.require_edge("C", "A").unwrap();
    set.require_edge("C", "B").unwrap();
    assert_eq!(set.encode(), "A<-C\nB<-C\n");
}

#[test]
fn forbidden_edges_are_negated() {
    let mut set = ConstraintSet::new();
    set.forbid_edge("C", "A").unwrap();
    set.forbid_edge("C", "B").unwrap();
    assert_eq!(set.encode(), "~A<-C\n~B<-C\n");
}

#[test]
fn two_part_independence_joins_groups_with_commas() {
    let mut set = ConstraintSet::new();
    set.add_independence(Independence::new(["A", "B"], ["C"]).unwrap());
    assert_eq!(set.encode(), "A,B_|_C\n");
}

#[test]
fn three_part_independence_appends_the_conditioning_group() {
    let mut set = ConstraintSet::new();
    set.add_independence(Independence::given(["A"], ["B", "C"], ["D"]).unwrap());
    assert_eq!(set.encode(), "A_|_B,C|D\n");
}

#[test]
fn directives_follow_insertion_order() {
    let mut set = ConstraintSet::new();
    set.require_edge("C", "B").unwrap();
    set.require_edge("D", "X").unwrap();
    set.require_edge("C", "A").unwrap();
    assert_eq!(set.encode(), "B<-C\nA<-C\nX<-D\n");
}

#[test]
fn reserved_tokens_are_rejected_in_every_position() {
    let mut set = ConstraintSet::new();
    for name in ["A<-B", "A_|_B", "~A"] {
        assert!(matches!(
            set.require_edge(name, "X"),
            Err(GobnError::InvalidVariableName { .. })
        ));
        assert!(matches!(
            set.require_edge("X", name),
            Err(GobnError::InvalidVariableName { .. })
        ));
        assert!(matches!(
            set.forbid_edge(name, "X"),
            Err(GobnError::InvalidVariableName { .. })
        ));
        assert!(matches!(
            Independence::new([name], ["X"]),
            Err(GobnError::InvalidVariableName { .. })
        ));
        assert!(matches!(
            Independence::given(["X"], ["Y"], [name]),
            Err(GobnError::InvalidVariableName { .. })
        ));
    }
}

#[test]
fn an_edge_cannot_be_both_required_and_forbidden() {
    let mut set = ConstraintSet::new();
    set.require_edge("C", "A").unwrap();
    assert!(matches!(
        set.forbid_edge("C", "A"),
        Err(GobnError::ConflictingConstraint { .. })
    ));

    let mut set = ConstraintSet::new();
    set.forbid_edge("C", "A").unwrap();
    assert!(matches!(
        set.require_edge("C", "A"),
        Err(GobnError::ConflictingConstraint { .. })
    ));
}

#[test]
fn opposite_directions_do_not_conflict() {
    let mut set = ConstraintSet::new();
    set.require_edge("C", "A").unwrap();
    set.forbid_edge("A", "C").unwrap();
    assert_eq!(set.encode(), "A<-C\n~C<-A\n");
}

#[test]
fn from_parts_validates_the_whole_input() {
    let mut required = IndexMap::new();
    required.insert("C".to_string(), vec!["A".to_string()]);
    let mut forbidden = IndexMap::new();
    forbidden.insert("C".to_string(), vec!["A".to_string()]);
    assert!(matches!(
        ConstraintSet::from_parts(required, forbidden, Vec::new()),
        Err(GobnError::ConflictingConstraint { .. })
    ));
}

#[test]
fn empty_set_encodes_to_nothing() {
    let set = ConstraintSet::new();
    assert!(set.is_empty());
    assert_eq!(set.encode(), "");
}

#[test]
fn parse_recovers_a_mixed_set() {
    let mut set = ConstraintSet::new();
    set.require_edge("C", "A").unwrap();
    set.forbid_edge("D", "B").unwrap();
    set.add_independence(Independence::given(["A"], ["B", "C"], ["D"]).unwrap());
    assert_eq!(parse(&set.encode()), set);
}

fn name_strategy(prefix: &'static str) -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9]{0,4}")
        .unwrap()
        .prop_map(move |s| format!("{prefix}{s}"))
}

fn group_strategy(prefix: &'static str) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(name_strategy(prefix), 1..4)
}

proptest! {
    // Required and forbidden parents draw from disjoint prefixes so the
    // generator cannot trip the conflict invariant.
    #[test]
    fn encode_then_parse_is_lossless(
        required in proptest::collection::vec((name_strategy("r"), group_strategy("v")), 0..4),
        forbidden in proptest::collection::vec((name_strategy("f"), group_strategy("v")), 0..4),
        marginal in proptest::collection::vec((group_strategy("i"), group_strategy("j")), 0..3),
        conditional in proptest::collection::vec(
            (group_strategy("i"), group_strategy("j"), group_strategy("k")),
            0..3,
        ),
    ) {
        let mut set = ConstraintSet::new();
        for (parent, children) in &required {
            for child in children {
                set.require_edge(parent.clone(), child.clone()).unwrap();
            }
        }
        for (parent, children) in &forbidden {
            for child in children {
                set.forbid_edge(parent.clone(), child.clone()).unwrap();
            }
        }
        for (lhs, rhs) in &marginal {
            set.add_independence(Independence::new(lhs.clone(), rhs.clone()).unwrap());
        }
        for (lhs, rhs, given) in &conditional {
            set.add_independence(
                Independence::given(lhs.clone(), rhs.clone(), given.clone()).unwrap(),
            );
        }

        prop_assert_eq!(parse(&set.encode()), set);
    }
}
