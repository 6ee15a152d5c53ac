//! Tests for `KeyedNode`.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use hetree::{Insertion, KeyedNode, NodeError, NodeHandle};
use rstest::{fixture, rstest};

use self::common::{init_test_setup, leaf, leaf_value, DropCounter};

/// Returns a collection with `"a" -> 1`, `"b" -> 2`, and `"c" -> 3`.
#[fixture]
fn abc() -> KeyedNode {
    init_test_setup();
    let mut map = KeyedNode::new();
    for (key, n) in [("a", 1), ("b", 2), ("c", 3)] {
        map.insert(key, leaf(n))
            .expect("should never fail: the handle is not empty");
    }
    map
}

#[rstest]
fn lookup_finds_inserted_entries(abc: KeyedNode) {
    assert_eq!(abc.len(), 3);
    let pair = abc.find("b").expect("the key was inserted");
    assert_eq!(pair.key(), "b");
    assert_eq!(leaf_value(pair.value()), 2);
    assert!(abc.find("z").is_none());
    assert!(abc.get("z").is_none());
    assert!(abc.contains_key("c"));
}

#[rstest]
fn duplicate_key_keeps_existing_and_returns_node(mut abc: KeyedNode) {
    let outcome = abc
        .insert("a", leaf(100))
        .expect("should never fail: the handle is not empty");
    match outcome {
        Insertion::Occupied { existing, rejected } => {
            assert_eq!(existing.key(), "a");
            assert_eq!(leaf_value(existing.value()), 1);
            let rejected = rejected.get().expect("the node is given back");
            assert_eq!(leaf_value(rejected), 100);
        }
        Insertion::Inserted(_) => panic!("the key `a` is already present"),
    }
    assert_eq!(abc.len(), 3);
    assert_eq!(abc.get("a").map(leaf_value), Some(1));
}

#[rstest]
fn empty_handle_is_rejected(mut abc: KeyedNode) {
    let result = abc.insert("d", NodeHandle::empty()).map(|o| o.is_inserted());
    assert_eq!(result, Err(NodeError::EmptyNode));
    assert_eq!(abc.len(), 3);
    assert!(!abc.contains_key("d"));
}

#[rstest]
#[case("a", &["b", "c"])]
#[case("b", &["a", "c"])]
#[case("c", &["a", "b"])]
fn erase_removes_only_the_key(
    mut abc: KeyedNode,
    #[case] erased: &str,
    #[case] remaining: &[&str],
) {
    assert_eq!(abc.erase(erased), 1);
    assert!(abc.find(erased).is_none());
    assert_eq!(abc.len(), 2);
    let mut keys = abc.keys().collect::<Vec<_>>();
    keys.sort_unstable();
    assert_eq!(keys, remaining);
    for (key, n) in [("a", 1), ("b", 2), ("c", 3)] {
        if key != erased {
            assert_eq!(abc.find(key).map(|pair| leaf_value(pair.value())), Some(n));
        }
    }
}

#[rstest]
fn erase_missing_key_is_noop(mut abc: KeyedNode) {
    assert_eq!(abc.erase("z"), 0);
    assert_eq!(abc.len(), 3);
}

#[rstest]
fn erased_key_can_be_reused(mut abc: KeyedNode) {
    assert_eq!(abc.erase("a"), 1);
    let outcome = abc
        .insert("a", leaf(10))
        .expect("should never fail: the handle is not empty");
    assert!(outcome.is_inserted());
    assert_eq!(abc.get("a").map(leaf_value), Some(10));
}

#[rstest]
fn clear_removes_everything(mut abc: KeyedNode) {
    abc.clear();
    assert!(abc.is_empty());
    assert_eq!(abc.iter().count(), 0);
}

#[rstest]
fn iteration_visits_each_entry_once(abc: KeyedNode) {
    let mut entries = abc
        .iter()
        .map(|pair| (pair.key().to_owned(), leaf_value(pair.value())))
        .collect::<Vec<_>>();
    entries.sort();
    assert_eq!(
        entries,
        [("a".to_owned(), 1), ("b".to_owned(), 2), ("c".to_owned(), 3)]
    );
}

#[test]
fn subtrees_are_dropped_exactly_once() {
    init_test_setup();
    let drops = Rc::new(Cell::new(0));

    let mut map = KeyedNode::new();
    for key in ["a", "b", "c", "d"] {
        map.insert(key, NodeHandle::new(DropCounter::new(&drops)))
            .expect("should never fail: the handle is not empty");
    }

    // The rejected duplicate is owned by the caller, and dropped with it.
    let rejected = map
        .insert("a", NodeHandle::new(DropCounter::new(&drops)))
        .expect("should never fail: the handle is not empty")
        .into_rejected()
        .expect("the key is already present");
    assert_eq!(drops.get(), 0);
    drop(rejected);
    assert_eq!(drops.get(), 1);

    map.erase("a");
    assert_eq!(drops.get(), 2);

    let mut nested = KeyedNode::new();
    nested
        .insert("inner", NodeHandle::new(DropCounter::new(&drops)))
        .expect("should never fail: the handle is not empty");
    map.insert("nested", NodeHandle::new(nested))
        .expect("should never fail: the handle is not empty");

    map.erase("b");
    assert_eq!(drops.get(), 3);

    drop(map);
    assert_eq!(drops.get(), 6);
}
