//! Tests for `OrderedNode`.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use hetree::{NodeError, NodeHandle, OrderedNode};
use rstest::rstest;

use self::common::{init_test_setup, leaf, leaf_value, DropCounter, Leaf};

/// Returns a collection of leaves with the values.
fn sample(values: &[i64]) -> OrderedNode {
    let mut list = OrderedNode::new();
    for &n in values {
        list.add(leaf(n))
            .expect("should never fail: the handle is not empty");
    }
    list
}

#[rstest]
#[case(&[])]
#[case(&[1])]
#[case(&[3, 1, 2])]
fn append_preserves_order(#[case] values: &[i64]) {
    init_test_setup();
    let list = sample(values);
    assert_eq!(list.len(), values.len());
    assert_eq!(list.is_empty(), values.is_empty());
    assert_eq!(list.iter().map(leaf_value).collect::<Vec<_>>(), values);
    for (index, &n) in values.iter().enumerate() {
        let node = list.at(index).expect("the index is in range");
        assert_eq!(leaf_value(node), n);
    }
}

#[rstest]
#[case(0, &[])]
#[case(3, &[1, 2, 3])]
#[case(usize::MAX, &[1])]
fn at_reports_out_of_range(#[case] index: usize, #[case] values: &[i64]) {
    init_test_setup();
    let list = sample(values);
    assert_eq!(
        list.at(index).map(leaf_value),
        Err(NodeError::OutOfRange {
            index,
            len: values.len()
        })
    );
    assert!(list.get(index).is_none());
}

#[test]
fn empty_handle_is_rejected() {
    init_test_setup();
    let mut list = sample(&[1]);
    assert_eq!(list.add(NodeHandle::empty()), Err(NodeError::EmptyNode));
    assert_eq!(list.len(), 1);
}

#[test]
fn at_mut_modifies_child() {
    init_test_setup();
    let mut list = sample(&[1, 2]);
    let node = list.at_mut(1).expect("the index is in range");
    *node
        .downcast_mut::<Leaf>()
        .expect("the child is a `Leaf`") = Leaf(20);
    assert_eq!(list.iter().map(leaf_value).collect::<Vec<_>>(), [1, 20]);
}

#[test]
fn children_are_dropped_with_the_collection() {
    init_test_setup();
    let drops = Rc::new(Cell::new(0));
    let mut list = OrderedNode::new();
    for _ in 0..3 {
        list.add(NodeHandle::new(DropCounter::new(&drops)))
            .expect("should never fail: the handle is not empty");
    }

    let mut outer = OrderedNode::new();
    outer
        .add(NodeHandle::new(list))
        .expect("should never fail: the handle is not empty");
    outer
        .add(NodeHandle::new(DropCounter::new(&drops)))
        .expect("should never fail: the handle is not empty");
    assert_eq!(drops.get(), 0);

    drop(outer);
    assert_eq!(drops.get(), 4);
}
