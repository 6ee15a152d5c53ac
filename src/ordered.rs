//! Ordered collection node.

use core::iter;
use core::ops;
use core::slice;

use tracing::{debug, instrument, trace};

use crate::error::{NodeError, Result};
use crate::node::{Node, NodeHandle};

/// Node owning an append-only sequence of children.
///
/// Children are addressed by contiguous 0-based positions. The storage is a
/// growable array; [`add`][`Self::add`] needs `&mut self`, so no iterator
/// or child reference can outlive a reallocation.
///
/// # Examples
///
/// ```
/// use hetree::{Node, NodeHandle, OrderedNode};
///
/// #[derive(Debug)]
/// struct Number(i64);
/// impl Node for Number {}
///
/// let mut list = OrderedNode::new();
/// for n in 1..=3 {
///     list.add(NodeHandle::new(Number(n)))
///         .expect("should never fail: the handle is not empty");
/// }
///
/// let values = list
///     .iter()
///     .filter_map(|node| node.downcast_ref::<Number>())
///     .map(|n| n.0)
///     .collect::<Vec<_>>();
/// assert_eq!(values, [1, 2, 3]);
/// ```
#[derive(Debug, Default)]
pub struct OrderedNode {
    /// Children.
    nodes: Vec<Box<dyn Node>>,
}

impl Node for OrderedNode {}

impl OrderedNode {
    /// Creates a new empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty collection with room for `capacity` children.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Appends the node, taking ownership of it.
    ///
    /// # Errors
    ///
    /// * [`NodeError::EmptyNode`]
    ///     + In case the handle is empty. The collection is not modified.
    #[instrument(level = "trace", skip_all, fields(index = self.nodes.len()))]
    pub fn add(&mut self, node: NodeHandle) -> Result<()> {
        let node = match node.into_inner() {
            Some(node) => node,
            None => {
                debug!("rejected an empty node handle");
                return Err(NodeError::EmptyNode);
            }
        };
        self.nodes.push(node);
        trace!(len = self.nodes.len(), "appended");

        Ok(())
    }

    /// Returns the child at the position.
    ///
    /// # Errors
    ///
    /// * [`NodeError::OutOfRange`]
    ///     + In case `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<&dyn Node> {
        self.get(index).ok_or(NodeError::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the child at the position mutably.
    ///
    /// # Errors
    ///
    /// * [`NodeError::OutOfRange`]
    ///     + In case `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut dyn Node> {
        let len = self.len();
        self.get_mut(index)
            .ok_or(NodeError::OutOfRange { index, len })
    }

    /// Returns the child at the position, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&dyn Node> {
        self.nodes.get(index).map(|node| &**node)
    }

    /// Returns the child at the position mutably, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut dyn Node> {
        self.nodes.get_mut(index).map(|node| &mut **node)
    }

    /// Returns the first child.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&dyn Node> {
        self.get(0)
    }

    /// Returns the last child.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&dyn Node> {
        self.nodes.last().map(|node| &**node)
    }

    /// Returns the number of children.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if there are no children.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator of the children.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.nodes.iter(),
        }
    }

    /// Returns an iterator of the children with mutable access.
    #[inline]
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            inner: self.nodes.iter_mut(),
        }
    }
}

/// Bounds-checked positional access.
///
/// # Panics
///
/// Panics if `index >= self.len()`. Use [`OrderedNode::at`] or
/// [`OrderedNode::get`] for fallible access.
impl ops::Index<usize> for OrderedNode {
    type Output = dyn Node;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(node) => node,
            None => panic!(
                "[precondition] index {} is out of range for a collection of length {}",
                index,
                self.len()
            ),
        }
    }
}

/// Bounds-checked positional access.
///
/// # Panics
///
/// Panics if `index >= self.len()`.
impl ops::IndexMut<usize> for OrderedNode {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len();
        match self.get_mut(index) {
            Some(node) => node,
            None => panic!(
                "[precondition] index {} is out of range for a collection of length {}",
                index, len
            ),
        }
    }
}

impl<'a> IntoIterator for &'a OrderedNode {
    type Item = &'a dyn Node;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut OrderedNode {
    type Item = &'a mut dyn Node;
    type IntoIter = IterMut<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Random-access iterator of the children of an [`OrderedNode`].
///
/// Besides the double-ended and exact-size traversal, [`Iter::get`] reads an
/// element relative to the current front without advancing.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Storage iterator.
    inner: slice::Iter<'a, Box<dyn Node>>,
}

impl<'a> Iter<'a> {
    /// Returns the child `offset` positions after the current front.
    ///
    /// Returns `None` if the offset is beyond the remaining children.
    #[inline]
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&'a dyn Node> {
        self.inner.as_slice().get(offset).map(|node| &**node)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a dyn Node;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| &**node)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(|node| &**node)
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|node| &**node)
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth_back(n).map(|node| &**node)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl iter::FusedIterator for Iter<'_> {}

/// Random-access iterator of the children of an [`OrderedNode`], with
/// mutable access.
#[derive(Debug)]
pub struct IterMut<'a> {
    /// Storage iterator.
    inner: slice::IterMut<'a, Box<dyn Node>>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut dyn Node;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| &mut **node)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(|node| &mut **node)
    }
}

impl DoubleEndedIterator for IterMut<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|node| &mut **node)
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth_back(n).map(|node| &mut **node)
    }
}

impl ExactSizeIterator for IterMut<'_> {}

impl iter::FusedIterator for IterMut<'_> {}
