//! Tree traversal.

use core::iter;

use crate::keyed::{self, KeyedNode};
use crate::node::Node;
use crate::ordered::{self, OrderedNode};

/// Depth-first traversal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DftEvent<T> {
    /// Node open.
    Open(T),
    /// Node close.
    Close(T),
}

impl<T> DftEvent<T> {
    /// Converts the internal value.
    pub fn map<F, U>(self, f: F) -> DftEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Open(v) => DftEvent::Open(f(v)),
            Self::Close(v) => DftEvent::Close(f(v)),
        }
    }

    /// Returns a reference to the internal value.
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> &T {
        match self {
            Self::Open(v) | Self::Close(v) => v,
        }
    }
}

/// How a node is reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge<'a> {
    /// The node where the traversal started.
    Root,
    /// Child of a [`KeyedNode`] under the key.
    Key(&'a str),
    /// Child of an [`OrderedNode`] at the position.
    Index(usize),
}

/// A node visited by [`DepthFirstTraverse`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Edge from the parent.
    edge: Edge<'a>,
    /// Node.
    node: &'a dyn Node,
    /// Depth. The starting node is depth 0.
    depth: usize,
    /// Whether the node is the last child of its parent.
    is_last_child: bool,
}

impl<'a> Visit<'a> {
    /// Returns the edge from the parent.
    #[inline]
    #[must_use]
    pub fn edge(&self) -> Edge<'a> {
        self.edge
    }

    /// Returns the node.
    #[inline]
    #[must_use]
    pub fn node(&self) -> &'a dyn Node {
        self.node
    }

    /// Returns the depth. The starting node is depth 0.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if the node is the last child of its parent.
    ///
    /// The starting node is always the last.
    #[inline]
    #[must_use]
    pub fn is_last_child(&self) -> bool {
        self.is_last_child
    }
}

/// Remaining children of an open node.
#[derive(Debug, Clone)]
enum Children<'a> {
    /// Payload node: no children.
    Leaf,
    /// Entries of a keyed collection.
    Keyed(keyed::Iter<'a>),
    /// Children of an ordered collection.
    Ordered(iter::Enumerate<ordered::Iter<'a>>),
}

impl<'a> Children<'a> {
    /// Creates the child iterator for the node.
    #[must_use]
    fn of(node: &'a dyn Node) -> Self {
        if let Some(keyed) = node.as_keyed() {
            Self::Keyed(keyed.iter())
        } else if let Some(ordered) = node.as_ordered() {
            Self::Ordered(ordered.iter().enumerate())
        } else {
            Self::Leaf
        }
    }

    /// Returns the next child, its edge, and whether it is the last one.
    fn next(&mut self) -> Option<(Edge<'a>, &'a dyn Node, bool)> {
        match self {
            Self::Leaf => None,
            Self::Keyed(iter) => {
                let pair = iter.next()?;
                Some((Edge::Key(pair.key()), pair.value(), iter.len() == 0))
            }
            Self::Ordered(iter) => {
                let (index, node) = iter.next()?;
                Some((Edge::Index(index), node, iter.len() == 0))
            }
        }
    }
}

/// Open node on the traversal stack.
#[derive(Debug, Clone)]
struct Frame<'a> {
    /// The node.
    visit: Visit<'a>,
    /// Children not yet visited.
    children: Children<'a>,
}

/// Iterator for depth-first traversal of a heterogeneous tree.
///
/// Children of [`KeyedNode`]s and [`OrderedNode`]s are visited in their
/// iteration order. Every other node is treated as a leaf.
///
/// # Examples
///
/// ```
/// use hetree::traverse::{DftEvent, Edge};
/// use hetree::{KeyedNode, Node, NodeHandle, OrderedNode};
///
/// #[derive(Debug)]
/// struct Number(i64);
/// impl Node for Number {}
///
/// let mut list = OrderedNode::new();
/// list.add(NodeHandle::new(Number(1)))
///     .expect("should never fail: the handle is not empty");
/// let mut root = KeyedNode::new();
/// root.insert("list", NodeHandle::new(list))
///     .expect("should never fail: the handle is not empty");
///
/// let edges = root
///     .depth_first_traverse()
///     .map(|ev| ev.map(|visit| visit.edge()))
///     .collect::<Vec<_>>();
/// assert_eq!(
///     edges,
///     &[
///         DftEvent::Open(Edge::Root),
///         DftEvent::Open(Edge::Key("list")),
///         DftEvent::Open(Edge::Index(0)),
///         DftEvent::Close(Edge::Index(0)),
///         DftEvent::Close(Edge::Key("list")),
///         DftEvent::Close(Edge::Root),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DepthFirstTraverse<'a> {
    /// The starting node, until it is opened.
    toplevel: Option<&'a dyn Node>,
    /// Open nodes, innermost last.
    stack: Vec<Frame<'a>>,
}

impl<'a> DepthFirstTraverse<'a> {
    /// Creates a new iterator starting at the node.
    #[inline]
    #[must_use]
    pub fn with_toplevel(node: &'a dyn Node) -> Self {
        Self {
            toplevel: Some(node),
            stack: Vec::new(),
        }
    }

    /// Opens the node: pushes it to the stack and returns the open event.
    fn open(&mut self, visit: Visit<'a>) -> DftEvent<Visit<'a>> {
        self.stack.push(Frame {
            visit,
            children: Children::of(visit.node),
        });
        DftEvent::Open(visit)
    }
}

impl<'a> Iterator for DepthFirstTraverse<'a> {
    type Item = DftEvent<Visit<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.toplevel.take() {
            return Some(self.open(Visit {
                edge: Edge::Root,
                node,
                depth: 0,
                is_last_child: true,
            }));
        }

        let frame = self.stack.last_mut()?;
        match frame.children.next() {
            Some((edge, node, is_last_child)) => {
                let visit = Visit {
                    edge,
                    node,
                    depth: frame.visit.depth + 1,
                    is_last_child,
                };
                Some(self.open(visit))
            }
            None => {
                let frame = self
                    .stack
                    .pop()
                    .expect("[consistency] the frame has just been peeked");
                Some(DftEvent::Close(frame.visit))
            }
        }
    }
}

impl iter::FusedIterator for DepthFirstTraverse<'_> {}

impl dyn Node {
    /// Returns the depth-first traverser starting at this node.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> DepthFirstTraverse<'_> {
        DepthFirstTraverse::with_toplevel(self)
    }
}

impl KeyedNode {
    /// Returns the depth-first traverser starting at this collection.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> DepthFirstTraverse<'_> {
        DepthFirstTraverse::with_toplevel(self)
    }
}

impl OrderedNode {
    /// Returns the depth-first traverser starting at this collection.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> DepthFirstTraverse<'_> {
        DepthFirstTraverse::with_toplevel(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::node::NodeHandle;

    #[derive(Debug)]
    struct Number(i64);
    impl Node for Number {}

    #[test]
    fn leaf_opens_and_closes() {
        let leaf: Box<dyn Node> = Box::new(Number(1));
        let events = leaf
            .depth_first_traverse()
            .map(|ev| ev.map(|visit| (visit.edge(), visit.depth())))
            .collect::<Vec<_>>();
        assert_eq!(
            events,
            &[
                DftEvent::Open((Edge::Root, 0)),
                DftEvent::Close((Edge::Root, 0)),
            ]
        );
    }

    #[test]
    fn empty_collection_has_no_children() {
        let list = OrderedNode::new();
        assert_eq!(list.depth_first_traverse().count(), 2);
    }

    #[test]
    fn last_child_flags() {
        let mut list = OrderedNode::new();
        for n in 0..3 {
            list.add(NodeHandle::new(Number(n)))
                .expect("should never fail: the handle is not empty");
        }
        let flags = list
            .depth_first_traverse()
            .filter_map(|ev| match ev {
                DftEvent::Open(visit) if visit.depth() == 1 => Some(visit.is_last_child()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(flags, [false, false, true]);
    }

    #[test]
    fn fused_after_end() {
        let leaf: Box<dyn Node> = Box::new(Number(1));
        let mut iter = leaf.depth_first_traverse();
        assert!(iter.next().is_some());
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
