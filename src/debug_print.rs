//! Debug printer.

use core::fmt::{self, Write as _};

use crate::keyed::KeyedNode;
use crate::node::Node;
use crate::ordered::OrderedNode;
use crate::traverse::{DftEvent, Edge, Visit};

/// Guide line segments for one ancestor level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Guide {
    /// Whether the ancestor at this level is the last child of its parent.
    is_last_child: bool,
}

impl Guide {
    /// Returns the segment drawn on the line of the node itself.
    fn branch(self) -> &'static str {
        if self.is_last_child {
            "`-- "
        } else {
            "|-- "
        }
    }

    /// Returns the segment drawn on the lines of descendants.
    fn continuation(self) -> &'static str {
        if self.is_last_child {
            "    "
        } else {
            "|   "
        }
    }
}

/// Writes a one-line label for the node.
///
/// Collections are shown as `{}` or `[]` with their length, and every other
/// node with its `Debug` output.
fn write_label(f: &mut fmt::Formatter<'_>, visit: &Visit<'_>) -> fmt::Result {
    match visit.edge() {
        Edge::Root => {}
        Edge::Key(key) => write!(f, "{:?}: ", key)?,
        Edge::Index(index) => write!(f, "[{}]: ", index)?,
    }

    let node = visit.node();
    if let Some(keyed) = node.as_keyed() {
        write!(f, "{{}} ({})", keyed.len())
    } else if let Some(ordered) = node.as_ordered() {
        write!(f, "[] ({})", ordered.len())
    } else {
        let mut line = String::new();
        write!(line, "{:?}", node)?;
        // Keep one node per line even if the payload prints newlines.
        f.write_str(&line.replace('\n', " "))
    }
}

/// Tree printer for debugging.
///
/// This is provided mainly for debugging purpose. Note that the output format
/// is not guaranteed to be stable, and any format changes won't be considered
/// as breaking changes.
///
/// # Examples
///
/// ```
/// use hetree::{KeyedNode, Node, NodeHandle, OrderedNode};
///
/// #[derive(Debug)]
/// struct Number(i64);
/// impl Node for Number {}
///
/// let mut list = OrderedNode::new();
/// list.add(NodeHandle::new(Number(1)))
///     .expect("should never fail: the handle is not empty");
/// list.add(NodeHandle::new(Number(2)))
///     .expect("should never fail: the handle is not empty");
/// let mut root = KeyedNode::new();
/// root.insert("list", NodeHandle::new(list))
///     .expect("should never fail: the handle is not empty");
/// root.insert("n", NodeHandle::new(Number(3)))
///     .expect("should never fail: the handle is not empty");
///
/// let expected = "\
/// {} (2)
/// |-- \"list\": [] (2)
/// |   |-- [0]: Number(1)
/// |   `-- [1]: Number(2)
/// `-- \"n\": Number(3)";
/// assert_eq!(root.debug_print().to_string(), expected);
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "debug-print")))]
#[derive(Clone, Copy)]
pub struct DebugPrint<'a> {
    /// Root node of the (sub)tree to print.
    node: &'a dyn Node,
}

impl<'a> DebugPrint<'a> {
    /// Creates a new `DebugPrint` object for the node.
    #[inline]
    #[must_use]
    pub(crate) fn new(node: &'a dyn Node) -> Self {
        Self { node }
    }
}

impl fmt::Display for DebugPrint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut guides: Vec<Guide> = Vec::new();

        for ev in self.node.depth_first_traverse() {
            let visit = match ev {
                DftEvent::Open(visit) => visit,
                DftEvent::Close(visit) => {
                    if visit.depth() > 0 {
                        guides.pop();
                    }
                    continue;
                }
            };

            if visit.depth() > 0 {
                f.write_char('\n')?;
                for guide in &guides {
                    f.write_str(guide.continuation())?;
                }
                let guide = Guide {
                    is_last_child: visit.is_last_child(),
                };
                f.write_str(guide.branch())?;
                guides.push(guide);
            }
            write_label(f, &visit)?;
        }

        Ok(())
    }
}

impl fmt::Debug for DebugPrint<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl dyn Node {
    /// Returns the pretty-printable proxy object to the subtree.
    ///
    /// This is provided mainly for debugging purpose. Note that the output
    /// format is not guaranteed to be stable.
    #[cfg_attr(docsrs, doc(cfg(feature = "debug-print")))]
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'_> {
        DebugPrint::new(self)
    }
}

impl KeyedNode {
    /// Returns the pretty-printable proxy object to the subtree.
    #[cfg_attr(docsrs, doc(cfg(feature = "debug-print")))]
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'_> {
        DebugPrint::new(self)
    }
}

impl OrderedNode {
    /// Returns the pretty-printable proxy object to the subtree.
    #[cfg_attr(docsrs, doc(cfg(feature = "debug-print")))]
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'_> {
        DebugPrint::new(self)
    }
}
