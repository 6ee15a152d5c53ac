//! Node capability and owning handle.

use core::any::Any;
use core::fmt;

use crate::keyed::KeyedNode;
use crate::ordered::OrderedNode;

/// Conversion to [`Any`] for dynamic type inspection.
///
/// This is implemented for every `'static` type, so node types never
/// implement it by hand.
pub trait AsAny: Any {
    /// Returns the value as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Returns the value as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Converts the boxed value into `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A tree element.
///
/// The trait has no operations of its own. Concrete payload types implement
/// it with an empty `impl` block, and consumers reach them by downcasting a
/// `dyn Node`.
///
/// A boxed node is dropped through its vtable, so dropping a `Box<dyn Node>`
/// always runs the `Drop` of the concrete type.
///
/// # Examples
///
/// ```
/// use hetree::Node;
///
/// #[derive(Debug)]
/// struct Number(f64);
/// impl Node for Number {}
///
/// let node: Box<dyn Node> = Box::new(Number(0.5));
/// assert!(node.is::<Number>());
/// assert_eq!(node.downcast_ref::<Number>().map(|n| n.0), Some(0.5));
/// ```
pub trait Node: AsAny + fmt::Debug + 'static {}

impl dyn Node {
    /// Returns true if the concrete type of the node is `T`.
    #[inline]
    #[must_use]
    pub fn is<T: Node>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Returns a reference to the concrete node if it is a `T`.
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns a mutable reference to the concrete node if it is a `T`.
    #[inline]
    #[must_use]
    pub fn downcast_mut<T: Node>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Converts the boxed node into the concrete type.
    ///
    /// Returns the box unchanged if the node is not a `T`.
    pub fn downcast<T: Node>(self: Box<Self>) -> Result<Box<T>, Box<dyn Node>> {
        if !self.is::<T>() {
            return Err(self);
        }
        Ok(self
            .into_any()
            .downcast::<T>()
            .expect("[consistency] the concrete type has just been checked"))
    }

    /// Returns the node as a keyed collection, if it is one.
    #[inline]
    #[must_use]
    pub fn as_keyed(&self) -> Option<&KeyedNode> {
        self.downcast_ref::<KeyedNode>()
    }

    /// Returns the node as a mutable keyed collection, if it is one.
    #[inline]
    #[must_use]
    pub fn as_keyed_mut(&mut self) -> Option<&mut KeyedNode> {
        self.downcast_mut::<KeyedNode>()
    }

    /// Returns the node as an ordered collection, if it is one.
    #[inline]
    #[must_use]
    pub fn as_ordered(&self) -> Option<&OrderedNode> {
        self.downcast_ref::<OrderedNode>()
    }

    /// Returns the node as a mutable ordered collection, if it is one.
    #[inline]
    #[must_use]
    pub fn as_ordered_mut(&mut self) -> Option<&mut OrderedNode> {
        self.downcast_mut::<OrderedNode>()
    }
}

/// Owning handle to a node, possibly empty.
///
/// Collections take handles by value, so a node that has been moved into a
/// collection cannot be reached through its old handle any more. An empty
/// handle is rejected by [`KeyedNode::insert`] and [`OrderedNode::add`]
/// with [`NodeError::EmptyNode`][`crate::NodeError::EmptyNode`].
///
/// # Examples
///
/// ```
/// use hetree::{Node, NodeHandle};
///
/// #[derive(Debug)]
/// struct Flag(bool);
/// impl Node for Flag {}
///
/// let handle = NodeHandle::new(Flag(true));
/// assert!(!handle.is_empty());
///
/// let empty = NodeHandle::empty();
/// assert!(empty.is_empty());
/// assert!(empty.get().is_none());
/// ```
#[derive(Debug, Default)]
pub struct NodeHandle {
    /// Owned node.
    node: Option<Box<dyn Node>>,
}

impl NodeHandle {
    /// Creates a handle owning the given node.
    #[inline]
    #[must_use]
    pub fn new<N: Node>(node: N) -> Self {
        Self {
            node: Some(Box::new(node)),
        }
    }

    /// Creates an empty handle.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self { node: None }
    }

    /// Returns true if the handle owns no node.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Returns a reference to the owned node.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&dyn Node> {
        self.node.as_deref()
    }

    /// Returns a mutable reference to the owned node.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut dyn Node> {
        self.node.as_deref_mut()
    }

    /// Moves the node out, leaving this handle empty.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            node: self.node.take(),
        }
    }

    /// Releases the owned node.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Option<Box<dyn Node>> {
        self.node
    }
}

impl From<Box<dyn Node>> for NodeHandle {
    #[inline]
    fn from(node: Box<dyn Node>) -> Self {
        Self { node: Some(node) }
    }
}

impl From<Option<Box<dyn Node>>> for NodeHandle {
    #[inline]
    fn from(node: Option<Box<dyn Node>>) -> Self {
        Self { node }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Text(&'static str);
    impl Node for Text {}

    #[derive(Debug)]
    struct Other;
    impl Node for Other {}

    #[test]
    fn downcast_through_trait_object() {
        let mut node: Box<dyn Node> = Box::new(Text("hello"));
        assert!(node.is::<Text>());
        assert!(!node.is::<Other>());
        assert_eq!(node.downcast_ref::<Text>(), Some(&Text("hello")));
        assert!(node.downcast_ref::<Other>().is_none());

        node.downcast_mut::<Text>()
            .expect("should never fail: the node is a `Text`")
            .0 = "world";
        assert_eq!(node.downcast_ref::<Text>(), Some(&Text("world")));
    }

    #[test]
    fn boxed_downcast_returns_box_on_mismatch() {
        let node: Box<dyn Node> = Box::new(Text("kept"));
        let node = node
            .downcast::<Other>()
            .expect_err("`Text` is not `Other`");
        let text = node
            .downcast::<Text>()
            .expect("should never fail: the node is a `Text`");
        assert_eq!(*text, Text("kept"));
    }

    #[test]
    fn collection_views() {
        let keyed: Box<dyn Node> = Box::new(KeyedNode::new());
        assert!(keyed.as_keyed().is_some());
        assert!(keyed.as_ordered().is_none());

        let ordered: Box<dyn Node> = Box::new(OrderedNode::new());
        assert!(ordered.as_ordered().is_some());
        assert!(ordered.as_keyed().is_none());
    }

    #[test]
    fn handle_get_mut_modifies_owned_node() {
        let mut handle = NodeHandle::new(Text("before"));
        handle
            .get_mut()
            .and_then(|node| node.downcast_mut::<Text>())
            .expect("should never fail: the handle owns a `Text`")
            .0 = "after";
        assert_eq!(
            handle.get().and_then(|node| node.downcast_ref::<Text>()),
            Some(&Text("after"))
        );
        assert!(NodeHandle::empty().get_mut().is_none());
    }

    #[test]
    fn handle_take_leaves_empty() {
        let mut handle = NodeHandle::new(Text("moved"));
        let moved = handle.take();
        assert!(handle.is_empty());
        assert!(!moved.is_empty());
        assert!(moved
            .get()
            .map_or(false, |node| node.is::<Text>()));
        assert!(NodeHandle::from(None).is_empty());
        assert!(NodeHandle::default().into_inner().is_none());
    }
}
