//! Keyed collection node.

use core::iter;

use std::collections::btree_map::{self, BTreeMap, Entry};

use tracing::{debug, instrument, trace};

use crate::error::{NodeError, Result};
use crate::node::{Node, NodeHandle};

/// Key type of [`KeyedNode`].
pub type Key = String;

/// Entry of a [`KeyedNode`]: a key and the node it owns.
///
/// The key cannot be changed through the pair, so a reference to it stays
/// valid for as long as the entry is borrowed.
#[derive(Debug)]
pub struct KeyValuePair {
    /// Key.
    key: Key,
    /// Owned child node.
    value: Box<dyn Node>,
}

impl KeyValuePair {
    /// Returns the key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the child node.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &dyn Node {
        &*self.value
    }

    /// Returns the child node mutably.
    #[inline]
    #[must_use]
    pub fn value_mut(&mut self) -> &mut dyn Node {
        &mut *self.value
    }
}

/// Outcome of [`KeyedNode::insert`].
#[derive(Debug)]
pub enum Insertion<'a> {
    /// The node was stored under a new key.
    Inserted(&'a mut KeyValuePair),
    /// The key was already present. The collection is unchanged.
    Occupied {
        /// Entry already stored under the key.
        existing: &'a mut KeyValuePair,
        /// The node that was not inserted, handed back to the caller.
        rejected: NodeHandle,
    },
}

impl<'a> Insertion<'a> {
    /// Returns true if the node has been stored.
    #[inline]
    #[must_use]
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }

    /// Returns the entry stored under the key.
    ///
    /// This is the new entry on success and the pre-existing one otherwise.
    #[inline]
    #[must_use]
    pub fn entry(&self) -> &KeyValuePair {
        match self {
            Self::Inserted(entry) => &**entry,
            Self::Occupied { existing, .. } => &**existing,
        }
    }

    /// Converts the outcome into the entry stored under the key.
    ///
    /// **The rejected node of an [`Occupied`][`Self::Occupied`] outcome is
    /// dropped.** Use [`into_parts`][`Self::into_parts`] to keep both, or
    /// [`into_rejected`][`Self::into_rejected`] to keep the node only.
    #[inline]
    #[must_use]
    pub fn into_entry(self) -> &'a mut KeyValuePair {
        self.into_parts().0
    }

    /// Splits the outcome into the entry stored under the key and the
    /// rejected node, if any.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (&'a mut KeyValuePair, Option<NodeHandle>) {
        match self {
            Self::Inserted(entry) => (entry, None),
            Self::Occupied { existing, rejected } => (existing, Some(rejected)),
        }
    }

    /// Returns the rejected node, if the key was already present.
    #[inline]
    #[must_use]
    pub fn into_rejected(self) -> Option<NodeHandle> {
        match self {
            Self::Inserted(_) => None,
            Self::Occupied { rejected, .. } => Some(rejected),
        }
    }
}

/// Node owning children by string keys.
///
/// Iteration order is an implementation detail: consumers must not depend on
/// it.
///
/// # Examples
///
/// ```
/// use hetree::{KeyedNode, Node, NodeHandle};
///
/// #[derive(Debug)]
/// struct Text(&'static str);
/// impl Node for Text {}
///
/// let mut map = KeyedNode::new();
/// let outcome = map
///     .insert("greeting", NodeHandle::new(Text("hello")))
///     .expect("should never fail: the handle is not empty");
/// assert!(outcome.is_inserted());
///
/// let entry = map.find("greeting").expect("the key has just been inserted");
/// assert_eq!(entry.key(), "greeting");
/// assert!(entry.value().is::<Text>());
/// ```
#[derive(Debug, Default)]
pub struct KeyedNode {
    /// Entries.
    entries: BTreeMap<Key, KeyValuePair>,
}

impl Node for KeyedNode {}

impl KeyedNode {
    /// Creates a new empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the node under the key, taking ownership of it.
    ///
    /// If the key is already present the collection is not modified and the
    /// node comes back in [`Insertion::Occupied`], so the caller can insert
    /// it somewhere else. Keys of erased entries can be reused.
    ///
    /// # Errors
    ///
    /// * [`NodeError::EmptyNode`]
    ///     + In case the handle is empty. The collection is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use hetree::{KeyedNode, Node, NodeError, NodeHandle};
    ///
    /// #[derive(Debug)]
    /// struct Number(i64);
    /// impl Node for Number {}
    ///
    /// let mut map = KeyedNode::new();
    /// map.insert("n", NodeHandle::new(Number(1)))
    ///     .expect("should never fail: the handle is not empty");
    ///
    /// let rejected = map
    ///     .insert("n", NodeHandle::new(Number(2)))
    ///     .expect("should never fail: the handle is not empty")
    ///     .into_rejected()
    ///     .expect("the key is already present");
    /// assert!(!rejected.is_empty());
    /// assert_eq!(map.len(), 1);
    ///
    /// assert_eq!(
    ///     map.insert("m", NodeHandle::empty()).map(|outcome| outcome.is_inserted()),
    ///     Err(NodeError::EmptyNode)
    /// );
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn insert<K: Into<Key>>(&mut self, key: K, node: NodeHandle) -> Result<Insertion<'_>> {
        let key = key.into();
        let value = match node.into_inner() {
            Some(value) => value,
            None => {
                debug!(key = %key, "rejected an empty node handle");
                return Err(NodeError::EmptyNode);
            }
        };

        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                trace!(key = %slot.key(), "inserted a new entry");
                let pair = KeyValuePair {
                    key: slot.key().clone(),
                    value,
                };
                Ok(Insertion::Inserted(slot.insert(pair)))
            }
            Entry::Occupied(slot) => {
                trace!(key = %slot.key(), "key is already present");
                Ok(Insertion::Occupied {
                    existing: slot.into_mut(),
                    rejected: NodeHandle::from(value),
                })
            }
        }
    }

    /// Returns the entry for the key.
    #[inline]
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&KeyValuePair> {
        self.entries.get(key)
    }

    /// Returns the entry for the key mutably.
    #[inline]
    #[must_use]
    pub fn find_mut(&mut self, key: &str) -> Option<&mut KeyValuePair> {
        self.entries.get_mut(key)
    }

    /// Returns the child node for the key.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn Node> {
        self.find(key).map(KeyValuePair::value)
    }

    /// Returns the child node for the key mutably.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut dyn Node> {
        self.find_mut(key).map(KeyValuePair::value_mut)
    }

    /// Returns true if the key is present.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the entry for the key and drops its subtree.
    ///
    /// Returns the number of removed entries, i.e. 0 or 1.
    #[instrument(level = "trace", skip(self))]
    pub fn erase(&mut self, key: &str) -> usize {
        let removed = usize::from(self.entries.remove(key).is_some());
        trace!(removed, "erased");
        removed
    }

    /// Removes all entries and drops their subtrees.
    #[instrument(level = "trace", skip(self), fields(len = self.entries.len()))]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator of the entries.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.values(),
        }
    }

    /// Returns an iterator of the entries, with mutable access to the nodes.
    #[inline]
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            inner: self.entries.values_mut(),
        }
    }

    /// Returns an iterator of the keys.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self.entries.keys(),
        }
    }
}

impl<'a> IntoIterator for &'a KeyedNode {
    type Item = &'a KeyValuePair;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut KeyedNode {
    type Item = &'a mut KeyValuePair;
    type IntoIter = IterMut<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Double-ended iterator of the entries of a [`KeyedNode`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Storage iterator.
    inner: btree_map::Values<'a, Key, KeyValuePair>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a KeyValuePair;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl iter::FusedIterator for Iter<'_> {}

/// Double-ended iterator of the entries of a [`KeyedNode`], with mutable
/// access to the nodes.
#[derive(Debug)]
pub struct IterMut<'a> {
    /// Storage iterator.
    inner: btree_map::ValuesMut<'a, Key, KeyValuePair>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut KeyValuePair;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for IterMut<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for IterMut<'_> {}

impl iter::FusedIterator for IterMut<'_> {}

/// Double-ended iterator of the keys of a [`KeyedNode`].
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    /// Storage iterator.
    inner: btree_map::Keys<'a, Key, KeyValuePair>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Keys<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl iter::FusedIterator for Keys<'_> {}
