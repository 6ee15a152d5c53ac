//! Sequence publishing notifications around appends.

mod signal;

use core::fmt;
use core::slice;

use tracing::{instrument, trace};

use crate::error::Result;

use self::signal::{Signal, SubscriptionIds};
pub use self::signal::SubscriptionId;

/// Handler notified before an append: the value and the position it will
/// occupy.
type AboutToInsert<T> = dyn FnMut(&T, usize);
/// Handler notified after an append: the position and the stored value.
type Inserted<T> = dyn FnMut(usize, &T);

/// Growable sequence publishing "about to insert" and "inserted"
/// notifications around each append.
///
/// Notifications are delivered synchronously on the caller's thread, to the
/// handlers of each notification point in registration order.
///
/// Handlers only get shared references to the values, and the sequence stays
/// mutably borrowed during [`push_back`][`Self::push_back`], so a handler
/// cannot modify the sequence that is notifying it.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use hetree::ObservableSequence;
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let mut seq: ObservableSequence<&str> = ObservableSequence::new();
///
/// let about = Rc::clone(&log);
/// seq.on_about_to_insert(move |value, index| {
///     about.borrow_mut().push(format!("about to insert {} at {}", value, index));
/// });
/// let done = Rc::clone(&log);
/// seq.on_inserted(move |index, value| {
///     done.borrow_mut().push(format!("inserted {} at {}", value, index));
/// });
///
/// seq.push_back("a");
/// assert_eq!(
///     *log.borrow(),
///     ["about to insert a at 0", "inserted a at 0"]
/// );
/// ```
pub struct ObservableSequence<T> {
    /// Values.
    items: Vec<T>,
    /// Handlers notified before an append.
    about_to_insert: Signal<AboutToInsert<T>>,
    /// Handlers notified after an append.
    inserted: Signal<Inserted<T>>,
    /// Subscription IDs shared by both notification points.
    ids: SubscriptionIds,
}

impl<T> ObservableSequence<T> {
    /// Creates a new empty sequence without subscribers.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty sequence with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            about_to_insert: Signal::new(),
            inserted: Signal::new(),
            ids: SubscriptionIds::new(),
        }
    }

    /// Subscribes to the notification sent before each append.
    ///
    /// The handler receives the value and the position it is going to
    /// occupy, which equals the length before the append.
    pub fn on_about_to_insert<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&T, usize) + 'static,
    {
        self.about_to_insert.connect(&mut self.ids, Box::new(handler))
    }

    /// Subscribes to the notification sent after each append.
    ///
    /// The handler receives the position of the new value and the stored
    /// value itself.
    pub fn on_inserted<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(usize, &T) + 'static,
    {
        self.inserted.connect(&mut self.ids, Box::new(handler))
    }

    /// Unsubscribes a handler registered by
    /// [`on_about_to_insert`][`Self::on_about_to_insert`].
    ///
    /// Returns false if there is no such subscription, including when the ID
    /// was returned by [`on_inserted`][`Self::on_inserted`].
    pub fn off_about_to_insert(&mut self, id: SubscriptionId) -> bool {
        self.about_to_insert.disconnect(id)
    }

    /// Unsubscribes a handler registered by [`on_inserted`][`Self::on_inserted`].
    ///
    /// Returns false if there is no such subscription, including when the ID
    /// was returned by [`on_about_to_insert`][`Self::on_about_to_insert`].
    pub fn off_inserted(&mut self, id: SubscriptionId) -> bool {
        self.inserted.disconnect(id)
    }

    /// Returns the total number of subscriptions of both notification points.
    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.about_to_insert.len() + self.inserted.len()
    }

    /// Appends the value and returns its position.
    ///
    /// Storage is reserved before any handler runs, so every call delivers
    /// exactly one "about to insert" and one "inserted" notification.
    ///
    /// If an "about to insert" handler panics, the value is dropped and the
    /// sequence is unchanged. If an "inserted" handler panics, the value
    /// stays stored and the remaining handlers are skipped.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows, like [`Vec::push`]. Use
    /// [`try_push_back`][`Self::try_push_back`] to handle that case.
    #[instrument(level = "trace", skip_all, fields(index = self.items.len()))]
    pub fn push_back(&mut self, value: T) -> usize {
        self.items.reserve(1);
        self.append_reserved(value)
    }

    /// Appends the value and returns its position, failing if storage cannot
    /// be reserved.
    ///
    /// # Errors
    ///
    /// * [`NodeError::Allocation`][`crate::NodeError::Allocation`]
    ///     + In case storage for the new value cannot be reserved. No
    ///       notification is sent and the sequence is unchanged.
    #[instrument(level = "trace", skip_all, fields(index = self.items.len()))]
    pub fn try_push_back(&mut self, value: T) -> Result<usize> {
        self.items.try_reserve(1)?;
        Ok(self.append_reserved(value))
    }

    /// Notifies, appends, and notifies again.
    ///
    /// The caller must have reserved capacity for one more value.
    fn append_reserved(&mut self, value: T) -> usize {
        debug_assert!(
            self.items.capacity() > self.items.len(),
            "[precondition] capacity must be reserved before notifying"
        );
        let index = self.items.len();

        trace!(
            subscribers = self.about_to_insert.len(),
            "notifying about-to-insert"
        );
        for handler in self.about_to_insert.handlers_mut() {
            handler(&value, index);
        }

        self.items.push(value);

        trace!(subscribers = self.inserted.len(), "notifying inserted");
        let stored = &self.items[index];
        for handler in self.inserted.handlers_mut() {
            handler(index, stored);
        }

        index
    }

    /// Returns the first value.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns the last value.
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the value at the position.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the number of values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the values as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator of the values.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for ObservableSequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a sequence holding the values, without subscribers.
impl<T> From<Vec<T>> for ObservableSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            about_to_insert: Signal::new(),
            inserted: Signal::new(),
            ids: SubscriptionIds::new(),
        }
    }
}

/// Appends each value with [`push_back`][`ObservableSequence::push_back`],
/// notifying subscribers once per value.
impl<T> Extend<T> for ObservableSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a ObservableSequence<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableSequence")
            .field("items", &self.items)
            .field("about_to_insert", &self.about_to_insert)
            .field("inserted", &self.inserted)
            .finish()
    }
}
