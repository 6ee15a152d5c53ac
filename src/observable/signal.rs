//! Subscription registry.

use core::fmt;

use std::collections::BTreeMap;

/// Identifier of a subscription, returned when a handler is connected.
///
/// Identifiers are unique within one [`ObservableSequence`][`crate::ObservableSequence`]
/// across all of its notification points, and are never reused, even after
/// the handler is disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Source of subscription IDs, shared by the signals of one owner.
#[derive(Debug, Default, Clone)]
pub(crate) struct SubscriptionIds {
    /// Identifier for the next connection.
    next: u64,
}

impl SubscriptionIds {
    /// Creates a generator starting at the first ID.
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns a fresh ID.
    pub(crate) fn issue(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next = self
            .next
            .checked_add(1)
            .expect("[precondition] subscription ID overflowed");
        id
    }
}

/// Handlers connected to one notification point.
///
/// `F` is the unsized handler type, e.g. `dyn FnMut(&T, usize)`.
pub(crate) struct Signal<F: ?Sized> {
    /// Connected handlers.
    ///
    /// Identifiers grow monotonically, so the map order is the registration
    /// order.
    handlers: BTreeMap<SubscriptionId, Box<F>>,
}

impl<F: ?Sized> Signal<F> {
    /// Creates a signal without handlers.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Connects the handler under a fresh ID taken from `ids`.
    pub(crate) fn connect(&mut self, ids: &mut SubscriptionIds, handler: Box<F>) -> SubscriptionId {
        let id = ids.issue();
        let prev = self.handlers.insert(id, handler);
        debug_assert!(
            prev.is_none(),
            "[consistency] subscription IDs must not be reused"
        );

        id
    }

    /// Disconnects the handler.
    ///
    /// Returns false if no handler is connected to this signal with the ID.
    pub(crate) fn disconnect(&mut self, id: SubscriptionId) -> bool {
        self.handlers.remove(&id).is_some()
    }

    /// Returns the number of connected handlers.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns the handlers in registration order.
    pub(crate) fn handlers_mut(&mut self) -> impl Iterator<Item = &mut Box<F>> + '_ {
        self.handlers.values_mut()
    }
}

impl<F: ?Sized> Default for Signal<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Signal<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
