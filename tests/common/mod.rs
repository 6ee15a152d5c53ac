//! Helpers shared by integration tests.

// Each test binary uses a different subset of the helpers.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

use hetree::{Node, NodeHandle};
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

/// Guards the global subscriber installation.
static TEST_SETUP: Once = Once::new();

/// Installs the tracing subscriber once per test binary.
///
/// The filter is read from `RUST_LOG` and defaults to `trace`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );
        if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
    });
}

/// Payload node holding a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf(pub i64);

impl Node for Leaf {}

/// Returns a handle owning a [`Leaf`].
pub fn leaf(n: i64) -> NodeHandle {
    NodeHandle::new(Leaf(n))
}

/// Returns the number of a [`Leaf`] node.
///
/// # Panics
///
/// Panics if the node is not a `Leaf`.
pub fn leaf_value(node: &dyn Node) -> i64 {
    node.downcast_ref::<Leaf>()
        .expect("the node should be a `Leaf`")
        .0
}

/// Payload node counting how many times it has been dropped.
#[derive(Debug)]
pub struct DropCounter {
    /// Shared drop count.
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    /// Creates a counter node sharing the count.
    pub fn new(drops: &Rc<Cell<usize>>) -> Self {
        Self {
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

impl Node for DropCounter {}
