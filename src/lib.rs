//! Heterogeneous trees of owned nodes.
//!
//! A tree is made of boxed [`Node`] trait objects. Two collection node types
//! are provided:
//!
//! * [`KeyedNode`]: children addressed by unique string keys.
//! * [`OrderedNode`]: children addressed by contiguous positions.
//!
//! Any other `'static` type implementing [`Node`] is a payload, and can be
//! recovered from a `&dyn Node` by downcasting.
//!
//! Every node has exactly one owner. Nodes are handed to collections through
//! [`NodeHandle`]s, and dropping a collection drops its whole subtree.
//!
//! [`ObservableSequence`] is a standalone growable sequence that notifies
//! subscribers before and after each append.
//!
//! # Examples
//!
//! ```
//! use hetree::{KeyedNode, Node, NodeHandle, OrderedNode};
//!
//! #[derive(Debug)]
//! struct Number(i64);
//! impl Node for Number {}
//!
//! let mut list = OrderedNode::new();
//! list.add(NodeHandle::new(Number(42)))
//!     .expect("should never fail: the handle is not empty");
//!
//! let mut root = KeyedNode::new();
//! root.insert("list", NodeHandle::new(list))
//!     .expect("should never fail: the handle is not empty");
//!
//! let answer = root
//!     .get("list")
//!     .and_then(|node| node.as_ordered())
//!     .and_then(|list| list.get(0))
//!     .and_then(|node| node.downcast_ref::<Number>())
//!     .map(|n| n.0);
//! assert_eq!(answer, Some(42));
//! ```
//!
//! # Logging
//!
//! Mutations emit [`tracing`] events and spans at the `trace` and `debug`
//! levels. Nothing is printed unless the application installs a subscriber.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "debug-print")]
pub mod debug_print;
mod error;
pub mod keyed;
mod node;
pub mod observable;
pub mod ordered;
pub mod traverse;

pub use self::error::{NodeError, Result};
pub use self::keyed::{Insertion, KeyValuePair, KeyedNode};
pub use self::node::{AsAny, Node, NodeHandle};
pub use self::observable::{ObservableSequence, SubscriptionId};
pub use self::ordered::OrderedNode;
