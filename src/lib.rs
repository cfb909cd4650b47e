//! This crate implements the core data model of a minimal version-control
//! repository: a tree of commits, each holding a full snapshot of named file
//! and directory entries.
//!
//! A [`Graph`] is extended with [`Graph::commit`], copied with
//! [`Graph::checkout`], and branched with [`Graph::fork`]. Storage, transport
//! and any user-facing commands are left to the integrator.
//!
//! ```
//! use chrono::Utc;
//! use rscm::{CheckoutMode, Entry, Graph, StagedNode};
//!
//! let mut graph = Graph::new();
//! let root = graph
//!     .commit(StagedNode::new("main"), vec![Entry::file("a.txt", "hi", Utc::now())], None, None)
//!     .unwrap();
//! let next = graph
//!     .commit(StagedNode::new("main"), vec![Entry::file("b.txt", "bye", Utc::now())], Some(root), None)
//!     .unwrap();
//!
//! let dev = graph.fork(next, "dev").unwrap();
//! assert_eq!(graph.children(root).unwrap(), &[next, dev]);
//!
//! let history = graph.checkout(dev, CheckoutMode::HISTORY).unwrap();
//! assert_eq!(history.id, root);
//! assert_eq!(history.leaf().id, dev);
//! ```

pub mod checkout;
pub mod config;
pub mod entry;
mod error;
mod fork;
pub mod graph;
pub mod id;
pub mod name;
pub mod storage;
mod sync;

pub use checkout::{CheckoutMode, DetachedChildren, DetachedNode};
pub use config::{CloneDepth, GraphConfig};
pub use entry::{Entry, EntryKind};
pub use error::{Error, Result};
pub use graph::{Graph, Node, StagedNode};
pub use id::CommitId;
pub use sync::SharedGraph;
