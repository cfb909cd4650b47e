//! Pluggable storage of commit snapshots.
//!
//! ## Design Goals
//!
//! The commit graph doesn't care whether a snapshot is kept as a full copy
//! or as a delta against its parent. A struct that implements
//! [`SnapshotStore`] decides that. Two in-memory stores are built in:
//! [`FullSnapshots`] and [`DeltaSnapshots`]. You could envision stores backed
//! by a database or a remote service; those live outside this crate.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::Result;
use crate::id::CommitId;

mod delta;
pub use delta::{DeltaSnapshots, DEFAULT_KEYFRAME_INTERVAL};

mod full;
pub use full::FullSnapshots;

/// A struct that implements the `SnapshotStore` trait represents a particular
/// mechanism for keeping the entry list of each commit.
///
/// `put` is called exactly once per commit, after the snapshot has been
/// validated. `base` names the commit the new snapshot is most likely to
/// resemble (its parent); a store may ignore it.
pub trait SnapshotStore: Send + Sync {
    /// Record the complete, ordered snapshot of commit `id`.
    fn put(&mut self, id: CommitId, base: Option<CommitId>, entries: Vec<Entry>) -> Result<()>;

    /// Return the complete, ordered snapshot of commit `id`.
    fn get(&self, id: CommitId) -> Result<Vec<Entry>>;

    /// Returns true if a snapshot has been recorded for `id`.
    fn contains(&self, id: CommitId) -> bool;

    /// Returns the number of snapshots recorded.
    fn len(&self) -> usize;

    /// Returns true if no snapshots have been recorded.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selects one of the built-in snapshot stores.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStrategy {
    /// Every commit keeps a full copy of its entries.
    Full,

    /// Every commit keeps only what changed relative to its parent.
    Delta,
}

impl Default for StorageStrategy {
    fn default() -> Self {
        StorageStrategy::Full
    }
}

impl StorageStrategy {
    /// Create an empty store of this kind.
    pub fn new_store(self) -> Box<dyn SnapshotStore> {
        match self {
            StorageStrategy::Full => Box::new(FullSnapshots::default()),
            StorageStrategy::Delta => Box::new(DeltaSnapshots::default()),
        }
    }
}
