use std::collections::HashMap;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::id::CommitId;

use super::SnapshotStore;

/// Implementation of `SnapshotStore` that keeps a full copy of every snapshot.
#[derive(Debug, Default)]
pub struct FullSnapshots {
    snapshots: HashMap<CommitId, Vec<Entry>>,
}

impl SnapshotStore for FullSnapshots {
    fn put(&mut self, id: CommitId, _base: Option<CommitId>, entries: Vec<Entry>) -> Result<()> {
        if self.snapshots.contains_key(&id) {
            return Err(Error::Storage(format!("snapshot {} already stored", id)));
        }

        self.snapshots.insert(id, entries);
        Ok(())
    }

    fn get(&self, id: CommitId) -> Result<Vec<Entry>> {
        self.snapshots
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::Storage(format!("no snapshot stored for {}", id)))
    }

    fn contains(&self, id: CommitId) -> bool {
        self.snapshots.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.snapshots.len()
    }
}
