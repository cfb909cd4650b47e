use std::collections::HashMap;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::id::CommitId;

use super::SnapshotStore;

/// Number of consecutive deltas after which a full snapshot is stored.
pub const DEFAULT_KEYFRAME_INTERVAL: usize = 32;

/// Implementation of `SnapshotStore` that keeps each snapshot as a delta
/// against its base snapshot.
///
/// Entries that are unchanged from the base are recorded as a position in the
/// base's snapshot; everything else is recorded in full. Every
/// `keyframe_interval` links along a chain, the snapshot is stored in full
/// instead, so reading any snapshot replays at most that many deltas.
#[derive(Debug)]
pub struct DeltaSnapshots {
    deltas: HashMap<CommitId, Delta>,
    keyframe_interval: usize,
}

#[derive(Debug)]
struct Delta {
    // `None` marks a full snapshot.
    base: Option<CommitId>,

    // Deltas between this one and the nearest full snapshot.
    run: usize,

    ops: Vec<Op>,
}

#[derive(Debug)]
enum Op {
    Keep(usize),
    Put(Entry),
}

impl Delta {
    fn full(entries: Vec<Entry>) -> Delta {
        Delta {
            base: None,
            run: 0,
            ops: entries.into_iter().map(Op::Put).collect(),
        }
    }

    fn apply(&self, base: &[Entry]) -> Result<Vec<Entry>> {
        self.ops
            .iter()
            .map(|op| match op {
                Op::Keep(i) => base.get(*i).cloned().ok_or_else(|| {
                    Error::Storage(format!("delta refers to missing base entry {}", i))
                }),
                Op::Put(entry) => Ok(entry.clone()),
            })
            .collect()
    }
}

impl DeltaSnapshots {
    /// Create an empty store that writes a full snapshot after every
    /// `keyframe_interval` deltas. An interval of 0 or 1 stores every
    /// snapshot in full.
    pub fn with_keyframe_interval(keyframe_interval: usize) -> DeltaSnapshots {
        DeltaSnapshots {
            deltas: HashMap::new(),
            keyframe_interval: keyframe_interval.max(1),
        }
    }

    /// Returns the number of entries stored in full across all deltas.
    pub fn stored_entries(&self) -> usize {
        self.deltas
            .values()
            .flat_map(|d| d.ops.iter())
            .filter(|op| matches!(op, Op::Put(_)))
            .count()
    }

    // Number of deltas `get` must apply to rebuild `id`.
    fn replay_len(&self, id: CommitId) -> Option<usize> {
        self.deltas.get(&id).map(|d| d.run + 1)
    }
}

impl Default for DeltaSnapshots {
    fn default() -> Self {
        DeltaSnapshots::with_keyframe_interval(DEFAULT_KEYFRAME_INTERVAL)
    }
}

impl SnapshotStore for DeltaSnapshots {
    fn put(&mut self, id: CommitId, base: Option<CommitId>, entries: Vec<Entry>) -> Result<()> {
        if self.deltas.contains_key(&id) {
            return Err(Error::Storage(format!("snapshot {} already stored", id)));
        }

        let base = match base {
            Some(base) => base,
            None => {
                self.deltas.insert(id, Delta::full(entries));
                return Ok(());
            }
        };

        let run = self
            .deltas
            .get(&base)
            .map(|d| d.run + 1)
            .ok_or_else(|| Error::Storage(format!("no snapshot stored for {}", base)))?;

        if run >= self.keyframe_interval {
            self.deltas.insert(id, Delta::full(entries));
            return Ok(());
        }

        let base_entries = self.get(base)?;
        let positions: HashMap<&str, usize> = base_entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name(), i))
            .collect();

        let ops = entries
            .into_iter()
            .map(|entry| match positions.get(entry.name()) {
                Some(&i) if base_entries[i] == entry => Op::Keep(i),
                _ => Op::Put(entry),
            })
            .collect();

        self.deltas.insert(
            id,
            Delta {
                base: Some(base),
                run,
                ops,
            },
        );
        Ok(())
    }

    fn get(&self, id: CommitId) -> Result<Vec<Entry>> {
        let mut chain = Vec::new();
        let mut next = Some(id);

        while let Some(id) = next {
            let delta = self
                .deltas
                .get(&id)
                .ok_or_else(|| Error::Storage(format!("no snapshot stored for {}", id)))?;
            chain.push(delta);
            next = delta.base;
        }

        chain
            .iter()
            .rev()
            .try_fold(Vec::new(), |snapshot, delta| delta.apply(&snapshot))
    }

    fn contains(&self, id: CommitId) -> bool {
        self.deltas.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.deltas.len()
    }
}
