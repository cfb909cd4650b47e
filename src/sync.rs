use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::checkout::{CheckoutMode, DetachedNode};
use crate::config::GraphConfig;
use crate::entry::Entry;
use crate::error::Result;
use crate::graph::{Graph, StagedNode};
use crate::id::CommitId;

/// A commit graph that can be shared between threads.
///
/// `commit` and `fork` hold the write lock for the duration of the call, so
/// concurrent mutations under the same parent are serialized. `checkout` and
/// the other readers hold the read lock and may run alongside each other,
/// but never observe a half-registered child list.
#[derive(Clone, Debug, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    /// Wrap an existing graph.
    pub fn new(graph: Graph) -> SharedGraph {
        SharedGraph {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Create an empty shared graph. See [`Graph::with_config`].
    pub fn with_config(config: GraphConfig) -> SharedGraph {
        SharedGraph::new(Graph::with_config(config))
    }

    /// See [`Graph::commit`].
    pub fn commit(
        &self,
        staged: StagedNode,
        entries: Vec<Entry>,
        parent: Option<CommitId>,
        branch_label: Option<String>,
    ) -> Result<CommitId> {
        self.inner
            .write()
            .commit(staged, entries, parent, branch_label)
    }

    /// See [`Graph::fork`].
    pub fn fork(&self, id: CommitId, name: &str) -> Result<CommitId> {
        self.inner.write().fork(id, name)
    }

    /// See [`Graph::checkout`].
    pub fn checkout(&self, id: CommitId, mode: CheckoutMode) -> Result<DetachedNode> {
        self.inner.read().checkout(id, mode)
    }

    /// See [`Graph::entries`].
    pub fn entries(&self, id: CommitId) -> Result<Vec<Entry>> {
        self.inner.read().entries(id)
    }

    /// Lock the graph for reading.
    ///
    /// Mutations from other threads wait until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.inner.read()
    }
}

impl From<Graph> for SharedGraph {
    fn from(graph: Graph) -> Self {
        SharedGraph::new(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use chrono::Utc;

    #[test]
    fn concurrent_commits_under_one_parent() {
        let shared = SharedGraph::default();
        let root = shared
            .commit(StagedNode::new("main"), vec![], None, None)
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|j| {
                            shared
                                .commit(
                                    StagedNode::new(format!("t{}-{}", i, j)),
                                    vec![Entry::file("f", "x", Utc::now())],
                                    Some(root),
                                    None,
                                )
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<CommitId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let graph = shared.read();
        assert_eq!(graph.len(), 201);

        let mut children = graph.children(root).unwrap().to_vec();
        children.sort();
        ids.sort();
        assert_eq!(children, ids);
    }

    #[test]
    fn concurrent_forks_with_one_name() {
        let shared = SharedGraph::default();
        let root = shared
            .commit(StagedNode::new("main"), vec![], None, None)
            .unwrap();
        let c = shared
            .commit(StagedNode::new("main"), vec![], Some(root), None)
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.fork(c, "dev").is_ok())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(shared.read().children(root).unwrap().len(), 2);
    }

    #[test]
    fn checkout_through_shared() {
        let shared: SharedGraph = Graph::new().into();
        let root = shared
            .commit(
                StagedNode::new("main"),
                vec![Entry::directory("src", Utc::now())],
                None,
                None,
            )
            .unwrap();

        let co = shared.checkout(root, CheckoutMode::SNAPSHOT).unwrap();
        assert_eq!(co.entries, shared.entries(root).unwrap());
    }
}
