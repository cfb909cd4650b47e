//! Represents the tree of commits that makes up a repository's history.
//!
//! ## Design Goals
//!
//! Nodes live in an arena owned by [`Graph`] and refer to each other by
//! [`CommitId`]. A parent lists its children; a child records its parent's
//! ID. No node holds a reference to another node, so there are no ownership
//! cycles and any node can be looked up directly.
//!
//! Branch labels are metadata only. Nodes sharing a label form one logical
//! branch even when they aren't adjacent; [`Graph::branch`] finds them.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;

use crate::config::GraphConfig;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::id::CommitId;
use crate::name::check_snapshot;
use crate::storage::SnapshotStore;

mod node;
pub use node::{Node, StagedNode};

/// An in-memory commit graph.
///
/// Mutating operations (`commit`, `fork`) take `&mut self`; read-only
/// operations (`checkout`, accessors) take `&self`. Use
/// [`SharedGraph`](crate::SharedGraph) to share a graph between threads.
pub struct Graph {
    pub(crate) config: GraphConfig,
    pub(crate) nodes: HashMap<CommitId, Node>,
    order: Vec<CommitId>,
    store: Box<dyn SnapshotStore>,
}

impl Graph {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Graph {
        Graph::with_config(GraphConfig::default())
    }

    /// Create an empty graph using the snapshot store named by `config.storage`.
    pub fn with_config(config: GraphConfig) -> Graph {
        let store = config.storage.new_store();
        Graph::with_store(config, store)
    }

    /// Create an empty graph that keeps its snapshots in a custom store.
    ///
    /// `config.storage` is ignored in this case.
    pub fn with_store(config: GraphConfig, store: Box<dyn SnapshotStore>) -> Graph {
        Graph {
            config,
            nodes: HashMap::new(),
            order: Vec::new(),
            store,
        }
    }

    /// Return the graph's configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Commit a staged node, making it a permanent part of the graph.
    ///
    /// `entries` is the node's complete snapshot. `parent`, if present, must be
    /// a node of this graph; the new node is appended to its children.
    /// `branch_label` overrides the label the node was staged with.
    ///
    /// Returns the new node's ID.
    pub fn commit(
        &mut self,
        staged: StagedNode,
        entries: Vec<Entry>,
        parent: Option<CommitId>,
        branch_label: Option<String>,
    ) -> Result<CommitId> {
        if let Some(parent) = parent {
            if !self.nodes.contains_key(&parent) {
                tracing::warn!(parent_id = %parent, "commit rejected: unknown parent");
                return Err(Error::NotCommitted(parent));
            }
        }

        if let Err(err) = check_snapshot(&entries, &self.config.platforms) {
            tracing::warn!(error = %err, "commit rejected");
            return Err(err);
        }

        let branch_label = branch_label.unwrap_or_else(|| staged.into_branch_label());
        let node = Node {
            id: CommitId::new(),
            branch_label,
            committed_at: Utc::now(),
            parent,
            children: Vec::new(),
        };

        let id = self.register(node, entries)?;

        tracing::debug!(
            id = %id,
            branch = %self.nodes[&id].branch_label,
            parent_id = ?parent,
            "committed"
        );

        Ok(id)
    }

    // Store the snapshot and link the node into the arena and its parent's
    // children. Nothing is changed if any step fails.
    pub(crate) fn register(&mut self, node: Node, entries: Vec<Entry>) -> Result<CommitId> {
        let id = node.id;

        if self.nodes.contains_key(&id) || self.store.contains(id) {
            return Err(Error::invalid_commit(format!("commit ID {} is already in use", id)));
        }

        if let Some(parent) = node.parent {
            if !self.nodes.contains_key(&parent) {
                return Err(Error::NotCommitted(parent));
            }
        }

        self.store.put(id, node.parent, entries)?;

        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.push(id);
        }

        self.nodes.insert(id, node);
        self.order.push(id);

        Ok(id)
    }

    /// Return the node with the given ID, if it is part of the graph.
    pub fn get(&self, id: CommitId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Return the node with the given ID.
    ///
    /// Fails with `NotCommitted` if the ID isn't part of the graph.
    pub fn node(&self, id: CommitId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(Error::NotCommitted(id))
    }

    /// Returns true if the ID names a node of the graph.
    pub fn contains(&self, id: CommitId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Return a copy of the node's snapshot.
    pub fn entries(&self, id: CommitId) -> Result<Vec<Entry>> {
        self.node(id)?;
        self.store.get(id)
    }

    /// Return the ID of the node's parent (`None` for a root).
    pub fn parent(&self, id: CommitId) -> Result<Option<CommitId>> {
        Ok(self.node(id)?.parent)
    }

    /// Return the IDs of the node's children.
    pub fn children(&self, id: CommitId) -> Result<&[CommitId]> {
        Ok(&self.node(id)?.children)
    }

    /// Iterate from the node up to its root, starting with the node itself.
    ///
    /// Yields nothing if the ID isn't part of the graph.
    pub fn ancestors(&self, id: CommitId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: Some(id),
        }
    }

    /// Return the number of ancestors above the node. Roots have depth 0.
    pub fn depth(&self, id: CommitId) -> Result<usize> {
        self.node(id)?;
        Ok(self.ancestors(id).count() - 1)
    }

    /// Iterate over the root nodes, in commit order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> + '_ {
        self.iter().filter(|n| n.is_root())
    }

    /// Return the IDs of every node carrying `branch_label`, in commit order.
    pub fn branch(&self, branch_label: &str) -> Vec<CommitId> {
        self.iter()
            .filter(|n| n.branch_label == branch_label)
            .map(|n| n.id)
            .collect()
    }

    /// Iterate over every node, in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().map(move |id| &self.nodes[id])
    }

    /// Return the number of committed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("snapshots", &self.store.len())
            .finish()
    }
}

/// Iterator returned by [`Graph::ancestors`].
pub struct Ancestors<'a> {
    graph: &'a Graph,
    next: Option<CommitId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.graph.nodes.get(&self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}
