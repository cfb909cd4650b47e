//! Branching off an alternate history next to an existing commit.

use crate::error::{Error, Result};
use crate::graph::{Graph, Node};
use crate::id::CommitId;

impl Graph {
    /// Create a sibling of the node `id` on a new branch.
    ///
    /// Forking duplicates a point in the repository's time, not the history
    /// that follows it: the new node gets a copy of the node's snapshot and
    /// commit time, a new ID, and the same parent. None of the node's
    /// children are copied and the node itself is left untouched.
    ///
    /// The name must be non-empty, differ from the node's own label, and not
    /// be carried by any other child of the same parent. Root nodes can't be
    /// forked.
    ///
    /// Returns the ID of the new node.
    pub fn fork(&mut self, id: CommitId, name: &str) -> Result<CommitId> {
        let node = self.node(id)?;

        if let Err(err) = check_fork(self, node, name) {
            tracing::warn!(id = %id, branch = %name, error = %err, "fork rejected");
            return Err(err);
        }

        let entries = self.entries(id)?;
        let fork = Node {
            id: CommitId::new(),
            branch_label: name.to_string(),
            committed_at: node.committed_at,
            parent: node.parent,
            children: Vec::new(),
        };

        let fork_id = self.register(fork, entries)?;

        tracing::debug!(from = %id, id = %fork_id, branch = %name, "forked");

        Ok(fork_id)
    }
}

fn check_fork(graph: &Graph, node: &Node, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidForkName {
            name: name.to_string(),
            reason: "a fork name cannot be empty".to_string(),
        });
    }

    if name == node.branch_label {
        return Err(Error::InvalidForkName {
            name: name.to_string(),
            reason: "a fork name cannot be the same as the current branch".to_string(),
        });
    }

    let parent = match node.parent {
        Some(parent) => graph.node(parent)?,
        None => return Err(Error::ForkOnRoot(node.id)),
    };

    let taken = parent
        .children
        .iter()
        .filter_map(|c| graph.get(*c))
        .any(|sibling| sibling.branch_label == name);

    if taken {
        Err(Error::DuplicateForkName(name.to_string()))
    } else {
        Ok(())
    }
}
