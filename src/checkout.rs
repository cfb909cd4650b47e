//! Detached copies of part of a commit graph.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::config::CloneDepth;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::graph::{Graph, Node};
use crate::id::CommitId;

/// Selects how much of the graph around a node a checkout copies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CheckoutMode {
    /// Copy every ancestor from the root down to the node.
    pub include_history: bool,

    /// Copy the node's children.
    pub include_children: bool,
}

impl CheckoutMode {
    /// The node's own snapshot only.
    pub const SNAPSHOT: CheckoutMode = CheckoutMode::new(false, false);

    /// The chain of ancestors from the root down to the node.
    pub const HISTORY: CheckoutMode = CheckoutMode::new(true, false);

    /// The node and its children. How deep the children are copied is
    /// set by [`GraphConfig::clone_depth`](crate::GraphConfig).
    pub const SUBTREE: CheckoutMode = CheckoutMode::new(false, true);

    /// The chain of ancestors plus the node's entire descendant subtree,
    /// always fully copied.
    pub const FULL: CheckoutMode = CheckoutMode::new(true, true);

    /// Build a mode from its two flags.
    pub const fn new(include_history: bool, include_children: bool) -> CheckoutMode {
        CheckoutMode {
            include_history,
            include_children,
        }
    }
}

/// Children of a [`DetachedNode`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DetachedChildren {
    /// Copies owned by the checkout.
    Detached(Vec<DetachedNode>),

    /// IDs of nodes in the live graph. Produced only by a
    /// `SUBTREE` checkout with `CloneDepth::Shallow`.
    Live(Vec<CommitId>),
}

impl Default for DetachedChildren {
    fn default() -> Self {
        DetachedChildren::Detached(Vec::new())
    }
}

/// A copy of a commit that shares nothing with the graph it came from.
///
/// Fields are public: a checkout belongs to the caller, who may change it
/// freely without affecting the graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetachedNode {
    pub id: CommitId,
    pub branch_label: String,
    pub committed_at: DateTime<Utc>,
    pub entries: Vec<Entry>,
    pub children: DetachedChildren,
}

impl DetachedNode {
    /// Return the detached children, or an empty slice if the children
    /// are live references.
    pub fn detached_children(&self) -> &[DetachedNode] {
        match &self.children {
            DetachedChildren::Detached(children) => children.as_slice(),
            DetachedChildren::Live(_) => &[],
        }
    }

    /// Iterate over this node and every detached descendant, parents first.
    pub fn iter(&self) -> impl Iterator<Item = &DetachedNode> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.detached_children().iter().rev());
            Some(node)
        })
    }

    /// Return the number of detached nodes in this checkout.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a checkout holds at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Return the number of nodes along the first-child path, this node included.
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut node = self;
        while let Some(child) = node.detached_children().first() {
            len += 1;
            node = child;
        }
        len
    }

    /// Follow first children down to the last node of the chain.
    pub fn leaf(&self) -> &DetachedNode {
        let mut node = self;
        while let Some(child) = node.detached_children().first() {
            node = child;
        }
        node
    }

    /// Find the detached copy of the given commit.
    pub fn find(&self, id: CommitId) -> Option<&DetachedNode> {
        self.iter().find(|n| n.id == id)
    }
}

impl Graph {
    /// Produce a detached copy of part of the graph around `id`.
    ///
    /// | mode | result |
    /// |---|---|
    /// | `SNAPSHOT` | copy of the node alone |
    /// | `HISTORY` | root of a copied chain root → … → node; siblings omitted |
    /// | `SUBTREE` | copy of the node with its children (see `CloneDepth`) |
    /// | `FULL` | root of a copied chain whose last node carries a copy of the whole subtree |
    ///
    /// Never changes the graph. Fails with `NotCommitted` if `id` isn't
    /// part of the graph.
    pub fn checkout(&self, id: CommitId, mode: CheckoutMode) -> Result<DetachedNode> {
        let node = self.node(id)?;

        tracing::trace!(id = %id, mode = ?mode, "checkout");

        match (mode.include_history, mode.include_children) {
            (false, false) => self.detach(node),
            (true, false) => self.with_history(node, self.detach(node)?),
            (false, true) => match self.config.clone_depth {
                CloneDepth::Shallow => {
                    let mut detached = self.detach(node)?;
                    detached.children = DetachedChildren::Live(node.children.clone());
                    Ok(detached)
                }
                CloneDepth::Deep => self.detach_subtree(node),
            },
            (true, true) => self.with_history(node, self.detach_subtree(node)?),
        }
    }

    fn detach(&self, node: &Node) -> Result<DetachedNode> {
        Ok(DetachedNode {
            id: node.id,
            branch_label: node.branch_label.clone(),
            committed_at: node.committed_at,
            entries: self.entries(node.id)?,
            children: DetachedChildren::default(),
        })
    }

    // Wrap `detached` (the copy of `node`) in copies of each ancestor,
    // returning the copy of the root.
    fn with_history(&self, node: &Node, detached: DetachedNode) -> Result<DetachedNode> {
        self.ancestors(node.id)
            .skip(1)
            .try_fold(detached, |child, ancestor| -> Result<DetachedNode> {
                let mut copy = self.detach(ancestor)?;
                copy.children = DetachedChildren::Detached(vec![child]);
                Ok(copy)
            })
    }

    // Copies are built bottom-up from a pre-order listing so that deep
    // histories don't recurse.
    fn detach_subtree(&self, node: &Node) -> Result<DetachedNode> {
        let mut pre_order = Vec::new();
        let mut stack = vec![node];

        while let Some(n) = stack.pop() {
            pre_order.push(n);
            for child in &n.children {
                stack.push(self.node(*child)?);
            }
        }

        let mut built: HashMap<CommitId, DetachedNode> = HashMap::with_capacity(pre_order.len());

        for n in pre_order.into_iter().rev() {
            let mut copy = self.detach(n)?;
            let children = n
                .children
                .iter()
                .map(|c| {
                    built
                        .remove(c)
                        .ok_or_else(|| Error::Storage(format!("child {} was not copied", c)))
                })
                .collect::<Result<Vec<_>>>()?;
            copy.children = DetachedChildren::Detached(children);
            built.insert(n.id, copy);
        }

        built
            .remove(&node.id)
            .ok_or_else(|| Error::Storage(format!("commit {} was not copied", node.id)))
    }
}
