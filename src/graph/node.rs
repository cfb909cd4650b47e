use chrono::{DateTime, Utc};

use crate::id::CommitId;

/// A node that has not been committed yet.
///
/// A staged node has no identity, no timestamp, no parent and no entries.
/// It only becomes part of a graph when it is handed to
/// [`Graph::commit`](crate::Graph::commit), which consumes it. A staged node
/// can therefore never be committed twice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StagedNode {
    branch_label: String,
}

impl StagedNode {
    /// Create a staged node on the named branch.
    pub fn new<S: Into<String>>(branch_label: S) -> StagedNode {
        StagedNode {
            branch_label: branch_label.into(),
        }
    }

    /// Return the branch label the node will be committed under by default.
    pub fn branch_label(&self) -> &str {
        &self.branch_label
    }

    /// Change the branch label while the node is still staged.
    pub fn set_branch_label<S: Into<String>>(&mut self, branch_label: S) {
        self.branch_label = branch_label.into();
    }

    pub(crate) fn into_branch_label(self) -> String {
        self.branch_label
    }
}

/// A committed node of a commit graph.
///
/// The node's snapshot lives in the graph's snapshot store; read it with
/// [`Graph::entries`](crate::Graph::entries). `parent` and `children` are IDs
/// of other nodes in the same graph. The parent owns its children; a child
/// only refers to its parent by ID.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub(crate) id: CommitId,
    pub(crate) branch_label: String,
    pub(crate) committed_at: DateTime<Utc>,
    pub(crate) parent: Option<CommitId>,
    pub(crate) children: Vec<CommitId>,
}

impl Node {
    /// Return the node's unique ID.
    pub fn id(&self) -> CommitId {
        self.id
    }

    /// Return the node's branch label.
    pub fn branch_label(&self) -> &str {
        &self.branch_label
    }

    /// Return the time at which the node was committed.
    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    /// Return the ID of the parent node, or `None` for a root.
    pub fn parent(&self) -> Option<CommitId> {
        self.parent
    }

    /// Returns true if the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Return the IDs of the node's children, in the order they were attached.
    pub fn children(&self) -> &[CommitId] {
        &self.children
    }
}
