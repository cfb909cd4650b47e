extern crate thiserror;

use thiserror::Error;

use crate::id::CommitId;

/// Describes the potential error conditions that might arise from rscm `Graph` operations.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Fork name is empty or the same as the branch being forked.
    #[error("invalid fork name `{name}`: {reason}")]
    InvalidForkName { name: String, reason: String },

    /// A sibling of the forked node already carries this branch label.
    #[error("a fork named `{0}` already exists on the parent")]
    DuplicateForkName(String),

    /// The node has no parent, so there is nowhere to put a sibling.
    #[error("commit {0} is a root and can not be forked")]
    ForkOnRoot(CommitId),

    /// The ID doesn't name a committed node of this graph.
    #[error("commit {0} is not part of the graph")]
    NotCommitted(CommitId),

    /// The snapshot handed to `commit` can't be accepted.
    #[error("invalid commit: {reason}")]
    InvalidCommit { reason: String },

    /// The snapshot store lost track of something it should have.
    #[error("snapshot storage error: {0}")]
    Storage(String),
}

impl Error {
    pub(crate) fn invalid_commit<S: Into<String>>(reason: S) -> Self {
        Error::InvalidCommit {
            reason: reason.into(),
        }
    }
}

/// A specialized `Result` type for rscm `Graph` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = Error::InvalidForkName {
            name: "".to_string(),
            reason: "name is empty".to_string(),
        };
        assert_eq!(err.to_string(), "invalid fork name ``: name is empty");

        let err = Error::DuplicateForkName("dev".to_string());
        assert_eq!(
            err.to_string(),
            "a fork named `dev` already exists on the parent"
        );

        let err = Error::invalid_commit("duplicate entry `a.txt`");
        assert_eq!(err.to_string(), "invalid commit: duplicate entry `a.txt`");
    }

    #[test]
    fn ids_in_messages() {
        let id = CommitId::new();
        let err = Error::ForkOnRoot(id);
        assert_eq!(
            err.to_string(),
            format!("commit {} is a root and can not be forked", id)
        );

        let err = Error::NotCommitted(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
