use serde::{Deserialize, Serialize};

use crate::name::CheckPlatforms;
use crate::storage::StorageStrategy;

/// How deeply a `SUBTREE` checkout copies the children of the checked-out node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneDepth {
    /// Children are reported by ID and still refer to the live graph.
    /// Changes made to them through the graph are visible to the caller.
    Shallow,

    /// The entire descendant subtree is copied. Nothing refers back to the
    /// live graph.
    Deep,
}

impl Default for CloneDepth {
    fn default() -> Self {
        CloneDepth::Deep
    }
}

/// Options that shape how a `Graph` stores and copies commits.
///
/// All fields have defaults, so an integrator can deserialize a partial
/// configuration from whatever format it already uses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Copy depth for `CheckoutMode::SUBTREE`.
    pub clone_depth: CloneDepth,

    /// Which built-in snapshot store to use.
    pub storage: StorageStrategy,

    /// Platform-specific entry name rules enforced on commit.
    pub platforms: CheckPlatforms,
}

impl GraphConfig {
    /// Set the copy depth used by `SUBTREE` checkouts.
    pub fn with_clone_depth(mut self, clone_depth: CloneDepth) -> Self {
        self.clone_depth = clone_depth;
        self
    }

    /// Set which built-in snapshot store to use.
    pub fn with_storage(mut self, storage: StorageStrategy) -> Self {
        self.storage = storage;
        self
    }

    /// Set the platform-specific entry name rules.
    pub fn with_platforms(mut self, platforms: CheckPlatforms) -> Self {
        self.platforms = platforms;
        self
    }
}
