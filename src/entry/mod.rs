//! Represents a single file or directory as it existed when a commit
//! was made.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod kind;
pub use kind::EntryKind;

/// Describes a single file or directory held in a commit's snapshot.
///
/// An `Entry` is immutable once constructed. Copying an entry into another
/// commit (or into a checkout) clones it; entries are never shared.
///
/// This is also the record shape any persistence or transport layer must be
/// able to read and write: `(name, kind, optional content, last write time)`.
/// It is serializable via `serde` for that purpose.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<u8>>,
    last_write_time: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry.
    ///
    /// Content is only retained for files. A file created without content
    /// holds an empty byte sequence.
    pub fn new<S: Into<String>>(
        name: S,
        kind: EntryKind,
        last_write_time: DateTime<Utc>,
        content: Option<Vec<u8>>,
    ) -> Entry {
        let content = if kind.has_content() {
            Some(content.unwrap_or_default())
        } else {
            None
        };

        Entry {
            name: name.into(),
            kind,
            content,
            last_write_time,
        }
    }

    /// Create a file entry.
    pub fn file<S: Into<String>, C: Into<Vec<u8>>>(
        name: S,
        content: C,
        last_write_time: DateTime<Utc>,
    ) -> Entry {
        Entry::new(name, EntryKind::File, last_write_time, Some(content.into()))
    }

    /// Create a directory entry.
    pub fn directory<S: Into<String>>(name: S, last_write_time: DateTime<Utc>) -> Entry {
        Entry::new(name, EntryKind::Directory, last_write_time, None)
    }

    /// Return the name of the file or directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the kind of the entry.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Return the file content. Always `None` for directories.
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Return the size (in bytes) of the content.
    pub fn len(&self) -> usize {
        self.content.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if the entry has no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the time the file or directory was last written.
    pub fn last_write_time(&self) -> DateTime<Utc> {
        self.last_write_time
    }
}
