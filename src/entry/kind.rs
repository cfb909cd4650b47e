use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Describes what a snapshot entry represents (file or directory).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Returns true if entries of this kind carry content.
    pub fn has_content(self) -> bool {
        self == EntryKind::File
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_string() {
        let k = EntryKind::File;
        assert_eq!(k.to_string(), "file");

        let k = EntryKind::Directory;
        assert_eq!(k.to_string(), "directory");
    }

    #[test]
    fn has_content() {
        assert!(EntryKind::File.has_content());
        assert!(!EntryKind::Directory.has_content());
    }
}
