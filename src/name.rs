//! Rules for entry names and for the snapshots handed to `Graph::commit`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::entry::{Entry, EntryKind};
use crate::error::{Error, Result};

/// Selects which platform-specific name rules to enforce in addition
/// to the rules that apply everywhere.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckPlatforms {
    /// Reject names that Windows file systems can't hold.
    pub windows: bool,

    /// Reject names that collide on HFS+ / APFS (Unicode normalization and
    /// ignorable code points).
    pub mac: bool,
}

/// Reasons why a given string can not be accepted as an entry name.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name is `.` or `..`")]
    DotOrDotDot,

    #[error("name contains `/`")]
    ContainsSlash,

    #[error("name contains a NUL character")]
    ContainsNull,

    #[error("name is reserved for repository metadata")]
    DotGit,

    #[error("name hides `.git` behind ignorable Unicode characters")]
    ContainsIgnorableUnicodeCharacters,

    #[error("name contains a character Windows does not allow")]
    InvalidWindowsCharacter,

    #[error("name ends with `.` or a space")]
    TrailingDotOrSpace,
}

/// Check a single entry name.
pub fn check_name(name: &str, platforms: &CheckPlatforms) -> std::result::Result<(), NameError> {
    if name.is_empty() {
        Err(NameError::Empty)
    } else if name == "." || name == ".." {
        Err(NameError::DotOrDotDot)
    } else if name.contains('/') {
        Err(NameError::ContainsSlash)
    } else if name.contains('\0') {
        Err(NameError::ContainsNull)
    } else {
        // A ".git"-like name on *any* platform causes problems once the
        // snapshot reaches Windows, so this one isn't optional.
        check_git_name(name)?;

        if platforms.windows {
            check_windows_name(name)?;
        }

        if platforms.mac {
            check_mac_ignorables(name)?;
        }

        Ok(())
    }
}

/// Check a complete snapshot before it is committed.
///
/// Every name must pass [`check_name`], no two entries may share a name
/// (after NFC normalization when `platforms.mac` is set), and content must be
/// present exactly when the entry is a file.
pub fn check_snapshot(entries: &[Entry], platforms: &CheckPlatforms) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::with_capacity(entries.len());

    for entry in entries {
        check_name(entry.name(), platforms).map_err(|err| {
            Error::invalid_commit(format!("entry `{}`: {}", entry.name(), err))
        })?;

        match (entry.kind(), entry.content()) {
            (EntryKind::Directory, Some(_)) => {
                return Err(Error::invalid_commit(format!(
                    "directory `{}` carries content",
                    entry.name()
                )));
            }
            (EntryKind::File, None) => {
                return Err(Error::invalid_commit(format!(
                    "file `{}` has no content",
                    entry.name()
                )));
            }
            _ => (),
        }

        let key = if platforms.mac {
            entry.name().nfc().collect::<String>()
        } else {
            entry.name().to_string()
        };

        if !seen.insert(key) {
            return Err(Error::invalid_commit(format!(
                "duplicate entry `{}`",
                entry.name()
            )));
        }
    }

    Ok(())
}

fn check_git_name(name: &str) -> std::result::Result<(), NameError> {
    if name.eq_ignore_ascii_case(".git") || name.eq_ignore_ascii_case("git~1") {
        Err(NameError::DotGit)
    } else {
        Ok(())
    }
}

fn check_windows_name(name: &str) -> std::result::Result<(), NameError> {
    let invalid = name.chars().any(|c| {
        matches!(c, '"' | '*' | ':' | '<' | '>' | '?' | '\\' | '|' | '\u{1}'..='\u{1f}')
    });

    if invalid {
        Err(NameError::InvalidWindowsCharacter)
    } else if name.ends_with('.') || name.ends_with(' ') {
        Err(NameError::TrailingDotOrSpace)
    } else {
        Ok(())
    }
}

fn check_mac_ignorables(name: &str) -> std::result::Result<(), NameError> {
    let visible: String = name.chars().filter(|c| !is_hfs_ignorable(*c)).collect();

    if visible.len() != name.len() && visible.eq_ignore_ascii_case(".git") {
        Err(NameError::ContainsIgnorableUnicodeCharacters)
    } else {
        Ok(())
    }
}

// Code points HFS+ drops when comparing file names.
fn is_hfs_ignorable(c: char) -> bool {
    matches!(
        c,
        '\u{200C}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{206A}'..='\u{206F}' | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};

    const NO_PLATFORMS: CheckPlatforms = CheckPlatforms {
        windows: false,
        mac: false,
    };

    const WINDOWS: CheckPlatforms = CheckPlatforms {
        windows: true,
        mac: false,
    };

    const MAC: CheckPlatforms = CheckPlatforms {
        windows: false,
        mac: true,
    };

    fn file(name: &str) -> Entry {
        Entry::file(name, "x", Utc.timestamp_opt(1_142_878_501, 0).unwrap())
    }

    #[test]
    fn basic_case() {
        assert_eq!(check_name("", &NO_PLATFORMS), Err(NameError::Empty));
        assert_eq!(check_name(".", &NO_PLATFORMS), Err(NameError::DotOrDotDot));
        assert_eq!(check_name("..", &NO_PLATFORMS), Err(NameError::DotOrDotDot));
        assert_eq!(check_name("a/b", &NO_PLATFORMS), Err(NameError::ContainsSlash));
        assert_eq!(check_name("a\0b", &NO_PLATFORMS), Err(NameError::ContainsNull));

        assert!(check_name("a.txt", &NO_PLATFORMS).is_ok());
        assert!(check_name("...", &NO_PLATFORMS).is_ok());
    }

    #[test]
    fn variations_on_dot_git_name() {
        for name in &[".git", ".GIT", ".Git", "GIT~1", "GiT~1"] {
            assert_eq!(check_name(name, &NO_PLATFORMS), Err(NameError::DotGit));
        }

        for name in &["GIT~11", "GIT~2", ".gitignore", "git"] {
            assert!(check_name(name, &NO_PLATFORMS).is_ok());
        }
    }

    const INVALID_WINDOWS_NAMES: [&str; 11] = [
        "\"", "*", ":", "<", ">", "?", "\\", "|", "\u{1}", "\u{7}", "\u{1f}",
    ];

    #[test]
    fn invalid_windows_characters() {
        for n in &INVALID_WINDOWS_NAMES {
            let name = format!("a{}b", n);

            assert!(check_name(&name, &NO_PLATFORMS).is_ok());
            assert_eq!(
                check_name(&name, &WINDOWS),
                Err(NameError::InvalidWindowsCharacter)
            );
        }

        assert_eq!(
            check_name("notes.", &WINDOWS),
            Err(NameError::TrailingDotOrSpace)
        );
        assert_eq!(
            check_name("notes ", &WINDOWS),
            Err(NameError::TrailingDotOrSpace)
        );
        assert!(check_name("notes.txt", &WINDOWS).is_ok());
    }

    const MAC_HFS_GIT_NAMES: [&str; 6] = [
        ".gi\u{200C}t",
        ".gi\u{200F}t",
        ".gi\u{202A}t",
        "\u{206B}.git",
        "\u{206F}.GIT",
        ".git\u{FEFF}",
    ];

    const ALMOST_MAC_HFS_GIT_NAMES: [&str; 3] = [".gi", ".git\u{200C}x", ".kit\u{200C}"];

    #[test]
    fn mac_variations_on_dot_git_name() {
        for name in &MAC_HFS_GIT_NAMES {
            assert!(check_name(name, &NO_PLATFORMS).is_ok());
            assert_eq!(
                check_name(name, &MAC),
                Err(NameError::ContainsIgnorableUnicodeCharacters)
            );
        }

        for name in &ALMOST_MAC_HFS_GIT_NAMES {
            assert!(check_name(name, &MAC).is_ok());
        }
    }

    #[test]
    fn snapshot_ok() {
        let t = Utc.timestamp_opt(0, 0).unwrap();
        let entries = vec![file("a.txt"), Entry::directory("src", t), file("b.txt")];

        assert!(check_snapshot(&entries, &NO_PLATFORMS).is_ok());
        assert!(check_snapshot(&[], &NO_PLATFORMS).is_ok());
    }

    #[test]
    fn snapshot_duplicate_names() {
        let entries = vec![file("a.txt"), file("b.txt"), file("a.txt")];

        let err = check_snapshot(&entries, &NO_PLATFORMS).unwrap_err();
        assert_eq!(err, Error::invalid_commit("duplicate entry `a.txt`"));
    }

    #[test]
    fn snapshot_duplicates_after_normalization() {
        // "é" precomposed vs. "e" + combining acute accent.
        let entries = vec![file("caf\u{e9}"), file("cafe\u{301}")];

        assert!(check_snapshot(&entries, &NO_PLATFORMS).is_ok());

        match check_snapshot(&entries, &MAC).unwrap_err() {
            Error::InvalidCommit { reason } => assert!(reason.starts_with("duplicate entry")),
            err => panic!("wrong error: {:?}", err),
        }
    }

    #[test]
    fn snapshot_bad_name() {
        let err = check_snapshot(&[file(".git")], &NO_PLATFORMS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid commit: entry `.git`: name is reserved for repository metadata"
        );
    }

    #[test]
    fn snapshot_content_must_match_kind() {
        let json = r#"[{"name":"src","kind":"directory","content":[1,2],"last_write_time":"2021-01-01T00:00:00Z"}]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).unwrap();
        let err = check_snapshot(&entries, &NO_PLATFORMS).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_commit("directory `src` carries content")
        );

        let json = r#"[{"name":"a.txt","kind":"file","last_write_time":"2021-01-01T00:00:00Z"}]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).unwrap();
        let err = check_snapshot(&entries, &NO_PLATFORMS).unwrap_err();
        assert_eq!(err, Error::invalid_commit("file `a.txt` has no content"));
    }
}
