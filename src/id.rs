use std::fmt::{self, Write};
use std::str::FromStr;

extern crate thiserror;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// An error which can be returned when parsing a commit ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse commit ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Among other causes, this variant will be constructed when parsing a string that
    /// contains an uppercase letter.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID string is too long.
    #[error("value is more than 32 digits long")]
    Overflow,

    /// ID string is too short.
    #[error("value is less than 32 digits long")]
    Underflow,

    /// Value was zero. The all-zero ID is reserved for "not committed".
    #[error("ID would be zero")]
    Zero,
}

/// A commit ID identifies one node within a commit graph.
///
/// It is stored as a random 16-byte (version 4) UUID, and represented as
/// 32 lowercase hex digits. IDs are never derived from content, so two commits
/// with identical snapshots still have distinct IDs.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(Uuid);

impl CommitId {
    /// Generate a fresh, random commit ID.
    #[allow(clippy::new_without_default)]
    pub fn new() -> CommitId {
        CommitId(Uuid::new_v4())
    }

    /// Create an ID from its 16-byte form.
    ///
    /// It is an error if all bytes are zero.
    pub fn from_bytes(bytes: [u8; 16]) -> Result<CommitId, ParseIdError> {
        if bytes.iter().all(|x| *x == 0) {
            Err(ParseIdError::Zero)
        } else {
            Ok(CommitId(Uuid::from_bytes(bytes)))
        }
    }

    /// Convert a 32-character hex ID to a commit ID.
    ///
    /// It is an error if the ID contains anything other than 32 lowercase hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<CommitId, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            32 => {
                let mut bytes = [0u8; 16];
                for (byte, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }
                CommitId::from_bytes(bytes)
            }
            0 => Err(ParseIdError::Empty),
            n if n < 32 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Return the 16-byte form of the ID.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl FromStr for CommitId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitId::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.as_bytes().iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
