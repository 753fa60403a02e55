//! Error types for Bencode decoding, writing and navigation.

use crate::types::ValueKind;
use thiserror::Error;

/// Errors that can occur while decoding, writing or navigating Bencode data.
///
/// Decode errors carry the byte offset (relative to the start of the buffer
/// handed to the outermost decode call) where the problem was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BencodeError {
    /// The buffer ended before the current token was complete.
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    /// The leading byte of a token is not `i`, `l`, `d` or an ASCII digit.
    #[error("unrecognized tag byte 0x{byte:02x} at byte {offset}")]
    InvalidTag { byte: u8, offset: usize },

    /// An `i...e` token contains something other than an optional sign and digits.
    #[error("invalid integer at byte {offset}: {message}")]
    InvalidInteger { offset: usize, message: String },

    /// A string length prefix contains a non-digit or does not fit in memory.
    #[error("invalid string length at byte {offset}")]
    InvalidStringLength { offset: usize },

    /// A dictionary key decoded to something other than a byte string.
    #[error("dictionary key at byte {offset} is a {found}, expected a string")]
    InvalidKeyType { found: ValueKind, offset: usize },

    /// Containers are nested deeper than the configured limit.
    #[error("nesting exceeds maximum depth of {max_depth} at byte {offset}")]
    NestingTooDeep { max_depth: usize, offset: usize },

    /// A whole-buffer decode left bytes behind.
    #[error("trailing data: value ends at byte {consumed} of {len}")]
    TrailingData { consumed: usize, len: usize },

    /// Navigation or conversion was requested on the wrong kind of value.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("list index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// The navigator holds no value.
    #[error("no value to navigate")]
    MissingValue,

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// An `end_list`/`end_dictionary` call does not close the innermost container.
    /// `found` is `None` when no container is open.
    #[error("cannot end {expected}: innermost open container is {}", describe_open(.found))]
    UnbalancedEnd {
        expected: ValueKind,
        found: Option<ValueKind>,
    },

    /// Something other than a string was written where a dictionary key belongs.
    #[error("dictionary keys must be strings")]
    NonStringKey,

    /// A dictionary was closed after a key with no value.
    #[error("dictionary closed after a key without a value")]
    DanglingKey,

    /// `finish` was called while containers were still open.
    #[error("{open} container(s) still open")]
    UnclosedContainers { open: usize },

    /// Rendering the JSON view failed.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for BencodeError {
    fn from(err: serde_json::Error) -> Self {
        BencodeError::Json(err.to_string())
    }
}

fn describe_open(found: &Option<ValueKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "none".to_string(),
    }
}

/// Convenience alias used throughout bencode-core.
pub type Result<T> = std::result::Result<T, BencodeError>;
