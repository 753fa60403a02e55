//! Deferred-error traversal over a decoded [`Value`].
//!
//! A [`Navigator`] is either positioned on a value or carries the error that
//! stopped the chain. Navigation calls never fail on their own; the first
//! error is kept and surfaces when a terminal conversion (`as_*`, `value`) is
//! requested. This lets callers drill through nested metainfo without checking
//! every step:
//!
//! ```
//! use bencode_core::decode;
//!
//! let (torrent, _) = decode(b"d13:announce-listll3:urleee").unwrap();
//! let first = torrent
//!     .navigate()
//!     .by_key("announce-list")
//!     .by_position(0)
//!     .by_position(0)
//!     .as_str()
//!     .unwrap();
//! assert_eq!(first, "url");
//!
//! assert!(torrent.navigate().by_position(0).as_integer().is_err());
//! ```

use crate::error::{BencodeError, Result};
use crate::types::{Dictionary, Value, ValueKind};

/// Chainable, deferred-error accessor. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    state: Result<&'a Value>,
}

impl<'a> Navigator<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { state: Ok(value) }
    }

    /// Step into element `index` of a list.
    pub fn by_position(self, index: usize) -> Self {
        let state = self.state.and_then(|value| match value {
            Value::List(items) => items.get(index).ok_or(BencodeError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
            other => Err(mismatch(ValueKind::List, other)),
        });
        Self { state }
    }

    /// Step into the value stored under `key` in a dictionary.
    pub fn by_key(self, key: impl AsRef<[u8]>) -> Self {
        let key = key.as_ref();
        let state = self.state.and_then(|value| match value {
            Value::Dictionary(dict) => dict.get(key).ok_or_else(|| BencodeError::KeyNotFound {
                key: String::from_utf8_lossy(key).into_owned(),
            }),
            other => Err(mismatch(ValueKind::Dictionary, other)),
        });
        Self { state }
    }

    pub fn is_ok(&self) -> bool {
        self.state.is_ok()
    }

    /// The value the chain ended on, whatever its kind.
    pub fn value(self) -> Result<&'a Value> {
        self.state
    }

    pub fn as_integer(self) -> Result<i64> {
        match self.state? {
            Value::Integer(i) => Ok(*i),
            other => Err(mismatch(ValueKind::Integer, other)),
        }
    }

    pub fn as_bytes(self) -> Result<&'a [u8]> {
        match self.state? {
            Value::String(bytes) => Ok(bytes.as_slice()),
            other => Err(mismatch(ValueKind::String, other)),
        }
    }

    /// String as UTF-8 text. Binary strings yield [`BencodeError::InvalidUtf8`].
    pub fn as_str(self) -> Result<&'a str> {
        let bytes = self.as_bytes()?;
        std::str::from_utf8(bytes).map_err(|_| BencodeError::InvalidUtf8)
    }

    pub fn as_list(self) -> Result<&'a [Value]> {
        match self.state? {
            Value::List(items) => Ok(items.as_slice()),
            other => Err(mismatch(ValueKind::List, other)),
        }
    }

    pub fn as_dictionary(self) -> Result<&'a Dictionary> {
        match self.state? {
            Value::Dictionary(dict) => Ok(dict),
            other => Err(mismatch(ValueKind::Dictionary, other)),
        }
    }
}

impl<'a> From<&'a Value> for Navigator<'a> {
    fn from(value: &'a Value) -> Self {
        Navigator::new(value)
    }
}

/// `None` produces the nil navigator: every terminal call reports
/// [`BencodeError::MissingValue`].
impl<'a> From<Option<&'a Value>> for Navigator<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        Self {
            state: value.ok_or(BencodeError::MissingValue),
        }
    }
}

fn mismatch(expected: ValueKind, found: &Value) -> BencodeError {
    BencodeError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}
