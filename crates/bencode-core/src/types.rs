//! The tagged value model shared by the decoder, writer and navigator.
//!
//! A decoded Bencode document is a tree of [`Value`]s. Dictionaries keep their
//! entries in insertion order (`IndexMap`) so that a tree built by hand encodes
//! in the order it was built, while key lookup stays O(1).

use crate::navigator::Navigator;
use indexmap::IndexMap;
use std::fmt;
use std::sync::LazyLock;

/// Type discriminator for [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    String,
    List,
    Dictionary,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Dictionary => "dictionary",
        };
        f.write_str(name)
    }
}

/// A Bencode value.
///
/// Strings are raw bytes: torrent files routinely carry binary payloads
/// (`pieces`) next to UTF-8 text, so nothing here assumes valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    String(Vec<u8>),
    List(Vec<Value>),
    Dictionary(Dictionary),
}

static EMPTY_DICTIONARY: LazyLock<Dictionary> = LazyLock::new(Dictionary::new);

impl Value {
    /// Build a string value from anything convertible into bytes.
    ///
    /// ```
    /// use bencode_core::Value;
    ///
    /// let v = Value::string("spam");
    /// assert_eq!(v.as_str(), Some("spam"));
    /// ```
    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Value::String(bytes.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Dictionary(_) => ValueKind::Dictionary,
        }
    }

    /// Integer view, or `0` for any other variant.
    pub fn to_integer(&self) -> i64 {
        match self {
            Value::Integer(i) => *i,
            Value::String(_) | Value::List(_) | Value::Dictionary(_) => 0,
        }
    }

    /// Byte view, or an empty slice for any other variant.
    pub fn to_bytes(&self) -> &[u8] {
        match self {
            Value::String(bytes) => bytes,
            Value::Integer(_) | Value::List(_) | Value::Dictionary(_) => &[],
        }
    }

    /// List view, or an empty slice for any other variant.
    pub fn to_list(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            Value::Integer(_) | Value::String(_) | Value::Dictionary(_) => &[],
        }
    }

    /// Dictionary view, or an empty dictionary for any other variant.
    pub fn to_dictionary(&self) -> &Dictionary {
        match self {
            Value::Dictionary(dict) => dict,
            Value::Integer(_) | Value::String(_) | Value::List(_) => &*EMPTY_DICTIONARY,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// Returns the string as UTF-8 text, or `None` if this is not a string or
    /// the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Start a deferred-error navigation chain rooted at this value.
    ///
    /// ```
    /// use bencode_core::decode;
    ///
    /// let (value, _) = decode(b"d4:infod4:name3:fooee").unwrap();
    /// let name = value.navigate().by_key("info").by_key("name").as_str().unwrap();
    /// assert_eq!(name, "foo");
    /// ```
    pub fn navigate(&self) -> Navigator<'_> {
        Navigator::new(self)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::String(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::String(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(dict)
    }
}

/// Byte-string keyed mapping with unique keys, kept in insertion order.
///
/// Equality ignores entry order: two dictionaries are equal when they hold the
/// same keys mapped to equal values.
#[derive(Debug, Clone, Default, Eq)]
pub struct Dictionary {
    entries: IndexMap<Vec<u8>, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, returning the previous value for the key.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.entries.get(key.as_ref())
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl<K: Into<Vec<u8>>> FromIterator<(K, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}
