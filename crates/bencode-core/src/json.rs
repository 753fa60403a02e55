//! JSON view of decoded Bencode, for inspecting metainfo in a readable form.
//!
//! [`Value`] implements [`serde::Serialize`]:
//!
//! - integers map to numbers, lists to arrays
//! - UTF-8 strings map to JSON strings; other byte strings are serialized as
//!   bytes, which `serde_json` renders as an array of numbers
//! - dictionaries map to objects in insertion order (`serde_json` is built with
//!   `preserve_order`); non-UTF-8 keys are converted lossily, so distinct keys
//!   that only differ in invalid bytes render identically. [`to_json`] keeps
//!   one entry holding the value written last; [`to_json_string`] emits the
//!   repeated key once per entry
//!
//! The view is one-way: Bencode has no booleans, floats or null, and binary
//! strings do not survive as JSON strings.

use crate::error::Result;
use crate::types::{Dictionary, Value};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::String(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => serializer.serialize_bytes(bytes),
            },
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Dictionary(dict) => dict.serialize(serializer),
        }
    }
}

impl Serialize for Dictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&String::from_utf8_lossy(key), value)?;
        }
        map.end()
    }
}

/// Convert a value into a `serde_json::Value`.
///
/// ```
/// use bencode_core::{decode, json::to_json};
///
/// let (value, _) = decode(b"d3:cow3:moo4:spami7ee").unwrap();
/// assert_eq!(to_json(&value).unwrap(), serde_json::json!({"cow": "moo", "spam": 7}));
/// ```
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

/// Render a value as JSON text, optionally pretty-printed.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
