//! # bencode-core
//!
//! Pure-Rust codec for **Bencode**, the serialization format of BitTorrent
//! metainfo (`.torrent`) files and tracker responses.
//!
//! Bencode has four value types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` |
//! | String | `<length>:<bytes>` | `4:spam` |
//! | List | `l<items>e` | `l4:spami42ee` |
//! | Dictionary | `d<key><value>...e` | `d3:cow3:mooe` |
//!
//! ## Quick start
//!
//! ```rust
//! use bencode_core::{decode, encode, Value};
//!
//! // Decode a prefix of the buffer and learn how much of it was used
//! let (value, consumed) = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
//! assert_eq!(consumed, 24);
//!
//! // Navigate without checking each step
//! let cow = value.navigate().by_key("cow").as_str().unwrap();
//! assert_eq!(cow, "moo");
//!
//! // Encode back (dictionary keys keep their decoded order)
//! assert_eq!(encode(&value).unwrap(), b"d3:cow3:moo4:spam4:eggse");
//! ```
//!
//! ## Modules
//!
//! - [`types`] — `Value` tagged union, `ValueKind`, insertion-ordered `Dictionary`
//! - [`decoder`] — bytes → `Value`, with consumed length and a nesting guard
//! - [`encoder`] — `Writer` byte builder and `encode`
//! - [`navigator`] — deferred-error traversal by list position and dictionary key
//! - [`json`] — `serde` view of a `Value` for inspection
//! - [`error`] — Error types for decode, write and navigation failures

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod navigator;
pub mod types;

pub use decoder::{decode, decode_all, Decoder, DecoderConfig, DEFAULT_MAX_DEPTH};
pub use encoder::{encode, Writer};
pub use error::{BencodeError, Result};
pub use navigator::Navigator;
pub use types::{Dictionary, Value, ValueKind};
