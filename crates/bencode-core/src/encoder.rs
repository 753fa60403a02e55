//! Bencode writer: an append-only byte builder producing canonical Bencode.
//!
//! Scalars are written with `append_*`; compound values are bracketed with
//! paired `start_*`/`end_*` calls. The writer keeps a stack of open containers
//! and rejects calls that would produce malformed output:
//!
//! - closing a container that is not the innermost open one
//! - writing a non-string where a dictionary key belongs
//! - closing a dictionary whose last key has no value
//!
//! Dictionary keys are emitted in the order they are written; the writer never
//! re-sorts them.
//!
//! # Example
//! ```
//! use bencode_core::Writer;
//!
//! let mut w = Writer::new();
//! w.start_dictionary().unwrap();
//! w.append_string("cow");
//! w.append_string("moo");
//! w.append_string("n");
//! w.append_integer(-3).unwrap();
//! w.end_dictionary().unwrap();
//! assert_eq!(w.finish().unwrap(), b"d3:cow3:moo1:ni-3ee");
//! ```

use crate::error::{BencodeError, Result};
use crate::types::{Value, ValueKind};

/// One open container on the writer's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    List,
    /// `awaiting_value` is true between a key and its value.
    Dictionary { awaiting_value: bool },
}

impl Frame {
    fn kind(self) -> ValueKind {
        match self {
            Frame::List => ValueKind::List,
            Frame::Dictionary { .. } => ValueKind::Dictionary,
        }
    }
}

/// Stateful Bencode byte builder.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
    stack: Vec<Frame>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_list(&mut self) -> Result<()> {
        self.before_non_string()?;
        self.buf.push(b'l');
        self.stack.push(Frame::List);
        Ok(())
    }

    pub fn end_list(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::List) => {
                self.stack.pop();
                self.buf.push(b'e');
                Ok(())
            }
            other => Err(BencodeError::UnbalancedEnd {
                expected: ValueKind::List,
                found: other.map(|f| f.kind()),
            }),
        }
    }

    pub fn start_dictionary(&mut self) -> Result<()> {
        self.before_non_string()?;
        self.buf.push(b'd');
        self.stack.push(Frame::Dictionary {
            awaiting_value: false,
        });
        Ok(())
    }

    pub fn end_dictionary(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Dictionary {
                awaiting_value: true,
            }) => Err(BencodeError::DanglingKey),
            Some(Frame::Dictionary { .. }) => {
                self.stack.pop();
                self.buf.push(b'e');
                Ok(())
            }
            other => Err(BencodeError::UnbalancedEnd {
                expected: ValueKind::Dictionary,
                found: other.map(|f| f.kind()),
            }),
        }
    }

    /// Emit `i<decimal>e`.
    pub fn append_integer(&mut self, value: i64) -> Result<()> {
        self.before_non_string()?;
        self.buf.push(b'i');
        self.buf.extend_from_slice(value.to_string().as_bytes());
        self.buf.push(b'e');
        Ok(())
    }

    /// Emit `<byte length>:<payload>`. Always valid, as a key or as a value.
    pub fn append_string(&mut self, bytes: impl AsRef<[u8]>) {
        let bytes = bytes.as_ref();
        if let Some(Frame::Dictionary { awaiting_value }) = self.stack.last_mut() {
            *awaiting_value = !*awaiting_value;
        }
        self.buf.extend_from_slice(bytes.len().to_string().as_bytes());
        self.buf.push(b':');
        self.buf.extend_from_slice(bytes);
    }

    /// Write a whole value tree. Dictionary entries are written in insertion order.
    pub fn append_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Integer(i) => self.append_integer(*i),
            Value::String(bytes) => {
                self.append_string(bytes);
                Ok(())
            }
            Value::List(items) => {
                self.start_list()?;
                for item in items {
                    self.append_value(item)?;
                }
                self.end_list()
            }
            Value::Dictionary(dict) => {
                self.start_dictionary()?;
                for (key, val) in dict.iter() {
                    self.append_string(key);
                    self.append_value(val)?;
                }
                self.end_dictionary()
            }
        }
    }

    /// Everything written so far, even if containers are still open.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Take the finished buffer. Fails if any container is still open.
    pub fn finish(self) -> Result<Vec<u8>> {
        if !self.stack.is_empty() {
            return Err(BencodeError::UnclosedContainers {
                open: self.stack.len(),
            });
        }
        Ok(self.buf)
    }

    /// Bookkeeping for anything that is not a string: it may not sit in a
    /// key slot, and in a value slot it completes the pending pair.
    fn before_non_string(&mut self) -> Result<()> {
        if let Some(Frame::Dictionary { awaiting_value }) = self.stack.last_mut() {
            if !*awaiting_value {
                return Err(BencodeError::NonStringKey);
            }
            *awaiting_value = false;
        }
        Ok(())
    }
}

/// Encode a value tree into Bencode bytes.
///
/// ```
/// use bencode_core::{encode, Value};
///
/// let list = Value::List(vec![Value::string("spam"), Value::Integer(42)]);
/// assert_eq!(encode(&list).unwrap(), b"l4:spami42ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    writer.append_value(value)?;
    writer.finish()
}
