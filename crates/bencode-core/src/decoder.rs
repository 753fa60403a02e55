//! Bencode decoder: converts a byte buffer prefix into a [`Value`] tree.
//!
//! Decoding is recursive descent over slices. Every decode step returns the
//! value it parsed together with the number of bytes it consumed, and container
//! decoders advance their cursor by that count after each child. The same
//! contract is exposed publicly through [`decode`], so callers can walk a
//! buffer of concatenated values themselves.
//!
//! # Key design decisions
//!
//! - **Prefix decoding**: [`decode`] stops at the end of the first complete
//!   value; trailing bytes are left for the caller. [`decode_all`] is the strict
//!   variant that rejects them.
//! - **Absolute offsets**: each step also receives its offset from the start of
//!   the caller's buffer so that errors point at the byte that was rejected.
//! - **Depth guard**: containers nested deeper than
//!   [`DecoderConfig::max_depth`] are rejected before recursing, which bounds
//!   stack usage on adversarial input.
//! - **Dictionary keys** are checked by their leading byte, so a non-string key
//!   is rejected without decoding it first.

use crate::error::{BencodeError, Result};
use crate::types::{Dictionary, Value, ValueKind};
use serde::{Deserialize, Serialize};

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decoder settings.
///
/// Deserializable so that services embedding the decoder can carry it in their
/// own configuration files; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Maximum number of nested lists/dictionaries. A value of `n` accepts
    /// exactly `n` levels; `0` rejects every container.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A configured decoder. [`decode`] and [`decode_all`] use the defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the value at the start of `buf`, returning it together with the
    /// number of bytes it occupies.
    pub fn decode(&self, buf: &[u8]) -> Result<(Value, usize)> {
        let (value, consumed) = self.decode_item(buf, 0, 0)?;
        tracing::trace!(consumed, kind = %value.kind(), "decoded bencode value");
        Ok((value, consumed))
    }

    /// Decode a value that must span the whole of `buf`.
    pub fn decode_all(&self, buf: &[u8]) -> Result<Value> {
        let (value, consumed) = self.decode(buf)?;
        if consumed != buf.len() {
            tracing::debug!(consumed, len = buf.len(), "rejecting trailing data");
            return Err(BencodeError::TrailingData {
                consumed,
                len: buf.len(),
            });
        }
        Ok(value)
    }

    /// Dispatch on the leading byte. `base` is the absolute offset of `buf[0]`,
    /// `depth` the number of containers enclosing this item.
    fn decode_item(&self, buf: &[u8], base: usize, depth: usize) -> Result<(Value, usize)> {
        match buf.first() {
            None => Err(BencodeError::UnexpectedEof { offset: base }),
            Some(b'i') => decode_integer(buf, base),
            Some(b'l') => self.decode_list(buf, base, depth),
            Some(b'd') => self.decode_dictionary(buf, base, depth),
            Some(b'0'..=b'9') => {
                let (bytes, consumed) = decode_string(buf, base)?;
                Ok((Value::String(bytes), consumed))
            }
            Some(&byte) => Err(BencodeError::InvalidTag { byte, offset: base }),
        }
    }

    fn check_depth(&self, depth: usize, offset: usize) -> Result<()> {
        let max_depth = self.config.max_depth;
        if depth >= max_depth {
            tracing::debug!(max_depth, offset, "rejecting input nested too deeply");
            return Err(BencodeError::NestingTooDeep { max_depth, offset });
        }
        Ok(())
    }

    /// `l<items>e`. Items are decoded until an `e` sits at the cursor.
    fn decode_list(&self, buf: &[u8], base: usize, depth: usize) -> Result<(Value, usize)> {
        self.check_depth(depth, base)?;

        let mut items = Vec::new();
        let mut cursor = 1;
        loop {
            match buf.get(cursor) {
                None => {
                    return Err(BencodeError::UnexpectedEof {
                        offset: base + cursor,
                    })
                }
                Some(b'e') => break,
                Some(_) => {
                    let (item, used) =
                        self.decode_item(&buf[cursor..], base + cursor, depth + 1)?;
                    items.push(item);
                    cursor += used;
                }
            }
        }

        Ok((Value::List(items), cursor + 1))
    }

    /// `d<key><value>...e`. Keys must be strings; a repeated key keeps the
    /// last value.
    fn decode_dictionary(&self, buf: &[u8], base: usize, depth: usize) -> Result<(Value, usize)> {
        self.check_depth(depth, base)?;

        let mut dict = Dictionary::new();
        let mut cursor = 1;
        loop {
            let key = match buf.get(cursor) {
                None => {
                    return Err(BencodeError::UnexpectedEof {
                        offset: base + cursor,
                    })
                }
                Some(b'e') => break,
                Some(b'0'..=b'9') => {
                    let (key, used) = decode_string(&buf[cursor..], base + cursor)?;
                    cursor += used;
                    key
                }
                Some(&byte) => {
                    let offset = base + cursor;
                    let found = match byte {
                        b'i' => ValueKind::Integer,
                        b'l' => ValueKind::List,
                        b'd' => ValueKind::Dictionary,
                        _ => return Err(BencodeError::InvalidTag { byte, offset }),
                    };
                    return Err(BencodeError::InvalidKeyType { found, offset });
                }
            };

            let (value, used) = self.decode_item(&buf[cursor..], base + cursor, depth + 1)?;
            cursor += used;
            dict.insert(key, value);
        }

        Ok((Value::Dictionary(dict), cursor + 1))
    }
}

/// Decode the value at the start of `buf` with the default configuration.
///
/// Returns the value and the number of bytes consumed; anything after that is
/// left untouched.
///
/// ```
/// use bencode_core::{decode, Value};
///
/// let (value, consumed) = decode(b"4:spamtrailing").unwrap();
/// assert_eq!(value, Value::string("spam"));
/// assert_eq!(consumed, 6);
/// ```
pub fn decode(buf: &[u8]) -> Result<(Value, usize)> {
    Decoder::default().decode(buf)
}

/// Decode a single value that must cover all of `buf`.
pub fn decode_all(buf: &[u8]) -> Result<Value> {
    Decoder::default().decode_all(buf)
}

/// `i[-]<digits>e`. Accumulation wraps on overflow and `i-0e` yields zero.
fn decode_integer(buf: &[u8], base: usize) -> Result<(Value, usize)> {
    let negative = buf.get(1) == Some(&b'-');
    let digits_start = if negative { 2 } else { 1 };

    let mut value: i64 = 0;
    let mut cursor = digits_start;
    loop {
        let byte = *buf.get(cursor).ok_or(BencodeError::UnexpectedEof {
            offset: base + cursor,
        })?;
        match byte {
            b'e' => break,
            b'0'..=b'9' => {
                value = value.wrapping_mul(10).wrapping_add(i64::from(byte - b'0'));
                cursor += 1;
            }
            other => {
                return Err(BencodeError::InvalidInteger {
                    offset: base + cursor,
                    message: format!("unexpected byte 0x{other:02x}"),
                })
            }
        }
    }

    if cursor == digits_start {
        return Err(BencodeError::InvalidInteger {
            offset: base + cursor,
            message: "no digits".to_string(),
        });
    }

    if negative {
        value = value.wrapping_neg();
    }
    Ok((Value::Integer(value), cursor + 1))
}

/// `<len>:<payload>`. Returns the payload bytes and the consumed length
/// (digits + colon + payload).
fn decode_string(buf: &[u8], base: usize) -> Result<(Vec<u8>, usize)> {
    let mut len: usize = 0;
    let mut cursor = 0;
    loop {
        let byte = *buf.get(cursor).ok_or(BencodeError::UnexpectedEof {
            offset: base + cursor,
        })?;
        match byte {
            b':' => break,
            b'0'..=b'9' => {
                len = len
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(usize::from(byte - b'0')))
                    .ok_or(BencodeError::InvalidStringLength {
                        offset: base + cursor,
                    })?;
                cursor += 1;
            }
            _ => {
                return Err(BencodeError::InvalidStringLength {
                    offset: base + cursor,
                })
            }
        }
    }

    // The length fits in usize but the payload end does not: blame the last digit.
    let start = cursor + 1;
    let end = start
        .checked_add(len)
        .ok_or(BencodeError::InvalidStringLength {
            offset: base + cursor - 1,
        })?;
    let payload = buf.get(start..end).ok_or(BencodeError::UnexpectedEof {
        offset: base + buf.len(),
    })?;

    Ok((payload.to_vec(), end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_table() {
        let cases: &[(&[u8], i64, usize)] = &[
            (b"i0e", 0, 3),
            (b"i2e", 2, 3),
            (b"i10e", 10, 4),
            (b"i-1e", -1, 4),
            (b"i-33e", -33, 5),
            (b"i123456789e", 123456789, 11),
            (b"i-0e", 0, 4),
        ];
        for (input, expected, consumed) in cases {
            let (value, used) = decode_integer(input, 0).unwrap();
            assert_eq!(value, Value::Integer(*expected), "input {:?}", input);
            assert_eq!(used, *consumed, "input {:?}", input);
        }
    }

    #[test]
    fn integer_extremes_wrap_into_i64() {
        let (value, _) = decode_integer(b"i-9223372036854775808e", 0).unwrap();
        assert_eq!(value, Value::Integer(i64::MIN));
        let (value, _) = decode_integer(b"i9223372036854775807e", 0).unwrap();
        assert_eq!(value, Value::Integer(i64::MAX));
    }

    #[test]
    fn string_table() {
        let cases: &[(&[u8], &[u8], usize)] = &[
            (b"1:a", b"a", 3),
            (b"9:abcdfsfgr", b"abcdfsfgr", 11),
            (b"11:abcdfsfgraa", b"abcdfsfgraa", 14),
            (b"0:", b"", 2),
        ];
        for (input, expected, consumed) in cases {
            let (bytes, used) = decode_string(input, 0).unwrap();
            assert_eq!(bytes.as_slice(), *expected);
            assert_eq!(used, *consumed);
        }
    }

    #[test]
    fn string_length_overflow_points_at_overflowing_digit() {
        let max = usize::MAX.to_string();
        let input = format!("{max}0:x");
        assert_eq!(
            decode_string(input.as_bytes(), 5).unwrap_err(),
            BencodeError::InvalidStringLength {
                offset: 5 + max.len()
            }
        );
    }

    #[test]
    fn string_payload_end_overflow_points_at_last_digit() {
        let max = usize::MAX.to_string();
        let input = format!("{max}:x");
        assert_eq!(
            decode_string(input.as_bytes(), 0).unwrap_err(),
            BencodeError::InvalidStringLength {
                offset: max.len() - 1
            }
        );
    }

    #[test]
    fn offsets_are_absolute() {
        let err = decode_integer(b"i1x", 10).unwrap_err();
        assert_eq!(
            err,
            BencodeError::InvalidInteger {
                offset: 12,
                message: "unexpected byte 0x78".to_string()
            }
        );
    }
}
