use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::resource::{is_whitespace, ScanLimits};
use crate::token::{self, NUMBER_TOKEN_LIMIT};

const NUMBER_INDICATOR: u8 = b'N';
const STRING_INDICATOR: u8 = b'S';
const COMPOSITE_INDICATOR: u8 = b'C';

/// Deepest composite nesting `Key::decode` accepts.
pub const MAX_COMPOSITE_DEPTH: usize = 256;

/// The numeric payload of a number key.
///
/// Integers and floats compare by numeric value, so `Int(1) == Float(1.0)`.
/// Comparison between the two is exact (no cast of large integers to f64).
/// NaN sorts above every number when positive and below when negative.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Integer parse first, float as a fallback.
    pub fn parse(text: &str) -> Option<Number> {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Int(i));
        }
        text.parse::<f64>().ok().map(Number::Float)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            // Debug keeps a fraction or exponent, so floats stay floats
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Number::Int(i)
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Number::Int(i64::from(i))
    }
}

impl From<u32> for Number {
    fn from(i: u32) -> Self {
        Number::Int(i64::from(i))
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}

fn cmp_floats(a: f64, b: f64) -> Ordering {
    // ±0 compare equal; NaN falls back to the IEEE total order
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

fn cmp_int_float(i: i64, x: f64) -> Ordering {
    // 2^63, exactly representable
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if x.is_nan() {
        return if x.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if x >= BOUND {
        return Ordering::Less;
    }
    if x < -BOUND {
        return Ordering::Greater;
    }
    let whole = x.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_floats(0.0, x - whole),
        other => other,
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => cmp_floats(a, b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

/// An ordered pellet key.
///
/// Keys of different variants order by variant alone:
/// every `Number` < every `String` < every `Composite`.
/// Composites compare `key1` first and `key2` only on a tie.
///
/// Encoding, comparison and drop all recurse through composites, so
/// keys built by hand should stay within [`MAX_COMPOSITE_DEPTH`] like
/// decoded ones do.
///
/// Wire forms:
/// ```text
/// N1012
/// S6\nÄijö
/// C\nN10\nS2\nab
/// ```
#[derive(Debug, Clone)]
pub enum Key {
    Number(Number),
    String(String),
    Composite(Box<Key>, Box<Key>),
}

impl Key {
    /// Number key from any integer or float.
    pub fn number(n: impl Into<Number>) -> Self {
        Key::Number(n.into())
    }

    /// String key.
    pub fn string(s: impl Into<String>) -> Self {
        Key::String(s.into())
    }

    /// Pair key ordered by `key1`, then `key2`.
    pub fn composite(key1: Key, key2: Key) -> Self {
        Key::Composite(Box::new(key1), Box::new(key2))
    }

    /// Variant rank used for cross-variant ordering.
    fn rank(&self) -> u8 {
        match self {
            Key::Number(_) => 0,
            Key::String(_) => 1,
            Key::Composite(..) => 2,
        }
    }

    /// The number, if this is a number key.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Key::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            _ => None,
        }
    }

    /// Both halves, if this is a composite key.
    pub fn as_composite(&self) -> Option<(&Key, &Key)> {
        match self {
            Key::Composite(k1, k2) => Some((k1, k2)),
            _ => None,
        }
    }

    /// Canonical bytes. No trailing separator is emitted.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf);
        buf
    }

    /// Append the canonical bytes to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Key::Number(n) => {
                buf.push(NUMBER_INDICATOR);
                buf.extend_from_slice(n.to_string().as_bytes());
            }
            Key::String(s) => {
                buf.push(STRING_INDICATOR);
                buf.extend_from_slice(s.len().to_string().as_bytes());
                buf.push(b'\n');
                buf.extend_from_slice(s.as_bytes());
            }
            Key::Composite(k1, k2) => {
                buf.push(COMPOSITE_INDICATOR);
                buf.push(b'\n');
                k1.encode_into(buf);
                // delimiter consumed by key1's decode
                buf.push(b'\n');
                k2.encode_into(buf);
            }
        }
    }

    /// Decode the key starting at `start`, returning it with the index
    /// just past it (and past its trailing delimiter, if any).
    ///
    /// Composites nest at most [`MAX_COMPOSITE_DEPTH`] deep; deeper input
    /// is a format error.
    pub fn decode(bytes: &[u8], start: usize) -> Result<(Key, usize)> {
        Self::decode_at(bytes, start, 0)
    }

    fn decode_at(bytes: &[u8], start: usize, depth: usize) -> Result<(Key, usize)> {
        match bytes.get(start) {
            Some(&NUMBER_INDICATOR) => {
                let (text, end) =
                    token::white_delimited(bytes, start + 1, ScanLimits::fixed(NUMBER_TOKEN_LIMIT))?;
                let text = token::ascii(&text, start + 1)?;
                let n = Number::parse(text).ok_or_else(|| {
                    Error::format(format!("bad number {text:?} at offset {}", start + 1))
                })?;
                Ok((Key::Number(n), end))
            }
            Some(&STRING_INDICATOR) => {
                let (body, end) = token::framed(bytes, start + 1)?;
                let s = std::str::from_utf8(body).map_err(|e| {
                    Error::format(format!("string key at offset {start} is not UTF-8: {e}"))
                })?;
                Ok((Key::String(s.to_owned()), end))
            }
            Some(&COMPOSITE_INDICATOR) => {
                if depth >= MAX_COMPOSITE_DEPTH {
                    return Err(Error::format(format!(
                        "composite key at offset {start} nested deeper than {MAX_COMPOSITE_DEPTH}"
                    )));
                }
                match bytes.get(start + 1) {
                    Some(&b) if is_whitespace(b) => {}
                    other => {
                        return Err(Error::format(format!(
                            "expected whitespace after composite indicator at offset {start}, found {}",
                            token::describe(other)
                        )));
                    }
                }
                let (key1, key1_end) = Self::decode_at(bytes, start + 2, depth + 1)?;
                let (key2, end) = Self::decode_at(bytes, key1_end, depth + 1)?;
                Ok((Key::composite(key1, key2), end))
            }
            other => Err(Error::format(format!(
                "unknown key indicator {} at offset {start}",
                token::describe(other)
            ))),
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Number(a), Key::Number(b)) => a.cmp(b),
            (Key::String(a), Key::String(b)) => a.cmp(b),
            (Key::Composite(a1, a2), Key::Composite(b1, b2)) => a1.cmp(b1).then_with(|| a2.cmp(b2)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::number(i)
    }
}

impl From<f64> for Key {
    fn from(x: f64) -> Self {
        Key::number(x)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::string(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}
