pub mod log;

pub use log::{LocatedPellet, PelletLog};

use crate::error::{Error, Result};
use crate::key::Key;
use crate::resource::ScanLimits;
use crate::token::{self, OFFSETS_TOKEN_LIMIT};
use crate::types::SkipPair;
use crate::value::ValueContainer;

const OFFSETS_INDICATOR: u8 = b'O';

/// One write-once record: a key, its values, and a skip trailer.
///
/// On-disk format:
/// ```text
/// ┌─────────┬────┬────────────┬────┬───┬────────────────────────────────┐
/// │ key     │ \n │ values     │ \n │ O │ payload_len(-offset:count)*    │
/// └─────────┴────┴────────────┴────┴───┴────────────────────────────────┘
///   └──── payload (payload_len bytes) ┘
/// ```
///
/// `N1\nV1\nA\nO7` is the pellet for key `1` holding one blob `A`.
///
/// Skip pairs are carried through as given; nothing here interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pellet {
    key: Key,
    values: ValueContainer,
    payload_length: usize,
    skips: Vec<SkipPair>,
}

impl Pellet {
    /// Assemble a pellet with an empty skip table.
    pub fn new(key: Key, values: ValueContainer) -> Self {
        let payload_length = encode_payload(&key, &values).len();
        Pellet {
            key,
            values,
            payload_length,
            skips: Vec::new(),
        }
    }

    /// Replace the skip table.
    pub fn with_skips<I, S>(mut self, skips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SkipPair>,
    {
        self.skips = skips.into_iter().map(Into::into).collect();
        self
    }

    /// The pellet's key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The pellet's value container.
    pub fn values(&self) -> &ValueContainer {
        &self.values
    }

    /// Bytes in the key + newline + values payload. For a decoded pellet
    /// this is the value read from its trailer.
    pub fn payload_length(&self) -> usize {
        self.payload_length
    }

    /// Skip pairs in trailer order.
    pub fn skips(&self) -> &[SkipPair] {
        &self.skips
    }

    /// Split into key, values and skip table.
    pub fn into_parts(self) -> (Key, ValueContainer, Vec<SkipPair>) {
        (self.key, self.values, self.skips)
    }

    /// Serialize the pellet. The trailer always records the real payload length.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = encode_payload(&self.key, &self.values);
        let trailer = Trailer {
            payload_length: buf.len(),
            skips: self.skips.clone(),
        };
        buf.push(b'\n');
        trailer.encode_into(&mut buf);
        buf
    }

    /// Decode a pellet at `start`. With `with_offsets` unset the trailer is
    /// not read and the returned end is the end of the values.
    pub fn decode(bytes: &[u8], start: usize, with_offsets: bool) -> Result<(Pellet, usize)> {
        let (key, key_end) = Key::decode(bytes, start)?;
        let (values, values_end) = ValueContainer::decode(bytes, key_end)?;

        if !with_offsets {
            return Ok((Pellet::new(key, values), values_end));
        }

        let (trailer, end) = Trailer::decode(bytes, values_end)?;
        let pellet = Pellet {
            key,
            values,
            payload_length: trailer.payload_length,
            skips: trailer.skips,
        };
        Ok((pellet, end))
    }
}

fn encode_payload(key: &Key, values: &ValueContainer) -> Vec<u8> {
    let mut buf = Vec::new();
    key.encode_into(&mut buf);
    buf.push(b'\n');
    values.encode_into(&mut buf);
    buf
}

/// The `O` field closing every pellet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub payload_length: usize,
    pub skips: Vec<SkipPair>,
}

impl Trailer {
    /// Append `O`, the payload length and each `-offset:count` pair.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.push(OFFSETS_INDICATOR);
        buf.extend_from_slice(self.payload_length.to_string().as_bytes());
        for skip in &self.skips {
            buf.extend_from_slice(format!("-{}:{}", skip.offset, skip.count).as_bytes());
        }
    }

    /// Decode a trailer at `start` with the default offsets lookahead.
    pub fn decode(bytes: &[u8], start: usize) -> Result<(Trailer, usize)> {
        Self::decode_with_limit(bytes, start, OFFSETS_TOKEN_LIMIT)
    }

    /// Decode a trailer whose offsets token must end within `max_length` bytes.
    pub fn decode_with_limit(bytes: &[u8], start: usize, max_length: usize) -> Result<(Trailer, usize)> {
        match bytes.get(start) {
            Some(&OFFSETS_INDICATOR) => {}
            other => {
                return Err(Error::format(format!(
                    "unknown offsets indicator {} at offset {start}",
                    token::describe(other)
                )));
            }
        }

        let limits = ScanLimits::new(ScanLimits::DEFAULT_INITIAL, max_length);
        let (raw, end) = token::white_delimited(bytes, start + 1, limits)?;
        let text = token::ascii(&raw, start + 1)?;

        let mut segments = text.split('-');
        let head = segments.next().unwrap_or_default();
        let payload_length: usize = head
            .parse()
            .map_err(|_| Error::format(format!("bad payload length {head:?} at offset {start}")))?;

        let skips = segments
            .map(|pair| parse_skip(pair, start))
            .collect::<Result<Vec<_>>>()?;

        Ok((
            Trailer {
                payload_length,
                skips,
            },
            end,
        ))
    }
}

fn parse_skip(pair: &str, at: usize) -> Result<SkipPair> {
    let bad = || Error::format(format!("bad skip pair {pair:?} in trailer at offset {at}"));
    let (offset, count) = pair.split_once(':').ok_or_else(bad)?;
    Ok(SkipPair {
        offset: offset.parse().map_err(|_| bad())?,
        count: count.parse().map_err(|_| bad())?,
    })
}
