use crate::error::{Error, Result};
use crate::resource::is_whitespace;
use crate::token;

const DELETED_INDICATOR: u8 = b'D';
const REFERENCE_INDICATOR: u8 = b'R';
const VALUE_INDICATOR: u8 = b'V';

/// The payload half of a pellet.
///
/// ```text
/// D                        tombstone
/// R29\nhttp://example.com/  reference to bytes stored elsewhere
/// V1\nA\nV2\nBC             two blobs, order preserved
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueContainer {
    Deleted,
    Reference(Vec<u8>),
    Values(Vec<Vec<u8>>),
}

impl ValueContainer {
    /// Reference to bytes stored elsewhere.
    pub fn reference(bytes: impl Into<Vec<u8>>) -> Self {
        ValueContainer::Reference(bytes.into())
    }

    /// Blob sequence, kept in the given order.
    pub fn values<I, B>(blobs: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        ValueContainer::Values(blobs.into_iter().map(Into::into).collect())
    }

    /// True for the tombstone.
    pub fn is_deleted(&self) -> bool {
        matches!(self, ValueContainer::Deleted)
    }

    /// The referenced bytes, if this is a reference.
    pub fn as_reference(&self) -> Option<&[u8]> {
        match self {
            ValueContainer::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// The blobs, if this is a `Values` container.
    pub fn blobs(&self) -> Option<&[Vec<u8>]> {
        match self {
            ValueContainer::Values(blobs) => Some(blobs),
            _ => None,
        }
    }

    /// Add one blob to a `Values` container. Other variants fail.
    pub fn push(&mut self, blob: impl Into<Vec<u8>>) -> Result<()> {
        match self {
            ValueContainer::Values(blobs) => {
                blobs.push(blob.into());
                Ok(())
            }
            _ => Err(Error::format("only a Values container holds blobs")),
        }
    }

    /// Canonical bytes. An empty `Values` encodes to nothing.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf);
        buf
    }

    /// Append the canonical bytes to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            ValueContainer::Deleted => buf.push(DELETED_INDICATOR),
            ValueContainer::Reference(bytes) => encode_framed(buf, REFERENCE_INDICATOR, bytes),
            ValueContainer::Values(blobs) => {
                for (i, blob) in blobs.iter().enumerate() {
                    if i > 0 {
                        buf.push(b'\n');
                    }
                    encode_framed(buf, VALUE_INDICATOR, blob);
                }
            }
        }
    }

    /// Decode a container at `start`, returning it with the index just
    /// past it (and past one trailing delimiter, if any).
    ///
    /// `V` blocks repeat until the next indicator differs. A position at
    /// end of buffer, or holding a lone delimiter, is an empty `Values`.
    pub fn decode(bytes: &[u8], start: usize) -> Result<(ValueContainer, usize)> {
        match bytes.get(start) {
            Some(&DELETED_INDICATOR) => {
                let end = token::consume_delimiter(bytes, start + 1)?;
                Ok((ValueContainer::Deleted, end))
            }
            Some(&REFERENCE_INDICATOR) => {
                let (body, end) = token::framed(bytes, start + 1)?;
                Ok((ValueContainer::Reference(body.to_vec()), end))
            }
            Some(&VALUE_INDICATOR) => {
                let mut blobs = Vec::new();
                let mut end = start;
                while bytes.get(end) == Some(&VALUE_INDICATOR) {
                    let (body, next) = token::framed(bytes, end + 1)?;
                    blobs.push(body.to_vec());
                    end = next;
                }
                Ok((ValueContainer::Values(blobs), end))
            }
            None if start == bytes.len() => Ok((ValueContainer::Values(Vec::new()), start)),
            Some(&b) if is_whitespace(b) => Ok((ValueContainer::Values(Vec::new()), start + 1)),
            other => Err(Error::format(format!(
                "unknown values indicator {} at offset {start}",
                token::describe(other)
            ))),
        }
    }
}

fn encode_framed(buf: &mut Vec<u8>, indicator: u8, body: &[u8]) {
    buf.push(indicator);
    buf.extend_from_slice(body.len().to_string().as_bytes());
    buf.push(b'\n');
    buf.extend_from_slice(body);
}
