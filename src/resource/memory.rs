use tracing::debug;

use crate::error::{Error, Result};
use crate::resource::{read_slice, ByteResource, ReadChunk};
use crate::types::Offset;

/// An in-memory byte buffer.
///
/// Read-only unless built with [`MemoryResource::writeable`].
#[derive(Debug, Clone, Default)]
pub struct MemoryResource {
    data: Vec<u8>,
    writeable: bool,
}

impl MemoryResource {
    /// Wrap existing bytes as a read-only resource.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        MemoryResource {
            data: data.into(),
            writeable: false,
        }
    }

    /// Wrap existing bytes and allow appends.
    pub fn writeable(data: impl Into<Vec<u8>>) -> Self {
        MemoryResource {
            data: data.into(),
            writeable: true,
        }
    }

    /// Whether appends are allowed.
    pub fn is_writeable(&self) -> bool {
        self.writeable
    }

    /// All committed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Give back the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ByteResource for MemoryResource {
    fn length(&self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read(&self, start: Offset, len: usize, strict: bool) -> Result<ReadChunk> {
        read_slice(&self.data, start, len, strict)
    }

    fn append(&mut self, bytes: &[u8]) -> Result<Offset> {
        if !self.writeable {
            return Err(Error::ReadOnly);
        }
        let offset = self.data.len() as Offset;
        self.data.extend_from_slice(bytes);
        debug!(offset, len = bytes.len(), "appended to memory resource");
        Ok(offset)
    }
}
