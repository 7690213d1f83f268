use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::pellet::{Pellet, Trailer};
use crate::resource::{scan_from_last_whitespace_to_end, ByteResource, ScanLimits};
use crate::types::Offset;

/// A pellet read back together with the offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedPellet {
    pub offset: Offset,
    pub pellet: Pellet,
}

/// Appends pellets to a resource and finds the newest one from the end.
///
/// Consecutive pellets are separated by a single newline, so the bytes
/// after the last whitespace in the resource are always the final
/// pellet's trailer. Its payload length gives the pellet's start without
/// a forward scan.
///
/// Single writer only. Readers must not look at a pellet mid-append.
pub struct PelletLog<R> {
    resource: R,
    limits: ScanLimits,
}

impl<R: ByteResource> PelletLog<R> {
    /// Wrap a resource with default scan limits.
    pub fn new(resource: R) -> Self {
        Self::with_limits(resource, ScanLimits::default())
    }

    /// Use custom window sizes for the trailer tail scan.
    pub fn with_limits(resource: R, limits: ScanLimits) -> Self {
        PelletLog { resource, limits }
    }

    /// Append a pellet, returning the offset of its first byte.
    pub fn append(&mut self, pellet: &Pellet) -> Result<Offset> {
        let encoded = pellet.encode();
        let offset = if self.resource.length()? == 0 {
            self.resource.append(&encoded)?
        } else {
            let mut buf = Vec::with_capacity(encoded.len() + 1);
            buf.push(b'\n');
            buf.extend_from_slice(&encoded);
            self.resource.append(&buf)? + 1
        };
        debug!(offset, len = encoded.len(), skips = pellet.skips().len(), "appended pellet");
        Ok(offset)
    }

    /// The last pellet in the resource, or `None` if it is empty.
    pub fn last(&self) -> Result<Option<LocatedPellet>> {
        let total = self.resource.length()?;
        if total == 0 {
            return Ok(None);
        }

        let tail = scan_from_last_whitespace_to_end(&self.resource, self.limits)?
            .ok_or_else(|| Error::format("no pellet trailer: resource holds no delimiter"))?;
        let (trailer, _) = Trailer::decode(&tail.bytes, 0)?;

        // trailer is preceded by the newline that closes the payload
        let offset = tail
            .start
            .checked_sub(1 + trailer.payload_length as u64)
            .ok_or_else(|| {
                Error::format(format!(
                    "trailer at {} claims payload of {} bytes, more than precede it",
                    tail.start, trailer.payload_length
                ))
            })?;

        let span = (total - offset) as usize;
        let chunk = self.resource.read(offset, span, true)?;
        let (pellet, end) = Pellet::decode(&chunk.bytes, 0, true)?;
        if end != chunk.bytes.len() {
            warn!(offset, end, span, "trailer payload length disagrees with pellet");
            return Err(Error::format(format!(
                "pellet at {offset} ends at {end}, trailer implies {span}"
            )));
        }

        debug!(offset, span, "recovered last pellet");
        Ok(Some(LocatedPellet { offset, pellet }))
    }

    /// The underlying resource.
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Give back the underlying resource.
    pub fn into_inner(self) -> R {
        self.resource
    }
}
