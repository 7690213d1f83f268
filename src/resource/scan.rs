use std::io;

use tracing::trace;

use crate::error::{Error, Result};
use crate::resource::{ByteResource, ScanLimits};
use crate::types::Offset;

/// The single-byte ASCII whitespace class: space, `\t`, `\n`, `\r`, VT, FF.
///
/// Matched byte-wise. Framed payload bytes are never scanned, so a
/// whitespace byte inside a value cannot be mistaken for a delimiter.
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// The token following the last whitespace byte of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailToken {
    pub bytes: Vec<u8>,
    /// Absolute offset of the first byte after the whitespace.
    pub start: Offset,
}

/// Find the final whitespace-delimited token before end-of-data.
///
/// Reads the trailing `limits.initial` bytes and doubles the window until
/// a whitespace byte shows up. Returns `Ok(None)` when the window already
/// covers the whole resource and no whitespace exists anywhere, and
/// [`Error::BoundNotFound`] when the window would have to exceed `limits.max`.
///
/// ```text
///   " aa b"  →  TailToken { bytes: "b", start: 4 }
/// ```
pub fn scan_from_last_whitespace_to_end<R>(resource: &R, limits: ScanLimits) -> Result<Option<TailToken>>
where
    R: ByteResource + ?Sized,
{
    let total = resource.length()?;
    let mut window = limits.first_window();

    loop {
        let position = total.saturating_sub(window as u64);
        let chunk = resource.read(position, window, false)?;
        if !chunk.at_eof {
            // only possible if the resource shrank or grew between calls
            return Err(Error::Io(io::Error::other(
                "resource length changed during tail scan",
            )));
        }

        if let Some(ws) = chunk.bytes.iter().rposition(|&b| is_whitespace(b)) {
            let skip = ws + 1;
            return Ok(Some(TailToken {
                bytes: chunk.bytes[skip..].to_vec(),
                start: position + skip as u64,
            }));
        }

        if window as u64 >= total {
            return Ok(None);
        }

        window = match limits.grow(window) {
            Some(next) => next,
            None => return Err(Error::BoundNotFound { limit: limits.max }),
        };
        trace!(window, total, "tail scan widening");
    }
}

/// Bytes from `start` up to (excluding) the next whitespace, or to
/// end-of-data when no whitespace follows.
///
/// Same doubling policy as [`scan_from_last_whitespace_to_end`]; fails with
/// [`Error::BoundNotFound`] when `limits.max` bytes contain no whitespace and
/// the end has not been reached.
pub fn scan_to_next_whitespace_or_end<R>(resource: &R, start: Offset, limits: ScanLimits) -> Result<Vec<u8>>
where
    R: ByteResource + ?Sized,
{
    let mut window = limits.first_window();

    loop {
        let mut chunk = resource.read(start, window, false)?;

        if let Some(ws) = chunk.bytes.iter().position(|&b| is_whitespace(b)) {
            chunk.bytes.truncate(ws);
            return Ok(chunk.bytes);
        }
        if chunk.at_eof {
            return Ok(chunk.bytes);
        }

        window = match limits.grow(window) {
            Some(next) => next,
            None => return Err(Error::BoundNotFound { limit: limits.max }),
        };
        trace!(start, window, "forward scan widening");
    }
}
