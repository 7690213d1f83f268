//! Field-level readers shared by the key, value and pellet codecs.

use crate::error::{Error, Result};
use crate::resource::{is_whitespace, scan_to_next_whitespace_or_end, ScanLimits};

/// Lookahead for a `N` number token: the longest `Number` text
/// (`-2.2250738585072014e-308`, 24 bytes) plus its delimiter.
pub const NUMBER_TOKEN_LIMIT: usize = 25;
/// Lookahead for the decimal length in front of a framed body.
pub const LENGTH_TOKEN_LIMIT: usize = 20;
/// Lookahead for a pellet's offsets trailer.
pub const OFFSETS_TOKEN_LIMIT: usize = 4048;

/// Read the token at `start` up to the next whitespace (or end of buffer).
///
/// Returns the token and the index just past it, including the delimiter
/// when one was present.
pub(crate) fn white_delimited(bytes: &[u8], start: usize, limits: ScanLimits) -> Result<(Vec<u8>, usize)> {
    if start > bytes.len() {
        return Err(Error::format(format!(
            "token start {start} past end of buffer ({})",
            bytes.len()
        )));
    }
    let token = match scan_to_next_whitespace_or_end(bytes, start as u64, limits) {
        Ok(token) => token,
        Err(Error::BoundNotFound { limit }) => {
            return Err(Error::format(format!(
                "no delimiter within {limit} bytes at offset {start}"
            )));
        }
        Err(e) => return Err(e),
    };
    let mut end = start + token.len();
    if end < bytes.len() {
        // the scan stopped on whitespace, consume it
        end += 1;
    }
    Ok((token, end))
}

/// Read a decimal byte length at `start`. Negative lengths are rejected.
pub(crate) fn white_delimited_len(bytes: &[u8], start: usize) -> Result<(usize, usize)> {
    let (token, end) = white_delimited(bytes, start, ScanLimits::fixed(LENGTH_TOKEN_LIMIT))?;
    let text = ascii(&token, start)?;
    let length: i64 = text
        .parse()
        .map_err(|_| Error::format(format!("bad length {text:?} at offset {start}")))?;
    if length < 0 {
        return Err(Error::format(format!("negative length {length} at offset {start}")));
    }
    let length = usize::try_from(length)
        .map_err(|_| Error::format(format!("length {length} does not fit in memory")))?;
    Ok((length, end))
}

/// Read a length-prefixed body whose length token begins at `start`.
///
/// Consumes one trailing whitespace byte if the buffer continues.
pub(crate) fn framed(bytes: &[u8], start: usize) -> Result<(&[u8], usize)> {
    let (length, body_start) = white_delimited_len(bytes, start)?;
    let body_end = body_start
        .checked_add(length)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| {
            Error::format(format!(
                "declared length {length} at offset {start} runs past end of buffer ({})",
                bytes.len()
            ))
        })?;
    let body = &bytes[body_start..body_end];
    let end = consume_delimiter(bytes, body_end)?;
    Ok((body, end))
}

/// If a byte remains at `at` it must be whitespace; step over it.
pub(crate) fn consume_delimiter(bytes: &[u8], at: usize) -> Result<usize> {
    match bytes.get(at) {
        None => Ok(at),
        Some(&b) if is_whitespace(b) => Ok(at + 1),
        Some(&b) => Err(Error::format(format!(
            "expected whitespace at offset {at}, found {:?}",
            char::from(b)
        ))),
    }
}

/// Token as text. Indicators, numbers and lengths are all ASCII.
pub(crate) fn ascii(token: &[u8], start: usize) -> Result<&str> {
    std::str::from_utf8(token)
        .map_err(|_| Error::format(format!("non-ASCII token at offset {start}")))
}

/// Render an indicator byte for error messages; `end of buffer` if absent.
pub(crate) fn describe(indicator: Option<&u8>) -> String {
    match indicator {
        Some(&b) => format!("{:?}", char::from(b)),
        None => "end of buffer".to_string(),
    }
}
