use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::resource::{ByteResource, ReadChunk};
use crate::types::Offset;

/// A resource backed by an open file.
///
/// Every `length()` seeks to the end, so growth by another handle is
/// visible immediately. Appends always land at the current end.
///
/// Reads and writes go through `&File`, which implements `Read`, `Write`
/// and `Seek`, so reading does not need `&mut self`. The seek position
/// is shared state: keep one `FileResource` per thread.
#[derive(Debug)]
pub struct FileResource {
    file: File,
    writeable: bool,
}

impl FileResource {
    /// Open an existing file read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(FileResource {
            file,
            writeable: false,
        })
    }

    /// Open (creating if missing) a file for reading and appending.
    pub fn open_writeable(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;
        Ok(FileResource {
            file,
            writeable: true,
        })
    }

    /// Wrap an already open handle. The handle must allow reads, and
    /// writes too when `writeable` is set.
    pub fn from_file(file: File, writeable: bool) -> Self {
        FileResource { file, writeable }
    }

    /// Whether appends are allowed.
    pub fn is_writeable(&self) -> bool {
        self.writeable
    }

    /// Force appended bytes to disk.
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Give back the file handle.
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl ByteResource for FileResource {
    fn length(&self) -> Result<u64> {
        let end = (&self.file).seek(SeekFrom::End(0))?;
        Ok(end)
    }

    fn read(&self, start: Offset, len: usize, strict: bool) -> Result<ReadChunk> {
        let length = self.length()?;
        if start > length {
            return Err(Error::OutOfRange { start, length });
        }
        if strict && start.saturating_add(len as u64) > length {
            return Err(Error::Truncated {
                start,
                requested: len,
                available: length - start,
            });
        }

        let mut handle = &self.file;
        handle.seek(SeekFrom::Start(start))?;
        let mut bytes = Vec::with_capacity(len.min((length - start) as usize));
        handle.take(len as u64).read_to_end(&mut bytes)?;

        let at_eof = start + bytes.len() as u64 >= length;
        Ok(ReadChunk { bytes, at_eof })
    }

    fn append(&mut self, bytes: &[u8]) -> Result<Offset> {
        if !self.writeable {
            return Err(Error::ReadOnly);
        }
        // length() leaves the cursor at the end
        let offset = self.length()?;
        self.file.write_all(bytes)?;
        self.file.flush()?;
        debug!(offset, len = bytes.len(), "appended to file resource");
        Ok(offset)
    }
}
