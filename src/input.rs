//! On-disk object file access.
//!
//! A [`FileImage`] is the file loader's handle: it owns the open descriptor
//! and a [`ByteBuffer`] holding the file's full contents. Dropping the
//! handle releases descriptor, buffer, and record together, on every exit
//! path.

use crate::{Result, buffer::ByteBuffer, error::io_error};
use core::ops::Deref;
use std::{
    fs::{self, File},
    io::Read,
    path::Path,
};

/// An object file fully read into memory.
///
/// The buffer's length equals the file size captured at open time. The
/// descriptor stays open for the handle's lifetime; later pipeline stages
/// reuse it for positioned reads.
#[derive(Debug)]
pub struct FileImage {
    name: String,
    file: File,
    data: ByteBuffer,
}

impl FileImage {
    /// Opens `path` read-only and reads it fully into a fresh buffer.
    ///
    /// Fails on the first failing step: stat, open, buffer allocation, or
    /// the read itself. A short read is a distinct I/O failure rather than
    /// silent trailing zeros. Whatever was acquired before the failure is
    /// released by drop.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let size = fs::metadata(path)
            .map_err(|err| io_error(format!("failed to stat '{}': {err}", path.display())))?
            .len();
        let size = usize::try_from(size)
            .map_err(|_| io_error(format!("'{}' is too large to load", path.display())))?;
        let mut file = File::open(path)
            .map_err(|err| io_error(format!("failed to open '{}': {err}", path.display())))?;
        let mut data = ByteBuffer::zeroed(size)?;
        file.read_exact(&mut data)
            .map_err(|err| io_error(format!("failed to read '{}': {err}", path.display())))?;
        Ok(FileImage {
            name: path.display().to_string(),
            file,
            data,
        })
    }

    /// The path this image was opened from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length of the file contents in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The buffer holding the file contents.
    #[inline]
    pub fn buffer(&self) -> &ByteBuffer {
        &self.data
    }

    /// The underlying descriptor, for stages that read past the header.
    #[cfg(unix)]
    pub fn as_fd(&self) -> i32 {
        use std::os::fd::AsRawFd;
        self.file.as_raw_fd()
    }

    #[cfg(not(unix))]
    pub fn as_file(&self) -> &File {
        &self.file
    }
}

impl Deref for FileImage {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
