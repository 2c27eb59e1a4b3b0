//! Growable raw-byte buffers backing every file's in-memory contents.
//!
//! A [`ByteBuffer`] is either fully valid (a region plus a positive length)
//! or it does not exist: zero-length allocation is rejected instead of
//! producing an empty buffer, and every allocation failure is surfaced as a
//! [`crate::Error::Alloc`] rather than an abort.

use crate::{Result, error::alloc_error};
use core::ops::{Deref, DerefMut};

/// An owned, resizable region of raw bytes.
///
/// The region and its bookkeeping are released together when the buffer is
/// dropped; they can never be released independently, and a double release
/// is unrepresentable.
#[derive(Debug)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Allocates a new zero-filled buffer of exactly `len` bytes.
    ///
    /// Fails when `len == 0` or when the allocator cannot provide the
    /// region.
    pub fn zeroed(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(alloc_error("zero-length buffer"));
        }
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| alloc_error("out of memory"))?;
        data.resize(len, 0);
        Ok(ByteBuffer { data })
    }

    /// Resizes the buffer to `new_len` bytes.
    ///
    /// Existing bytes are preserved up to the smaller of the old and new
    /// lengths; bytes added by a growing resize are zero. `new_len == 0` is
    /// a no-op, since a zero-length buffer is not a valid state.
    ///
    /// On a failed reservation the buffer is left exactly as it was, so a
    /// caller that handles the error keeps a usable region.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        if new_len == 0 {
            return Ok(());
        }
        if new_len > self.data.len() {
            self.data
                .try_reserve_exact(new_len - self.data.len())
                .map_err(|_| alloc_error("out of memory"))?;
            self.data.resize(new_len, 0);
        } else {
            // Truncation only; the shrink path must not reallocate.
            self.data.truncate(new_len);
        }
        Ok(())
    }

    /// Returns the buffer's length in bytes. Always positive.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for ByteBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}
