use core::fmt::{Debug, Display};
use std::borrow::Cow;

/// Error types used throughout the `objstage` library.
///
/// Each variant corresponds to one failure class in the staging pipeline:
/// allocation, file I/O, queue capacity, queue membership, and ELF header
/// validation.
#[derive(Debug)]
pub enum Error {
    /// An error occurred while stating, opening, or reading an object file.
    Io {
        /// A descriptive message about the I/O error.
        msg: Cow<'static, str>,
    },

    /// A byte buffer could not be allocated or resized.
    ///
    /// Zero-length requests are rejected with this variant as well: a buffer
    /// is either fully valid (region plus positive length) or absent.
    Alloc {
        /// A descriptive message about the allocation error.
        msg: Cow<'static, str>,
    },

    /// An object queue capacity bound was violated.
    ///
    /// Raised both when a queue is created with a capacity above the fixed
    /// maximum and when an insertion would overflow a queue's configured
    /// capacity.
    Capacity {
        /// A descriptive message about the capacity error.
        msg: Cow<'static, str>,
    },

    /// A removal target was not present in the object queue.
    ///
    /// This is a recoverable condition; the queue is left unchanged.
    NotStaged {
        /// A descriptive message naming the missing object.
        msg: Cow<'static, str>,
    },

    /// An input file failed ELF64 header validation.
    ///
    /// This error typically indicates issues with the ELF header such as:
    /// * Invalid magic bytes
    /// * A file too small to contain a full header
    ParseEhdr {
        /// A descriptive message about the ELF header parsing error.
        msg: Cow<'static, str>,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Io { msg } => write!(f, "I/O error: {msg}"),
            Error::Alloc { msg } => write!(f, "allocation error: {msg}"),
            Error::Capacity { msg } => write!(f, "capacity error: {msg}"),
            Error::NotStaged { msg } => write!(f, "not staged: {msg}"),
            Error::ParseEhdr { msg } => write!(f, "ELF header parsing error: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        io_error(err.to_string())
    }
}

/// Creates an I/O error with the specified message.
#[cold]
#[inline(never)]
pub(crate) fn io_error(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Io { msg: msg.into() }
}

/// Creates an allocation error with the specified message.
#[cold]
#[inline(never)]
pub(crate) fn alloc_error(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Alloc { msg: msg.into() }
}

/// Creates a capacity error with the specified message.
#[cold]
#[inline(never)]
pub(crate) fn capacity_error(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::Capacity { msg: msg.into() }
}

/// Creates a not-staged error with the specified message.
#[cold]
#[inline(never)]
pub(crate) fn not_staged_error(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::NotStaged { msg: msg.into() }
}

/// Creates an ELF header parsing error with the specified message.
#[cold]
#[inline(never)]
pub(crate) fn parse_ehdr_error(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::ParseEhdr { msg: msg.into() }
}
