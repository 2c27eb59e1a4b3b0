//! # objstage
//! The staging front end of a linker-adjacent tool: it ingests compiled
//! object files, validates their ELF64 headers against the host machine,
//! and holds compressed object blobs in a bounded FIFO queue until a later
//! stage injects them into a section of the output executable.
//! ## Example
//! ```no_run
//! use objstage::Loader;
//!
//! let mut loader = Loader::new();
//! let summary = loader.load("crt0.o").unwrap();
//! println!("entry=0x{:x} ({})", summary.entry, summary.machine);
//! ```
//! Symbol resolution, relocation, payload compression, and the final
//! section write happen in later stages and are not part of this crate.

pub mod buffer;
mod ehdr;
mod error;
pub mod input;
mod loader;
pub mod stage;

pub use ehdr::{EHDR_SIZE, ElfHeader, Machine};
pub use error::Error;
pub use loader::{LoadSummary, Loader};

/// Alias for a `Result` carrying this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
