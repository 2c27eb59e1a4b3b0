//! Sequences the file loader and the header validation pipeline.

use crate::{
    Result,
    ehdr::{ElfHeader, Machine},
    input::FileImage,
    stage::ObjectQueue,
};
use log::debug;
use std::path::Path;

/// Snapshot of the header fields a successful load observed.
#[derive(Debug, Clone, Copy)]
pub struct LoadSummary {
    /// The file's declared machine kind.
    pub machine: Machine,
    /// Entry point address.
    pub entry: u64,
    /// Number of program headers.
    pub phdr_count: u16,
    /// Number of section headers.
    pub shdr_count: u16,
}

/// The load orchestrator.
///
/// Owns the staging [`ObjectQueue`] for one run and drives each input file
/// through open, header validation, and close. A failure on one file does
/// not poison the loader; callers keep feeding paths.
#[derive(Debug, Default)]
pub struct Loader {
    queue: ObjectQueue,
}

impl Loader {
    /// Creates a loader whose queue has the default capacity.
    pub fn new() -> Self {
        debug!("initializing object queue");
        Loader {
            queue: ObjectQueue::new(),
        }
    }

    /// Creates a loader whose queue is bounded at `cap` entries.
    pub fn with_queue_capacity(cap: usize) -> Result<Self> {
        debug!("initializing object queue (cap={cap})");
        Ok(Loader {
            queue: ObjectQueue::with_capacity(cap)?,
        })
    }

    /// The staging queue, for drain-time processing.
    pub fn queue(&self) -> &ObjectQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut ObjectQueue {
        &mut self.queue
    }

    /// Opens `path`, validates its ELF64 header, and reports what it saw.
    ///
    /// The file handle is released on every exit path, including header
    /// validation failures. An architecture mismatch against the host is
    /// advisory only and does not fail the load.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadSummary> {
        let image = FileImage::open(path)?;
        let ehdr = ElfHeader::parse(&image)?;
        debug!("{}: entrypoint=0x{:x}", image.name(), ehdr.e_entry);
        debug!("{}: program headers: {}", image.name(), ehdr.e_phnum);
        debug!("{}: section headers: {}", image.name(), ehdr.e_shnum);
        Ok(LoadSummary {
            machine: ehdr.machine(),
            entry: ehdr.e_entry,
            phdr_count: ehdr.e_phnum,
            shdr_count: ehdr.e_shnum,
        })
    }
}
