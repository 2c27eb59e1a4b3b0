//! ELF64 header interpretation and machine classification.

use crate::{Result, error::parse_ehdr_error};
use core::fmt::{self, Display};
use elf::abi::{ELFMAGIC, EM_AARCH64, EM_PPC64, EM_X86_64};
use log::{debug, warn};

/// Size in bytes of an ELF64 header.
pub const EHDR_SIZE: usize = size_of::<ElfHeader>();

cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        const HOST_MACHINE: Machine = Machine::X86_64;
    } else if #[cfg(target_arch = "aarch64")] {
        const HOST_MACHINE: Machine = Machine::Aarch64;
    } else if #[cfg(target_arch = "powerpc64")] {
        const HOST_MACHINE: Machine = Machine::Ppc64;
    } else {
        const HOST_MACHINE: Machine = Machine::Unknown;
    }
}

/// Classification of a target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Machine {
    X86_64,
    Aarch64,
    Ppc64,
    /// Any machine code outside the supported set.
    Unknown,
}

impl Machine {
    /// The machine kind this crate was compiled for.
    pub const HOST: Machine = HOST_MACHINE;

    /// Classifies a raw `e_machine` value.
    pub fn from_elf(e_machine: u16) -> Machine {
        match e_machine {
            EM_X86_64 => Machine::X86_64,
            EM_AARCH64 => Machine::Aarch64,
            EM_PPC64 => Machine::Ppc64,
            _ => Machine::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Machine::X86_64 => "x86_64",
            Machine::Aarch64 => "aarch64",
            Machine::Ppc64 => "ppc64",
            Machine::Unknown => "unknown",
        }
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read-only interpretation of the leading bytes of an object file as an
/// ELF64 header.
#[derive(Debug, Clone)]
#[repr(C)]
pub struct ElfHeader {
    pub e_ident: [u8; 16],
    pub e_type: u16,
    pub e_machine: u16,
    pub e_version: u32,
    pub e_entry: u64,
    pub e_phoff: u64,
    pub e_shoff: u64,
    pub e_flags: u32,
    pub e_ehsize: u16,
    pub e_phentsize: u16,
    pub e_phnum: u16,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,
}

impl ElfHeader {
    /// Interprets the start of `data` as an ELF64 header and validates it.
    ///
    /// The header is copied out of the buffer rather than viewed in place;
    /// input buffers are only byte-aligned while the header carries 8-byte
    /// fields.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < EHDR_SIZE {
            return Err(parse_ehdr_error("file too small for an ELF64 header"));
        }
        let ehdr: ElfHeader = unsafe { core::ptr::read_unaligned(data.as_ptr().cast()) };
        ehdr.validate()?;
        Ok(ehdr)
    }

    /// Runs the preliminary header checks.
    ///
    /// A wrong magic sequence fails before the machine field is consulted.
    /// An architecture mismatch against the host is advisory: it emits a
    /// single warning and validation still succeeds.
    pub fn validate(&self) -> Result<()> {
        if self.e_ident[0..4] != ELFMAGIC {
            return Err(parse_ehdr_error("invalid ELF magic"));
        }
        let target = self.machine();
        let current = Machine::HOST;
        debug!("target={target}, current={current}");
        if target != current {
            warn!("target {target} will not run on {current}");
        }
        Ok(())
    }

    /// The header's declared machine kind.
    #[inline]
    pub fn machine(&self) -> Machine {
        Machine::from_elf(self.e_machine)
    }
}
