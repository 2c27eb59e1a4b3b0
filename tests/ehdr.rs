use elf::abi::{
    ELFCLASS64, ELFDATA2LSB, ELFMAGIC, EM_AARCH64, EM_PPC64, EM_RISCV, EM_X86_64, ET_REL,
    EV_CURRENT,
};
use objstage::{EHDR_SIZE, ElfHeader, Error, Machine};

/// Builds a minimal well-formed ELF64 header with the given machine code.
fn ehdr_bytes(e_machine: u16) -> [u8; EHDR_SIZE] {
    let mut raw = [0u8; EHDR_SIZE];
    raw[..4].copy_from_slice(&ELFMAGIC);
    raw[4] = ELFCLASS64;
    raw[5] = ELFDATA2LSB;
    raw[6] = EV_CURRENT;
    raw[16..18].copy_from_slice(&ET_REL.to_le_bytes());
    raw[18..20].copy_from_slice(&e_machine.to_le_bytes());
    raw[24..32].copy_from_slice(&0x40_1000u64.to_le_bytes());
    // 2 program headers, 3 section headers.
    raw[56..58].copy_from_slice(&2u16.to_le_bytes());
    raw[60..62].copy_from_slice(&3u16.to_le_bytes());
    raw
}

#[test]
fn machine_classification() {
    assert_eq!(Machine::from_elf(EM_X86_64), Machine::X86_64);
    assert_eq!(Machine::from_elf(EM_AARCH64), Machine::Aarch64);
    assert_eq!(Machine::from_elf(EM_PPC64), Machine::Ppc64);
    assert_eq!(Machine::from_elf(EM_RISCV), Machine::Unknown);
    assert_eq!(Machine::from_elf(0xffff), Machine::Unknown);
}

#[test]
fn machine_display_strings() {
    assert_eq!(Machine::X86_64.to_string(), "x86_64");
    assert_eq!(Machine::Aarch64.to_string(), "aarch64");
    assert_eq!(Machine::Ppc64.to_string(), "ppc64");
    assert_eq!(Machine::Unknown.to_string(), "unknown");
}

#[test]
fn well_formed_header_parses() {
    let raw = ehdr_bytes(EM_X86_64);
    let ehdr = ElfHeader::parse(&raw).unwrap();
    assert_eq!(ehdr.machine(), Machine::X86_64);
    assert_eq!(ehdr.e_entry, 0x40_1000);
    assert_eq!(ehdr.e_phnum, 2);
    assert_eq!(ehdr.e_shnum, 3);
}

#[test]
fn bad_magic_is_rejected() {
    let mut raw = ehdr_bytes(EM_X86_64);
    raw[0] = b'M';
    raw[1] = b'Z';
    let err = ElfHeader::parse(&raw).unwrap_err();
    assert!(matches!(err, Error::ParseEhdr { .. }));
}

#[test]
fn bad_magic_fails_even_with_garbage_machine_field() {
    // The magic check runs before the machine field is consulted, so a
    // nonsense machine code must not change the outcome.
    let mut raw = [0xffu8; EHDR_SIZE];
    raw[..4].copy_from_slice(b"NOPE");
    let err = ElfHeader::parse(&raw).unwrap_err();
    assert!(matches!(err, Error::ParseEhdr { .. }));
}

#[test]
fn truncated_header_is_rejected() {
    let raw = ehdr_bytes(EM_X86_64);
    let err = ElfHeader::parse(&raw[..32]).unwrap_err();
    assert!(matches!(err, Error::ParseEhdr { .. }));
}

#[test]
fn foreign_architecture_is_advisory_only() {
    // A header for a machine other than the host still validates; the
    // mismatch is reported as a warning, not a failure.
    for em in [EM_X86_64, EM_AARCH64, EM_PPC64, EM_RISCV] {
        let raw = ehdr_bytes(em);
        let ehdr = ElfHeader::parse(&raw).unwrap();
        assert_eq!(ehdr.machine(), Machine::from_elf(em));
    }
}

#[test]
fn host_machine_is_a_known_kind_on_supported_targets() {
    if cfg!(any(
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "powerpc64"
    )) {
        assert_ne!(Machine::HOST, Machine::Unknown);
    }
}
