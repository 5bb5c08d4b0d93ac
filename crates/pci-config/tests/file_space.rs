#![cfg(any(unix, windows))]

use std::io::Write as _;

use pci_config::access::{read_u16, read_u32};
use pci_config::{read_register, write_register, ConfigError, ConfigSpace, FileConfigSpace};

fn config_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn size_comes_from_file_length() {
    let file = config_file(&[0u8; 256]);
    let space = FileConfigSpace::open(file.path()).unwrap();
    assert_eq!(space.size(), 256);
}

#[test]
fn reads_registers_from_file() {
    let mut bytes = [0u8; 64];
    bytes[..4].copy_from_slice(&[0xde, 0x10, 0x86, 0x1f]);
    let file = config_file(&bytes);

    let space = FileConfigSpace::open(file.path()).unwrap();
    assert_eq!(read_u16(&space, 0).unwrap(), 0x10de);
    assert_eq!(read_u16(&space, 2).unwrap(), 0x1f86);
    assert_eq!(read_u32(&space, 0).unwrap(), 0x1f86_10de);
}

#[test]
fn writes_go_to_the_requested_offset() {
    let file = config_file(&[0u8; 256]);
    let mut space = FileConfigSpace::open_writable(file.path()).unwrap();
    write_register(&mut space, 0x04, 16, 0x0406).unwrap();
    write_register(&mut space, 0x3c, 8, 0x0b).unwrap();

    let bytes = std::fs::read(file.path()).unwrap();
    assert_eq!(bytes[0x04..0x06], [0x06, 0x04]);
    assert_eq!(bytes[0x3c], 0x0b);
    assert_eq!(bytes.len(), 256);
}

#[test]
fn read_only_space_reports_transport_error_on_write() {
    let file = config_file(&[0u8; 256]);
    let mut space = FileConfigSpace::open(file.path()).unwrap();
    let err = write_register(&mut space, 0, 32, 0).unwrap_err();
    assert!(matches!(err, ConfigError::Transport { offset: 0, width: 32, .. }), "{err:?}");
}

#[test]
fn unprivileged_view_surfaces_as_short_read() {
    // sysfs reports 256 bytes but only hands out the first 64 to unprivileged readers.
    let file = config_file(&[0xffu8; 66]);
    let space = FileConfigSpace::from_file(file.reopen().unwrap(), 256);

    assert_eq!(read_register(&space, 0x3c, 32).unwrap(), 0xffff_ffff);
    let err = read_register(&space, 0x40, 32).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ShortRead {
            offset: 0x40,
            width: 32,
            expected: 4,
            actual: 2
        }
    ), "{err:?}");
    assert!(matches!(
        read_register(&space, 0x80, 8).unwrap_err(),
        ConfigError::ShortRead { actual: 0, .. }
    ));
}
