use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors surfaced by config-space register access.
///
/// None of these are retried internally. A failed write may have left the target partially
/// modified; config space offers no multi-byte atomicity so nothing is rolled back.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid register width {width} (expected 8, 16, 32 or 64 bits)")]
    InvalidWidth { width: u32 },

    #[error("register access out of range: offset={offset:#x} width={width} size={size:#x}")]
    OutOfRange {
        offset: usize,
        width: u32,
        size: usize,
    },

    /// The transport returned fewer bytes than requested. Never zero-padded.
    #[error("short read at offset {offset:#x} (width {width}): expected {expected} bytes, got {actual}")]
    ShortRead {
        offset: usize,
        width: u32,
        expected: usize,
        actual: usize,
    },

    #[error("short write at offset {offset:#x} (width {width}): expected {expected} bytes, wrote {written}")]
    ShortWrite {
        offset: usize,
        width: u32,
        expected: usize,
        written: usize,
    },

    /// Opaque transport failure, tagged with the access that triggered it.
    #[error("transport error at offset {offset:#x} (width {width}): {source}")]
    Transport {
        offset: usize,
        width: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to read attribute {path}: {source}", path = .path.display())]
    Attribute {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed attribute {path}: {value:?}", path = .path.display())]
    InvalidAttribute { path: PathBuf, value: String },

    #[error("invalid PCI address: {0:?}")]
    InvalidAddress(String),
}
