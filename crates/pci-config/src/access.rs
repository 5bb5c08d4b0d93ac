//! Width-checked register access on top of a [`ConfigSpace`].
//!
//! All multi-byte registers are little-endian. Validation order is fixed: width first (no
//! byte access for an invalid width), then the bounds of the whole access, then the transfer.

use crate::{ConfigError, ConfigSpace, RegisterWidth, Result};

/// Reads a `width`-bit register at `offset`, zero-extended into a `u64`.
pub fn read_register<S: ConfigSpace + ?Sized>(space: &S, offset: usize, width: u32) -> Result<u64> {
    let width = RegisterWidth::from_bits(width)?;
    read_width(space, offset, width)
}

/// Writes the low `width` bits of `value` at `offset`.
///
/// There is no read-modify-write: callers changing part of a register compose the full value
/// themselves.
pub fn write_register<S: ConfigSpace + ?Sized>(
    space: &mut S,
    offset: usize,
    width: u32,
    value: u64,
) -> Result<()> {
    let width = RegisterWidth::from_bits(width)?;
    write_width(space, offset, width, value)
}

pub fn read_width<S: ConfigSpace + ?Sized>(
    space: &S,
    offset: usize,
    width: RegisterWidth,
) -> Result<u64> {
    let len = checked_len(space, offset, width)?;

    let mut bytes = [0u8; 8];
    let actual = space
        .read_bytes(offset, &mut bytes[..len])
        .map_err(|source| ConfigError::Transport {
            offset,
            width: width.bits(),
            source,
        })?;
    if actual < len {
        tracing::debug!(offset, width = width.bits(), expected = len, actual, "short config read");
        return Err(ConfigError::ShortRead {
            offset,
            width: width.bits(),
            expected: len,
            actual,
        });
    }

    Ok(u64::from_le_bytes(bytes))
}

pub fn write_width<S: ConfigSpace + ?Sized>(
    space: &mut S,
    offset: usize,
    width: RegisterWidth,
    value: u64,
) -> Result<()> {
    let len = checked_len(space, offset, width)?;

    let bytes = (value & width.mask()).to_le_bytes();
    let written = space
        .write_bytes(offset, &bytes[..len])
        .map_err(|source| ConfigError::Transport {
            offset,
            width: width.bits(),
            source,
        })?;
    if written < len {
        tracing::debug!(offset, width = width.bits(), expected = len, written, "short config write");
        return Err(ConfigError::ShortWrite {
            offset,
            width: width.bits(),
            expected: len,
            written,
        });
    }

    Ok(())
}

fn checked_len<S: ConfigSpace + ?Sized>(
    space: &S,
    offset: usize,
    width: RegisterWidth,
) -> Result<usize> {
    let len = width.bytes();
    let size = space.size();
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(len),
        _ => Err(ConfigError::OutOfRange {
            offset,
            width: width.bits(),
            size,
        }),
    }
}

pub fn read_u8<S: ConfigSpace + ?Sized>(space: &S, offset: usize) -> Result<u8> {
    read_width(space, offset, RegisterWidth::W8).map(|v| v as u8)
}

pub fn read_u16<S: ConfigSpace + ?Sized>(space: &S, offset: usize) -> Result<u16> {
    read_width(space, offset, RegisterWidth::W16).map(|v| v as u16)
}

pub fn read_u32<S: ConfigSpace + ?Sized>(space: &S, offset: usize) -> Result<u32> {
    read_width(space, offset, RegisterWidth::W32).map(|v| v as u32)
}

pub fn read_u64<S: ConfigSpace + ?Sized>(space: &S, offset: usize) -> Result<u64> {
    read_width(space, offset, RegisterWidth::W64)
}

pub fn write_u8<S: ConfigSpace + ?Sized>(space: &mut S, offset: usize, value: u8) -> Result<()> {
    write_width(space, offset, RegisterWidth::W8, value.into())
}

pub fn write_u16<S: ConfigSpace + ?Sized>(space: &mut S, offset: usize, value: u16) -> Result<()> {
    write_width(space, offset, RegisterWidth::W16, value.into())
}

pub fn write_u32<S: ConfigSpace + ?Sized>(space: &mut S, offset: usize, value: u32) -> Result<()> {
    write_width(space, offset, RegisterWidth::W32, value.into())
}

pub fn write_u64<S: ConfigSpace + ?Sized>(space: &mut S, offset: usize, value: u64) -> Result<()> {
    write_width(space, offset, RegisterWidth::W64, value)
}
