use core::fmt;

use pci_regs::bar;

use crate::access::read_u32;
use crate::{ConfigSpace, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bar {
    Io {
        base: u32,
    },
    Memory {
        base: u64,
        is_64bit: bool,
        prefetchable: bool,
    },
}

impl Bar {
    /// Decodes a BAR from its low dword and, for 64-bit memory BARs, the following dword.
    ///
    /// Returns `None` for an unimplemented (all-zero) BAR.
    pub fn decode(low: u32, high: Option<u32>) -> Option<Self> {
        if low == 0 {
            return None;
        }
        if low & bar::IO_SPACE != 0 {
            return Some(Self::Io {
                base: low & bar::IO_ADDRESS_MASK,
            });
        }

        let is_64bit = low & bar::MEMORY_TYPE_MASK == bar::MEMORY_TYPE_64;
        let upper = if is_64bit { high.unwrap_or(0) } else { 0 };
        Some(Self::Memory {
            base: (u64::from(upper) << 32) | u64::from(low & bar::MEMORY_ADDRESS_MASK),
            is_64bit,
            prefetchable: low & bar::PREFETCHABLE != 0,
        })
    }

    pub fn base(&self) -> u64 {
        match *self {
            Self::Io { base } => base.into(),
            Self::Memory { base, .. } => base,
        }
    }
}

/// A populated BAR slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BarRegion {
    pub index: u8,
    pub bar: Bar,
}

impl fmt::Display for BarRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bar {
            Bar::Io { base } => write!(f, "Region {}: I/O ports at {base:04x}", self.index),
            Bar::Memory {
                base,
                is_64bit,
                prefetchable,
            } => write!(
                f,
                "Region {}: Memory at {base:08x} ({}-bit, {})",
                self.index,
                if is_64bit { 64 } else { 32 },
                if prefetchable {
                    "prefetchable"
                } else {
                    "non-prefetchable"
                }
            ),
        }
    }
}

/// Reads and decodes the BARs at `offsets` (6 for a type 0 header, 2 for a bridge).
///
/// A 64-bit memory BAR consumes the next slot as its upper dword; that slot is not reported
/// on its own. Empty slots are skipped.
pub fn decode_bars<S: ConfigSpace + ?Sized>(space: &S, offsets: &[u16]) -> Result<Vec<BarRegion>> {
    let mut regions = Vec::new();
    let mut slot = 0;
    while slot < offsets.len() {
        let low = read_u32(space, usize::from(offsets[slot]))?;
        let wants_upper =
            low & bar::IO_SPACE == 0 && low & bar::MEMORY_TYPE_MASK == bar::MEMORY_TYPE_64;
        let high = match offsets.get(slot + 1) {
            Some(&next) if wants_upper => Some(read_u32(space, usize::from(next))?),
            _ => None,
        };

        if let Some(bar) = Bar::decode(low, high) {
            regions.push(BarRegion {
                index: slot as u8,
                bar,
            });
        }
        slot += if high.is_some() { 2 } else { 1 };
    }
    Ok(regions)
}

/// Expansion ROM base address register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExpansionRom {
    pub base: u32,
    pub enabled: bool,
}

impl ExpansionRom {
    pub fn decode(raw: u32) -> Option<Self> {
        let base = raw & bar::ROM_ADDRESS_MASK;
        if base == 0 {
            return None;
        }
        Some(Self {
            base,
            enabled: raw & bar::ROM_ENABLE != 0,
        })
    }
}

impl fmt::Display for ExpansionRom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expansion ROM at {:08x}", self.base)?;
        if !self.enabled {
            f.write_str(" [disabled]")?;
        }
        Ok(())
    }
}
