use core::fmt;

use crate::{ConfigError, Result};

/// Width of a single config register access.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RegisterWidth {
    W8,
    W16,
    W32,
    W64,
}

impl RegisterWidth {
    pub const ALL: [RegisterWidth; 4] = [Self::W8, Self::W16, Self::W32, Self::W64];

    /// Validates a width given in bits.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(Self::W8),
            16 => Ok(Self::W16),
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            width => Err(ConfigError::InvalidWidth { width }),
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Mask selecting the low `bits()` bits of a `u64`.
    pub const fn mask(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }
}

impl TryFrom<u32> for RegisterWidth {
    type Error = ConfigError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl fmt::Display for RegisterWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
