use core::fmt;
use core::str::FromStr;

use crate::ConfigError;

/// PCI function address in `domain:bus:device.function` form, e.g. `0000:00:1f.3`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PciAddress {
    pub domain: u32,
    pub bus: u8,
    pub device: u8,
    pub function: u8,
}

impl PciAddress {
    /// Creates an address.
    ///
    /// The caller is responsible for keeping `device < 32` and `function < 8`.
    pub const fn new(domain: u32, bus: u8, device: u8, function: u8) -> Self {
        Self {
            domain,
            bus,
            device,
            function,
        }
    }
}

impl FromStr for PciAddress {
    type Err = ConfigError;

    /// Accepts `dddd:bb:dd.f` and the domain-less `bb:dd.f` (domain 0).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidAddress(s.to_owned());

        let (rest, function) = s.rsplit_once('.').ok_or_else(invalid)?;
        let mut parts = rest.rsplitn(3, ':');
        let device = parts.next().ok_or_else(invalid)?;
        let bus = parts.next().ok_or_else(invalid)?;
        let domain = parts.next().unwrap_or("0");

        // `from_str_radix` tolerates a leading `+`; addresses are bare hex digits.
        let is_hex = |part: &str, max_len: usize| {
            !part.is_empty()
                && part.len() <= max_len
                && part.bytes().all(|b| b.is_ascii_hexdigit())
        };
        let hex_u8 = |part: &str, max: u8| match u8::from_str_radix(part, 16) {
            Ok(v) if v <= max && is_hex(part, 2) => Ok(v),
            _ => Err(invalid()),
        };
        let domain = match u32::from_str_radix(domain, 16) {
            Ok(v) if is_hex(domain, 8) => v,
            _ => return Err(invalid()),
        };

        Ok(Self {
            domain,
            bus: hex_u8(bus, u8::MAX)?,
            device: hex_u8(device, 31)?,
            function: if function.len() == 1 {
                hex_u8(function, 7)?
            } else {
                return Err(invalid());
            },
        })
    }
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:02x}:{:02x}.{:x}",
            self.domain, self.bus, self.device, self.function
        )
    }
}
