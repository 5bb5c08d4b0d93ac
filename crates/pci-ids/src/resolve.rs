use core::fmt;

use crate::{StreamingScanner, VendorDatabase};

/// Names resolved for a vendor/device id pair.
///
/// A name that could not be resolved is the raw id it was looked up with, so every field is
/// always non-empty for non-empty input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub vendor_id: String,
    pub device_id: String,
    pub vendor_name: String,
    pub device_name: String,
}

impl Identity {
    /// Identity with neither name known.
    pub fn unresolved(vendor_id: &str, device_id: &str) -> Self {
        Self {
            vendor_id: vendor_id.to_owned(),
            device_id: device_id.to_owned(),
            vendor_name: vendor_id.to_owned(),
            device_name: device_id.to_owned(),
        }
    }

    pub(crate) fn new(
        vendor_id: &str,
        device_id: &str,
        vendor_name: Option<&str>,
        device_name: Option<&str>,
    ) -> Self {
        Self {
            vendor_id: vendor_id.to_owned(),
            device_id: device_id.to_owned(),
            vendor_name: vendor_name.unwrap_or(vendor_id).to_owned(),
            device_name: device_name.unwrap_or(device_id).to_owned(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vendor_name, self.device_name)
    }
}

/// Maps vendor/device ids to names.
///
/// Ids are 4-character lowercase hex strings, matched exactly.
pub trait IdentityResolver {
    fn resolve(&self, vendor_id: &str, device_id: &str) -> Identity;

    /// Resolves numeric ids, formatted the way the database stores them.
    fn resolve_ids(&self, vendor_id: u16, device_id: u16) -> Identity {
        self.resolve(&format!("{vendor_id:04x}"), &format!("{device_id:04x}"))
    }
}

impl<T: IdentityResolver + ?Sized> IdentityResolver for &T {
    fn resolve(&self, vendor_id: &str, device_id: &str) -> Identity {
        (**self).resolve(vendor_id, device_id)
    }
}

/// Resolver whose strategy is chosen at runtime, see [`crate::IdsConfig`].
#[derive(Debug)]
pub enum Resolver {
    Eager(VendorDatabase),
    Streaming(StreamingScanner),
}

impl IdentityResolver for Resolver {
    fn resolve(&self, vendor_id: &str, device_id: &str) -> Identity {
        match self {
            Self::Eager(db) => db.resolve(vendor_id, device_id),
            Self::Streaming(scanner) => scanner.resolve(vendor_id, device_id),
        }
    }
}

impl From<VendorDatabase> for Resolver {
    fn from(db: VendorDatabase) -> Self {
        Self::Eager(db)
    }
}

impl From<StreamingScanner> for Resolver {
    fn from(scanner: StreamingScanner) -> Self {
        Self::Streaming(scanner)
    }
}
