use std::fs;
use std::path::Path;

use crate::line::{lines, text, Line};
use crate::{Identity, IdentityResolver, IdsError, Result};

/// Resolves ids by scanning the raw database from the top on every query.
///
/// Nothing is parsed up front, which suits one-off lookups. Each query stops as soon as the
/// device is found or the vendor's block ends.
#[derive(Debug, Clone)]
pub struct StreamingScanner<B = Vec<u8>> {
    blob: B,
}

#[derive(Debug, Copy, Clone)]
enum ScanState<'a> {
    SeekingVendor,
    SeekingDevice { vendor_name: &'a [u8] },
}

impl StreamingScanner {
    /// Reads the whole database file into memory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        fs::read(path)
            .map(Self::new)
            .map_err(|source| IdsError::io(Some(path.to_path_buf()), source))
    }
}

impl<B: AsRef<[u8]>> StreamingScanner<B> {
    pub fn new(blob: B) -> Self {
        Self { blob }
    }

    pub fn into_inner(self) -> B {
        self.blob
    }

    fn scan(&self, vendor_id: &str, device_id: &str) -> Identity {
        let mut state = ScanState::SeekingVendor;
        for line in lines(self.blob.as_ref()) {
            state = match (state, line) {
                (ScanState::SeekingVendor, Line::Vendor { id, name }) if id.matches(vendor_id) => {
                    ScanState::SeekingDevice { vendor_name: name }
                }
                (ScanState::SeekingDevice { vendor_name }, Line::Device { id, name })
                    if id.matches(device_id) =>
                {
                    return Identity::new(
                        vendor_id,
                        device_id,
                        Some(&*text(vendor_name)),
                        Some(&*text(name)),
                    );
                }
                (ScanState::SeekingDevice { vendor_name }, line) if line.ends_block() => {
                    return Identity::new(vendor_id, device_id, Some(&*text(vendor_name)), None);
                }
                (state, _) => state,
            };
        }

        match state {
            ScanState::SeekingVendor => Identity::unresolved(vendor_id, device_id),
            ScanState::SeekingDevice { vendor_name } => {
                Identity::new(vendor_id, device_id, Some(&*text(vendor_name)), None)
            }
        }
    }
}

impl<B: AsRef<[u8]>> IdentityResolver for StreamingScanner<B> {
    fn resolve(&self, vendor_id: &str, device_id: &str) -> Identity {
        let identity = self.scan(vendor_id, device_id);
        tracing::trace!(
            vendor_id,
            device_id,
            vendor = %identity.vendor_name,
            device = %identity.device_name,
            "streaming pci.ids lookup"
        );
        identity
    }
}
