use std::collections::btree_map::{self, BTreeMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::line::{classify, lines, text, Line};
use crate::{Identity, IdentityResolver, IdsError, Result};

/// A vendor block: its name and the devices listed under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vendor {
    name: String,
    devices: BTreeMap<String, String>,
}

impl Vendor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device(&self, device_id: &str) -> Option<&str> {
        self.devices.get(device_id).map(String::as_str)
    }

    /// Devices in ascending id order.
    pub fn devices(&self) -> impl Iterator<Item = (&str, &str)> {
        self.devices.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }
}

/// Fully parsed `pci.ids` database.
///
/// Built by a single pass over the input and read-only afterwards, so a shared reference can
/// serve lookups from any number of threads. When a vendor id appears more than once only
/// its first block is used, and likewise for device ids within a block; this matches what a
/// top-down [`crate::StreamingScanner`] finds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorDatabase {
    vendors: BTreeMap<String, Vendor>,
}

impl VendorDatabase {
    /// Parses a database held in memory. Malformed lines are skipped.
    pub fn parse(blob: &[u8]) -> Self {
        let mut builder = Builder::default();
        for line in lines(blob) {
            builder.push(line);
        }
        builder.finish()
    }

    /// Parses a database line by line from `reader`. Only I/O failures are errors.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        read_lines(reader).map_err(|source| IdsError::io(None, source))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let with_path = |source| IdsError::io(Some(path.to_path_buf()), source);
        let file = File::open(path).map_err(with_path)?;
        read_lines(BufReader::new(file)).map_err(with_path)
    }

    pub fn vendor(&self, vendor_id: &str) -> Option<&Vendor> {
        self.vendors.get(vendor_id)
    }

    pub fn vendor_name(&self, vendor_id: &str) -> Option<&str> {
        self.vendor(vendor_id).map(Vendor::name)
    }

    pub fn device_name(&self, vendor_id: &str, device_id: &str) -> Option<&str> {
        self.vendor(vendor_id)?.device(device_id)
    }

    /// Number of vendors.
    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    /// Vendors in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vendor)> {
        self.vendors.iter().map(|(id, vendor)| (id.as_str(), vendor))
    }
}

impl IdentityResolver for VendorDatabase {
    fn resolve(&self, vendor_id: &str, device_id: &str) -> Identity {
        let vendor = self.vendor(vendor_id);
        Identity::new(
            vendor_id,
            device_id,
            vendor.map(Vendor::name),
            vendor.and_then(|v| v.device(device_id)),
        )
    }
}

fn read_lines(mut reader: impl BufRead) -> std::io::Result<VendorDatabase> {
    let mut builder = Builder::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = buf.strip_suffix(b"\n").unwrap_or(&buf);
        builder.push(classify(line));
    }
    Ok(builder.finish())
}

#[derive(Default)]
struct Builder {
    vendors: BTreeMap<String, Vendor>,
    /// Id of the vendor whose block is open.
    open: Option<String>,
    malformed: usize,
}

impl Builder {
    fn push(&mut self, line: Line<'_>) {
        if line.ends_block() {
            self.open = None;
        }

        match line {
            Line::Vendor { id, name } => {
                if let btree_map::Entry::Vacant(entry) = self.vendors.entry(id.normalized()) {
                    self.open = Some(entry.key().clone());
                    entry.insert(Vendor {
                        name: text(name).into_owned(),
                        devices: BTreeMap::new(),
                    });
                }
            }
            Line::Device { id, name } => {
                let vendor = self.open.as_ref().and_then(|open| self.vendors.get_mut(open));
                if let Some(vendor) = vendor {
                    vendor
                        .devices
                        .entry(id.normalized())
                        .or_insert_with(|| text(name).into_owned());
                }
            }
            Line::Malformed => self.malformed += 1,
            Line::SubDevice | Line::Comment | Line::Boundary => {}
        }
    }

    fn finish(self) -> VendorDatabase {
        tracing::debug!(
            vendors = self.vendors.len(),
            skipped = self.malformed,
            "parsed pci.ids database"
        );
        VendorDatabase {
            vendors: self.vendors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOB: &[u8] = b"\
# pci.ids excerpt
1af4  Red Hat, Inc.
\t1000  Virtio network device
\t\t1af4 0001  Virtio network device
\t1001  Virtio block device
\t1000  Shadowed duplicate
1AF4  Duplicate vendor
\t1002  Virtio memory balloon
C 02  Network controller
\t00  Ethernet controller
\t1003  Orphan after class section
";

    #[test]
    fn first_vendor_block_wins() {
        let db = VendorDatabase::parse(BLOB);
        assert_eq!(db.len(), 1);
        assert_eq!(db.vendor_name("1af4"), Some("Red Hat, Inc."));
        assert_eq!(db.device_name("1af4", "1000"), Some("Virtio network device"));
        assert_eq!(db.device_name("1af4", "1001"), Some("Virtio block device"));
        assert_eq!(db.device_name("1af4", "1002"), None);
        assert_eq!(db.device_name("1af4", "1003"), None);
    }

    #[test]
    fn sub_devices_do_not_become_devices() {
        let db = VendorDatabase::parse(BLOB);
        let devices: Vec<_> = db.vendor("1af4").unwrap().devices().collect();
        assert_eq!(
            devices,
            [
                ("1000", "Virtio network device"),
                ("1001", "Virtio block device")
            ]
        );
    }

    #[test]
    fn queries_match_lowercase_ids_exactly() {
        let db = VendorDatabase::parse(b"10DE  NVIDIA Corporation\n\t1DB6  GV100GL\n");
        assert_eq!(db.vendor_name("10de"), Some("NVIDIA Corporation"));
        assert_eq!(db.vendor_name("10DE"), None);
        assert_eq!(db.device_name("10de", "1db6"), Some("GV100GL"));
    }

    #[test]
    fn reader_and_blob_agree() {
        let from_reader = VendorDatabase::from_reader(BLOB).unwrap();
        assert_eq!(from_reader, VendorDatabase::parse(BLOB));

        let crlf = String::from_utf8_lossy(BLOB).replace('\n', "\r\n");
        assert_eq!(
            VendorDatabase::from_reader(crlf.as_bytes()).unwrap(),
            from_reader
        );
    }

    #[test]
    fn resolve_defaults_to_raw_ids() {
        let db = VendorDatabase::parse(BLOB);
        let id = db.resolve("1af4", "dead");
        assert_eq!(id.vendor_name, "Red Hat, Inc.");
        assert_eq!(id.device_name, "dead");
        assert_eq!(db.resolve("ffff", "ffff"), Identity::unresolved("ffff", "ffff"));
        assert!(VendorDatabase::parse(b"").is_empty());
    }
}
