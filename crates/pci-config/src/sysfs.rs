//! Identity attributes exported per device by Linux sysfs.
//!
//! Only reads a directory the caller already located; enumerating devices is left to the
//! caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pci_regs::ClassCode;

use crate::{ConfigError, FileConfigSpace, PciAddress, Result};

pub const SYSFS_PCI_DEVICES: &str = "/sys/bus/pci/devices";

/// Directory holding the attributes of `address` under `root` (normally
/// [`SYSFS_PCI_DEVICES`]).
pub fn device_dir(root: impl AsRef<Path>, address: PciAddress) -> PathBuf {
    root.as_ref().join(address.to_string())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Attribute {
    Vendor,
    Device,
    Class,
    Revision,
    SubsystemVendor,
    SubsystemDevice,
    Irq,
}

impl Attribute {
    pub fn file_name(self) -> &'static str {
        ATTRIBUTES
            .iter()
            .find(|(attr, _)| *attr == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    fn required(self) -> bool {
        matches!(self, Self::Vendor | Self::Device | Self::Class)
    }
}

/// Attribute files read for every device, in read order.
pub const ATTRIBUTES: &[(Attribute, &str)] = &[
    (Attribute::Vendor, "vendor"),
    (Attribute::Device, "device"),
    (Attribute::Class, "class"),
    (Attribute::Revision, "revision"),
    (Attribute::SubsystemVendor, "subsystem_vendor"),
    (Attribute::SubsystemDevice, "subsystem_device"),
    (Attribute::Irq, "irq"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsAttributes {
    pub vendor_id: u16,
    pub device_id: u16,
    pub class_code: ClassCode,
    pub revision: Option<u8>,
    pub subsystem_vendor_id: Option<u16>,
    pub subsystem_id: Option<u16>,
    pub irq: Option<u32>,
}

impl SysfsAttributes {
    /// Reads the attribute table from a device directory.
    ///
    /// `vendor`, `device` and `class` must be present; the others are left empty (with a
    /// warning) when missing, since older kernels do not export all of them.
    pub fn read(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut attrs = SysfsAttributes {
            vendor_id: 0,
            device_id: 0,
            class_code: ClassCode::new(0),
            revision: None,
            subsystem_vendor_id: None,
            subsystem_id: None,
            irq: None,
        };

        for &(attr, file_name) in ATTRIBUTES {
            let path = dir.join(file_name);
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) if !attr.required() && err.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "optional PCI attribute missing");
                    continue;
                }
                Err(source) => return Err(ConfigError::Attribute { path, source }),
            };
            let value = text.trim();

            match attr {
                Attribute::Vendor => attrs.vendor_id = parse_hex(&path, value)?,
                Attribute::Device => attrs.device_id = parse_hex(&path, value)?,
                Attribute::Class => attrs.class_code = ClassCode::new(parse_hex(&path, value)?),
                Attribute::Revision => attrs.revision = Some(parse_hex(&path, value)?),
                Attribute::SubsystemVendor => {
                    attrs.subsystem_vendor_id = Some(parse_hex(&path, value)?)
                }
                Attribute::SubsystemDevice => attrs.subsystem_id = Some(parse_hex(&path, value)?),
                Attribute::Irq => {
                    attrs.irq = Some(value.parse().map_err(|_| invalid(&path, value))?)
                }
            }
        }

        Ok(attrs)
    }

    /// Vendor id as a 4-digit lowercase hex string, the form used by `pci.ids`.
    pub fn vendor_hex(&self) -> String {
        format!("{:04x}", self.vendor_id)
    }

    pub fn device_hex(&self) -> String {
        format!("{:04x}", self.device_id)
    }
}

/// Opens the `config` file of a device directory.
pub fn open_config(dir: impl AsRef<Path>) -> Result<FileConfigSpace> {
    let path = dir.as_ref().join("config");
    FileConfigSpace::open(&path).map_err(|source| ConfigError::Attribute { path, source })
}

fn parse_hex<T: TryFrom<u32>>(path: &Path, value: &str) -> Result<T> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| invalid(path, value))
}

fn invalid(path: &Path, value: &str) -> ConfigError {
    ConfigError::InvalidAttribute {
        path: path.to_path_buf(),
        value: value.to_owned(),
    }
}
