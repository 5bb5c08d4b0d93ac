use std::path::Path;

use pci_regs::ClassCode;

use crate::access::{read_register, read_u16, read_u32, write_register};
use crate::decode::{ControlRegister, StatusRegister};
use crate::sysfs::{self, SysfsAttributes};
use crate::{ConfigHeader, ConfigSpace, FileConfigSpace, PciAddress, Result};

/// A PCI function: its address plus the transport for its config space.
#[derive(Debug)]
pub struct PciDevice<S> {
    address: PciAddress,
    space: S,
}

impl<S: ConfigSpace> PciDevice<S> {
    pub fn new(address: PciAddress, space: S) -> Self {
        Self { address, space }
    }

    pub fn address(&self) -> PciAddress {
        self.address
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn into_space(self) -> S {
        self.space
    }

    pub fn read_config_register(&self, offset: usize, width: u32) -> Result<u64> {
        read_register(&self.space, offset, width)
    }

    pub fn write_config_register(&mut self, offset: usize, width: u32, value: u64) -> Result<()> {
        write_register(&mut self.space, offset, width, value)
    }

    pub fn vendor_id(&self) -> Result<u16> {
        read_u16(&self.space, usize::from(pci_regs::VENDOR_ID))
    }

    pub fn device_id(&self) -> Result<u16> {
        read_u16(&self.space, usize::from(pci_regs::DEVICE_ID))
    }

    pub fn control(&self) -> Result<ControlRegister> {
        read_u16(&self.space, usize::from(pci_regs::COMMAND)).map(ControlRegister)
    }

    pub fn status(&self) -> Result<StatusRegister> {
        read_u16(&self.space, usize::from(pci_regs::STATUS)).map(StatusRegister)
    }

    pub fn class_code(&self) -> Result<ClassCode> {
        // Revision id shares the dword; drop it.
        read_u32(&self.space, usize::from(pci_regs::REVISION_ID)).map(|v| ClassCode::new(v >> 8))
    }

    pub fn header(&self) -> Result<ConfigHeader> {
        ConfigHeader::read(&self.space)
    }
}

impl PciDevice<FileConfigSpace> {
    /// Opens the `config` file of `address` under a sysfs-style device root, read-only.
    pub fn open_sysfs(root: impl AsRef<Path>, address: PciAddress) -> Result<Self> {
        let space = sysfs::open_config(sysfs::device_dir(root, address))?;
        Ok(Self::new(address, space))
    }

    /// Reads the identity attributes next to the `config` file.
    pub fn sysfs_attributes(&self, root: impl AsRef<Path>) -> Result<SysfsAttributes> {
        SysfsAttributes::read(sysfs::device_dir(root, self.address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    fn device() -> PciDevice<Vec<u8>> {
        let mut cfg = vec![0u8; pci_regs::CONFIG_SPACE_SIZE];
        cfg[0..4].copy_from_slice(&[0x86, 0x80, 0x37, 0x12]);
        cfg[0x04..0x06].copy_from_slice(&0x0107u16.to_le_bytes());
        cfg[0x06..0x08].copy_from_slice(&0x0290u16.to_le_bytes());
        cfg[0x08..0x0c].copy_from_slice(&0x0600_0002u32.to_le_bytes());
        PciDevice::new(PciAddress::new(0, 0, 0, 0), cfg)
    }

    #[test]
    fn typed_accessors_read_standard_registers() {
        let dev = device();
        assert_eq!(dev.vendor_id().unwrap(), 0x8086);
        assert_eq!(dev.device_id().unwrap(), 0x1237);
        assert_eq!(dev.class_code().unwrap().raw(), 0x06_0000);
        assert_eq!(dev.class_code().unwrap().name(), Some("Host bridge"));
        assert_eq!(dev.control().unwrap(), ControlRegister(0x0107));
        assert_eq!(dev.status().unwrap().devsel_timing(), "medium");
    }

    #[test]
    fn config_register_round_trip() {
        let mut dev = device();
        dev.write_config_register(0x40, 32, 0xcafe_f00d).unwrap();
        assert_eq!(dev.read_config_register(0x40, 32).unwrap(), 0xcafe_f00d);
        assert_eq!(dev.read_config_register(0x42, 16).unwrap(), 0xcafe);
        assert!(matches!(
            dev.read_config_register(0xfe, 32),
            Err(ConfigError::OutOfRange { .. })
        ));
    }
}
