#![forbid(unsafe_code)]

//! Bounds-checked access to PCI configuration space and decoding of its registers.
//!
//! The transport is abstracted by [`ConfigSpace`]; byte buffers and files implement it out
//! of the box. Register offsets come from `pci-regs`.

pub mod access;
mod address;
mod bar;
mod bridge;
pub mod decode;
mod device;
mod error;
mod file;
mod header;
mod space;
pub mod sysfs;
mod width;

#[cfg(test)]
mod proptests;

pub use access::{read_register, write_register};
pub use address::PciAddress;
pub use bar::{decode_bars, Bar, BarRegion, ExpansionRom};
pub use bridge::{BridgeWindows, Window};
pub use decode::{
    decode_bridge_control, decode_control, decode_status, BridgeControlRegister,
    ControlRegister, StatusRegister,
};
pub use device::PciDevice;
pub use error::{ConfigError, Result};
pub use file::FileConfigSpace;
pub use header::{BridgeHeader, ConfigHeader, HeaderLayout, NormalHeader};
pub use space::ConfigSpace;
pub use sysfs::SysfsAttributes;
pub use width::RegisterWidth;

pub use pci_regs as regs;
