#![forbid(unsafe_code)]

//! PCI configuration space register layout.
//!
//! Offsets and bit positions here must match the PCI Local Bus Specification (rev 2.x/3.0)
//! exactly; every other crate in the workspace addresses config space through these names.
//! The first 256 bytes of a PCI Express function's 4KiB extended config space use the same
//! layout, so the constants apply to both.

pub mod bar;
pub mod bridge;
pub mod class;
mod flags;

pub use class::{class_name, ClassCode};
pub use flags::{BridgeControl, Command, Status};

/// Size in bytes of legacy PCI configuration space.
pub const CONFIG_SPACE_SIZE: usize = 256;

/// Size in bytes of PCI Express extended configuration space.
pub const PCIE_CONFIG_SPACE_SIZE: usize = 4096;

/// Size in bytes of the standard header shared by all header types.
pub const HEADER_SIZE: usize = 0x40;

pub const VENDOR_ID: u16 = 0x00;
pub const DEVICE_ID: u16 = 0x02;
pub const COMMAND: u16 = 0x04;
pub const STATUS: u16 = 0x06;
pub const REVISION_ID: u16 = 0x08;
/// Start of the 24-bit class code (prog-if, sub-class, base class).
pub const CLASS_CODE: u16 = 0x09;
pub const PROG_IF: u16 = 0x09;
pub const SUBCLASS: u16 = 0x0a;
pub const BASE_CLASS: u16 = 0x0b;
pub const CACHE_LINE_SIZE: u16 = 0x0c;
pub const LATENCY_TIMER: u16 = 0x0d;
pub const HEADER_TYPE: u16 = 0x0e;
pub const BIST: u16 = 0x0f;
pub const CAPABILITIES_PTR: u16 = 0x34;
pub const INTERRUPT_LINE: u16 = 0x3c;
pub const INTERRUPT_PIN: u16 = 0x3d;

/// Type 0 (endpoint) header registers.
pub mod normal {
    /// BAR0..BAR5.
    pub const BARS: [u16; 6] = [0x10, 0x14, 0x18, 0x1c, 0x20, 0x24];
    pub const CARDBUS_CIS: u16 = 0x28;
    pub const SUBSYSTEM_VENDOR_ID: u16 = 0x2c;
    pub const SUBSYSTEM_ID: u16 = 0x2e;
    pub const EXPANSION_ROM: u16 = 0x30;
    pub const MIN_GNT: u16 = 0x3e;
    pub const MAX_LAT: u16 = 0x3f;
}

/// Header type field values (bits 0..=6 of [`HEADER_TYPE`]).
pub mod header_type {
    pub const NORMAL: u8 = 0x00;
    pub const BRIDGE: u8 = 0x01;
    pub const CARDBUS: u8 = 0x02;

    /// Bits selecting the header layout.
    pub const LAYOUT_MASK: u8 = 0x7f;
    /// Set when the device implements more than one function.
    pub const MULTI_FUNCTION: u8 = 0x80;
}
