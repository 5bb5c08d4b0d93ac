//! Base Address Register encoding.

/// Bit 0: the BAR maps I/O space rather than memory space.
pub const IO_SPACE: u32 = 1 << 0;

/// Bits 1..=2 of a memory BAR select its address width.
pub const MEMORY_TYPE_MASK: u32 = 0b110;
pub const MEMORY_TYPE_32: u32 = 0b000;
/// Pre-PCI 2.2 "below 1MiB" encoding, decoded as a 32-bit BAR.
pub const MEMORY_TYPE_1M: u32 = 0b010;
pub const MEMORY_TYPE_64: u32 = 0b100;

/// Bit 3 of a memory BAR.
pub const PREFETCHABLE: u32 = 1 << 3;

pub const IO_ADDRESS_MASK: u32 = !0x3;
pub const MEMORY_ADDRESS_MASK: u32 = !0xf;

/// Bit 0 of the expansion ROM BAR.
pub const ROM_ENABLE: u32 = 1 << 0;
pub const ROM_ADDRESS_MASK: u32 = !0x7ff;
