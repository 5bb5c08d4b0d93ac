//! Type 1 (PCI-to-PCI bridge) header registers.

/// BAR0 and BAR1; a bridge only has two.
pub const BARS: [u16; 2] = [0x10, 0x14];
pub const PRIMARY_BUS: u16 = 0x18;
pub const SECONDARY_BUS: u16 = 0x19;
pub const SUBORDINATE_BUS: u16 = 0x1a;
pub const SECONDARY_LATENCY_TIMER: u16 = 0x1b;
pub const IO_BASE: u16 = 0x1c;
pub const IO_LIMIT: u16 = 0x1d;
pub const SECONDARY_STATUS: u16 = 0x1e;
pub const MEMORY_BASE: u16 = 0x20;
pub const MEMORY_LIMIT: u16 = 0x22;
pub const PREF_MEMORY_BASE: u16 = 0x24;
pub const PREF_MEMORY_LIMIT: u16 = 0x26;
pub const PREF_BASE_UPPER32: u16 = 0x28;
pub const PREF_LIMIT_UPPER32: u16 = 0x2c;
pub const IO_BASE_UPPER16: u16 = 0x30;
pub const IO_LIMIT_UPPER16: u16 = 0x32;
pub const EXPANSION_ROM: u16 = 0x38;
pub const BRIDGE_CONTROL: u16 = 0x3e;

/// Low nibble of the I/O base/limit registers: addressing capability.
pub const IO_RANGE_TYPE_MASK: u8 = 0x0f;
/// I/O window decodes 32-bit addresses (upper 16 bits live in `IO_*_UPPER16`).
pub const IO_RANGE_TYPE_32: u8 = 0x01;
pub const IO_RANGE_MASK: u8 = 0xf0;

/// Low nibble of the memory base/limit registers is reserved (or the 64-bit flag for the
/// prefetchable window).
pub const MEMORY_RANGE_TYPE_MASK: u16 = 0x000f;
/// Prefetchable window decodes 64-bit addresses (upper 32 bits live in `PREF_*_UPPER32`).
pub const PREF_RANGE_TYPE_64: u16 = 0x0001;
pub const MEMORY_RANGE_MASK: u16 = 0xfff0;

/// I/O windows are 4KiB granular.
pub const IO_WINDOW_GRANULARITY: u64 = 0x1000;
/// Memory windows are 1MiB granular.
pub const MEMORY_WINDOW_GRANULARITY: u64 = 0x10_0000;
