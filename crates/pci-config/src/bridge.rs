use core::fmt;

use pci_regs::bridge;

use crate::access::{read_u16, read_u32, read_u8};
use crate::{ConfigSpace, Result};

/// Address window forwarded by a bridge, inclusive on both ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    pub base: u64,
    pub limit: u64,
}

impl Window {
    /// A window whose base is above its limit is disabled.
    fn new(base: u64, limit: u64) -> Option<Self> {
        (base <= limit).then_some(Self { base, limit })
    }

    /// Number of bytes covered, or `None` for a window spanning all 2^64 addresses.
    pub fn size(&self) -> Option<u64> {
        (self.limit - self.base).checked_add(1)
    }
}

/// Bus numbers and forwarding windows of a type 1 header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BridgeWindows {
    pub primary_bus: u8,
    pub secondary_bus: u8,
    pub subordinate_bus: u8,
    pub secondary_latency_timer: u8,
    pub io: Option<Window>,
    pub memory: Option<Window>,
    pub prefetchable: Option<Window>,
    /// Whether the prefetchable window decodes 64-bit addresses.
    pub prefetchable_64bit: bool,
}

impl BridgeWindows {
    pub fn read<S: ConfigSpace + ?Sized>(space: &S) -> Result<Self> {
        let at = |offset: u16| usize::from(offset);

        let io_base_lo = read_u8(space, at(bridge::IO_BASE))?;
        let io_limit_lo = read_u8(space, at(bridge::IO_LIMIT))?;
        let (io_base_hi, io_limit_hi) =
            if io_base_lo & bridge::IO_RANGE_TYPE_MASK == bridge::IO_RANGE_TYPE_32 {
                (
                    read_u16(space, at(bridge::IO_BASE_UPPER16))?,
                    read_u16(space, at(bridge::IO_LIMIT_UPPER16))?,
                )
            } else {
                (0, 0)
            };
        let io = Window::new(
            (u64::from(io_base_hi) << 16) | (u64::from(io_base_lo & bridge::IO_RANGE_MASK) << 8),
            (u64::from(io_limit_hi) << 16)
                | (u64::from(io_limit_lo & bridge::IO_RANGE_MASK) << 8)
                | (bridge::IO_WINDOW_GRANULARITY - 1),
        );

        let mem_base = read_u16(space, at(bridge::MEMORY_BASE))?;
        let mem_limit = read_u16(space, at(bridge::MEMORY_LIMIT))?;
        let memory = Window::new(
            u64::from(mem_base & bridge::MEMORY_RANGE_MASK) << 16,
            (u64::from(mem_limit & bridge::MEMORY_RANGE_MASK) << 16)
                | (bridge::MEMORY_WINDOW_GRANULARITY - 1),
        );

        let pref_base = read_u16(space, at(bridge::PREF_MEMORY_BASE))?;
        let pref_limit = read_u16(space, at(bridge::PREF_MEMORY_LIMIT))?;
        let prefetchable_64bit =
            pref_base & bridge::MEMORY_RANGE_TYPE_MASK == bridge::PREF_RANGE_TYPE_64;
        let (pref_base_hi, pref_limit_hi) = if prefetchable_64bit {
            (
                read_u32(space, at(bridge::PREF_BASE_UPPER32))?,
                read_u32(space, at(bridge::PREF_LIMIT_UPPER32))?,
            )
        } else {
            (0, 0)
        };
        let prefetchable = Window::new(
            (u64::from(pref_base_hi) << 32)
                | (u64::from(pref_base & bridge::MEMORY_RANGE_MASK) << 16),
            (u64::from(pref_limit_hi) << 32)
                | (u64::from(pref_limit & bridge::MEMORY_RANGE_MASK) << 16)
                | (bridge::MEMORY_WINDOW_GRANULARITY - 1),
        );

        Ok(Self {
            primary_bus: read_u8(space, at(bridge::PRIMARY_BUS))?,
            secondary_bus: read_u8(space, at(bridge::SECONDARY_BUS))?,
            subordinate_bus: read_u8(space, at(bridge::SUBORDINATE_BUS))?,
            secondary_latency_timer: read_u8(space, at(bridge::SECONDARY_LATENCY_TIMER))?,
            io,
            memory,
            prefetchable,
            prefetchable_64bit,
        })
    }
}

impl fmt::Display for BridgeWindows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bus: primary={:02x}, secondary={:02x}, subordinate={:02x}, sec-latency={}",
            self.primary_bus, self.secondary_bus, self.subordinate_bus, self.secondary_latency_timer
        )?;
        write_window(f, "I/O behind bridge", self.io)?;
        writeln!(f)?;
        write_window(f, "Memory behind bridge", self.memory)?;
        writeln!(f)?;
        write_window(f, "Prefetchable memory behind bridge", self.prefetchable)
    }
}

fn write_window(f: &mut fmt::Formatter<'_>, label: &str, window: Option<Window>) -> fmt::Result {
    match window {
        Some(w) => write!(f, "{label}: {:08x}-{:08x}", w.base, w.limit),
        None => write!(f, "{label}: [disabled]"),
    }
}
