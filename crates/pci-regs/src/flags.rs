use bitflags::bitflags;

bitflags! {
    /// Command register (offset 0x04).
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Command: u16 {
        const IO_SPACE = 1 << 0;
        const MEMORY_SPACE = 1 << 1;
        const BUS_MASTER = 1 << 2;
        const SPECIAL_CYCLES = 1 << 3;
        const MEMORY_WRITE_INVALIDATE = 1 << 4;
        const VGA_PALETTE_SNOOP = 1 << 5;
        const PARITY_ERROR_RESPONSE = 1 << 6;
        const STEPPING = 1 << 7;
        const SERR_ENABLE = 1 << 8;
        const FAST_BACK_TO_BACK = 1 << 9;
        const INTX_DISABLE = 1 << 10;
    }
}

bitflags! {
    /// Status register (offset 0x06).
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Status: u16 {
        const IMMEDIATE_READINESS = 1 << 2;
        const INTERRUPT = 1 << 3;
        const CAPABILITIES_LIST = 1 << 4;
        const MHZ_66 = 1 << 5;
        const UDF = 1 << 6;
        const FAST_BACK_TO_BACK = 1 << 7;
        const MASTER_DATA_PARITY_ERROR = 1 << 8;
        /// Two-bit DEVSEL timing field, not a flag.
        const DEVSEL_MASK = 0b11 << 9;
        const SIGNALED_TARGET_ABORT = 1 << 11;
        const RECEIVED_TARGET_ABORT = 1 << 12;
        const RECEIVED_MASTER_ABORT = 1 << 13;
        const SIGNALED_SYSTEM_ERROR = 1 << 14;
        const DETECTED_PARITY_ERROR = 1 << 15;
    }
}

impl Status {
    pub const DEVSEL_SHIFT: u32 = 9;

    /// DEVSEL timing: 0 fast, 1 medium, 2 slow, 3 reserved.
    pub const fn devsel(self) -> u8 {
        ((self.bits() & Self::DEVSEL_MASK.bits()) >> Self::DEVSEL_SHIFT) as u8
    }
}

bitflags! {
    /// Bridge control register (type 1 header, offset 0x3e).
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct BridgeControl: u16 {
        const PARITY_ERROR_RESPONSE = 1 << 0;
        const SERR_ENABLE = 1 << 1;
        const ISA_ENABLE = 1 << 2;
        const VGA_ENABLE = 1 << 3;
        const VGA_16BIT_DECODE = 1 << 4;
        const MASTER_ABORT_MODE = 1 << 5;
        const SECONDARY_BUS_RESET = 1 << 6;
        const FAST_BACK_TO_BACK = 1 << 7;
        const PRIMARY_DISCARD_TIMER = 1 << 8;
        const SECONDARY_DISCARD_TIMER = 1 << 9;
        const DISCARD_TIMER_STATUS = 1 << 10;
        const DISCARD_TIMER_SERR_ENABLE = 1 << 11;
    }
}
