//! Human-readable rendering of packed bitfield registers.
//!
//! Output is the `lspci -vv` style flag list (`I/O+ Memory- ...`). Field order is part of
//! the format: tokens appear in descriptor order, which follows ascending bit position.

use core::fmt;

use pci_regs::{BridgeControl, Command, Status};

/// One field of a packed register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BitField {
    pub name: &'static str,
    pub shift: u32,
    pub width: u32,
    /// Value names for multi-bit fields, indexed by the raw field value. Fields without a
    /// table render as `<name>+` / `<name>-`.
    pub values: Option<&'static [&'static str]>,
}

impl BitField {
    pub const fn flag(name: &'static str, bit: u32) -> Self {
        Self {
            name,
            shift: bit,
            width: 1,
            values: None,
        }
    }

    pub const fn enumerated(
        name: &'static str,
        shift: u32,
        width: u32,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            shift,
            width,
            values: Some(values),
        }
    }

    pub const fn mask(&self) -> u32 {
        ((1u32 << self.width) - 1) << self.shift
    }

    pub const fn extract(&self, value: u32) -> u32 {
        (value & self.mask()) >> self.shift
    }

    fn write_token(&self, value: u32, out: &mut String) {
        let raw = self.extract(value);
        out.push_str(self.name);
        match self.values {
            Some(values) => {
                out.push('=');
                out.push_str(values.get(raw as usize).copied().unwrap_or("?"));
            }
            None => out.push(if raw != 0 { '+' } else { '-' }),
        }
    }
}

/// Renders `value` through `fields`, space separated.
pub fn render(value: u32, fields: &[BitField]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        field.write_token(value, &mut out);
    }
    out
}

pub const DEVSEL_TIMING: &[&str] = &["fast", "medium", "slow", "reserved"];

/// Command register, bits 0..=10.
pub const CONTROL_FIELDS: &[BitField] = &[
    BitField::flag("I/O", 0),
    BitField::flag("Memory", 1),
    BitField::flag("DMA", 2),
    BitField::flag("Special", 3),
    BitField::flag("MemWINV", 4),
    BitField::flag("VGASnoop", 5),
    BitField::flag("ParErr", 6),
    BitField::flag("Stepping", 7),
    BitField::flag("SERR", 8),
    BitField::flag("FastB2B", 9),
    BitField::flag("DisInt", 10),
];

/// Status register, bits 2..=13. Bits 0 and 1 are reserved; bits 9..=10 are DEVSEL timing.
pub const STATUS_FIELDS: &[BitField] = &[
    BitField::flag("ImmReady", 2),
    BitField::flag("INTx", 3),
    BitField::flag("Cap", 4),
    BitField::flag("66MHz", 5),
    BitField::flag("UDF", 6),
    BitField::flag("FastB2B", 7),
    BitField::flag("ParErr", 8),
    BitField::enumerated("DEVSEL", Status::DEVSEL_SHIFT, 2, DEVSEL_TIMING),
    BitField::flag(">TAbort", 11),
    BitField::flag("<TAbort", 12),
    BitField::flag("<MAbort", 13),
];

/// Bridge control register (type 1 header), bits 0..=11.
pub const BRIDGE_CONTROL_FIELDS: &[BitField] = &[
    BitField::flag("Parity", 0),
    BitField::flag("SERR", 1),
    BitField::flag("NoISA", 2),
    BitField::flag("VGA", 3),
    BitField::flag("VGA16", 4),
    BitField::flag("MAbort", 5),
    BitField::flag(">Reset", 6),
    BitField::flag("FastB2B", 7),
    BitField::flag("PriDiscTmr", 8),
    BitField::flag("SecDiscTmr", 9),
    BitField::flag("DiscTmrStat", 10),
    BitField::flag("DiscTmrSERREn", 11),
];

pub fn decode_control(value: u16) -> String {
    render(value.into(), CONTROL_FIELDS)
}

pub fn decode_status(value: u16) -> String {
    render(value.into(), STATUS_FIELDS)
}

pub fn decode_bridge_control(value: u16) -> String {
    render(value.into(), BRIDGE_CONTROL_FIELDS)
}

/// Snapshot of the command register (offset 0x04).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ControlRegister(pub u16);

impl ControlRegister {
    pub fn flags(self) -> Command {
        Command::from_bits_retain(self.0)
    }
}

impl fmt::Display for ControlRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&decode_control(self.0))
    }
}

/// Snapshot of the status register (offset 0x06).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StatusRegister(pub u16);

impl StatusRegister {
    pub fn flags(self) -> Status {
        Status::from_bits_retain(self.0)
    }

    pub fn devsel_timing(self) -> &'static str {
        DEVSEL_TIMING[usize::from(self.flags().devsel())]
    }
}

impl fmt::Display for StatusRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&decode_status(self.0))
    }
}

/// Snapshot of a bridge's control register (type 1 header, offset 0x3e).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BridgeControlRegister(pub u16);

impl BridgeControlRegister {
    pub fn flags(self) -> BridgeControl {
        BridgeControl::from_bits_retain(self.0)
    }
}

impl fmt::Display for BridgeControlRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&decode_bridge_control(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_alternating_bits() {
        assert_eq!(
            decode_control(0x555),
            "I/O+ Memory- DMA+ Special- MemWINV+ VGASnoop- ParErr+ Stepping- SERR+ FastB2B- DisInt+"
        );
        assert_eq!(
            decode_control(0x2aa),
            "I/O- Memory+ DMA- Special+ MemWINV- VGASnoop+ ParErr- Stepping+ SERR- FastB2B+ DisInt-"
        );
    }

    #[test]
    fn control_ignores_bits_above_10() {
        assert_eq!(decode_control(0xf800), decode_control(0));
    }

    #[test]
    fn status_devsel_values() {
        let cases = [
            (0x0000, "DEVSEL=fast"),
            (0x0200, "DEVSEL=medium"),
            (0x0400, "DEVSEL=slow"),
            (0x0600, "DEVSEL=reserved"),
        ];
        for (value, token) in cases {
            let rendered = decode_status(value);
            assert!(rendered.contains(token), "{value:#x}: {rendered}");
            assert_eq!(rendered.matches("DEVSEL").count(), 1);
        }
    }

    #[test]
    fn status_golden_output() {
        // Typical chipset function: capabilities list, medium DEVSEL, nothing else.
        assert_eq!(
            decode_status(0x0210),
            "ImmReady- INTx- Cap+ 66MHz- UDF- FastB2B- ParErr- DEVSEL=medium >TAbort- <TAbort- <MAbort-"
        );
        assert_eq!(
            decode_status(0x3ffc),
            "ImmReady+ INTx+ Cap+ 66MHz+ UDF+ FastB2B+ ParErr+ DEVSEL=reserved >TAbort+ <TAbort+ <MAbort+"
        );
    }

    #[test]
    fn status_reserved_bits_do_not_render() {
        assert_eq!(decode_status(0x0003), decode_status(0x0000));
    }

    #[test]
    fn bridge_control_renders_twelve_flags() {
        let rendered = decode_bridge_control(0x0008);
        assert_eq!(
            rendered,
            "Parity- SERR- NoISA- VGA+ VGA16- MAbort- >Reset- FastB2B- PriDiscTmr- SecDiscTmr- DiscTmrStat- DiscTmrSERREn-"
        );
    }

    #[test]
    fn register_snapshots_display_like_the_decoders() {
        assert_eq!(ControlRegister(0x0007).to_string(), decode_control(0x0007));
        assert_eq!(StatusRegister(0x0290).to_string(), decode_status(0x0290));
        assert_eq!(StatusRegister(0x0290).devsel_timing(), "medium");
        assert!(ControlRegister(0x0006).flags().contains(Command::BUS_MASTER));
    }

    #[test]
    fn field_masks() {
        let devsel = STATUS_FIELDS[7];
        assert_eq!(devsel.name, "DEVSEL");
        assert_eq!(devsel.mask(), 0x600);
        assert_eq!(devsel.extract(0x0400), 2);
    }
}
