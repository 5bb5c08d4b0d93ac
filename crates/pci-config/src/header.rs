use core::fmt;

use pci_regs::{bridge, header_type, normal, ClassCode};

use crate::access::{read_u16, read_u32, read_u8};
use crate::bar::{decode_bars, BarRegion, ExpansionRom};
use crate::bridge::BridgeWindows;
use crate::decode::{BridgeControlRegister, ControlRegister, StatusRegister};
use crate::{ConfigSpace, Result};

/// Typed snapshot of the standard 64-byte header.
///
/// Every field is read through the register accessor, so a space that cannot supply the
/// full header (e.g. a truncated dump) fails instead of yielding zeroed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigHeader {
    pub vendor_id: u16,
    pub device_id: u16,
    pub command: ControlRegister,
    pub status: StatusRegister,
    pub revision_id: u8,
    pub class_code: ClassCode,
    pub cache_line_size: u8,
    pub latency_timer: u8,
    /// Header layout (bits 0..=6 of the header type register).
    pub header_type: u8,
    pub multi_function: bool,
    pub bist: u8,
    pub interrupt_line: u8,
    pub interrupt_pin: u8,
    pub layout: HeaderLayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLayout {
    Normal(NormalHeader),
    Bridge(BridgeHeader),
    /// CardBus bridges and reserved layouts are not decoded further.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalHeader {
    pub subsystem_vendor_id: u16,
    pub subsystem_id: u16,
    pub bars: Vec<BarRegion>,
    pub expansion_rom: Option<ExpansionRom>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeHeader {
    pub bars: Vec<BarRegion>,
    pub windows: BridgeWindows,
    pub secondary_status: StatusRegister,
    pub bridge_control: BridgeControlRegister,
    pub expansion_rom: Option<ExpansionRom>,
}

impl ConfigHeader {
    pub fn read<S: ConfigSpace + ?Sized>(space: &S) -> Result<Self> {
        let at = |offset: u16| usize::from(offset);

        let raw_header_type = read_u8(space, at(pci_regs::HEADER_TYPE))?;
        let kind = raw_header_type & header_type::LAYOUT_MASK;
        let class = read_u32(space, at(pci_regs::REVISION_ID))?;

        let layout = match kind {
            header_type::NORMAL => HeaderLayout::Normal(NormalHeader {
                subsystem_vendor_id: read_u16(space, at(normal::SUBSYSTEM_VENDOR_ID))?,
                subsystem_id: read_u16(space, at(normal::SUBSYSTEM_ID))?,
                bars: decode_bars(space, &normal::BARS)?,
                expansion_rom: ExpansionRom::decode(read_u32(space, at(normal::EXPANSION_ROM))?),
            }),
            header_type::BRIDGE => HeaderLayout::Bridge(BridgeHeader {
                bars: decode_bars(space, &bridge::BARS)?,
                windows: BridgeWindows::read(space)?,
                secondary_status: StatusRegister(read_u16(space, at(bridge::SECONDARY_STATUS))?),
                bridge_control: BridgeControlRegister(read_u16(
                    space,
                    at(bridge::BRIDGE_CONTROL),
                )?),
                expansion_rom: ExpansionRom::decode(read_u32(space, at(bridge::EXPANSION_ROM))?),
            }),
            _ => HeaderLayout::Other,
        };

        Ok(Self {
            vendor_id: read_u16(space, at(pci_regs::VENDOR_ID))?,
            device_id: read_u16(space, at(pci_regs::DEVICE_ID))?,
            command: ControlRegister(read_u16(space, at(pci_regs::COMMAND))?),
            status: StatusRegister(read_u16(space, at(pci_regs::STATUS))?),
            revision_id: class as u8,
            class_code: ClassCode::new(class >> 8),
            cache_line_size: read_u8(space, at(pci_regs::CACHE_LINE_SIZE))?,
            latency_timer: read_u8(space, at(pci_regs::LATENCY_TIMER))?,
            header_type: kind,
            multi_function: raw_header_type & header_type::MULTI_FUNCTION != 0,
            bist: read_u8(space, at(pci_regs::BIST))?,
            interrupt_line: read_u8(space, at(pci_regs::INTERRUPT_LINE))?,
            interrupt_pin: read_u8(space, at(pci_regs::INTERRUPT_PIN))?,
            layout,
        })
    }

    pub fn bars(&self) -> &[BarRegion] {
        match &self.layout {
            HeaderLayout::Normal(h) => &h.bars,
            HeaderLayout::Bridge(h) => &h.bars,
            HeaderLayout::Other => &[],
        }
    }

    pub fn is_bridge(&self) -> bool {
        matches!(self.layout, HeaderLayout::Bridge(_))
    }

    /// Interrupt pin as a letter (`A`..=`D`), if one is wired.
    pub fn interrupt_pin_name(&self) -> Option<char> {
        match self.interrupt_pin {
            1..=4 => Some(char::from(b'A' + self.interrupt_pin - 1)),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:04x} (rev {:02x}) class {}",
            self.vendor_id, self.device_id, self.revision_id, self.class_code
        )?;
        if let Some(name) = self.class_code.name() {
            write!(f, " [{name}]")?;
        }
        writeln!(f)?;
        writeln!(f, "Control: {}", self.command)?;
        writeln!(f, "Status: {}", self.status)?;
        write!(
            f,
            "Latency: {}, Cache Line: {} bytes",
            self.latency_timer,
            u32::from(self.cache_line_size) * 4
        )?;
        if let Some(pin) = self.interrupt_pin_name() {
            write!(f, "\nInterrupt: pin {pin} routed to IRQ {}", self.interrupt_line)?;
        }
        for region in self.bars() {
            write!(f, "\n{region}")?;
        }
        match &self.layout {
            HeaderLayout::Normal(h) => {
                if let Some(rom) = h.expansion_rom {
                    write!(f, "\n{rom}")?;
                }
            }
            HeaderLayout::Bridge(h) => {
                write!(f, "\n{}", h.windows)?;
                write!(f, "\nSecondary status: {}", h.secondary_status)?;
                write!(f, "\nBridgeCtl: {}", h.bridge_control)?;
                if let Some(rom) = h.expansion_rom {
                    write!(f, "\n{rom}")?;
                }
            }
            HeaderLayout::Other => {}
        }
        Ok(())
    }
}
