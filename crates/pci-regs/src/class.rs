//! Class code decoding (config offsets 0x09..=0x0b).

use core::fmt;

/// 24-bit class code: base class in bits 16..=23, sub-class in bits 8..=15, programming
/// interface in bits 0..=7.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassCode(u32);

impl ClassCode {
    /// Builds a class code from a raw value; bits above 23 are discarded.
    pub const fn new(raw: u32) -> Self {
        Self(raw & 0x00ff_ffff)
    }

    pub const fn from_parts(base: u8, sub: u8, prog_if: u8) -> Self {
        Self(((base as u32) << 16) | ((sub as u32) << 8) | prog_if as u32)
    }

    /// Decodes the three little-endian bytes starting at config offset 0x09.
    pub const fn from_le_bytes(bytes: [u8; 3]) -> Self {
        Self::from_parts(bytes[2], bytes[1], bytes[0])
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn base(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn sub(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn prog_if(self) -> u8 {
        self.0 as u8
    }

    pub fn name(self) -> Option<&'static str> {
        class_name(self.0)
    }
}

impl From<u32> for ClassCode {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}", self.0)
    }
}

/// Looks up a display name for a 24-bit class code.
///
/// Resolution goes from most to least specific: the exact code (for class/sub-class pairs
/// whose programming interface changes the meaning, e.g. USB host controller flavours), then
/// the class/sub-class pair, then the base class alone. Returns `None` for codes with no
/// known base class.
pub fn class_name(code: u32) -> Option<&'static str> {
    let code = ClassCode::new(code);
    let exact = code.raw();
    let sub = exact & 0xff_ff00;
    let base = exact & 0xff_0000;

    lookup(PROG_IF_NAMES, exact)
        .or_else(|| lookup(SUBCLASS_NAMES, sub))
        .or_else(|| lookup(BASE_CLASS_NAMES, base))
}

fn lookup(table: &'static [(u32, &'static str)], key: u32) -> Option<&'static str> {
    table
        .binary_search_by_key(&key, |&(code, _)| code)
        .ok()
        .map(|idx| table[idx].1)
}

// Tables are sorted by code so lookups can binary search.

const BASE_CLASS_NAMES: &[(u32, &str)] = &[
    (0x00_0000, "Unclassified device"),
    (0x01_0000, "Mass storage controller"),
    (0x02_0000, "Network controller"),
    (0x03_0000, "Display controller"),
    (0x04_0000, "Multimedia controller"),
    (0x05_0000, "Memory controller"),
    (0x06_0000, "Bridge"),
    (0x07_0000, "Communication controller"),
    (0x08_0000, "Generic system peripheral"),
    (0x09_0000, "Input device controller"),
    (0x0a_0000, "Docking station"),
    (0x0b_0000, "Processor"),
    (0x0c_0000, "Serial bus controller"),
    (0x0d_0000, "Wireless controller"),
    (0x0e_0000, "Intelligent controller"),
    (0x0f_0000, "Satellite communications controller"),
    (0x10_0000, "Encryption controller"),
    (0x11_0000, "Signal processing controller"),
    (0x12_0000, "Processing accelerators"),
    (0x13_0000, "Non-Essential Instrumentation"),
    (0x40_0000, "Coprocessor"),
    (0xff_0000, "Unassigned class"),
];

const SUBCLASS_NAMES: &[(u32, &str)] = &[
    (0x00_0000, "Non-VGA unclassified device"),
    (0x00_0100, "VGA compatible unclassified device"),
    (0x00_0500, "Image coprocessor"),
    (0x01_0000, "SCSI storage controller"),
    (0x01_0100, "IDE interface"),
    (0x01_0200, "Floppy disk controller"),
    (0x01_0300, "IPI bus controller"),
    (0x01_0400, "RAID bus controller"),
    (0x01_0500, "ATA controller"),
    (0x01_0600, "SATA controller"),
    (0x01_0700, "Serial Attached SCSI controller"),
    (0x01_0800, "Non-Volatile memory controller"),
    (0x01_0900, "Universal Flash Storage controller"),
    (0x01_8000, "Mass storage controller"),
    (0x02_0000, "Ethernet controller"),
    (0x02_0100, "Token ring network controller"),
    (0x02_0200, "FDDI network controller"),
    (0x02_0300, "ATM network controller"),
    (0x02_0400, "ISDN controller"),
    (0x02_0500, "WorldFip controller"),
    (0x02_0600, "PICMG controller"),
    (0x02_0700, "Infiniband controller"),
    (0x02_0800, "Fabric controller"),
    (0x02_8000, "Network controller"),
    (0x03_0000, "VGA compatible controller"),
    (0x03_0100, "XGA compatible controller"),
    (0x03_0200, "3D controller"),
    (0x03_8000, "Display controller"),
    (0x04_0000, "Multimedia video controller"),
    (0x04_0100, "Multimedia audio controller"),
    (0x04_0200, "Computer telephony device"),
    (0x04_0300, "Audio device"),
    (0x04_8000, "Multimedia controller"),
    (0x05_0000, "RAM memory"),
    (0x05_0100, "FLASH memory"),
    (0x05_0200, "CXL"),
    (0x05_8000, "Memory controller"),
    (0x06_0000, "Host bridge"),
    (0x06_0100, "ISA bridge"),
    (0x06_0200, "EISA bridge"),
    (0x06_0300, "MicroChannel bridge"),
    (0x06_0400, "PCI bridge"),
    (0x06_0500, "PCMCIA bridge"),
    (0x06_0600, "NuBus bridge"),
    (0x06_0700, "CardBus bridge"),
    (0x06_0800, "RACEway bridge"),
    (0x06_0900, "Semi-transparent PCI-to-PCI bridge"),
    (0x06_0a00, "InfiniBand to PCI host bridge"),
    (0x06_8000, "Bridge"),
    (0x07_0000, "Serial controller"),
    (0x07_0100, "Parallel controller"),
    (0x07_0200, "Multiport serial controller"),
    (0x07_0300, "Modem"),
    (0x07_0400, "GPIB controller"),
    (0x07_0500, "Smart Card controller"),
    (0x07_8000, "Communication controller"),
    (0x08_0000, "PIC"),
    (0x08_0100, "DMA controller"),
    (0x08_0200, "Timer"),
    (0x08_0300, "RTC"),
    (0x08_0400, "PCI Hot-plug controller"),
    (0x08_0500, "SD Host controller"),
    (0x08_0600, "IOMMU"),
    (0x08_8000, "System peripheral"),
    (0x08_9900, "Timing Card"),
    (0x09_0000, "Keyboard controller"),
    (0x09_0100, "Digitizer Pen"),
    (0x09_0200, "Mouse controller"),
    (0x09_0300, "Scanner controller"),
    (0x09_0400, "Gameport controller"),
    (0x09_8000, "Input device controller"),
    (0x0a_0000, "Generic Docking Station"),
    (0x0a_8000, "Docking Station"),
    (0x0b_0000, "386"),
    (0x0b_0100, "486"),
    (0x0b_0200, "Pentium"),
    (0x0b_1000, "Alpha"),
    (0x0b_2000, "Power PC"),
    (0x0b_3000, "MIPS"),
    (0x0b_4000, "Co-processor"),
    (0x0c_0000, "FireWire (IEEE 1394)"),
    (0x0c_0100, "ACCESS Bus"),
    (0x0c_0200, "SSA"),
    (0x0c_0300, "USB controller"),
    (0x0c_0400, "Fibre Channel"),
    (0x0c_0500, "SMBus"),
    (0x0c_0600, "InfiniBand"),
    (0x0c_0700, "IPMI Interface"),
    (0x0c_0800, "SERCOS interface"),
    (0x0c_0900, "CANBUS"),
    (0x0c_8000, "Serial bus controller"),
    (0x0d_0000, "IRDA controller"),
    (0x0d_0100, "Consumer IR controller"),
    (0x0d_1000, "RF controller"),
    (0x0d_1100, "Bluetooth"),
    (0x0d_1200, "Broadband"),
    (0x0d_2000, "802.1a controller"),
    (0x0d_2100, "802.1b controller"),
    (0x0d_8000, "Wireless controller"),
    (0x0e_0000, "I2O"),
    (0x0f_0100, "Satellite TV controller"),
    (0x0f_0200, "Satellite audio communication controller"),
    (0x0f_0300, "Satellite voice communication controller"),
    (0x0f_0400, "Satellite data communication controller"),
    (0x10_0000, "Network and computing encryption device"),
    (0x10_1000, "Entertainment encryption device"),
    (0x10_8000, "Encryption controller"),
    (0x11_0000, "DPIO module"),
    (0x11_0100, "Performance counters"),
    (0x11_1000, "Communication synchronizer"),
    (0x11_2000, "Signal processing management"),
    (0x11_8000, "Signal processing controller"),
    (0x12_0000, "Processing accelerators"),
    (0x12_0100, "SNIA Smart Data Accelerator Interface (SDXI) controller"),
];

const PROG_IF_NAMES: &[(u32, &str)] = &[
    (0x01_0601, "SATA controller (AHCI 1.0)"),
    (0x01_0802, "Non-Volatile memory controller (NVM Express)"),
    (0x03_0000, "VGA compatible controller (VGA controller)"),
    (0x06_0401, "PCI bridge (Subtractive decode)"),
    (0x0c_0300, "USB controller (UHCI)"),
    (0x0c_0310, "USB controller (OHCI)"),
    (0x0c_0320, "USB controller (EHCI)"),
    (0x0c_0330, "USB controller (XHCI)"),
    (0x0c_0340, "USB controller (USB4 Host Interface)"),
    (0x0c_03fe, "USB controller (USB Device)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(table: &[(u32, &str)]) {
        for pair in table.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "table not sorted at {:06x} / {:06x}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn tables_are_sorted_for_binary_search() {
        assert_sorted(BASE_CLASS_NAMES);
        assert_sorted(SUBCLASS_NAMES);
        assert_sorted(PROG_IF_NAMES);
    }

    #[test]
    fn class_code_splits_into_three_bytes() {
        let code = ClassCode::new(0x0c_0330);
        assert_eq!(code.base(), 0x0c);
        assert_eq!(code.sub(), 0x03);
        assert_eq!(code.prog_if(), 0x30);
        assert_eq!(ClassCode::from_parts(0x0c, 0x03, 0x30), code);
        assert_eq!(ClassCode::from_le_bytes([0x30, 0x03, 0x0c]), code);
        assert_eq!(code.to_string(), "0c0330");
    }

    #[test]
    fn new_discards_bits_above_23() {
        assert_eq!(ClassCode::new(0xff02_0000).raw(), 0x02_0000);
    }

    #[test]
    fn lookup_prefers_most_specific_entry() {
        assert_eq!(class_name(0x0c_0330), Some("USB controller (XHCI)"));
        assert_eq!(class_name(0x0c_0399), Some("USB controller"));
        assert_eq!(class_name(0x02_0000), Some("Ethernet controller"));
        assert_eq!(class_name(0x06_0400), Some("PCI bridge"));
        assert_eq!(class_name(0x06_7700), Some("Bridge"));
    }

    #[test]
    fn unknown_base_class_has_no_name() {
        assert_eq!(class_name(0x77_0000), None);
        assert_eq!(ClassCode::new(0x20_0102).name(), None);
    }
}
