//! Line classification for the `pci.ids` format.
//!
//! ```text
//! # comment
//! 8086  Intel Corporation
//! \t1237  440FX - 82441FX PMC [Natoma]
//! \t\t1af4 1100  Qemu virtual machine
//! C 06  Bridge
//! ```
//!
//! Vendor lines start in column 0 with a 4-digit id and the name at column 6. Device lines
//! are indented by one tab with the name at column 7. Sub-device lines (two tabs) are not
//! used here. Any other column-0 line, such as the `C` class section, ends the current
//! vendor block.
//!
//! The eager database and the streaming scanner both go through [`classify`], which keeps
//! their answers identical.

use std::borrow::Cow;

const MIN_LINE_LEN: usize = 7;
const VENDOR_NAME_COLUMN: usize = 6;
const DEVICE_NAME_COLUMN: usize = 7;

/// A 4-character id as it appears in the database, not yet normalized.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct RawId<'a>(&'a [u8]);

impl RawId<'_> {
    /// Lowercased id, the form stored by the database.
    pub(crate) fn normalized(self) -> String {
        String::from_utf8_lossy(self.0).to_ascii_lowercase()
    }

    /// Whether this id, once lowercased, equals `query` exactly.
    pub(crate) fn matches(self, query: &str) -> bool {
        let query = query.as_bytes();
        self.0.len() == query.len()
            && self.0.iter().zip(query).all(|(id, q)| id.to_ascii_lowercase() == *q)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Vendor { id: RawId<'a>, name: &'a [u8] },
    Device { id: RawId<'a>, name: &'a [u8] },
    SubDevice,
    /// Blank, short or `#` comment lines.
    Comment,
    /// Indented line that is not a well-formed device line.
    Malformed,
    /// Column-0 line that is not a vendor (class sections, unknown markers).
    Boundary,
}

impl Line<'_> {
    /// Whether this line closes an open vendor block.
    pub(crate) fn ends_block(&self) -> bool {
        matches!(self, Line::Vendor { .. } | Line::Boundary)
    }
}

pub(crate) fn classify(line: &[u8]) -> Line<'_> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    if line.len() < MIN_LINE_LEN || line[0] == b'#' {
        return Line::Comment;
    }
    if line.starts_with(b"\t\t") {
        return Line::SubDevice;
    }
    if line[0] == b'\t' {
        return match classify_id(&line[1..]) {
            Some(id) if line.len() > DEVICE_NAME_COLUMN => Line::Device {
                id,
                name: &line[DEVICE_NAME_COLUMN..],
            },
            _ => Line::Malformed,
        };
    }
    match classify_id(line) {
        Some(id) => Line::Vendor {
            id,
            name: &line[VENDOR_NAME_COLUMN..],
        },
        None => Line::Boundary,
    }
}

/// Accepts `XXXX<sep>` where the first two characters are hex digits and the id is ASCII.
fn classify_id(bytes: &[u8]) -> Option<RawId<'_>> {
    if bytes.len() < 5 {
        return None;
    }
    let (id, rest) = bytes.split_at(4);
    let leading_hex = id[..2].iter().all(u8::is_ascii_hexdigit);
    let delimited = matches!(rest.first(), Some(b' ' | b'\t'));
    (leading_hex && id.is_ascii() && delimited).then_some(RawId(id))
}

pub(crate) fn text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Splits a blob into lines on `\n`, leaving any `\r` for [`classify`] to strip.
pub(crate) fn lines(blob: &[u8]) -> impl Iterator<Item = Line<'_>> {
    blob.split(|&b| b == b'\n').map(classify)
}
