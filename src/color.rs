//! Hex color parsing and the built-in palette.

use egui::Color32;

use crate::error::{EditError, EditResult};

/// Color selected when the editor starts
pub const DEFAULT_COLOR: Color32 = Color32::from_rgb(0x00, 0xff, 0xf7);

/// Swatches offered by the color panel, six per row.
pub const PALETTE: [Color32; 30] = [
    // Neon
    Color32::from_rgb(0x00, 0xff, 0xf7),
    Color32::from_rgb(0x39, 0xff, 0x14),
    Color32::from_rgb(0xff, 0x2d, 0x6a),
    Color32::from_rgb(0xff, 0xd7, 0x00),
    Color32::from_rgb(0xff, 0x6b, 0x00),
    Color32::from_rgb(0x8b, 0x5c, 0xf6),
    // Pastels
    Color32::from_rgb(0xff, 0x9f, 0xf3),
    Color32::from_rgb(0x54, 0xa0, 0xff),
    Color32::from_rgb(0x5f, 0x27, 0xcd),
    Color32::from_rgb(0x00, 0xd2, 0xd3),
    Color32::from_rgb(0x1d, 0xd1, 0xa1),
    Color32::from_rgb(0xfe, 0xca, 0x57),
    // Basics
    Color32::from_rgb(0xff, 0xff, 0xff),
    Color32::from_rgb(0xc8, 0xd6, 0xe5),
    Color32::from_rgb(0x83, 0x95, 0xa7),
    Color32::from_rgb(0x57, 0x65, 0x74),
    Color32::from_rgb(0x22, 0x2f, 0x3e),
    Color32::from_rgb(0x00, 0x00, 0x00),
    // Earth tones
    Color32::from_rgb(0xff, 0x6b, 0x6b),
    Color32::from_rgb(0xee, 0x5a, 0x24),
    Color32::from_rgb(0xf7, 0x9f, 0x1f),
    Color32::from_rgb(0xa3, 0xcb, 0x38),
    Color32::from_rgb(0x00, 0x94, 0x32),
    Color32::from_rgb(0x06, 0x52, 0xdd),
    // Skin tones
    Color32::from_rgb(0xfc, 0xd5, 0xb5),
    Color32::from_rgb(0xe8, 0xbe, 0xac),
    Color32::from_rgb(0xd4, 0xa5, 0x74),
    Color32::from_rgb(0xb8, 0x76, 0x3c),
    Color32::from_rgb(0x8d, 0x55, 0x24),
    Color32::from_rgb(0x5c, 0x33, 0x17),
];

/// Parses a `#rrggbb` string (hex digits in either case) into an opaque color.
pub fn parse_hex(input: &str) -> EditResult<Color32> {
    let invalid = || EditError::InvalidColor(input.to_owned());

    let digits = input.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Color32::from_rgb(r, g, b)),
        _ => Err(invalid()),
    }
}

/// Formats a color as lowercase `#rrggbb`, ignoring alpha.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
