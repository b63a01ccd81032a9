// puzzle/palette.rs - Building height → color table shared by every grid consumer

use crate::types::Color;

/// `(value, 0xRRGGBB)` for values 1 through 9
pub const PALETTE: [(u32, u32); 9] = [
    (1, 0xcc0000), // red
    (2, 0x00cc00), // green
    (3, 0x0000cc), // blue
    (4, 0xcccc00), // yellow
    (5, 0xaa00aa), // magenta
    (6, 0x00aaaa), // cyan
    (7, 0x999999), // light gray
    (8, 0x555555), // dark gray
    (9, 0x333333), // darker gray
];

/// Used for every value not in [`PALETTE`]
pub const FALLBACK_HEX: u32 = 0x888888;

pub fn hex_for(value: u32) -> u32 {
    PALETTE
        .iter()
        .find(|(key, _)| *key == value)
        .map_or(FALLBACK_HEX, |(_, hex)| *hex)
}

pub fn color_for(value: u32) -> Color {
    Color::from_hex(hex_for(value))
}
