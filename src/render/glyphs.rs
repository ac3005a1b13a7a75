//! Custom character set for a 5x8 dot-matrix character LCD.

/// Fill-level bitmaps, index 0 = 1/8 full through index 7 = completely full.
/// Each byte is one pixel row, top row first, using the low five bits.
pub const GLYPHS: [[u8; 8]; 8] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F],
    [0x00, 0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F, 0x1F],
    [0x00, 0x00, 0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F],
    [0x00, 0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F],
    [0x00, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F],
    [0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F, 0x1F],
];

/// Character code the LCD shows as an empty cell.
pub const BLANK: u8 = 0x20;

pub const GLYPH_ROWS: usize = 8;
pub const GLYPH_COLS: usize = 5;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Blank,
    Glyph(u8),
}

impl Cell {
    /// LCD character code: custom glyphs live at 0-7.
    pub fn code(self) -> u8 {
        match self {
            Cell::Blank => BLANK,
            Cell::Glyph(i) => i,
        }
    }

    pub fn block_char(self) -> char {
        match self {
            Cell::Blank => ' ',
            Cell::Glyph(i) => BLOCKS[(i as usize).min(7)],
        }
    }

    /// Pixel rows of this cell, top first.
    pub fn bitmap(self) -> [u8; 8] {
        match self {
            Cell::Blank => [0; 8],
            Cell::Glyph(i) => GLYPHS[(i as usize).min(7)],
        }
    }
}
