use serde::Deserialize;

use super::glyphs::{Cell, GLYPH_COLS, GLYPH_ROWS};
use crate::spectrum::Bar;

pub const ROWS: usize = 2;
pub const TOP_ROW: usize = 0;
pub const BOTTOM_ROW: usize = 1;

/// A character display holding one glyph per cell.
pub trait GlyphDisplay {
    fn columns(&self) -> usize;
    fn clear(&mut self);
    fn write(&mut self, col: usize, row: usize, cell: Cell);
}

/// Draws one bar per column: lower level on the bottom row, upper level
/// (or blank) on the top row.
pub fn show_spectrum(display: &mut dyn GlyphDisplay, bars: &[Bar]) {
    display.clear();
    let columns = display.columns();
    if bars.len() > columns {
        log::debug!("{} bars on a {}-column display; dropping the rest", bars.len(), columns);
    }

    for (col, bar) in bars.iter().take(columns).enumerate() {
        let upper = if bar.upper_is_blank() {
            Cell::Blank
        } else {
            Cell::Glyph(bar.upper)
        };
        display.write(col, BOTTOM_ROW, Cell::Glyph(bar.lower));
        display.write(col, TOP_ROW, upper);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// One block character per cell
    #[default]
    Blocks,
    /// Full 5x8 dot pattern per cell
    Bitmap,
    /// Hex character codes sent to the controller
    Codes,
}

/// Two-row display kept in memory and rendered as text.
pub struct TextLcd {
    cells: Vec<[Cell; ROWS]>,
}

impl TextLcd {
    pub fn new(columns: usize) -> Self {
        Self {
            cells: vec![[Cell::Blank; ROWS]; columns],
        }
    }

    #[allow(dead_code)]
    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.cells.get(col).and_then(|c| c.get(row)).copied()
    }

    pub fn render(&self, style: RenderStyle) -> String {
        match style {
            RenderStyle::Blocks => self.render_blocks(),
            RenderStyle::Bitmap => self.render_bitmap(),
            RenderStyle::Codes => self.codes(),
        }
    }

    fn render_blocks(&self) -> String {
        let mut out = String::new();
        for row in 0..ROWS {
            out.extend(self.cells.iter().map(|c| c[row].block_char()));
            out.push('\n');
        }
        out
    }

    fn render_bitmap(&self) -> String {
        let mut out = String::new();
        for row in 0..ROWS {
            let bitmaps: Vec<[u8; 8]> = self.cells.iter().map(|c| c[row].bitmap()).collect();
            for line in 0..GLYPH_ROWS {
                for (i, bitmap) in bitmaps.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    for bit in (0..GLYPH_COLS).rev() {
                        out.push(if bitmap[line] >> bit & 1 == 1 { '#' } else { '.' });
                    }
                }
                out.push('\n');
            }
        }
        out
    }

    /// Raw character codes per row, as the LCD controller would receive them.
    fn codes(&self) -> String {
        let mut out = String::new();
        for row in 0..ROWS {
            for (i, c) in self.cells.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&format!("{:02x}", c[row].code()));
            }
            out.push('\n');
        }
        out
    }
}

impl GlyphDisplay for TextLcd {
    fn columns(&self) -> usize {
        self.cells.len()
    }

    fn clear(&mut self) {
        for col in &mut self.cells {
            *col = [Cell::Blank; ROWS];
        }
    }

    fn write(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(col).and_then(|c| c.get_mut(row)) {
            *slot = cell;
        }
    }
}
