//! 9x10 glyph table.
//!
//! Each glyph is 9 `u16` columns; bit 0 is the top pixel and bits 0..9
//! hold the 10 pixel rows. Bit 9 is left clear by well-formed fonts so
//! the renderer can use it for underlining.

use crate::config::{DOWN_ARROW, FONT_BIT_MASK, FONT_HEIGHT, FONT_WIDTH, GLYPH_COUNT, NORMAL_MASK};
use core::convert::Infallible;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

const TABLE_LEN: usize = GLYPH_COUNT * FONT_WIDTH;

/// Down arrow, drawn in the right part of the cell.
const ARROW_COLUMNS: [u16; FONT_WIDTH] = [
    0x0000, 0x0020, 0x0060, 0x00E0, 0x01FF, 0x00E0, 0x0060, 0x0020, 0x0000,
];

/// Owned glyph table for the 128 ASCII code points.
#[derive(Clone)]
pub struct Font {
    table: [u16; TABLE_LEN],
}

impl Font {
    /// A font with every glyph blank.
    pub const fn blank() -> Self {
        Self {
            table: [0; TABLE_LEN],
        }
    }

    /// Copy an externally supplied table (`glyph * 9 + column` layout).
    ///
    /// Short tables leave the remaining glyphs blank; values are masked to
    /// the 10 glyph bits.
    pub fn from_table(table: &[u16]) -> Self {
        let mut font = Self::blank();
        for (dst, src) in font.table.iter_mut().zip(table) {
            *dst = src & FONT_BIT_MASK;
        }
        font
    }

    /// Rasterize printable ASCII from an `embedded-graphics` mono font.
    ///
    /// Glyphs are centered horizontally in the 9 pixel cell and clipped to
    /// 10 rows. Control codes are blank except the down arrow at `0x1A`.
    pub fn from_mono_font(mono: &MonoFont<'_>) -> Self {
        let mut font = Self::blank();
        let style = MonoTextStyle::new(mono, BinaryColor::On);
        let glyph_w = mono.character_size.width as i32;
        let x = ((FONT_WIDTH as i32 - glyph_w) / 2).max(0);

        for code in 0x20u8..0x7F {
            let mut canvas = GlyphCanvas::default();
            let mut utf8 = [0u8; 4];
            let s = char::from(code).encode_utf8(&mut utf8);
            let _ = Text::with_baseline(s, Point::new(x, 0), style, Baseline::Top).draw(&mut canvas);
            font.set_glyph(code, &canvas.columns);
        }
        font.set_glyph(DOWN_ARROW, &ARROW_COLUMNS);
        font
    }

    /// Replace one glyph.
    pub fn set_glyph(&mut self, glyph: u8, columns: &[u16; FONT_WIDTH]) {
        let base = (glyph & NORMAL_MASK) as usize * FONT_WIDTH;
        for (dst, src) in self.table[base..base + FONT_WIDTH].iter_mut().zip(columns) {
            *dst = src & FONT_BIT_MASK;
        }
    }

    /// The 9 columns of a glyph. The inverse bit of `glyph` is ignored.
    pub fn columns(&self, glyph: u8) -> &[u16] {
        let base = (glyph & NORMAL_MASK) as usize * FONT_WIDTH;
        &self.table[base..base + FONT_WIDTH]
    }

    /// The raw table in `glyph * 9 + column` layout.
    pub fn table(&self) -> &[u16] {
        &self.table
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::from_mono_font(&embedded_graphics::mono_font::ascii::FONT_6X10)
    }
}

/// One 9x10 cell used as a draw target while rasterizing.
#[derive(Default)]
struct GlyphCanvas {
    columns: [u16; FONT_WIDTH],
}

impl OriginDimensions for GlyphCanvas {
    fn size(&self) -> Size {
        Size::new(FONT_WIDTH as u32, FONT_HEIGHT as u32)
    }
}

impl DrawTarget for GlyphCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 || p.x >= FONT_WIDTH as i32 || p.y >= FONT_HEIGHT as i32 {
                continue;
            }
            if color.is_on() {
                self.columns[p.x as usize] |= 1 << p.y;
            }
        }
        Ok(())
    }
}
