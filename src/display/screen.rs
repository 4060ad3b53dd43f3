//! Text screen - framebuffer, text shadow and glyph plotting.
//!
//! The font cell is 10 pixels tall but controller RAM is organised in
//! 8 pixel pages, so text rows do not line up with pages:
//!
//! ```text
//!  px    page  row   shift
//!   0..7   0    0      0
//!   8..15  1    0/1    2
//!  16..23  2    1/2    4
//!  24..31  3    2/3    6
//!  32..39  4    3      0
//!  40..47  5    4      0
//!  48..55  6    4/5    2
//!  56..63  7    5      -   (60..63 blank)
//! ```
//!
//! Row `r` starts at pixel `r * 10`, lives in pages `p = r*10/8` and
//! `p + 1`, and is shifted down by `r*10 % 8` bits. Plotting a glyph
//! column therefore reads the two bytes as one 16-bit word, masks out the
//! 10 bits the row owns and ORs the shifted glyph in.
//!
//! Every column index is offset by the 2 dead columns at the left of the
//! SH1106 RAM. 14 characters of 9 pixels use 126 of the 128 visible
//! columns.
//!
//! The text shadow is authoritative: [`Screen::update`] rebuilds the
//! pixels from it. It stores the inverse bit but not underlining, so a
//! rebuild drops underlines.

use crate::config::{
    BUF_LEN, COLS, DEAD_LEFT, FONT_BIT_MASK, FONT_HEIGHT, FONT_WIDTH, HRES, INVERT_BIT,
    NORMAL_MASK, NUM_PAGES, PAGE_HEIGHT, ROWS, UNDERLINE_BIT,
};
use crate::display::font::Font;
use crate::display::sh1106::Sh1106;
use crate::display::transport::Transport;
use crate::display::{DisplayInfo, RenderArea, TextDisplay};
use crate::error::Error;
use embedded_hal::delay::DelayNs;

/// First page and bit shift of a text row.
const fn row_geometry(row: usize) -> (usize, u32) {
    let top = row * FONT_HEIGHT;
    (top / PAGE_HEIGHT, (top % PAGE_HEIGHT) as u32)
}

/// Framebuffer plus text shadow, painting through an SH1106 panel.
pub struct Screen<T> {
    panel: Sh1106<T>,
    font: Font,
    frame: [u8; BUF_LEN],
    text: [[u8; COLS]; ROWS],
}

impl<T: Transport> Screen<T> {
    pub fn new(panel: Sh1106<T>, font: Font) -> Self {
        Self {
            panel,
            font,
            frame: [0; BUF_LEN],
            text: [[0; COLS]; ROWS],
        }
    }

    /// Initialise the panel and blank the screen.
    pub fn init(&mut self, invert: bool, delay: &mut impl DelayNs) -> Result<(), Error> {
        self.panel.init(invert, delay)?;
        self.clear(true)
    }

    pub fn panel(&self) -> &Sh1106<T> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Sh1106<T> {
        &mut self.panel
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The pixel buffer, `HRES` bytes per page.
    pub fn frame(&self) -> &[u8; BUF_LEN] {
        &self.frame
    }

    /// The text shadow.
    pub fn text(&self) -> &[[u8; COLS]; ROWS] {
        &self.text
    }

    /// Shadow byte at a cell, `None` off the grid.
    pub fn char_at(&self, row: usize, col: usize) -> Option<u8> {
        self.text.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Set every framebuffer byte. The text shadow is left alone.
    pub fn fill(&mut self, byte: u8) {
        self.frame.fill(byte);
    }

    /// Set every byte of one RAM page.
    pub fn fill_page(&mut self, byte: u8, page: usize) {
        if page < NUM_PAGES {
            self.frame[page * HRES..(page + 1) * HRES].fill(byte);
        }
    }

    /// Upload one area of the framebuffer.
    pub fn render(&mut self, area: &RenderArea) -> Result<(), Error> {
        self.panel.render(&self.frame, area)
    }

    /// Read the 16-bit window at `col` spanning `page` and `page + 1`.
    fn word(&self, page: usize, col: usize) -> u16 {
        let lo = self.frame[page * HRES + col];
        let hi = self.frame[(page + 1) * HRES + col];
        u16::from_le_bytes([lo, hi])
    }

    fn set_word(&mut self, page: usize, col: usize, word: u16) {
        let [lo, hi] = word.to_le_bytes();
        self.frame[page * HRES + col] = lo;
        self.frame[(page + 1) * HRES + col] = hi;
    }
}

impl<T: Transport> TextDisplay for Screen<T> {
    fn info(&self) -> DisplayInfo {
        DisplayInfo::sh1106()
    }

    fn put_char(
        &mut self,
        row: usize,
        col: usize,
        c: u8,
        underline: bool,
        paint: bool,
    ) -> Result<(), Error> {
        if row >= ROWS || col >= COLS {
            return Ok(());
        }
        self.text[row][col] = c;

        let (page, shift) = row_geometry(row);
        let mask = !(FONT_BIT_MASK << shift);
        let mut attr = if underline { UNDERLINE_BIT } else { 0 };
        if c & INVERT_BIT != 0 {
            attr ^= FONT_BIT_MASK;
        }
        let attr = attr << shift;

        let mut glyph = [0u16; FONT_WIDTH];
        glyph.copy_from_slice(self.font.columns(c & NORMAL_MASK));

        let x0 = col * FONT_WIDTH + DEAD_LEFT;
        for (i, bits) in glyph.iter().enumerate() {
            let cdata = ((bits & FONT_BIT_MASK) << shift) ^ attr;
            let existing = self.word(page, x0 + i);
            self.set_word(page, x0 + i, (existing & mask) | cdata);
        }

        if paint {
            self.paint()?;
        }
        Ok(())
    }

    fn put_str(
        &mut self,
        row: usize,
        col: usize,
        s: &str,
        invert: bool,
        underline: bool,
        paint: bool,
    ) -> Result<(), Error> {
        if row >= ROWS || col >= COLS {
            return Ok(());
        }
        let (mut row, mut col) = (row, col);
        for b in s.bytes() {
            let c = if invert { b ^ INVERT_BIT } else { b };
            self.put_char(row, col, c, underline, false)?;
            col += 1;
            if col == COLS {
                col = 0;
                row += 1;
                if row == ROWS {
                    break;
                }
            }
        }
        if paint {
            self.paint()?;
        }
        Ok(())
    }

    fn clear(&mut self, paint: bool) -> Result<(), Error> {
        self.text = [[0; COLS]; ROWS];
        self.frame.fill(0);
        if paint {
            self.paint()?;
        }
        Ok(())
    }

    fn row_clear(&mut self, row: usize, paint: bool) -> Result<(), Error> {
        if row >= ROWS {
            return Ok(());
        }
        self.text[row] = [0; COLS];

        let (page, shift) = row_geometry(row);
        let mask = !(FONT_BIT_MASK << shift);
        for col in 0..HRES {
            let existing = self.word(page, col);
            self.set_word(page, col, existing & mask);
        }

        if paint {
            self.paint()?;
        }
        Ok(())
    }

    fn row_paint(&mut self, row: usize) -> Result<(), Error> {
        if row >= ROWS {
            return Ok(());
        }
        // Both pages go out whole, including the neighbour rows' bits that
        // share them; those bits are current because their rows plotted them.
        let (page, _) = row_geometry(row);
        let area = RenderArea::new(0, (HRES - 1) as u8, page as u8, page as u8 + 1);
        self.render(&area)
    }

    fn rows_scroll_up(&mut self, top: usize, bot: usize, paint: bool) -> Result<(), Error> {
        if bot <= top || bot >= ROWS {
            return Ok(());
        }
        self.text.copy_within(top + 1..=bot, top);
        self.text[bot] = [0; COLS];
        self.update(paint)
    }

    fn update(&mut self, paint: bool) -> Result<(), Error> {
        for row in 0..ROWS {
            for col in 0..COLS {
                let c = self.text[row][col];
                self.put_char(row, col, c, false, false)?;
            }
        }
        if paint {
            self.paint()?;
        }
        Ok(())
    }

    fn paint(&mut self) -> Result<(), Error> {
        self.render(&RenderArea::full())
    }
}
