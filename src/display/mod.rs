//! Display subsystem - SH1106 panel driver and 9x10 text renderer.
//!
//! ## Components
//!
//! - **Transport**: command/data byte sink to the controller (SPI)
//! - **Panel**: SH1106 init sequence and page-addressed RAM upload
//! - **Font**: 128 glyphs of 9 columns x 10 rows
//! - **Screen**: framebuffer plus the authoritative text shadow

pub mod font;
pub mod screen;
pub mod sh1106;
pub mod transport;

use crate::config::{COLS, HRES, NUM_PAGES, ROWS, VRES};
use crate::error::Error;

/// Text attributes a display supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attrs(u16);

impl Attrs {
    pub const NONE: Attrs = Attrs(0);
    pub const INVERSE: Attrs = Attrs(0x0001);
    pub const UNDERLINE: Attrs = Attrs(0x0008);

    pub const fn union(self, other: Attrs) -> Attrs {
        Attrs(self.0 | other.0)
    }

    pub const fn contains(self, other: Attrs) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u16 {
        self.0
    }
}

/// Geometry and capabilities of a text display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayInfo {
    pub hres: u16,
    pub vres: u16,
    pub cols: u16,
    pub rows: u16,
    pub colors: u16,
    pub attrs: Attrs,
}

impl DisplayInfo {
    /// Descriptor of the 132x64 SH1106 panel with the 9x10 font.
    pub const fn sh1106() -> Self {
        Self {
            hres: HRES as u16,
            vres: VRES as u16,
            cols: COLS as u16,
            rows: ROWS as u16,
            colors: 1,
            attrs: Attrs::INVERSE.union(Attrs::UNDERLINE),
        }
    }
}

/// Rectangular slice of controller RAM: a column range over a page range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderArea {
    pub start_col: u8,
    pub end_col: u8,
    pub start_page: u8,
    pub end_page: u8,
    pub buflen: usize,
}

impl RenderArea {
    /// Build an area and compute its flattened buffer length. An inverted
    /// range is empty.
    pub const fn new(start_col: u8, end_col: u8, start_page: u8, end_page: u8) -> Self {
        let buflen = span(start_col, end_col) * span(start_page, end_page);
        Self {
            start_col,
            end_col,
            start_page,
            end_page,
            buflen,
        }
    }

    /// Every column of every page.
    pub const fn full() -> Self {
        Self::new(0, (HRES - 1) as u8, 0, (NUM_PAGES - 1) as u8)
    }

    /// Number of columns pushed per page.
    pub const fn width(&self) -> usize {
        span(self.start_col, self.end_col)
    }
}

/// Inclusive length of `start..=end`, 0 when `end < start`.
const fn span(start: u8, end: u8) -> usize {
    if end < start {
        0
    } else {
        (end - start) as usize + 1
    }
}

/// Character-cell operations shared by the renderer and its users.
///
/// Rows and columns outside the text grid are ignored. Every operation
/// with a `paint` flag only touches the framebuffer unless `paint` is set,
/// in which case the result is pushed to the panel before returning.
pub trait TextDisplay {
    /// Geometry of the text grid.
    fn info(&self) -> DisplayInfo;

    /// Plot one character. Bit 7 of `c` selects inverse video.
    fn put_char(
        &mut self,
        row: usize,
        col: usize,
        c: u8,
        underline: bool,
        paint: bool,
    ) -> Result<(), Error>;

    /// Plot a string, wrapping to the next row and stopping at the end of
    /// the screen.
    fn put_str(
        &mut self,
        row: usize,
        col: usize,
        s: &str,
        invert: bool,
        underline: bool,
        paint: bool,
    ) -> Result<(), Error>;

    /// Blank the whole screen.
    fn clear(&mut self, paint: bool) -> Result<(), Error>;

    /// Blank one text row.
    fn row_clear(&mut self, row: usize, paint: bool) -> Result<(), Error>;

    /// Push the RAM pages spanned by one text row to the panel.
    fn row_paint(&mut self, row: usize) -> Result<(), Error>;

    /// Move rows `top+1..=bot` up by one and blank `bot`.
    fn rows_scroll_up(&mut self, top: usize, bot: usize, paint: bool) -> Result<(), Error>;

    /// Rebuild the framebuffer from the text shadow.
    fn update(&mut self, paint: bool) -> Result<(), Error>;

    /// Push the whole framebuffer to the panel.
    fn paint(&mut self) -> Result<(), Error>;
}
