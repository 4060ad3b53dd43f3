//! Application-wide constants and compile-time configuration.
//!
//! Panel geometry, font metrics, timing parameters and pin assignments
//! live here so they can be tuned in one place.

// Panel (SH1106 controller RAM)

/// Controller RAM width in columns. The SH1106 has 132 columns of RAM
/// driving a 128 column panel.
pub const HRES: usize = 132;

/// Vertical resolution in pixels.
pub const VRES: usize = 64;

/// Pixels per RAM page (one byte holds 8 vertical pixels, bit 0 on top).
pub const PAGE_HEIGHT: usize = 8;

/// Number of RAM pages.
pub const NUM_PAGES: usize = VRES / PAGE_HEIGHT;

/// Framebuffer size in bytes (132 x 8 = 1056).
pub const BUF_LEN: usize = HRES * NUM_PAGES;

/// RAM columns left of the visible panel area.
pub const DEAD_LEFT: usize = 2;

/// Contrast written during panel init (mid scale).
pub const PANEL_CONTRAST: u8 = 0x80;

/// Pause while the panel flashes all pixels on/off during init (ms).
pub const PANEL_FLASH_MS: u32 = 250;

/// RST pulse width and settle time (ms).
pub const PANEL_RESET_MS: u32 = 10;

// Font / text grid

/// Glyph cell width in pixels.
pub const FONT_WIDTH: usize = 9;

/// Glyph cell height in pixels.
pub const FONT_HEIGHT: usize = 10;

/// The 10 bits a glyph column occupies.
pub const FONT_BIT_MASK: u16 = 0x03FF;

/// Bottom pixel row of a cell; set to draw an underline.
pub const UNDERLINE_BIT: u16 = 0x0200;

/// Number of glyphs in a font table (7-bit ASCII).
pub const GLYPH_COUNT: usize = 128;

/// Text rows (64 / 10).
pub const ROWS: usize = 6;

/// Text columns (126 of the 128 visible pixels).
pub const COLS: usize = 14;

/// High bit of a text byte selects inverse video.
pub const INVERT_BIT: u8 = 0x80;

/// Mask that strips the inverse bit from a text byte.
pub const NORMAL_MASK: u8 = 0x7F;

/// Glyph index of the "more items below" arrow.
pub const DOWN_ARROW: u8 = 0x1A;

// Menus

/// Maximum nesting of menus on the menu stack.
pub const MENU_STACK_DEPTH: usize = 8;

/// Capacity of a generated item label.
pub const LABEL_CAPACITY: usize = 32;

// Input timing

/// Rotary events closer than this to the last handled one are dropped (ms).
pub const ROTARY_DEBOUNCE_MS: u32 = 200;

/// Housekeeping tick period (ms). 62.5 Hz.
pub const HOUSEKEEPING_PERIOD_MS: u64 = 16;

/// A switch must read pressed this long before a press is reported (ms).
pub const SWITCH_DEBOUNCE_MS: u32 = 80;

/// Hold time before a press becomes a long-press (ms).
pub const SWITCH_LONGPRESS_MS: u32 = 800;

/// Long-press repeat period while the switch stays down (ms).
pub const SWITCH_REPEAT_MS: u32 = 250;

/// Switch polling period used by the switch tasks (ms).
pub const SWITCH_POLL_MS: u64 = 10;

/// Depth of the UI message channel.
pub const MESSAGE_QUEUE_DEPTH: usize = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Rotary A       → P0.03  (QDEC A)
//   Rotary B       → P0.04  (QDEC B)
//   Rotary switch  → P0.28
//   ATTN/CMD switch→ P0.11
//   SPI SCK        → P0.26
//   SPI MOSI       → P0.27
//   Display CS     → P0.29
//   Display DC     → P0.30
//   Display RST    → P0.31
