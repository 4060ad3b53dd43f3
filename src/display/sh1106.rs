//! SH1106 OLED panel driver.
//!
//! Owns the transport and knows the controller's command set. The
//! controller RAM is 132 columns x 8 pages; the panel shows columns
//! 2..130. Nothing else in the crate talks to the transport.

use crate::config::{HRES, NUM_PAGES, PANEL_CONTRAST, PANEL_FLASH_MS};
use crate::display::transport::Transport;
use crate::display::RenderArea;
use crate::error::Error;
use embedded_hal::delay::DelayNs;

/// SH1106 commands (see datasheet). Names ending in `X` take the low
/// bits ORed in; the others are followed by one argument byte.
pub mod cmd {
    pub const NOOP: u8 = 0xE3;
    /// Next byte is contrast.
    pub const CONTRAST: u8 = 0x81;
    /// A4 = follow RAM, A5 = force all pixels on.
    pub const ENTIRE_ON_X: u8 = 0xA4;
    /// A6 = normal, A7 = reverse.
    pub const NORM_INV_X: u8 = 0xA6;
    /// AE = off, AF = on.
    pub const DISP_OFF_ON_X: u8 = 0xAE;
    /// (0000 xxxx) low nibble of the column address.
    pub const COL_ADDR_LOW_X: u8 = 0x00;
    /// (0001 xxxx) high nibble of the column address.
    pub const COL_ADDR_HIGH_X: u8 = 0x10;
    /// (1011 xxxx) page address.
    pub const PAGE_ADDR_X: u8 = 0xB0;
    /// (01xx xxxx) RAM line shown on COM0.
    pub const START_LINE_X: u8 = 0x40;
    /// A0 = normal, A1 = reverse.
    pub const SEG_MAP_X: u8 = 0xA0;
    pub const SEG_MAP_REV: u8 = 0x01;
    /// Next byte (0-63) is the multiplex ratio.
    pub const MUX_RATIO: u8 = 0xA8;
    /// (1100 D000) scan D=0 0..n, D=1 n..0.
    pub const COM_DIR_X: u8 = 0xC0;
    pub const COM_DIR_REV: u8 = 0x08;
    /// Next byte (0-63) is the display offset.
    pub const DISP_OFFSET: u8 = 0xD3;
    /// Next byte configures the COM pads.
    pub const COM_PIN_CFG: u8 = 0xDA;
    /// Next byte is the clock divider / oscillator setting.
    pub const DISP_CLK_DIV: u8 = 0xD5;
    /// Next byte is dis-charge / pre-charge periods.
    pub const PRECHARGE: u8 = 0xD9;
    /// Next byte is the VCOM deselect level.
    pub const VCOM_DESEL: u8 = 0xDB;
}

/// SH1106 driver over a command/data transport.
pub struct Sh1106<T> {
    transport: T,
    initialized: bool,
}

impl<T: Transport> Sh1106<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            initialized: false,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Send one command byte as its own operation.
    pub fn send_cmd(&mut self, cmd: u8) -> Result<(), Error> {
        self.transport.cmd_start()?;
        self.transport.write(cmd)?;
        self.transport.op_end()
    }

    /// Send several command bytes in a single operation.
    pub fn send_cmds(&mut self, cmds: &[u8]) -> Result<(), Error> {
        self.transport.cmd_start()?;
        for &c in cmds {
            self.transport.write(c)?;
        }
        self.transport.op_end()
    }

    /// Reset and configure the controller, blank its RAM, turn the panel
    /// on and flash it twice.
    ///
    /// `invert` flips both the segment and COM scan direction, i.e. rotates
    /// the picture by 180 degrees.
    pub fn init(&mut self, invert: bool, delay: &mut impl DelayNs) -> Result<(), Error> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        let seg = if invert { cmd::SEG_MAP_REV } else { 0x00 };
        let com = if invert { cmd::COM_DIR_REV } else { 0x00 };

        self.transport.reset()?;

        self.send_cmd(cmd::DISP_OFF_ON_X)?;
        self.send_cmd(cmd::COL_ADDR_LOW_X)?;
        self.send_cmd(cmd::COL_ADDR_HIGH_X)?;
        self.send_cmd(cmd::START_LINE_X)?;
        self.send_cmd(cmd::CONTRAST)?;
        self.send_cmd(PANEL_CONTRAST)?;
        self.send_cmd(cmd::SEG_MAP_X | seg)?;
        self.send_cmd(cmd::COM_DIR_X | com)?;
        self.send_cmd(cmd::NORM_INV_X)?;
        self.send_cmd(cmd::MUX_RATIO)?;
        self.send_cmd(0x3F)?; // 1/64
        self.send_cmd(cmd::DISP_OFFSET)?;
        self.send_cmd(0x00)?;
        self.send_cmd(cmd::DISP_CLK_DIV)?;
        self.send_cmd(0x80)?; // +15%, f/1
        self.send_cmd(cmd::PRECHARGE)?;
        self.send_cmd(0xF1)?; // dis-charge 15 clocks, pre-charge 1
        self.send_cmd(cmd::COM_PIN_CFG)?;
        self.send_cmd(0x12)?; // alternative
        self.send_cmd(cmd::VCOM_DESEL)?;
        self.send_cmd(0x40)?;
        self.send_cmd(cmd::PAGE_ADDR_X)?;
        self.send_cmd(cmd::NORM_INV_X)?;

        self.clear_panel()?;

        self.send_cmd(cmd::DISP_OFF_ON_X | 0x01)?;

        for _ in 0..2 {
            self.send_cmd(cmd::ENTIRE_ON_X | 0x01)?;
            delay.delay_ms(PANEL_FLASH_MS);
            self.send_cmd(cmd::ENTIRE_ON_X)?;
            delay.delay_ms(PANEL_FLASH_MS);
        }

        self.initialized = true;
        info!("sh1106: initialised (invert={})", invert);
        Ok(())
    }

    /// Zero every byte of controller RAM, bypassing any framebuffer.
    pub fn clear_panel(&mut self) -> Result<(), Error> {
        let zeros = [0u8; HRES];
        for page in 0..NUM_PAGES as u8 {
            self.send_cmd(cmd::PAGE_ADDR_X | page)?;
            self.send_cmd(cmd::COL_ADDR_LOW_X)?;
            self.send_cmd(cmd::COL_ADDR_HIGH_X)?;
            self.transport.data_start()?;
            self.transport.write_buf(&zeros)?;
            self.transport.op_end()?;
        }
        Ok(())
    }

    /// Upload `area` of a full-size framebuffer to controller RAM.
    ///
    /// `frame` is laid out page by page, `HRES` bytes per page. Each page
    /// of the area goes out as one data burst after the page and column
    /// address commands.
    pub fn render(&mut self, frame: &[u8], area: &RenderArea) -> Result<(), Error> {
        let start_col = area.start_col as usize;
        let end_col = (area.end_col as usize).min(HRES - 1);
        let end_page = area.end_page.min(NUM_PAGES as u8 - 1);
        if start_col > end_col {
            return Ok(());
        }

        for page in area.start_page..=end_page {
            let base = page as usize * HRES;
            let Some(bytes) = frame.get(base + start_col..=base + end_col) else {
                break;
            };
            self.send_cmd(cmd::PAGE_ADDR_X | page)?;
            self.send_cmds(&[
                cmd::COL_ADDR_LOW_X | (start_col as u8 & 0x0F),
                cmd::COL_ADDR_HIGH_X | (start_col as u8 >> 4),
            ])?;
            self.transport.data_start()?;
            self.transport.write_buf(bytes)?;
            self.transport.op_end()?;
        }
        Ok(())
    }
}
