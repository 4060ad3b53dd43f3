//! Command/data byte sink to the panel controller.
//!
//! The SH1106 takes commands and RAM data over the same bus, told apart by
//! the DC line (low = command, high = data). An operation is bracketed by
//! `cmd_start`/`data_start` and `op_end`:
//!   1. Assert CS
//!   2. Drive DC for command or data
//!   3. Write bytes
//!   4. Flush and deassert CS

use crate::config::PANEL_RESET_MS;
use crate::error::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Byte sink the panel driver talks through.
pub trait Transport {
    /// Pulse the controller's reset line.
    fn reset(&mut self) -> Result<(), Error>;

    /// Begin a command operation.
    fn cmd_start(&mut self) -> Result<(), Error>;

    /// Begin a RAM data operation.
    fn data_start(&mut self) -> Result<(), Error>;

    /// Write one byte within the current operation.
    fn write(&mut self, byte: u8) -> Result<(), Error>;

    /// Write a burst of bytes within the current operation.
    fn write_buf(&mut self, buf: &[u8]) -> Result<(), Error>;

    /// Finish the current operation.
    fn op_end(&mut self) -> Result<(), Error>;
}

/// 4-wire SPI transport: bus plus CS, DC and RST lines.
pub struct SpiTransport<SPI, DC, CS, RST, D> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    delay: D,
}

impl<SPI, DC, CS, RST, D> SpiTransport<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, delay: D) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            delay,
        }
    }

    /// Give the bus and pins back.
    pub fn release(self) -> (SPI, DC, CS, RST, D) {
        (self.spi, self.dc, self.cs, self.rst, self.delay)
    }

    fn start(&mut self, command: bool) -> Result<(), Error> {
        if command {
            self.dc.set_low().map_err(|_| Error::Pin)?;
        } else {
            self.dc.set_high().map_err(|_| Error::Pin)?;
        }
        self.cs.set_low().map_err(|_| Error::Pin)
    }
}

impl<SPI, DC, CS, RST, D> Transport for SpiTransport<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    fn reset(&mut self) -> Result<(), Error> {
        self.rst.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(PANEL_RESET_MS);
        self.rst.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(PANEL_RESET_MS);
        self.rst.set_high().map_err(|_| Error::Pin)
    }

    fn cmd_start(&mut self) -> Result<(), Error> {
        self.start(true)
    }

    fn data_start(&mut self) -> Result<(), Error> {
        self.start(false)
    }

    fn write(&mut self, byte: u8) -> Result<(), Error> {
        self.spi.write(&[byte]).map_err(|_| Error::Transport)
    }

    fn write_buf(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.spi.write(buf).map_err(|_| Error::Transport)
    }

    fn op_end(&mut self) -> Result<(), Error> {
        self.spi.flush().map_err(|_| Error::Transport)?;
        self.cs.set_high().map_err(|_| Error::Pin)
    }
}
