//! Host-side doubles shared by the unit tests.

use crate::config::{BUF_LEN, FONT_WIDTH, GLYPH_COUNT, HRES};
use crate::display::font::Font;
use crate::display::screen::Screen;
use crate::display::sh1106::Sh1106;
use crate::display::transport::Transport;
use crate::error::Error;
use embedded_hal::delay::DelayNs;

/// One completed transport operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Reset,
    Cmd(Vec<u8>),
    Data(Vec<u8>),
}

/// Transport that records every operation.
#[derive(Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    current: Option<Op>,
}

impl Recorder {
    /// All command bytes in order.
    pub fn commands(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Cmd(b) => Some(b.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Every data burst in order.
    pub fn data_bursts(&self) -> Vec<Vec<u8>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Data(b) => Some(b.clone()),
                _ => None,
            })
            .collect()
    }

    /// Controller RAM as the recorded operations would leave it.
    pub fn ram(&self) -> [u8; BUF_LEN] {
        let mut ram = [0u8; BUF_LEN];
        let (mut page, mut col) = (0usize, 0usize);
        for op in &self.ops {
            match op {
                Op::Cmd(bytes) => {
                    for &b in bytes {
                        match b {
                            0x00..=0x0F => col = (col & 0xF0) | b as usize,
                            0x10..=0x1F => col = (col & 0x0F) | ((b as usize & 0x0F) << 4),
                            0xB0..=0xB7 => page = (b & 0x07) as usize,
                            _ => {}
                        }
                    }
                }
                Op::Data(bytes) => {
                    for &b in bytes {
                        if col < HRES {
                            ram[page * HRES + col] = b;
                        }
                        col += 1;
                    }
                }
                Op::Reset => {}
            }
        }
        ram
    }

    fn push_byte(&mut self, byte: u8) {
        match &mut self.current {
            Some(Op::Cmd(b)) | Some(Op::Data(b)) => b.push(byte),
            _ => {}
        }
    }
}

impl Transport for Recorder {
    fn reset(&mut self) -> Result<(), Error> {
        self.ops.push(Op::Reset);
        Ok(())
    }

    fn cmd_start(&mut self) -> Result<(), Error> {
        self.current = Some(Op::Cmd(Vec::new()));
        Ok(())
    }

    fn data_start(&mut self) -> Result<(), Error> {
        self.current = Some(Op::Data(Vec::new()));
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), Error> {
        self.push_byte(byte);
        Ok(())
    }

    fn write_buf(&mut self, buf: &[u8]) -> Result<(), Error> {
        for &b in buf {
            self.push_byte(b);
        }
        Ok(())
    }

    fn op_end(&mut self) -> Result<(), Error> {
        if let Some(op) = self.current.take() {
            self.ops.push(op);
        }
        Ok(())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Deterministic 9-bit glyphs; NUL and space are blank.
pub fn test_font() -> Font {
    let mut table = [0u16; GLYPH_COUNT * FONT_WIDTH];
    for glyph in 1..GLYPH_COUNT {
        if glyph == b' ' as usize {
            continue;
        }
        for i in 0..FONT_WIDTH {
            table[glyph * FONT_WIDTH + i] = ((glyph * 37 + i * 11 + 1) & 0x01FF) as u16;
        }
    }
    Font::from_table(&table)
}

pub fn test_screen() -> Screen<Recorder> {
    Screen::new(Sh1106::new(Recorder::default()), test_font())
}
