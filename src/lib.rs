//! Menu UI core for a rotary-encoder device with an SH1106 OLED.
//!
//! Everything here is hardware independent and tested on the host; the
//! embedded binary (`src/main.rs`, feature `embedded`) wires it to the
//! nRF52840 SPI, QDEC and GPIO peripherals.
//!
//! Usage: `cargo test` for the host tests, `cargo run --release
//! --features embedded --target thumbv7em-none-eabihf` to flash.
//!
//! ## Layers
//!
//! - [`display`]: SH1106 panel driver and the 9x10 text renderer
//! - [`menu`]: static/dynamic menu model and the [`MenuManager`]
//! - [`input`]: rotary and switch messages, switch timing

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod menu;

#[cfg(test)]
mod testutil;

pub use display::font::Font;
pub use display::screen::Screen;
pub use display::sh1106::Sh1106;
pub use display::transport::{SpiTransport, Transport};
pub use display::{DisplayInfo, TextDisplay};
pub use error::Error;
pub use input::{Message, SwitchAction, SwitchId};
pub use menu::{Menu, MenuContext, MenuItem, MenuManager};
