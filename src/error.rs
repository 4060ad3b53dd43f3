//! Unified error type for oledmenu.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the crate.
///
/// None of these are recoverable by the UI itself; the event loop logs
/// them and hands them to the panic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Display
    /// A command or data transfer to the panel controller failed.
    Transport,

    /// Driving the DC, CS or RST line failed.
    Pin,

    /// The panel was initialised more than once.
    AlreadyInitialized,

    // Menus
    /// Entering another menu would exceed the menu stack depth.
    MenuStackFull,

    /// An operation needed a current menu but none has been entered.
    NoMenu,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::Transport => "display transport failure",
            Error::Pin => "display control pin failure",
            Error::AlreadyInitialized => "display initialised twice",
            Error::MenuStackFull => "menu stack full",
            Error::NoMenu => "no current menu",
        };
        f.write_str(msg)
    }
}
