//! Input events delivered to the menu manager.
//!
//! Rotary steps and switch actions arrive as [`Message`]s on the event
//! bus, in delivery order. Consumers mark a switch action as handled by
//! setting its `abort` flag.

pub mod switch_logic;

pub use switch_logic::SwitchTracker;

/// The two switches on the front panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchId {
    /// Attention / command button; acts as "back" in menus.
    AttnCmd,
    /// Push button on the rotary encoder shaft; selects.
    Rotary,
}

/// Debounced switch transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchAction {
    pub switch: SwitchId,
    pub pressed: bool,
    pub longpress: bool,
    pub repeat: bool,
    /// Set by a consumer to stop further dispatch.
    pub abort: bool,
}

impl SwitchAction {
    pub const fn press(switch: SwitchId) -> Self {
        Self {
            switch,
            pressed: true,
            longpress: false,
            repeat: false,
            abort: false,
        }
    }

    pub const fn release(switch: SwitchId) -> Self {
        Self {
            switch,
            pressed: false,
            longpress: false,
            repeat: false,
            abort: false,
        }
    }

    /// Held past the long-press delay; `repeat` on every event after the first.
    pub const fn long(switch: SwitchId, repeat: bool) -> Self {
        Self {
            switch,
            pressed: true,
            longpress: true,
            repeat,
            abort: false,
        }
    }
}

/// Event bus message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    /// Encoder moved; positive `delta` is counter-clockwise (up).
    RotaryChange { t_ms: u32, delta: i16 },
    SwitchAction(SwitchAction),
    /// Periodic tick, every `HOUSEKEEPING_PERIOD_MS`.
    Housekeeping,
    /// Any other message id on the bus.
    Other(u8),
}

impl Message {
    pub const fn kind(&self) -> MessageKind {
        match self {
            Message::RotaryChange { .. } => MessageKind::RotaryChange,
            Message::SwitchAction(_) => MessageKind::SwitchAction,
            Message::Housekeeping => MessageKind::Housekeeping,
            Message::Other(_) => MessageKind::Other,
        }
    }
}

/// Message discriminant, used for subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageKind {
    RotaryChange,
    SwitchAction,
    Housekeeping,
    Other,
}
