//! Switch debounce and long-press timing, independent of the GPIO driver.
//!
//! The switch task samples the pin every `SWITCH_POLL_MS` and feeds the
//! level into a [`SwitchTracker`], forwarding whatever action comes back.

use crate::config::{SWITCH_DEBOUNCE_MS, SWITCH_LONGPRESS_MS, SWITCH_REPEAT_MS};
use crate::input::{SwitchAction, SwitchId};

/// Press/release state of one active-low switch.
#[derive(Debug)]
pub struct SwitchTracker {
    id: SwitchId,
    /// Timestamp of the first sample that saw the switch down.
    down_since: Option<u32>,
    reported: bool,
    /// Hold time (ms since `down_since`) of the next long-press event.
    long_at: u32,
    repeating: bool,
}

impl SwitchTracker {
    pub const fn new(id: SwitchId) -> Self {
        Self {
            id,
            down_since: None,
            reported: false,
            long_at: SWITCH_LONGPRESS_MS,
            repeating: false,
        }
    }

    pub fn id(&self) -> SwitchId {
        self.id
    }

    /// Whether a press has been reported and not yet released.
    pub fn is_down(&self) -> bool {
        self.reported
    }

    /// Feed one sample; `down` is the debounced-to-be logical level.
    pub fn sample(&mut self, now_ms: u32, down: bool) -> Option<SwitchAction> {
        if !down {
            let was_reported = self.reported;
            self.reset();
            return was_reported.then(|| SwitchAction::release(self.id));
        }

        let Some(since) = self.down_since else {
            self.down_since = Some(now_ms);
            return None;
        };
        let held = now_ms.wrapping_sub(since);

        if !self.reported {
            if held >= SWITCH_DEBOUNCE_MS {
                self.reported = true;
                return Some(SwitchAction::press(self.id));
            }
            return None;
        }

        if held >= self.long_at {
            let action = SwitchAction::long(self.id, self.repeating);
            self.repeating = true;
            self.long_at = held + SWITCH_REPEAT_MS;
            return Some(action);
        }
        None
    }

    fn reset(&mut self) {
        self.down_since = None;
        self.reported = false;
        self.long_at = SWITCH_LONGPRESS_MS;
        self.repeating = false;
    }
}
