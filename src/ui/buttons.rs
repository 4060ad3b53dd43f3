//! GPIO switch input.
//!
//! Two physical switches (active-low with internal pull-up):
//!   - ROTARY   - push button on the encoder shaft, selects
//!   - ATTN/CMD - back on release, main menu on long-press
//!
//! Each switch is polled by its own task; a `SwitchTracker` turns the
//! samples into press, long-press and release actions for the UI channel.

use crate::ui::UI_CHANNEL;
use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::{Duration, Instant, Timer};
use oledmenu::config::SWITCH_POLL_MS;
use oledmenu::input::{SwitchId, SwitchTracker};
use oledmenu::Message;

/// Run a single switch polling loop.
///
/// Waits for the pin to go low, then samples it until it reads high.
#[embassy_executor::task(pool_size = 2)]
pub async fn switch_task(pin: AnyPin, id: SwitchId) -> ! {
    let mut sw = Input::new(pin, Pull::Up);
    let mut tracker = SwitchTracker::new(id);

    loop {
        // Wait for falling edge (press, active-low).
        sw.wait_for_low().await;

        loop {
            let now = Instant::now().as_millis() as u32;
            let down = sw.is_low();
            if let Some(action) = tracker.sample(now, down) {
                info!("switch: {}", action);
                UI_CHANNEL.send(Message::SwitchAction(action)).await;
            }
            // Sampling a released switch always resets the tracker.
            if !down {
                break;
            }
            Timer::after(Duration::from_millis(SWITCH_POLL_MS)).await;
        }
    }
}
