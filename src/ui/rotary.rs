//! Rotary encoder via the nRF QDEC peripheral.
//!
//! QDEC accumulates quadrature steps in hardware and reports them once
//! per sample period. Each non-zero report becomes one `RotaryChange`
//! stamped with the uptime in milliseconds.

use crate::ui::UI_CHANNEL;
use defmt::trace;
use embassy_nrf::peripherals;
use embassy_nrf::qdec::Qdec;
use embassy_time::Instant;
use oledmenu::Message;

#[embassy_executor::task]
pub async fn rotary_task(mut qdec: Qdec<'static, peripherals::QDEC>) -> ! {
    loop {
        let delta = qdec.read().await;
        if delta == 0 {
            continue;
        }
        let t_ms = Instant::now().as_millis() as u32;
        trace!("rotary: {} at {}", delta, t_ms);
        UI_CHANNEL.send(Message::RotaryChange { t_ms, delta }).await;
    }
}
