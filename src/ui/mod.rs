//! Embedded UI wiring - input tasks, message channel and the UI task.
//!
//! Input tasks post [`Message`]s to one channel; the UI task owns the
//! [`MenuManager`] and feeds it every message in delivery order.
//!
//! ## Components
//!
//! - **Rotary**: QDEC peripheral, one `RotaryChange` per report
//! - **Buttons**: rotary push button and ATTN/CMD switch
//! - **Menus**: the demo menu tree

pub mod buttons;
pub mod menus;
pub mod rotary;

use defmt::{debug, info, panic};
use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals;
use embassy_nrf::spim::Spim;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Ticker};
use oledmenu::config::{HOUSEKEEPING_PERIOD_MS, MESSAGE_QUEUE_DEPTH};
use oledmenu::{Error, Message, MenuManager, Screen, SpiTransport};

/// The text display as wired on the board.
pub type Display = Screen<
    SpiTransport<Spim<'static, peripherals::SPI3>, Output<'static>, Output<'static>, Output<'static>, Delay>,
>;

/// Every message bound for the UI task.
pub static UI_CHANNEL: Channel<CriticalSectionRawMutex, Message, MESSAGE_QUEUE_DEPTH> =
    Channel::new();

/// Post the housekeeping tick.
#[embassy_executor::task]
pub async fn housekeeping_task() -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(HOUSEKEEPING_PERIOD_MS));
    loop {
        ticker.next().await;
        // Ticks are only a heartbeat; drop them rather than stall.
        let _ = UI_CHANNEL.try_send(Message::Housekeeping);
    }
}

/// Own the menu manager and dispatch messages to it.
#[embassy_executor::task]
pub async fn ui_task(display: Display) -> ! {
    let mut manager = MenuManager::new(display);
    manager.menu_main_set(&menus::MAIN);
    if let Err(e) = manager.menu_enter(&menus::MAIN) {
        panic!("ui: cannot show main menu: {}", e);
    }
    info!("ui: running");

    loop {
        let mut msg = UI_CHANNEL.receive().await;
        if let Err(e) = dispatch(&mut manager, &mut msg) {
            panic!("ui: {}", e);
        }
    }
}

fn dispatch(manager: &mut MenuManager<Display>, msg: &mut Message) -> Result<(), Error> {
    if !manager.subscriptions().contains(&msg.kind()) {
        return Ok(());
    }
    // A handler that took over the screen hands it back on the next release.
    if !manager.is_active() {
        if let Message::SwitchAction(action) = msg {
            if !action.pressed {
                debug!("ui: back to menu");
                return manager.menu_display_current();
            }
        }
        return Ok(());
    }
    manager.handle_message(msg)
}
