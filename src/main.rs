//! oledmenu - rotary-encoder menu UI on an SH1106 OLED (nRF52840).
//!
//! Boot: bring up the SPI panel, then spawn the input tasks and the UI
//! task. Everything after that is message driven.
//!
//! # Wiring
//!
//! | Signal       | nRF52840 | Notes              |
//! |--------------|----------|--------------------|
//! | Rotary A     | P0.03    | QDEC               |
//! | Rotary B     | P0.04    | QDEC               |
//! | Rotary push  | P0.28    | active-low         |
//! | ATTN/CMD     | P0.11    | active-low         |
//! | SPI SCK      | P0.26    | SPIM3              |
//! | SPI MOSI     | P0.27    | SPIM3              |
//! | Display CS   | P0.29    |                    |
//! | Display DC   | P0.30    | low = command      |
//! | Display RST  | P0.31    |                    |

#![no_std]
#![no_main]

mod ui;

use defmt::{info, panic};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_nrf::{bind_interrupts, peripherals, qdec, spim};
use embassy_time::Delay;
use oledmenu::input::SwitchId;
use oledmenu::{Font, Screen, Sh1106, SpiTransport};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    QDEC => qdec::InterruptHandler<peripherals::QDEC>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("oledmenu {} starting", env!("CARGO_PKG_VERSION"));

    // --- Display (SPIM3, write only) ---
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M8;
    let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_26, p.P0_27, spi_config);
    let cs = Output::new(p.P0_29, Level::High, OutputDrive::Standard);
    let dc = Output::new(p.P0_30, Level::Low, OutputDrive::Standard);
    let rst = Output::new(p.P0_31, Level::High, OutputDrive::Standard);

    let transport = SpiTransport::new(spi, dc, cs, rst, Delay);
    let mut screen = Screen::new(Sh1106::new(transport), Font::default());
    if let Err(e) = screen.init(false, &mut Delay) {
        panic!("display init failed: {}", e);
    }
    info!("display ready");

    // --- Rotary encoder ---
    let mut qdec_config = qdec::Config::default();
    qdec_config.debounce = true;
    let qdec = qdec::Qdec::new(p.QDEC, Irqs, p.P0_03, p.P0_04, qdec_config);

    spawner.must_spawn(ui::ui_task(screen));
    spawner.must_spawn(ui::rotary::rotary_task(qdec));
    spawner.must_spawn(ui::buttons::switch_task(p.P0_28.degrade(), SwitchId::Rotary));
    spawner.must_spawn(ui::buttons::switch_task(p.P0_11.degrade(), SwitchId::AttnCmd));
    spawner.must_spawn(ui::housekeeping_task());
}
