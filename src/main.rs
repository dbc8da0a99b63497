//! zone-receiver - receiver unit firmware for nRF52840.
//!
//! Shows the unit's zone/launcher identity on a TM1637 display, lets the
//! operator edit it with a single button and listens on an nRF24L01+ at
//! the address derived from it.
//!
//! Hardware:
//!   - nRF52840-DK (or any nRF52840 board)
//!   - TM1637 4-digit display, nRF24L01+ module, one push-button
//!
//! The loop runs on a fixed tick: sample the button, step the receiver,
//! then flush the identity record to flash if it changed.

#![no_std]
#![no_main]

mod drivers;

use defmt::{info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Flex, Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::{bind_interrupts, peripherals, spim};
use embassy_time::{Delay, Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use crate::drivers::{Button, FlashStore, Tm1637};
use zone_receiver::config::POLL_INTERVAL_MS;
use zone_receiver::radio::Nrf24;
use zone_receiver::Receiver;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("zone-receiver starting...");

    let p = embassy_nrf::init(Default::default());

    // Identity record first, so the radio comes up on the stored address.
    let mut flash = BlockingAsync::new(Nvmc::new(p.NVMC));
    let mut store = FlashStore::new();
    if let Err(e) = store.load_from_flash(&mut flash).await {
        warn!("Storage: starting unconfigured: {}", e);
    }

    let button = Button::new(Input::new(p.P1_04, Pull::Up));

    let display = Tm1637::new(
        Output::new(p.P1_05, Level::High, OutputDrive::Standard),
        Flex::new(p.P1_06),
    );

    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M8;
    spi_config.mode = spim::MODE_0;
    let spi = spim::Spim::new(p.SPI3, Irqs, p.P1_15, p.P1_14, p.P1_13, spi_config);

    let mut radio = Nrf24::new(
        spi,
        Output::new(p.P1_11, Level::Low, OutputDrive::Standard),
        Output::new(p.P1_12, Level::High, OutputDrive::Standard),
        Delay,
    );
    if let Err(e) = radio.init() {
        // Keep running: display and menu work without the radio.
        warn!("nRF24: init failed: {}", e);
    }

    let mut receiver = Receiver::start(button, display, store, radio, now_ms());
    info!("Receiver: listening on {}", receiver.address());

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        let now = now_ms();
        receiver.gestures_mut().sample(now);
        receiver.poll(now);
        if let Err(e) = receiver.store_mut().save_to_flash(&mut flash).await {
            warn!("Storage: flush failed, retrying: {}", e);
        }
        ticker.next().await;
    }
}
