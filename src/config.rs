//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, storage layout, radio settings and pin
//! assignments live here so they can be tuned in one place.

// Identity

/// Largest zone / launcher number. Incrementing past it wraps to 1.
pub const MAX_NUMBER: u8 = 100;

// Display

/// Number of digits on the seven-segment display.
pub const DIGIT_COUNT: usize = 4;

/// TM1637 brightness level (0..=7), applied once at startup.
pub const DISPLAY_BRIGHTNESS: u8 = 7;

/// How long the identity and the confirmation word stay on screen (ms).
pub const PRINT_HOLD_MS: u64 = 5_000;

/// How long the radio acknowledgement pattern stays on screen (ms).
pub const RADIO_PULSE_MS: u64 = 250;

/// Half period of the menu blink: on-phase and off-phase length (ms).
pub const MENU_BLINK_MS: u64 = 500;

/// Dot mask placing the decimal point between the zone and launcher digits.
pub const SEPARATOR_DOT_MASK: u8 = 0b0100_0000;

// Button / menu

/// Hold duration that opens the settings menu from the idle loop (ms).
pub const BUTTON_HOLD_MS: u64 = 5_000;

/// Hold duration that advances a step inside the settings menu (ms).
pub const BUTTON_MENU_STEP_MS: u64 = 2_000;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Idle time after which an open menu session is discarded (ms).
pub const MENU_TIMEOUT_MS: u64 = 15_000;

/// Main loop tick (ms).
pub const POLL_INTERVAL_MS: u64 = 5;

// Persistent identity record

/// Byte offset of the zone number in the identity record.
pub const ZONE_OFFSET: usize = 0;

/// Byte offset of the launcher number, right after the zone byte.
pub const LAUNCHER_OFFSET: usize = ZONE_OFFSET + core::mem::size_of::<u8>();

/// Size of the identity record in bytes.
pub const RECORD_LEN: usize = LAUNCHER_OFFSET + core::mem::size_of::<u8>();

/// Flash page index where identity storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 254;

/// Number of flash pages reserved for identity storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;

// Radio (nRF24L01+)

/// RF channel (2400 + n MHz).
pub const RADIO_CHANNEL: u8 = 76;

/// Static payload width in bytes.
pub const RADIO_PAYLOAD_SIZE: usize = 32;

/// On-air address width; the pipe uses this many leading address bytes.
pub const RADIO_ADDRESS_WIDTH: usize = 5;

// GPIO pin assignments (nRF52840-DK Arduino header)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// are picked in `main.rs`.  Adjust for a custom PCB.
//
//   Button           → P1.04 (D3), active-low, internal pull-up
//   TM1637 CLK       → P1.05 (D4)
//   TM1637 DIO       → P1.06 (D5), open-drain
//   nRF24 CE         → P1.11 (D9)
//   nRF24 CSN        → P1.12 (D10)
//   nRF24 MOSI       → P1.13 (D11)
//   nRF24 MISO       → P1.14 (D12)
//   nRF24 SCK        → P1.15 (D13)
