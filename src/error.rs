//! Unified error type for the hardware drivers.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! The menu and display logic never fail; these errors stop at the
//! driver adapters, which log them and carry on.

/// Top-level error type used by the drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Radio
    /// The nRF24L01+ transceiver returned an error.
    Radio(RadioError),

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // Display
    /// The TM1637 did not acknowledge a byte, or a pin could not be driven.
    Display,
}

/// Subset of radio errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// SPI bus transfer failed.
    Spi,
    /// CE or CSN pin could not be driven.
    Pin,
    /// Register read-back after configuration did not match; the chip is
    /// missing or not powered.
    NotResponding,
}

// Convenience conversions

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Error::Radio(e)
    }
}
