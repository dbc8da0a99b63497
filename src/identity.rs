//! Receiver identity and the radio address derived from it.
//!
//! Address layout (6 bytes):
//! ```text
//! Byte 0: zone tens digit      (zone / 10)
//! Byte 1: zone units digit     (zone % 10)
//! Byte 2: separator            0x00
//! Byte 3: launcher tens digit  (launcher / 10)
//! Byte 4: launcher units digit (launcher % 10)
//! Byte 5: terminator           0x00
//! ```
//!
//! Digits are raw values, not ASCII. A number of 100 yields a tens byte
//! of 10; transmitters derive the same bytes, so it is kept as is.

use crate::config::{MAX_NUMBER, RADIO_ADDRESS_WIDTH};

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 6;

/// Two-part identity this unit answers to. 0 in either field means
/// "not configured yet".
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    pub zone: u8,
    pub launcher: u8,
}

impl Identity {
    /// Identity of a unit that was never configured.
    pub const UNCONFIGURED: Self = Self {
        zone: 0,
        launcher: 0,
    };

    pub const fn new(zone: u8, launcher: u8) -> Self {
        Self { zone, launcher }
    }

    /// Returns `true` when both fields hold a real number.
    pub fn is_configured(&self) -> bool {
        self.zone > 0 && self.launcher > 0
    }

    /// Number shown on the display: zone in the hundreds, launcher in
    /// the two low digits.
    pub fn display_value(&self) -> u16 {
        u16::from(self.zone) * 100 + u16::from(self.launcher)
    }

    /// Starting point for an edit session: unconfigured fields start at 1.
    pub fn seeded(&self) -> Self {
        Self {
            zone: if self.zone > 0 { self.zone } else { 1 },
            launcher: if self.launcher > 0 { self.launcher } else { 1 },
        }
    }

    pub fn address(&self) -> ReceiverAddress {
        derive_address(self.zone, self.launcher)
    }
}

/// Radio listening address of this unit.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverAddress(pub [u8; ADDRESS_LEN]);

impl ReceiverAddress {
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Leading bytes used as the on-air pipe address.
    pub fn pipe_address(&self) -> &[u8] {
        &self.0[..RADIO_ADDRESS_WIDTH]
    }
}

/// Derive the receiver address from the two identity numbers.
///
/// No clamping: callers keep both values within `0..=100`.
pub fn derive_address(zone: u8, launcher: u8) -> ReceiverAddress {
    ReceiverAddress([zone / 10, zone % 10, 0x00, launcher / 10, launcher % 10, 0x00])
}

/// Next value of an identity field: +1, wrapping from 100 back to 1.
pub fn next_number(value: u8) -> u8 {
    if value < MAX_NUMBER {
        value + 1
    } else {
        1
    }
}

/// Returns `true` for values a stored field may hold once configured.
pub fn is_valid_number(value: u8) -> bool {
    (1..=MAX_NUMBER).contains(&value)
}
