//! Views shown on the seven-segment display.
//!
//! Transient views (identity, confirmation, radio pulse) are not held
//! with a blocking delay: the presenter remembers a clear deadline and
//! [`Presenter::tick`] blanks the display once it passes. Any later
//! render replaces the deadline.
//!
//! Holds come in two kinds. A print hold (identity, confirmation) is
//! what the operator asked to see and is not cut short by a pulse; a
//! pulse (radio acknowledgement) is only shown when no print is up.
//!
//! The menu renders on every tick; frames equal to the one already on
//! screen are not sent to the driver again.

use super::segments::{encode_digit, encode_number, Segments, BLANK, DONE, SEG_DP};
use super::SegmentDisplay;
use crate::config::{PRINT_HOLD_MS, SEPARATOR_DOT_MASK};
use crate::identity::Identity;

/// Acknowledgement pattern shown when a radio payload arrives.
pub const RADIO_ACK: Segments = [encode_digit(1), encode_digit(2), encode_digit(3), encode_digit(4)];

/// Which half of the display an identity field occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Digits 0-1.
    Zone,
    /// Digits 2-3.
    Launcher,
}

/// Identity as `ZZ.LL`, zone zeros blanked.
pub fn identity_frame(identity: Identity) -> Segments {
    encode_number(identity.display_value(), SEPARATOR_DOT_MASK, false)
}

/// Two digits of `value` in `field`'s slot, the other slot blank.
///
/// `separator` lights the decimal point after the zone digits (digit 1)
/// whichever slot is active.
pub fn edit_frame(field: Field, value: u8, separator: bool) -> Segments {
    let tens = encode_digit(value / 10);
    let units = encode_digit(value % 10);
    let mut frame = match field {
        Field::Zone => [tens, units, 0, 0],
        Field::Launcher => [0, 0, tens, units],
    };
    if separator {
        frame[1] |= SEG_DP;
    }
    frame
}

/// What kind of transient view is waiting to be cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hold {
    /// Identity or confirmation, held for [`PRINT_HOLD_MS`].
    Print,
    /// Short acknowledgement pattern.
    Pulse,
}

/// Display plus the pending clear deadline.
pub struct Presenter<D> {
    display: D,
    clear_at: Option<u64>,
    hold: Option<Hold>,
    /// Last frame written to the driver.
    shown: Option<Segments>,
}

impl<D: SegmentDisplay> Presenter<D> {
    pub fn new(display: D) -> Self {
        Self {
            display,
            clear_at: None,
            hold: None,
            shown: None,
        }
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.display.set_brightness(level);
    }

    /// Show the identity for [`PRINT_HOLD_MS`].
    pub fn show_identity(&mut self, identity: Identity, now_ms: u64) {
        debug!("Display: identity {}", identity);
        self.hold(&identity_frame(identity), now_ms, PRINT_HOLD_MS, Hold::Print);
    }

    /// Show "donE" for [`PRINT_HOLD_MS`].
    pub fn show_confirmation(&mut self, now_ms: u64) {
        debug!("Display: confirmation");
        self.hold(&DONE, now_ms, PRINT_HOLD_MS, Hold::Print);
    }

    /// Flash `segments` for `hold_ms` unless a print hold is on screen.
    /// Returns `true` when the pulse was shown.
    pub fn pulse(&mut self, segments: &Segments, now_ms: u64, hold_ms: u64) -> bool {
        if self.hold == Some(Hold::Print) {
            return false;
        }
        self.hold(segments, now_ms, hold_ms, Hold::Pulse);
        true
    }

    fn hold(&mut self, segments: &Segments, now_ms: u64, hold_ms: u64, kind: Hold) {
        self.write(segments);
        self.clear_at = Some(now_ms.saturating_add(hold_ms));
        self.hold = Some(kind);
    }

    /// Show `segments` with no deadline; cancels a pending clear.
    pub fn render(&mut self, segments: &Segments) {
        self.clear_at = None;
        self.hold = None;
        if self.shown != Some(*segments) {
            self.write(segments);
        }
    }

    pub fn clear(&mut self) {
        self.clear_at = None;
        self.hold = None;
        self.display.clear();
        self.shown = Some(BLANK);
    }

    fn write(&mut self, segments: &Segments) {
        self.display.set_segments(segments);
        self.shown = Some(*segments);
    }

    /// Blank the display if the hold deadline has passed. Returns `true`
    /// when it cleared.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.clear_at {
            Some(deadline) if now_ms >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Kind of transient view on screen, if any.
    pub fn current_hold(&self) -> Option<Hold> {
        self.hold
    }

    pub fn clear_deadline(&self) -> Option<u64> {
        self.clear_at
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
