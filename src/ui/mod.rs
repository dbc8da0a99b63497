//! User interface subsystem - one push-button and the settings menu.
//!
//! The button speaks in gestures: a short press is a *click*, a press
//! kept past the hold threshold is a *hold*. The idle loop uses a long
//! threshold to open the menu; inside the menu a shorter one steps
//! through the fields.
//!
//! ## Components
//!
//! - **Gesture**: debounced click/hold recogniser over raw pin samples
//! - **Menu**: two-step zone/launcher editor with blink and timeout

pub mod gesture;
pub mod menu;


/// Polled source of button gestures (after debouncing).
pub trait GestureSource {
    /// Returns `true` once per recognised click.
    fn poll_click(&mut self) -> bool;

    /// Returns `true` once per recognised hold.
    fn poll_hold(&mut self) -> bool;

    /// Drop pending gestures. A press still in progress produces nothing
    /// further until the button is released.
    fn reset(&mut self);

    /// Press duration that counts as a hold (ms).
    fn set_hold_threshold(&mut self, hold_ms: u64);
}

impl<T: GestureSource + ?Sized> GestureSource for &mut T {
    fn poll_click(&mut self) -> bool {
        (**self).poll_click()
    }

    fn poll_hold(&mut self) -> bool {
        (**self).poll_hold()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn set_hold_threshold(&mut self, hold_ms: u64) {
        (**self).set_hold_threshold(hold_ms)
    }
}

/// Gestures observed during one poll tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gestures {
    pub click: bool,
    pub hold: bool,
}

impl Gestures {
    pub const NONE: Self = Self {
        click: false,
        hold: false,
    };
    pub const CLICK: Self = Self {
        click: true,
        hold: false,
    };
    pub const HOLD: Self = Self {
        click: false,
        hold: true,
    };

    /// Poll both signals, click first.
    pub fn poll(source: &mut impl GestureSource) -> Self {
        let click = source.poll_click();
        let hold = source.poll_hold();
        Self { click, hold }
    }

    pub fn is_empty(&self) -> bool {
        !self.click && !self.hold
    }
}
