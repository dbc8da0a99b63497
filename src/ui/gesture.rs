//! Click / hold recognition from raw button samples.
//!
//! Feed [`GestureDetector::update`] with the pin level on every tick.
//! A level must stay unchanged for the debounce time before it counts.
//! A debounced press released before the hold threshold is a click;
//! a press that reaches the threshold is a hold, reported once, and its
//! release produces nothing.

use super::GestureSource;
use crate::config::{BUTTON_DEBOUNCE_MS, BUTTON_HOLD_MS};

pub struct GestureDetector {
    hold_ms: u64,
    debounce_ms: u64,
    /// Last raw sample and when it last changed.
    raw: bool,
    raw_since: u64,
    /// Debounced level.
    pressed: bool,
    pressed_at: u64,
    /// Current press already produced a gesture or was reset.
    spent: bool,
    click: bool,
    hold: bool,
}

impl GestureDetector {
    pub const fn new() -> Self {
        Self::with_timing(BUTTON_HOLD_MS, BUTTON_DEBOUNCE_MS)
    }

    pub const fn with_timing(hold_ms: u64, debounce_ms: u64) -> Self {
        Self {
            hold_ms,
            debounce_ms,
            raw: false,
            raw_since: 0,
            pressed: false,
            pressed_at: 0,
            spent: false,
            click: false,
            hold: false,
        }
    }

    /// Process one sample; `pressed` is the raw (bouncy) button state.
    pub fn update(&mut self, pressed: bool, now_ms: u64) {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since = now_ms;
        }

        if self.raw != self.pressed && now_ms.saturating_sub(self.raw_since) >= self.debounce_ms {
            self.pressed = self.raw;
            if self.pressed {
                self.pressed_at = now_ms;
            } else {
                if !self.spent {
                    debug!("Button: click");
                    self.click = true;
                }
                self.spent = false;
            }
        }

        if self.pressed && !self.spent && now_ms.saturating_sub(self.pressed_at) >= self.hold_ms {
            debug!("Button: hold");
            self.hold = true;
            self.spent = true;
        }
    }

    /// Debounced button level.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn hold_threshold(&self) -> u64 {
        self.hold_ms
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSource for GestureDetector {
    fn poll_click(&mut self) -> bool {
        core::mem::take(&mut self.click)
    }

    fn poll_hold(&mut self) -> bool {
        core::mem::take(&mut self.hold)
    }

    fn reset(&mut self) {
        self.click = false;
        self.hold = false;
        if self.pressed {
            self.spent = true;
        }
    }

    fn set_hold_threshold(&mut self, hold_ms: u64) {
        self.hold_ms = hold_ms;
    }
}
