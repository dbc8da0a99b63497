//! Push-button on a GPIO, sampled from the main loop.
//!
//! Active-low with the internal pull-up. Debouncing and click/hold
//! recognition are done by [`GestureDetector`].

use embassy_nrf::gpio::Input;
use zone_receiver::ui::gesture::GestureDetector;
use zone_receiver::ui::GestureSource;

pub struct Button<'d> {
    pin: Input<'d>,
    detector: GestureDetector,
}

impl<'d> Button<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self {
            pin,
            detector: GestureDetector::new(),
        }
    }

    /// Feed the current pin level to the detector.
    pub fn sample(&mut self, now_ms: u64) {
        self.detector.update(self.pin.is_low(), now_ms);
    }
}

impl GestureSource for Button<'_> {
    fn poll_click(&mut self) -> bool {
        self.detector.poll_click()
    }

    fn poll_hold(&mut self) -> bool {
        self.detector.poll_hold()
    }

    fn reset(&mut self) {
        self.detector.reset()
    }

    fn set_hold_threshold(&mut self, hold_ms: u64) {
        self.detector.set_hold_threshold(hold_ms)
    }
}
