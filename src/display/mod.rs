//! Display subsystem - 4-digit seven-segment module.
//!
//! ## Components
//!
//! - **Segments**: digit/glyph encoding and decimal rendering
//! - **Presenter**: identity / confirmation / edit-frame views with a
//!   scheduled clear instead of blocking holds

pub mod presenter;
pub mod segments;

pub use presenter::{Field, Hold, Presenter};
pub use segments::Segments;

/// Raw seven-segment display driver.
pub trait SegmentDisplay {
    /// Write one full frame, digit 0 leftmost.
    fn set_segments(&mut self, segments: &Segments);

    /// Turn every segment off.
    fn clear(&mut self) {
        self.set_segments(&segments::BLANK);
    }

    /// Brightness 0..=7; takes effect on the next write.
    fn set_brightness(&mut self, level: u8);

    /// Decimal render: `value` right-aligned with per-digit `dots`.
    fn show_number_dec_ex(&mut self, value: u16, dots: u8, leading_zero: bool) {
        self.set_segments(&segments::encode_number(value, dots, leading_zero));
    }
}

impl<T: SegmentDisplay + ?Sized> SegmentDisplay for &mut T {
    fn set_segments(&mut self, segments: &Segments) {
        (**self).set_segments(segments)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn set_brightness(&mut self, level: u8) {
        (**self).set_brightness(level)
    }
}
