//! Seven-segment encoding for a 4-digit TM1637 module.
//!
//! Bit layout of one digit:
//! ```text
//!      --A--
//!     |     |
//!     F     B
//!     |     |
//!      --G--
//!     |     |
//!     E     C
//!     |     |
//!      --D--  .DP
//! ```

use crate::config::DIGIT_COUNT;

pub const SEG_A: u8 = 0b0000_0001;
pub const SEG_B: u8 = 0b0000_0010;
pub const SEG_C: u8 = 0b0000_0100;
pub const SEG_D: u8 = 0b0000_1000;
pub const SEG_E: u8 = 0b0001_0000;
pub const SEG_F: u8 = 0b0010_0000;
pub const SEG_G: u8 = 0b0100_0000;
pub const SEG_DP: u8 = 0b1000_0000;

/// One frame for the whole display, digit 0 leftmost.
pub type Segments = [u8; DIGIT_COUNT];

/// All segments off.
pub const BLANK: Segments = [0; DIGIT_COUNT];

/// Hex digit table 0..=F.
const DIGITS: [u8; 16] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,         // 0
    SEG_B | SEG_C,                                         // 1
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,                 // 2
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,                 // 3
    SEG_B | SEG_C | SEG_F | SEG_G,                         // 4
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,                 // 5
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,         // 6
    SEG_A | SEG_B | SEG_C,                                 // 7
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G, // 8
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,         // 9
    SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,         // A
    SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,                 // b
    SEG_A | SEG_D | SEG_E | SEG_F,                         // C
    SEG_B | SEG_C | SEG_D | SEG_E | SEG_G,                 // d
    SEG_A | SEG_D | SEG_E | SEG_F | SEG_G,                 // E
    SEG_A | SEG_E | SEG_F | SEG_G,                         // F
];

/// "donE"
pub const DONE: Segments = [
    SEG_B | SEG_C | SEG_D | SEG_E | SEG_G,         // d
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F, // O
    SEG_C | SEG_E | SEG_G,                         // n
    SEG_A | SEG_D | SEG_E | SEG_F | SEG_G,         // E
];

/// Encode one digit. Values above 9 use the hex glyphs, so a tens digit
/// of 10 shows as `A`.
pub const fn encode_digit(digit: u8) -> u8 {
    DIGITS[(digit & 0x0F) as usize]
}

/// Render `value` right-aligned across the display.
///
/// `dots` carries one decimal point per digit, MSB first (`0b1000_0000`
/// lights the point of digit 0). Without `leading_zero`, zeros ahead of
/// the first significant digit stay blank; a value of 0 still shows a
/// single `0` in the last digit. Values wider than the display keep
/// their low digits.
pub fn encode_number(value: u16, dots: u8, leading_zero: bool) -> Segments {
    let mut digits = BLANK;
    let mut rest = value;

    if rest == 0 && !leading_zero {
        digits[DIGIT_COUNT - 1] = encode_digit(0);
    } else {
        for slot in digits.iter_mut().rev() {
            let digit = (rest % 10) as u8;
            *slot = if digit == 0 && rest == 0 && !leading_zero {
                0
            } else {
                encode_digit(digit)
            };
            rest /= 10;
        }
    }

    apply_dots(&mut digits, dots);
    digits
}

/// OR the decimal points selected by `dots` into a frame.
pub fn apply_dots(digits: &mut Segments, dots: u8) {
    let mut mask = dots;
    for digit in digits.iter_mut() {
        *digit |= mask & SEG_DP;
        mask <<= 1;
    }
}
