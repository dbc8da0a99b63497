//! TM1637 4-digit LED driver, bit-banged on two GPIOs.
//!
//! The chip speaks an I²C-like two-wire protocol without addressing,
//! least significant bit first. DIO is open-drain with a pull-up so the
//! chip can pull it low for the acknowledge bit.

use defmt::warn;
use embassy_nrf::gpio::{Flex, Output, OutputDrive, Pull};
use embassy_time::{block_for, Duration};
use zone_receiver::config::DIGIT_COUNT;
use zone_receiver::display::{SegmentDisplay, Segments};
use zone_receiver::Error;

/// Data command: write display registers, auto-increment address.
const CMD_DATA_AUTO: u8 = 0x40;

/// Address command for digit 0.
const CMD_ADDRESS: u8 = 0xC0;

/// Display control command, display on; low three bits are brightness.
const CMD_DISPLAY_ON: u8 = 0x88;

/// Half bit period.
const BIT_DELAY_US: u64 = 100;

pub struct Tm1637<'d> {
    clk: Output<'d>,
    dio: Flex<'d>,
    brightness: u8,
}

impl<'d> Tm1637<'d> {
    pub fn new(clk: Output<'d>, mut dio: Flex<'d>) -> Self {
        dio.set_as_input_output(Pull::Up, OutputDrive::Standard0Disconnect1);
        dio.set_high();
        Self {
            clk,
            dio,
            brightness: 0,
        }
    }

    /// Send a full frame followed by the display control command.
    pub fn write_frame(&mut self, segments: &Segments) -> Result<(), Error> {
        self.start();
        let data = self.write_byte(CMD_DATA_AUTO);
        self.stop();
        data?;

        self.start();
        let mut sent = self.write_byte(CMD_ADDRESS);
        for &digit in segments.iter().take(DIGIT_COUNT) {
            sent = sent.and(self.write_byte(digit));
        }
        self.stop();
        sent?;

        self.start();
        let control = self.write_byte(CMD_DISPLAY_ON | (self.brightness & 0x07));
        self.stop();
        control
    }

    fn bit_delay(&self) {
        block_for(Duration::from_micros(BIT_DELAY_US));
    }

    fn start(&mut self) {
        self.dio.set_low();
        self.bit_delay();
    }

    fn stop(&mut self) {
        self.dio.set_low();
        self.bit_delay();
        self.clk.set_high();
        self.bit_delay();
        self.dio.set_high();
        self.bit_delay();
    }

    /// Shift one byte out and sample the acknowledge bit.
    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        let mut data = byte;
        for _ in 0..8 {
            self.clk.set_low();
            self.bit_delay();
            if data & 0x01 != 0 {
                self.dio.set_high();
            } else {
                self.dio.set_low();
            }
            self.bit_delay();
            self.clk.set_high();
            self.bit_delay();
            data >>= 1;
        }

        // Release DIO and let the chip pull it low on the ninth clock.
        self.clk.set_low();
        self.dio.set_high();
        self.bit_delay();
        self.clk.set_high();
        self.bit_delay();
        let acked = self.dio.is_low();
        if acked {
            self.dio.set_low();
        }
        self.bit_delay();
        self.clk.set_low();
        self.bit_delay();

        if acked {
            Ok(())
        } else {
            Err(Error::Display)
        }
    }
}

impl SegmentDisplay for Tm1637<'_> {
    fn set_segments(&mut self, segments: &Segments) {
        if let Err(e) = self.write_frame(segments) {
            warn!("TM1637: no acknowledge: {}", e);
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(7);
    }
}
