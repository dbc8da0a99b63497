//! nRF24L01+ transceiver in receive-only mode.
//!
//! Talks to the chip over a blocking `embedded-hal` SPI bus with a
//! manually driven CSN line. Only pipe 0 is used, with static 32-byte
//! payloads and auto-acknowledge enabled so transmitters get their ACK.
//!
//! Until [`Nrf24::init`] succeeds the driver reports no traffic and does
//! not touch the bus: with no module fitted, MISO reads back as zeros,
//! which would otherwise look like a permanently non-empty RX FIFO.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::Radio;
use crate::config::{RADIO_ADDRESS_WIDTH, RADIO_CHANNEL, RADIO_PAYLOAD_SIZE};
use crate::error::{Error, RadioError};
use crate::identity::ReceiverAddress;

// SPI commands
const R_REGISTER: u8 = 0x00;
const W_REGISTER: u8 = 0x20;
const R_RX_PAYLOAD: u8 = 0x61;
const FLUSH_TX: u8 = 0xE1;
const FLUSH_RX: u8 = 0xE2;

// Registers
const CONFIG: u8 = 0x00;
const EN_AA: u8 = 0x01;
const EN_RXADDR: u8 = 0x02;
const SETUP_AW: u8 = 0x03;
const SETUP_RETR: u8 = 0x04;
const RF_CH: u8 = 0x05;
const RF_SETUP: u8 = 0x06;
const STATUS: u8 = 0x07;
const RX_ADDR_P0: u8 = 0x0A;
const RX_PW_P0: u8 = 0x11;
const FIFO_STATUS: u8 = 0x17;

// CONFIG bits
const EN_CRC: u8 = 1 << 3;
const CRCO: u8 = 1 << 2;
const PWR_UP: u8 = 1 << 1;
const PRIM_RX: u8 = 1 << 0;

// STATUS bits
const RX_DR: u8 = 1 << 6;
const STATUS_CLEAR: u8 = 0x70;

/// FIFO_STATUS: RX FIFO empty.
const RX_EMPTY: u8 = 1 << 0;

/// 250 kbps, PA high, LNA gain on.
const RF_SETUP_VALUE: u8 = 0x25;

/// 5-byte addresses.
const SETUP_AW_5_BYTES: u8 = 0x03;

/// 1500 µs retransmit delay, 15 retries.
const SETUP_RETR_VALUE: u8 = 0x5F;

/// Power-down to standby settling time.
const POWER_UP_DELAY_US: u32 = 1_500;

/// Standby to RX settling time.
const RX_SETTLE_US: u32 = 130;

pub struct Nrf24<SPI, CE, CSN, D> {
    spi: SPI,
    ce: CE,
    csn: CSN,
    delay: D,
    /// Set once the chip answered the start-up probe.
    ready: bool,
}

impl<SPI, CE, CSN, D> Nrf24<SPI, CE, CSN, D>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, ce: CE, csn: CSN, delay: D) -> Self {
        Self {
            spi,
            ce,
            csn,
            delay,
            ready: false,
        }
    }

    /// Configure the chip for 250 kbps reception on the fixed channel.
    ///
    /// Fails with [`RadioError::NotResponding`] when the RF setup register
    /// does not read back, which is what an absent module looks like. The
    /// driver then stays inert.
    pub fn init(&mut self) -> Result<(), Error> {
        self.ready = false;
        self.configure()?;
        self.ready = true;
        info!("nRF24: ready on channel {}", RADIO_CHANNEL);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn configure(&mut self) -> Result<(), RadioError> {
        self.ce.set_low().map_err(|_| RadioError::Pin)?;
        self.csn.set_high().map_err(|_| RadioError::Pin)?;
        self.delay.delay_ms(5);

        self.write_register(CONFIG, EN_CRC | CRCO)?;
        self.write_register(SETUP_RETR, SETUP_RETR_VALUE)?;
        self.write_register(RF_SETUP, RF_SETUP_VALUE)?;
        if self.read_register(RF_SETUP)? != RF_SETUP_VALUE {
            return Err(RadioError::NotResponding);
        }

        self.write_register(SETUP_AW, SETUP_AW_5_BYTES)?;
        self.write_register(RF_CH, RADIO_CHANNEL)?;
        self.write_register(EN_AA, 0x3F)?;
        self.write_register(RX_PW_P0, RADIO_PAYLOAD_SIZE as u8)?;
        self.write_register(STATUS, STATUS_CLEAR)?;
        self.command(FLUSH_RX, &mut [])?;
        self.command(FLUSH_TX, &mut [])?;

        self.write_register(CONFIG, EN_CRC | CRCO | PWR_UP)?;
        self.delay.delay_us(POWER_UP_DELAY_US);
        Ok(())
    }

    fn open_reading_pipe(&mut self, address: &[u8]) -> Result<(), RadioError> {
        self.ce.set_low().map_err(|_| RadioError::Pin)?;
        self.write_register_bytes(RX_ADDR_P0, &address[..RADIO_ADDRESS_WIDTH])?;
        self.write_register(RX_PW_P0, RADIO_PAYLOAD_SIZE as u8)?;
        let enabled = self.read_register(EN_RXADDR)?;
        self.write_register(EN_RXADDR, enabled | 0x01)
    }

    fn enter_rx(&mut self) -> Result<(), RadioError> {
        self.write_register(CONFIG, EN_CRC | CRCO | PWR_UP | PRIM_RX)?;
        self.write_register(STATUS, STATUS_CLEAR)?;
        self.command(FLUSH_RX, &mut [])?;
        self.ce.set_high().map_err(|_| RadioError::Pin)?;
        self.delay.delay_us(RX_SETTLE_US);
        Ok(())
    }

    fn rx_pending(&mut self) -> Result<bool, RadioError> {
        Ok(self.read_register(FIFO_STATUS)? & RX_EMPTY == 0)
    }

    fn read_payload(&mut self, buf: &mut [u8]) -> Result<(), RadioError> {
        let len = buf.len().min(RADIO_PAYLOAD_SIZE);
        self.command(R_RX_PAYLOAD, &mut buf[..len])?;
        self.write_register(STATUS, RX_DR)
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, RadioError> {
        let mut value = [0u8];
        self.command(R_REGISTER | reg, &mut value)?;
        Ok(value[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), RadioError> {
        self.write_register_bytes(reg, &[value])
    }

    fn write_register_bytes(&mut self, reg: u8, data: &[u8]) -> Result<(), RadioError> {
        let mut buf = [0u8; RADIO_ADDRESS_WIDTH];
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        self.command(W_REGISTER | reg, &mut buf[..len])?;
        Ok(())
    }

    /// Clock out `cmd` followed by `data`, replacing `data` with what the
    /// chip shifted back. Returns the STATUS byte.
    fn command(&mut self, cmd: u8, data: &mut [u8]) -> Result<u8, RadioError> {
        self.csn.set_low().map_err(|_| RadioError::Pin)?;
        let result = self.transfer(cmd, data);
        self.csn.set_high().map_err(|_| RadioError::Pin)?;
        result
    }

    fn transfer(&mut self, cmd: u8, data: &mut [u8]) -> Result<u8, RadioError> {
        let mut status = [cmd];
        self.spi
            .transfer_in_place(&mut status)
            .map_err(|_| RadioError::Spi)?;
        if !data.is_empty() {
            self.spi
                .transfer_in_place(data)
                .map_err(|_| RadioError::Spi)?;
        }
        self.spi.flush().map_err(|_| RadioError::Spi)?;
        Ok(status[0])
    }
}

impl<SPI, CE, CSN, D> Radio for Nrf24<SPI, CE, CSN, D>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin,
    D: DelayNs,
{
    fn set_listen_address(&mut self, address: &ReceiverAddress) {
        if !self.ready {
            return;
        }
        if let Err(e) = self.open_reading_pipe(address.pipe_address()) {
            warn!("nRF24: failed to open pipe: {}", Error::from(e));
        }
    }

    fn start_listening(&mut self) {
        if !self.ready {
            return;
        }
        if let Err(e) = self.enter_rx() {
            warn!("nRF24: failed to enter RX: {}", Error::from(e));
        }
    }

    fn available(&mut self) -> bool {
        if !self.ready {
            return false;
        }
        match self.rx_pending() {
            Ok(pending) => pending,
            Err(e) => {
                debug!("nRF24: FIFO poll failed: {}", e);
                false
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) {
        if !self.ready {
            return;
        }
        if let Err(e) = self.read_payload(buf) {
            warn!("nRF24: payload read failed: {}", Error::from(e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Register-level model of the chip on the other end of the bus.
    /// With `fitted == false` every byte shifted in is zero, like a
    /// floating MISO line with no module attached.
    struct FakeChip {
        fitted: bool,
        regs: [u8; 0x20],
        pending: Option<u8>,
        payload: u8,
        transfers: usize,
    }

    impl FakeChip {
        fn fitted() -> Self {
            let mut regs = [0u8; 0x20];
            regs[FIFO_STATUS as usize] = 0x11;
            Self {
                fitted: true,
                regs,
                pending: None,
                payload: 0,
                transfers: 0,
            }
        }

        fn absent() -> Self {
            Self {
                fitted: false,
                ..Self::fitted()
            }
        }
    }

    impl embedded_hal::spi::ErrorType for FakeChip {
        type Error = Infallible;
    }

    impl SpiBus for FakeChip {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
            read.fill(0);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            self.transfers += 1;
            if !self.fitted {
                words.fill(0);
                return Ok(());
            }
            match self.pending.take() {
                None => {
                    self.pending = Some(words[0]);
                    words[0] = self.regs[STATUS as usize];
                }
                Some(R_RX_PAYLOAD) => words.fill(self.payload),
                Some(cmd) if cmd & 0xE0 == W_REGISTER => {
                    self.regs[(cmd & 0x1F) as usize] = words[0];
                }
                Some(cmd) if cmd & 0xE0 == R_REGISTER => {
                    words[0] = self.regs[(cmd & 0x1F) as usize];
                }
                Some(_) => {}
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.pending = None;
            Ok(())
        }
    }

    struct FakePin;

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn radio(chip: FakeChip) -> Nrf24<FakeChip, FakePin, FakePin, NoDelay> {
        Nrf24::new(chip, FakePin, FakePin, NoDelay)
    }

    #[test]
    fn init_configures_fitted_chip() {
        let mut radio = radio(FakeChip::fitted());
        assert_eq!(radio.init(), Ok(()));
        assert!(radio.is_ready());
        assert_eq!(radio.spi.regs[RF_SETUP as usize], RF_SETUP_VALUE);
        assert_eq!(radio.spi.regs[RF_CH as usize], RADIO_CHANNEL);
        assert_eq!(radio.spi.regs[RX_PW_P0 as usize], RADIO_PAYLOAD_SIZE as u8);
    }

    #[test]
    fn init_without_module_reports_not_responding() {
        let mut radio = radio(FakeChip::absent());
        assert_eq!(radio.init(), Err(Error::Radio(RadioError::NotResponding)));
        assert!(!radio.is_ready());
    }

    #[test]
    fn absent_module_never_reports_payloads() {
        let mut radio = radio(FakeChip::absent());
        let _ = radio.init();
        let after_init = radio.spi.transfers;

        assert!(!radio.available());
        radio.start_listening();
        let mut buf = [0xEE; RADIO_PAYLOAD_SIZE];
        radio.read(&mut buf);

        assert_eq!(buf, [0xEE; RADIO_PAYLOAD_SIZE]);
        assert_eq!(radio.spi.transfers, after_init);
    }

    #[test]
    fn available_follows_rx_fifo() {
        let mut radio = radio(FakeChip::fitted());
        radio.init().expect("init");
        assert!(!radio.available());

        radio.spi.regs[FIFO_STATUS as usize] = 0x10;
        assert!(radio.available());
    }

    #[test]
    fn read_fetches_payload_and_acks_rx_flag() {
        let mut radio = radio(FakeChip::fitted());
        radio.init().expect("init");
        radio.spi.payload = 0xAB;

        let mut buf = [0u8; RADIO_PAYLOAD_SIZE];
        radio.read(&mut buf);
        assert_eq!(buf, [0xAB; RADIO_PAYLOAD_SIZE]);
        assert_eq!(radio.spi.regs[STATUS as usize], RX_DR);
    }

    #[test]
    fn listen_enables_pipe_zero_in_rx_mode() {
        let mut radio = radio(FakeChip::fitted());
        radio.init().expect("init");
        crate::radio::listen_on(&mut radio, &ReceiverAddress([1, 2, 0, 3, 4, 0]));

        assert_eq!(radio.spi.regs[EN_RXADDR as usize] & 0x01, 0x01);
        assert_eq!(
            radio.spi.regs[CONFIG as usize],
            EN_CRC | CRCO | PWR_UP | PRIM_RX
        );
    }
}
