//! Radio receiver boundary.
//!
//! The unit only listens: it opens one pipe on its [`ReceiverAddress`]
//! and drains whatever payloads arrive. Payload contents are not
//! interpreted here.

pub mod nrf24;

pub use nrf24::Nrf24;

use crate::config::RADIO_PAYLOAD_SIZE;
use crate::identity::ReceiverAddress;

/// One received payload.
pub type Payload = [u8; RADIO_PAYLOAD_SIZE];

/// Packet radio in receive mode.
pub trait Radio {
    /// Program the listening pipe address.
    fn set_listen_address(&mut self, address: &ReceiverAddress);

    /// Enter receive mode.
    fn start_listening(&mut self);

    /// A payload is waiting to be read.
    fn available(&mut self) -> bool;

    /// Read the oldest payload into `buf`.
    fn read(&mut self, buf: &mut [u8]);
}

impl<T: Radio + ?Sized> Radio for &mut T {
    fn set_listen_address(&mut self, address: &ReceiverAddress) {
        (**self).set_listen_address(address)
    }

    fn start_listening(&mut self) {
        (**self).start_listening()
    }

    fn available(&mut self) -> bool {
        (**self).available()
    }

    fn read(&mut self, buf: &mut [u8]) {
        (**self).read(buf)
    }
}

/// Point the radio at `address` and (re)start listening.
pub fn listen_on(radio: &mut impl Radio, address: &ReceiverAddress) {
    radio.set_listen_address(address);
    radio.start_listening();
    info!("Radio: listening on {=[u8]}", address.pipe_address());
}

/// Read one payload if the radio has one.
pub fn drain(radio: &mut impl Radio) -> Option<Payload> {
    if !radio.available() {
        return None;
    }
    let mut payload = [0u8; RADIO_PAYLOAD_SIZE];
    radio.read(&mut payload);
    debug!("Radio: payload {=[u8]:x}", &payload[..4]);
    Some(payload)
}
