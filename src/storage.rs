//! Persistent identity record.
//!
//! Storage layout (2 bytes):
//! ```text
//! Offset 0: zone number      (0 = never configured)
//! Offset 1: launcher number  (0 = never configured)
//! ```
//!
//! The byte store itself is a collaborator: on the device it is a RAM
//! mirror flushed to flash, in tests a plain [`RamStore`].

use crate::config::{LAUNCHER_OFFSET, RECORD_LEN, ZONE_OFFSET};
use crate::identity::{is_valid_number, Identity};

/// Byte-addressed non-volatile storage.
pub trait ByteStore {
    fn read_byte(&mut self, offset: usize) -> u8;
    fn write_byte(&mut self, offset: usize, value: u8);
}

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    fn read_byte(&mut self, offset: usize) -> u8 {
        (**self).read_byte(offset)
    }

    fn write_byte(&mut self, offset: usize, value: u8) {
        (**self).write_byte(offset, value)
    }
}

/// In-memory identity record. Reads outside the record return 0 and
/// writes outside it are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RamStore {
    bytes: [u8; RECORD_LEN],
}

impl RamStore {
    /// A blank record, as on a fresh unit.
    pub const fn new() -> Self {
        Self {
            bytes: [0; RECORD_LEN],
        }
    }

    pub const fn from_bytes(bytes: [u8; RECORD_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; RECORD_LEN] {
        &self.bytes
    }
}

impl ByteStore for RamStore {
    fn read_byte(&mut self, offset: usize) -> u8 {
        self.bytes.get(offset).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, offset: usize, value: u8) {
        if let Some(slot) = self.bytes.get_mut(offset) {
            *slot = value;
        }
    }
}

/// Reads and writes the identity record through a [`ByteStore`].
pub struct IdentityStore<S> {
    bytes: S,
}

impl<S: ByteStore> IdentityStore<S> {
    pub fn new(bytes: S) -> Self {
        Self { bytes }
    }

    /// Load the stored identity on top of `prior`.
    ///
    /// A stored 0 means "never configured" and leaves the prior value in
    /// place; so does a value above the valid range.
    pub fn load(&mut self, prior: Identity) -> Identity {
        let mut identity = prior;
        if let Some(zone) = self.read_field(ZONE_OFFSET) {
            identity.zone = zone;
        }
        if let Some(launcher) = self.read_field(LAUNCHER_OFFSET) {
            identity.launcher = launcher;
        }
        debug!("Loaded identity {}", identity);
        identity
    }

    /// Write both fields unconditionally.
    pub fn save(&mut self, identity: Identity) {
        self.bytes.write_byte(ZONE_OFFSET, identity.zone);
        self.bytes.write_byte(LAUNCHER_OFFSET, identity.launcher);
        info!("Saved identity {}", identity);
    }

    fn read_field(&mut self, offset: usize) -> Option<u8> {
        match self.bytes.read_byte(offset) {
            0 => None,
            value if is_valid_number(value) => Some(value),
            value => {
                warn!("Ignoring stored value {} at offset {}", value, offset);
                None
            }
        }
    }

    pub fn bytes(&self) -> &S {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut S {
        &mut self.bytes
    }
}
