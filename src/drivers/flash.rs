//! Identity record persisted in the nRF52840's internal flash.
//!
//! Uses the `sequential-storage` map: the two-byte record is one item
//! under a fixed key, so both fields are always written together.
//!
//! The receiver loop is synchronous, so it works on an in-memory copy
//! ([`FlashStore`] implements `ByteStore`) and the async flush happens
//! between ticks once the copy is dirty.

use defmt::{error, info};
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use zone_receiver::config::{RECORD_LEN, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use zone_receiver::storage::{ByteStore, RamStore};
use zone_receiver::Error;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Map key of the identity record.
const KEY_IDENTITY: u8 = 0x01;

/// Scratch buffer for one map item (header + key + record).
const ITEM_BUF_SIZE: usize = 64;

/// RAM copy of the identity record, synced with flash.
pub struct FlashStore {
    record: RamStore,
    /// True if the copy differs from flash.
    dirty: bool,
}

impl FlashStore {
    pub const fn new() -> Self {
        Self {
            record: RamStore::new(),
            dirty: false,
        }
    }

    /// Fill the RAM copy from flash. A missing or unreadable item leaves
    /// the blank record of a fresh unit; only a flash error is returned.
    pub async fn load_from_flash(&mut self, flash: &mut impl NorFlash) -> Result<(), Error> {
        let mut result = Ok(());
        let mut buf = [0u8; ITEM_BUF_SIZE];

        match sequential_storage::map::fetch_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &KEY_IDENTITY,
        )
        .await
        {
            Ok(Some(data)) if data.len() == RECORD_LEN => {
                let mut bytes = [0u8; RECORD_LEN];
                bytes.copy_from_slice(data);
                self.record = RamStore::from_bytes(bytes);
                info!("Flash: loaded record {=[u8]}", &bytes[..]);
            }
            Ok(Some(data)) => {
                error!("Flash: record has {} bytes, expected {}", data.len(), RECORD_LEN);
                self.record = RamStore::new();
            }
            Ok(None) => {
                info!("Flash: no identity stored");
                self.record = RamStore::new();
            }
            Err(e) => {
                error!("Flash read error: {:?}", defmt::Debug2Format(&e));
                self.record = RamStore::new();
                result = Err(Error::Storage);
            }
        }
        self.dirty = false;
        result
    }

    /// Write the record back if it changed since the last sync. On error
    /// the record stays dirty and the next call retries.
    pub async fn save_to_flash(&mut self, flash: &mut impl NorFlash) -> Result<(), Error> {
        if !self.dirty {
            return Ok(());
        }

        let mut buf = [0u8; ITEM_BUF_SIZE];
        let item: &[u8] = self.record.as_bytes();

        match sequential_storage::map::store_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &KEY_IDENTITY,
            &item,
        )
        .await
        {
            Ok(()) => {
                info!("Flash: saved record {=[u8]}", item);
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                error!("Flash write error: {:?}", defmt::Debug2Format(&e));
                Err(Error::Storage)
            }
        }
    }
}

impl ByteStore for FlashStore {
    fn read_byte(&mut self, offset: usize) -> u8 {
        self.record.read_byte(offset)
    }

    fn write_byte(&mut self, offset: usize, value: u8) {
        if self.record.read_byte(offset) != value {
            self.record.write_byte(offset, value);
            self.dirty = true;
        }
    }
}
