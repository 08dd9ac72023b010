//! Mapping-record storage in the last sector of the on-board flash.
//!
//! The record row maps onto the first 128 bytes of the sector, two bytes
//! per word, little-endian. `memory.x` shortens the FLASH region so the
//! firmware image can never grow into this sector.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use remap_core::{RecordStorage, StorageError, ERASED_WORD, ROW_WORDS};

/// Total on-board flash, as fitted on the Pico.
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Byte offset of the record row: the start of the last erase sector.
pub const RECORD_FLASH_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Record row access over the RP2040 flash peripheral.
///
/// Erase and program are blocking; the XIP-safe driver stalls the other
/// core and masks interrupts for the duration on its own.
pub struct FlashStorage {
    flash: Flash<'static, FLASH, Blocking, FLASH_SIZE>,
    unlocked: bool,
}

impl FlashStorage {
    pub fn new(flash: Flash<'static, FLASH, Blocking, FLASH_SIZE>) -> Self {
        Self {
            flash,
            unlocked: false,
        }
    }
}

impl RecordStorage for FlashStorage {
    fn read_word(&mut self, index: usize) -> u16 {
        let mut bytes = [0u8; 2];
        let offset = RECORD_FLASH_OFFSET + (index as u32) * 2;
        match self.flash.blocking_read(offset, &mut bytes) {
            // An unreadable word looks erased, so the record fails
            // validation and defaults take over.
            Err(_) => ERASED_WORD,
            Ok(()) => u16::from_le_bytes(bytes),
        }
    }

    fn unlock(&mut self) {
        self.unlocked = true;
    }

    fn lock(&mut self) {
        self.unlocked = false;
    }

    fn erase_row(&mut self) -> Result<(), StorageError> {
        if !self.unlocked {
            return Err(StorageError::Locked);
        }
        self.flash
            .blocking_erase(RECORD_FLASH_OFFSET, RECORD_FLASH_OFFSET + ERASE_SIZE as u32)
            .map_err(|_| StorageError::Fault)
    }

    fn write_row(&mut self, words: &[u16; ROW_WORDS]) -> Result<(), StorageError> {
        if !self.unlocked {
            return Err(StorageError::Locked);
        }
        let mut bytes = [0u8; ROW_WORDS * 2];
        for (chunk, word) in bytes.chunks_exact_mut(2).zip(words.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        self.flash
            .blocking_write(RECORD_FLASH_OFFSET, &bytes)
            .map_err(|_| StorageError::Fault)
    }
}
