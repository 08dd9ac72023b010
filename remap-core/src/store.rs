//! Persistent record storage: the row-level device trait and the load/save
//! policy layered on top of it.
//!
//! The record occupies one erase row of 64 words. Each word carries one
//! record byte in its low half; the upper bits are programmed to the
//! [`WORD_PAD`] pattern so a freshly erased row ([`ERASED_WORD`] in every
//! word) is distinguishable from a written one even before validation runs.

use mapping_proto::{ActiveTable, MappingRecord, PhysicalButton, RECORD_LEN, TABLE_LEN};

/// Words per storage row, one per record byte.
pub const ROW_WORDS: usize = RECORD_LEN;

/// Upper-bit pattern OR-ed over every data byte when programming.
pub const WORD_PAD: u16 = 0x3F00;

/// Word value of an erased cell.
pub const ERASED_WORD: u16 = 0x3FFF;

/// Why a storage commit failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Erase or program issued without the unlock sequence.
    Locked,
    /// The device reported an erase or program failure.
    Fault,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Locked => write!(f, "storage locked"),
            Self::Fault => write!(f, "storage fault"),
        }
    }
}

/// Word-level access to the single record row.
///
/// Erase and program block until the device finishes; callers serialize
/// commits and keep interrupts masked around them.
pub trait RecordStorage {
    /// Read the word at `index` within the row.
    fn read_word(&mut self, index: usize) -> u16;

    /// Present the unlock credential. Erase and program are rejected
    /// until this runs.
    fn unlock(&mut self);

    /// Drop write access.
    fn lock(&mut self);

    /// Erase the whole row to [`ERASED_WORD`].
    fn erase_row(&mut self) -> Result<(), StorageError>;

    /// Program all [`ROW_WORDS`] words of a freshly erased row.
    fn write_row(&mut self, words: &[u16; ROW_WORDS]) -> Result<(), StorageError>;
}

/// Where the record served after boot came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordOrigin {
    /// Storage held a valid record.
    Stored,
    /// Storage was blank or corrupt; factory defaults are live.
    FactoryDefault,
}

/// The live mapping record plus its persistence policy.
///
/// Loading never writes: a blank or corrupt row leaves factory defaults
/// in memory only, so a device that is never reconfigured never wears
/// its storage. Defaults reach storage the first time a save commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingStore {
    record: MappingRecord,
}

impl MappingStore {
    /// Read the row, validate it, and fall back to factory defaults if it
    /// does not hold a usable record.
    pub fn load<S: RecordStorage>(storage: &mut S) -> (Self, RecordOrigin) {
        let mut bytes = [0u8; RECORD_LEN];
        for (index, byte) in bytes.iter_mut().enumerate() {
            *byte = storage.read_word(index) as u8;
        }
        match MappingRecord::from_bytes(bytes) {
            Ok(record) => (Self { record }, RecordOrigin::Stored),
            Err(_) => (
                Self {
                    record: MappingRecord::factory_default(),
                },
                RecordOrigin::FactoryDefault,
            ),
        }
    }

    /// The record currently in effect.
    #[inline]
    #[must_use]
    pub const fn record(&self) -> &MappingRecord {
        &self.record
    }

    /// Usage code mapped to `button` in `table`.
    #[inline]
    #[must_use]
    pub fn usage(&self, table: ActiveTable, button: PhysicalButton) -> u8 {
        self.record.usage(table, button)
    }

    /// Replace both tables and commit the record to storage.
    ///
    /// The candidate keeps the current record's reserved bytes and gets
    /// fresh framing stamped by [`MappingRecord::set_tables`]. The erase
    /// and program run with interrupts masked and the row relocked on
    /// either outcome. On failure the previous record stays in effect in
    /// memory, though the row itself may be left erased.
    pub fn save<S: RecordStorage>(
        &mut self,
        storage: &mut S,
        normal: &[u8; TABLE_LEN],
        special: &[u8; TABLE_LEN],
    ) -> Result<(), StorageError> {
        let mut candidate = self.record;
        candidate.set_tables(normal, special);
        let words = row_words(candidate.as_bytes());

        critical_section::with(|_| {
            storage.unlock();
            let written = storage.erase_row().and_then(|()| storage.write_row(&words));
            storage.lock();
            written
        })?;

        self.record = candidate;
        Ok(())
    }
}

/// Widen record bytes to programmable words.
fn row_words(bytes: &[u8; RECORD_LEN]) -> [u16; ROW_WORDS] {
    let mut words = [ERASED_WORD; ROW_WORDS];
    for (word, &byte) in words.iter_mut().zip(bytes.iter()) {
        *word = WORD_PAD | u16::from(byte);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapping_proto::{RECORD_VERSION, REPORT_ID_OFFSET, VERSION_OFFSET};

    /// In-memory row with lock enforcement and fault injection.
    struct MemStorage {
        words: [u16; ROW_WORDS],
        unlocked: bool,
        erases: usize,
        writes: usize,
        fail_erase: bool,
        fail_write: bool,
    }

    impl MemStorage {
        fn blank() -> Self {
            Self {
                words: [ERASED_WORD; ROW_WORDS],
                unlocked: false,
                erases: 0,
                writes: 0,
                fail_erase: false,
                fail_write: false,
            }
        }
    }

    impl RecordStorage for MemStorage {
        fn read_word(&mut self, index: usize) -> u16 {
            self.words[index]
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
            if self.fail_erase {
                return Err(StorageError::Fault);
            }
            self.erases += 1;
            self.words = [ERASED_WORD; ROW_WORDS];
            Ok(())
        }

        fn write_row(&mut self, words: &[u16; ROW_WORDS]) -> Result<(), StorageError> {
            if !self.unlocked {
                return Err(StorageError::Locked);
            }
            if self.fail_write {
                return Err(StorageError::Fault);
            }
            self.writes += 1;
            self.words = *words;
            Ok(())
        }
    }

    #[test]
    fn test_blank_storage_loads_defaults_without_writing() {
        let mut storage = MemStorage::blank();
        let (store, origin) = MappingStore::load(&mut storage);
        assert_eq!(origin, RecordOrigin::FactoryDefault);
        assert_eq!(*store.record(), MappingRecord::factory_default());
        assert_eq!(storage.erases, 0);
        assert_eq!(storage.writes, 0);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut storage = MemStorage::blank();
        let (mut store, _) = MappingStore::load(&mut storage);

        let normal = [8, 7, 6, 5, 4, 3, 2, 1];
        let special = [14, 13, 12, 11, 10, 9, 1, 2];
        store.save(&mut storage, &normal, &special).unwrap();

        let (reloaded, origin) = MappingStore::load(&mut storage);
        assert_eq!(origin, RecordOrigin::Stored);
        assert_eq!(reloaded.record().normal_table(), normal);
        assert_eq!(reloaded.record().special_table(), special);
        assert_eq!(*reloaded.record(), *store.record());
    }

    #[test]
    fn test_load_is_idempotent_and_read_only() {
        let mut storage = MemStorage::blank();
        let (mut store, _) = MappingStore::load(&mut storage);
        store.save(&mut storage, &[1; TABLE_LEN], &[2; TABLE_LEN]).unwrap();
        let (erases, writes) = (storage.erases, storage.writes);

        let (first, _) = MappingStore::load(&mut storage);
        let (second, _) = MappingStore::load(&mut storage);
        assert_eq!(*first.record(), *second.record());
        assert_eq!(storage.erases, erases);
        assert_eq!(storage.writes, writes);
    }

    #[test]
    fn test_any_corrupted_data_bit_recovers_defaults() {
        let mut storage = MemStorage::blank();
        let (mut store, _) = MappingStore::load(&mut storage);
        store.save(&mut storage, &[3; TABLE_LEN], &[12; TABLE_LEN]).unwrap();
        let written = storage.words;

        for index in 0..ROW_WORDS {
            for bit in 0..8 {
                storage.words = written;
                storage.words[index] ^= 1 << bit;
                let (recovered, origin) = MappingStore::load(&mut storage);
                assert_eq!(
                    origin,
                    RecordOrigin::FactoryDefault,
                    "flip at word {index} bit {bit} went undetected"
                );
                assert_eq!(*recovered.record(), MappingRecord::factory_default());
            }
        }
    }

    #[test]
    fn test_failed_write_keeps_previous_record_in_memory() {
        let mut storage = MemStorage::blank();
        let (mut store, _) = MappingStore::load(&mut storage);
        store.save(&mut storage, &[5; TABLE_LEN], &[6; TABLE_LEN]).unwrap();
        let before = *store.record();

        storage.fail_write = true;
        let result = store.save(&mut storage, &[9; TABLE_LEN], &[10; TABLE_LEN]);
        assert_eq!(result, Err(StorageError::Fault));
        assert_eq!(*store.record(), before);
        assert!(!storage.unlocked);

        // The row was erased before the write failed, so a reboot comes up
        // on factory defaults.
        let (rebooted, origin) = MappingStore::load(&mut storage);
        assert_eq!(origin, RecordOrigin::FactoryDefault);
        assert_eq!(*rebooted.record(), MappingRecord::factory_default());
    }

    #[test]
    fn test_failed_erase_attempts_no_write() {
        let mut storage = MemStorage::blank();
        let (mut store, _) = MappingStore::load(&mut storage);
        store.save(&mut storage, &[5; TABLE_LEN], &[6; TABLE_LEN]).unwrap();
        let written = storage.words;
        let writes = storage.writes;

        storage.fail_erase = true;
        let result = store.save(&mut storage, &[9; TABLE_LEN], &[10; TABLE_LEN]);
        assert_eq!(result, Err(StorageError::Fault));
        assert_eq!(storage.writes, writes);
        assert_eq!(storage.words, written);
        assert!(!storage.unlocked);

        // The old record is still intact on storage.
        let (reloaded, origin) = MappingStore::load(&mut storage);
        assert_eq!(origin, RecordOrigin::Stored);
        assert_eq!(reloaded.record().normal_table(), [5; TABLE_LEN]);
    }

    #[test]
    fn test_locked_device_rejects_commits() {
        let mut storage = MemStorage::blank();
        assert_eq!(storage.erase_row(), Err(StorageError::Locked));
        assert_eq!(
            storage.write_row(&[WORD_PAD; ROW_WORDS]),
            Err(StorageError::Locked)
        );
    }

    #[test]
    fn test_written_words_carry_padding_pattern() {
        let mut storage = MemStorage::blank();
        let (mut store, _) = MappingStore::load(&mut storage);
        store.save(&mut storage, &[1; TABLE_LEN], &[2; TABLE_LEN]).unwrap();

        let bytes = store.record().as_bytes();
        for (index, &word) in storage.words.iter().enumerate() {
            assert_eq!(word, WORD_PAD | u16::from(bytes[index]));
            assert_eq!(word & 0xC000, 0, "word {index} exceeds 14 bits");
        }
    }

    #[test]
    fn test_save_stamps_record_framing() {
        let mut storage = MemStorage::blank();
        let (mut store, _) = MappingStore::load(&mut storage);
        store.save(&mut storage, &[4; TABLE_LEN], &[11; TABLE_LEN]).unwrap();

        let stored_report_id = storage.read_word(REPORT_ID_OFFSET) as u8;
        let stored_version = storage.read_word(VERSION_OFFSET) as u8;
        assert_eq!(stored_report_id, 0x00);
        assert_eq!(stored_version, RECORD_VERSION);
        assert_eq!(
            store.usage(ActiveTable::Special, PhysicalButton::A),
            11
        );
    }
}
