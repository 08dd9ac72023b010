//! The 64-byte configuration record: layout, validation, factory defaults.
//!
//! The record is sized to fit exactly one storage row and one feature-report
//! payload. Layout, byte-exact:
//!
//! | offset | size | field            |
//! |--------|------|------------------|
//! | 0      | 1    | report id (0)    |
//! | 1      | 1    | format version   |
//! | 2      | 1    | checksum         |
//! | 3      | 5    | reserved         |
//! | 8      | 8    | normal table     |
//! | 16     | 8    | reserved         |
//! | 24     | 8    | special table    |
//! | 32     | 8    | reserved         |
//! | 40     | 24   | reserved         |
//!
//! The checksum is CRC-8 over the other 63 bytes (see [`crate::crc`]).
//! Reserved bytes are never interpreted and round-trip verbatim so records
//! written by newer firmware survive being read back through this version.

use crate::crc::record_checksum;
use crate::types::{usage, ActiveTable, PhysicalButton, NUM_BUTTONS};

/// Record size in bytes: one storage row, one feature-report payload.
pub const RECORD_LEN: usize = 64;

/// Entries per mapping table, one per [`PhysicalButton`].
pub const TABLE_LEN: usize = NUM_BUTTONS;

/// Record format version this firmware reads and writes.
pub const RECORD_VERSION: u8 = 0x01;

/// Report ID carried in byte 0 and used on the configuration interface.
pub const RECORD_REPORT_ID: u8 = 0x00;

/// Byte offset of the report ID.
pub const REPORT_ID_OFFSET: usize = 0;
/// Byte offset of the format version.
pub const VERSION_OFFSET: usize = 1;
/// Byte offset of the checksum.
pub const CHECKSUM_OFFSET: usize = 2;
/// Byte offset of the normal mapping table.
pub const NORMAL_TABLE_OFFSET: usize = 8;
/// Byte offset of the special mapping table.
pub const SPECIAL_TABLE_OFFSET: usize = 24;

/// Factory normal table, indexed by [`PhysicalButton`].
pub const DEFAULT_NORMAL_TABLE: [u8; TABLE_LEN] = [
    usage::BUTTON_A,      // A
    usage::BUTTON_B,      // B
    usage::BUTTON_X,      // X
    usage::BUTTON_Y,      // Y
    usage::BUTTON_L1,     // L
    usage::BUTTON_R1,     // R
    usage::BUTTON_START,  // Start
    usage::BUTTON_SELECT, // Select
];

/// Factory special table: face buttons move to the system/stick actions,
/// shoulder buttons become the lower triggers.
pub const DEFAULT_SPECIAL_TABLE: [u8; TABLE_LEN] = [
    usage::BUTTON_A,       // A
    usage::BUTTON_HOME,    // B
    usage::BUTTON_R_STICK, // X
    usage::BUTTON_L_STICK, // Y
    usage::BUTTON_L2,      // L
    usage::BUTTON_R2,      // R
    usage::BUTTON_START,   // Start
    usage::BUTTON_SELECT,  // Select
];

/// Why a stored or received record image was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Version byte does not match [`RECORD_VERSION`].
    Version,
    /// Stored checksum does not match the computed one.
    Checksum,
}

impl core::fmt::Display for RecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Version => write!(f, "unsupported record version"),
            Self::Checksum => write!(f, "record checksum mismatch"),
        }
    }
}

/// The persistent configuration record, held as its exact 64-byte image.
///
/// Accessors read the documented offsets; mutation goes through
/// [`set_tables`](Self::set_tables), which re-stamps the framing bytes and
/// checksum while leaving every reserved byte untouched.
///
/// # Example
///
/// ```
/// use mapping_proto::{ActiveTable, MappingRecord, PhysicalButton};
///
/// let record = MappingRecord::factory_default();
/// assert_eq!(record.usage(ActiveTable::Normal, PhysicalButton::A), 1);
/// assert_eq!(record.usage(ActiveTable::Special, PhysicalButton::B), 11);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingRecord {
    bytes: [u8; RECORD_LEN],
}

impl MappingRecord {
    /// All-zero image. Not valid until overwritten; exists so statics can be
    /// initialized before the boot-time load runs.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0; RECORD_LEN],
        }
    }

    /// Factory defaults: default tables, reserved regions zeroed, version and
    /// checksum stamped.
    #[must_use]
    pub fn factory_default() -> Self {
        let mut record = Self::zeroed();
        record.set_tables(&DEFAULT_NORMAL_TABLE, &DEFAULT_SPECIAL_TABLE);
        record
    }

    /// Validate a 64-byte image and adopt it unchanged.
    pub fn from_bytes(bytes: [u8; RECORD_LEN]) -> Result<Self, RecordError> {
        if bytes[VERSION_OFFSET] != RECORD_VERSION {
            return Err(RecordError::Version);
        }
        if bytes[CHECKSUM_OFFSET] != record_checksum(&bytes) {
            return Err(RecordError::Checksum);
        }
        Ok(Self { bytes })
    }

    /// The raw 64-byte image.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RECORD_LEN] {
        &self.bytes
    }

    /// Stored format version.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.bytes[VERSION_OFFSET]
    }

    /// Stored checksum.
    #[inline]
    #[must_use]
    pub const fn checksum(&self) -> u8 {
        self.bytes[CHECKSUM_OFFSET]
    }

    /// Copy of the normal mapping table.
    #[must_use]
    pub fn normal_table(&self) -> [u8; TABLE_LEN] {
        let mut table = [0u8; TABLE_LEN];
        table.copy_from_slice(self.table_slice(ActiveTable::Normal));
        table
    }

    /// Copy of the special mapping table.
    #[must_use]
    pub fn special_table(&self) -> [u8; TABLE_LEN] {
        let mut table = [0u8; TABLE_LEN];
        table.copy_from_slice(self.table_slice(ActiveTable::Special));
        table
    }

    /// Usage code mapped to `button` in `table`; 0 means unmapped.
    #[inline]
    #[must_use]
    pub fn usage(&self, table: ActiveTable, button: PhysicalButton) -> u8 {
        self.table_slice(table)[button.index()]
    }

    /// Replace both tables, force the report ID, stamp version and checksum.
    ///
    /// Table values are stored as given, valid usage code or not; translation
    /// treats out-of-range codes as unmapped. Reserved bytes keep whatever
    /// they currently hold.
    pub fn set_tables(&mut self, normal: &[u8; TABLE_LEN], special: &[u8; TABLE_LEN]) {
        self.bytes[NORMAL_TABLE_OFFSET..NORMAL_TABLE_OFFSET + TABLE_LEN].copy_from_slice(normal);
        self.bytes[SPECIAL_TABLE_OFFSET..SPECIAL_TABLE_OFFSET + TABLE_LEN]
            .copy_from_slice(special);
        self.bytes[REPORT_ID_OFFSET] = RECORD_REPORT_ID;
        self.bytes[VERSION_OFFSET] = RECORD_VERSION;
        self.bytes[CHECKSUM_OFFSET] = record_checksum(&self.bytes);
    }

    fn table_slice(&self, table: ActiveTable) -> &[u8] {
        let offset = match table {
            ActiveTable::Normal => NORMAL_TABLE_OFFSET,
            ActiveTable::Special => SPECIAL_TABLE_OFFSET,
        };
        &self.bytes[offset..offset + TABLE_LEN]
    }
}

impl Default for MappingRecord {
    fn default() -> Self {
        Self::factory_default()
    }
}
