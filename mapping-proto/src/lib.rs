//! Mapping-record types, validation, and feature-report codec for the remap pad.
//!
//! This crate provides everything needed to work with the persistent
//! button-mapping configuration:
//!
//! - **Types**: Core identifiers shared across the firmware
//!   - [`PhysicalButton`] - The eight physical switches
//!   - [`ActiveTable`] - Which mapping table is live
//!   - [`usage`] - HID usage codes the tables map onto
//!
//! - **Record**: The persisted 64-byte configuration image
//!   - [`MappingRecord`] - Validated record with typed accessors
//!   - [`MappingRecord::from_bytes()`] - Validate a raw image
//!   - [`MappingRecord::set_tables()`] - Replace tables and re-stamp framing
//!
//! - **Feature reports**: Host-facing codec for the configuration interface
//!   - [`encode_get_report()`] - Serve the live record to the host
//!   - [`decode_set_report()`] - Extract tables from a host write
//!
//! # Record Format
//!
//! The record is a fixed 64-byte image, sized to one storage row and one
//! feature report:
//!
//! ```text
//! offset  0: report id (always 0x00)
//! offset  1: format version (0x01)
//! offset  2: CRC-8/SMBUS over the other 63 bytes
//! offset  8: normal table, 8 bytes, one usage code per button
//! offset 24: special table, 8 bytes
//! elsewhere: reserved, preserved verbatim
//! ```
//!
//! Each table byte is the HID usage code emitted when that button is held;
//! `0` leaves the button unmapped.
//!
//! # Examples
//!
//! ## Reading a mapping
//!
//! ```
//! use mapping_proto::{ActiveTable, MappingRecord, PhysicalButton};
//!
//! let record = MappingRecord::factory_default();
//! assert_eq!(record.usage(ActiveTable::Normal, PhysicalButton::Start), 8);
//! assert_eq!(record.usage(ActiveTable::Special, PhysicalButton::B), 11);
//! ```
//!
//! ## Applying a host write
//!
//! ```
//! use mapping_proto::{decode_set_report, MappingRecord, RECORD_LEN};
//!
//! // A host sends back an edited copy of the record it read.
//! let mut payload = *MappingRecord::factory_default().as_bytes();
//! payload[8] = 2; // remap button A
//!
//! let update = decode_set_report(&payload).unwrap();
//! let mut record = MappingRecord::factory_default();
//! record.set_tables(&update.normal, &update.special);
//! assert_eq!(record.normal_table()[0], 2);
//!
//! // Truncated writes carry no update at all.
//! assert!(decode_set_report(&payload[..RECORD_LEN - 1]).is_none());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod crc;
pub mod feature;
pub mod record;
pub mod types;

// Re-export types at crate root for convenience
pub use crc::{crc8, record_checksum};
pub use feature::{decode_set_report, encode_get_report, TableUpdate};
pub use record::{
    MappingRecord, RecordError, CHECKSUM_OFFSET, DEFAULT_NORMAL_TABLE, DEFAULT_SPECIAL_TABLE,
    NORMAL_TABLE_OFFSET, RECORD_LEN, RECORD_REPORT_ID, RECORD_VERSION, REPORT_ID_OFFSET,
    SPECIAL_TABLE_OFFSET, TABLE_LEN, VERSION_OFFSET,
};
pub use types::{usage, ActiveTable, PhysicalButton, NUM_BUTTONS};
