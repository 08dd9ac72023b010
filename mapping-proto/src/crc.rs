//! CRC-8 checksum guarding the configuration record.
//!
//! Uses CRC-8/SMBUS: polynomial 0x07, initial value 0, no reflection, no
//! final XOR. The record checksum covers every record byte except the stored
//! checksum itself, including the bytes that follow it.

use crc::{Crc, CRC_8_SMBUS};

use crate::record::{CHECKSUM_OFFSET, RECORD_LEN};

/// CRC-8/SMBUS calculator with a 256-byte lookup table.
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// CRC-8/SMBUS of a byte slice.
#[inline]
#[must_use]
pub fn crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

/// Record checksum: CRC-8 over all 64 bytes except index 2.
///
/// The stored checksum byte is skipped so the value is independent of
/// whatever that byte currently holds.
#[must_use]
pub fn record_checksum(bytes: &[u8; RECORD_LEN]) -> u8 {
    let mut digest = CRC8.digest();
    digest.update(&bytes[..CHECKSUM_OFFSET]);
    digest.update(&bytes[CHECKSUM_OFFSET + 1..]);
    digest.finalize()
}
