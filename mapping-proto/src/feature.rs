//! Feature-report codec for the configuration interface.
//!
//! GET_REPORT returns the live record image with the report ID forced into
//! byte 0. SET_REPORT carries a full 64-byte image, of which only the two
//! mapping tables are honored; framing, checksum and reserved bytes in the
//! host's payload are ignored and re-stamped on save.

use crate::record::{
    MappingRecord, NORMAL_TABLE_OFFSET, RECORD_LEN, RECORD_REPORT_ID, SPECIAL_TABLE_OFFSET,
    TABLE_LEN,
};

/// Mapping tables extracted from a SET_REPORT payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TableUpdate {
    pub normal: [u8; TABLE_LEN],
    pub special: [u8; TABLE_LEN],
}

/// Extract the mapping tables from a SET_REPORT payload.
///
/// Returns `None` for payloads shorter than [`RECORD_LEN`]; extra trailing
/// bytes are ignored, the table offsets are fixed.
#[must_use]
pub fn decode_set_report(payload: &[u8]) -> Option<TableUpdate> {
    if payload.len() < RECORD_LEN {
        return None;
    }
    let mut normal = [0u8; TABLE_LEN];
    let mut special = [0u8; TABLE_LEN];
    normal.copy_from_slice(&payload[NORMAL_TABLE_OFFSET..NORMAL_TABLE_OFFSET + TABLE_LEN]);
    special.copy_from_slice(&payload[SPECIAL_TABLE_OFFSET..SPECIAL_TABLE_OFFSET + TABLE_LEN]);
    Some(TableUpdate { normal, special })
}

/// Write the GET_REPORT payload for `record` into `buf`.
///
/// Returns the payload length, or `None` if `buf` is shorter than
/// [`RECORD_LEN`].
#[must_use]
pub fn encode_get_report(record: &MappingRecord, buf: &mut [u8]) -> Option<usize> {
    let out = buf.get_mut(..RECORD_LEN)?;
    out.copy_from_slice(record.as_bytes());
    out[0] = RECORD_REPORT_ID;
    Some(RECORD_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc::record_checksum;
    use crate::record::CHECKSUM_OFFSET;

    #[test]
    fn test_decode_rejects_short_payloads() {
        assert_eq!(decode_set_report(&[]), None);
        assert_eq!(decode_set_report(&[0u8; RECORD_LEN - 1]), None);
    }

    #[test]
    fn test_decode_reads_tables_at_fixed_offsets() {
        let mut payload = [0u8; RECORD_LEN];
        payload[NORMAL_TABLE_OFFSET..NORMAL_TABLE_OFFSET + TABLE_LEN]
            .copy_from_slice(&[8, 7, 6, 5, 4, 3, 2, 1]);
        payload[SPECIAL_TABLE_OFFSET..SPECIAL_TABLE_OFFSET + TABLE_LEN]
            .copy_from_slice(&[11, 11, 11, 11, 14, 14, 14, 14]);

        let update = decode_set_report(&payload).unwrap();
        assert_eq!(update.normal, [8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(update.special, [11, 11, 11, 11, 14, 14, 14, 14]);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut payload = [0xEEu8; RECORD_LEN + 1];
        payload[NORMAL_TABLE_OFFSET..NORMAL_TABLE_OFFSET + TABLE_LEN]
            .copy_from_slice(&[1, 1, 1, 1, 1, 1, 1, 1]);
        payload[SPECIAL_TABLE_OFFSET..SPECIAL_TABLE_OFFSET + TABLE_LEN]
            .copy_from_slice(&[2, 2, 2, 2, 2, 2, 2, 2]);

        let update = decode_set_report(&payload).unwrap();
        assert_eq!(update.normal, [1; TABLE_LEN]);
        assert_eq!(update.special, [2; TABLE_LEN]);
    }

    #[test]
    fn test_encode_round_trips_through_decode() {
        let mut record = MappingRecord::factory_default();
        record.set_tables(&[3; TABLE_LEN], &[12; TABLE_LEN]);

        let mut buf = [0u8; RECORD_LEN];
        assert_eq!(encode_get_report(&record, &mut buf), Some(RECORD_LEN));

        let update = decode_set_report(&buf).unwrap();
        assert_eq!(update.normal, record.normal_table());
        assert_eq!(update.special, record.special_table());
    }

    #[test]
    fn test_encode_forces_report_id_byte() {
        // Build a valid image whose byte 0 is nonzero, as an older writer
        // might have left it.
        let mut bytes = *MappingRecord::factory_default().as_bytes();
        bytes[0] = 0x55;
        bytes[CHECKSUM_OFFSET] = record_checksum(&bytes);
        let record = MappingRecord::from_bytes(bytes).unwrap();

        let mut buf = [0xFFu8; RECORD_LEN];
        assert_eq!(encode_get_report(&record, &mut buf), Some(RECORD_LEN));
        assert_eq!(buf[0], RECORD_REPORT_ID);
        assert_eq!(buf[1..], record.as_bytes()[1..]);
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let record = MappingRecord::factory_default();
        let mut buf = [0u8; RECORD_LEN - 1];
        assert_eq!(encode_get_report(&record, &mut buf), None);
    }
}
