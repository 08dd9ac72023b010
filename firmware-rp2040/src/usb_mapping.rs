//! USB HID configuration interface.
//!
//! The mapping record is exposed to the host as a 64-byte feature report
//! with report ID 0 on a vendor-defined interface. GET_REPORT serves the
//! live record; SET_REPORT carries replacement tables, which are queued
//! for the config task so the flash commit never runs inside the USB
//! control callback.

use core::cell::Cell;

use defmt::warn;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use mapping_proto::{
    decode_set_report, encode_get_report, MappingRecord, TableUpdate, RECORD_REPORT_ID,
};

/// Vendor-defined HID Report Descriptor: one 64-byte feature report.
pub const MAPPING_REPORT_DESCRIPTOR: &[u8] = &[
    0x06, 0x00, 0xFF, // Usage Page (Vendor Defined 0xFF00)
    0x09, 0x01, // Usage (0x01)
    0xA1, 0x01, // Collection (Application)
    //
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x40, //   Report Count (64)
    0x09, 0x01, //   Usage (0x01)
    0xB1, 0x02, //   Feature (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// The record translation reads, shared with the USB control callbacks.
///
/// Populated from storage in `main` before the USB device starts, then
/// replaced wholesale after each successful save. Readers take a copy
/// under the lock, so a GET_REPORT racing a save sees either the old or
/// the new record, never a mix.
pub static ACTIVE_RECORD: Mutex<CriticalSectionRawMutex, Cell<MappingRecord>> =
    Mutex::new(Cell::new(MappingRecord::zeroed()));

/// Table updates decoded from SET_REPORT, awaiting the config task.
/// Signal semantics: a burst of host writes collapses to the newest one.
pub static TABLE_WRITES: Signal<CriticalSectionRawMutex, TableUpdate> = Signal::new();

/// HID request handler for the configuration interface.
pub struct MappingRequestHandler;

impl RequestHandler for MappingRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        match id {
            ReportId::Feature(id) if id == RECORD_REPORT_ID => {
                let record = ACTIVE_RECORD.lock(|record| record.get());
                encode_get_report(&record, buf)
            }
            _ => None,
        }
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        match id {
            ReportId::Feature(id) if id == RECORD_REPORT_ID => {
                if let Some(update) = decode_set_report(data) {
                    TABLE_WRITES.signal(update);
                } else {
                    // Dropped without a host-visible error; the host
                    // notices on its next read-back.
                    warn!("Mapping write too short: {} bytes", data.len());
                }
                OutResponse::Accepted
            }
            _ => OutResponse::Rejected,
        }
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the configuration HID interface in the USB builder.
///
/// Returns the (unused) HID writer; all traffic on this interface runs
/// over the control pipe through `handler`.
pub fn configure_mapping_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    handler: &'d mut MappingRequestHandler,
) -> HidWriter<'d, Driver<'d, USB>, 64> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: MAPPING_REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: 10,
        max_packet_size: 64,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
