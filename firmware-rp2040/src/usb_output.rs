//! USB HID gamepad interface.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use remap_core::PadReport;

/// Gamepad HID Report Descriptor.
///
/// Describes the 7-byte input report produced by
/// [`PadReport::as_bytes`]:
///
/// - 14 buttons (2 bits constant padding)
/// - 8-way hat switch with a null state (4 bits constant padding)
/// - X/Y and Z/Rz axes, unsigned 8-bit, 0x80 centered
pub const GAMEPAD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (14 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x0E, //   Usage Maximum (Button 14)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x0E, //   Report Count (14)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Padding to the byte boundary ---
    0x95, 0x02, //   Report Count (2)
    0x81, 0x03, //   Input (Constant)
    //
    // --- Hat switch (4 bits + 4 bits padding) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x39, //   Usage (Hat Switch)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x07, //   Logical Maximum (7)
    0x35, 0x00, //   Physical Minimum (0)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14, //   Unit (Degrees)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x45, 0x00, //   Physical Maximum (0)
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x03, //   Input (Constant)
    //
    // --- X/Y and Z/Rz axes ---
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// USB HID gamepad output.
///
/// Wraps an embassy-usb HID writer to send pad reports.
pub struct PadWriter<'d> {
    writer: HidWriter<'d, Driver<'d, USB>, { PadReport::SIZE }>,
}

impl<'d> PadWriter<'d> {
    /// Create a new pad output from the given HID writer.
    pub fn new(writer: HidWriter<'d, Driver<'d, USB>, { PadReport::SIZE }>) -> Self {
        Self { writer }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
    }

    /// Send one input report.
    pub async fn send(&mut self, report: &PadReport) -> Result<(), EndpointError> {
        self.writer.write(&report.as_bytes()).await
    }
}

/// Configure the gamepad HID interface in the USB builder.
///
/// Must run before [`configure_mapping_hid`](crate::configure_mapping_hid)
/// so the gamepad lands on interface 0.
///
/// Returns the HID writer for use by the output task.
pub fn configure_gamepad_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
) -> HidWriter<'d, Driver<'d, USB>, { PadReport::SIZE }> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: GAMEPAD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 8,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
