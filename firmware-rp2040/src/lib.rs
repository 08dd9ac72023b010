//! Host-remappable USB HID gamepad firmware for RP2040.
//!
//! This crate provides the embedded implementation of a remappable gamepad:
//! twelve switches go in, a standard HID gamepad report comes out, and the
//! host can rewrite the button-to-usage mapping over a second HID interface.
//! The mapping lives in the last flash sector and survives power loss.
//!
//! # Hardware Configuration
//!
//! Designed for the Raspberry Pi Pico (RP2040) with switches wired
//! active-low between the pin and ground:
//!
//! | Function | GPIO  | Description |
//! |----------|-------|-------------|
//! | Buttons  | 2-9   | A, B, X, Y, L, R, Start, Select |
//! | D-pad    | 10-13 | Up, down, left, right |
//! | LED      | 25    | On-board LED (lit while the special table is active) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with four concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Input Task**: Samples switches every 4 ms, advances the hold
//!   gestures, translates through the live record, signals the report
//! - **Output Task**: Receives report signals and sends USB HID reports
//! - **Config Task**: Commits host mapping writes to flash and publishes
//!   the new record
//!
//! Report hand-off uses Embassy's [`Signal`](embassy_sync::signal::Signal)
//! with "latest value wins" semantics, ensuring the USB output always
//! reflects the most recent switch sample. Host writes travel the same way
//! from the USB control callback to the config task, so flash commits never
//! run in interrupt context.
//!
//! # Modules
//!
//! - [`switches`]: GPIO switch sampling ([`SwitchBank`])
//! - [`storage`]: Record row in the last flash sector ([`FlashStorage`])
//! - [`usb_output`]: Gamepad HID interface ([`PadWriter`])
//! - [`usb_mapping`]: Configuration HID interface ([`MappingRequestHandler`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)
//!
//! # Re-exports
//!
//! This crate re-exports the main items from [`mapping_proto`] and
//! [`remap_core`] for convenience, so the binary only needs this crate.

#![no_std]

// Ensure exactly one panic handler is linked
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they define conflicting panic handlers");
#[cfg(not(any(feature = "dev-panic", feature = "prod-panic")))]
compile_error!("One of the `dev-panic` or `prod-panic` features must be enabled");

// Re-export core types for convenience
pub use mapping_proto::{ActiveTable, MappingRecord, PhysicalButton, TableUpdate, RECORD_LEN};
pub use remap_core::{
    translate, DirectionalMode, HoldGesture, MappingStore, PadReport, RecordOrigin, RuntimeMode,
    SwitchSample, DIRECTIONAL_HOLD_TICKS, TABLE_TOGGLE_HOLD_TICKS,
};

pub mod storage;
pub mod switches;
pub mod usb_mapping;
pub mod usb_output;

pub use storage::{FlashStorage, FLASH_SIZE, RECORD_FLASH_OFFSET};
pub use switches::SwitchBank;
pub use usb_mapping::{
    configure_mapping_hid, MappingRequestHandler, ACTIVE_RECORD, TABLE_WRITES,
};
pub use usb_output::{configure_gamepad_hid, PadWriter};
