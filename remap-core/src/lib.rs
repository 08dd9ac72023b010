//! Platform-agnostic remap-pad logic: sampling types, translation, gestures,
//! and record storage.
//!
//! This crate holds everything between the GPIO pins and the USB endpoint
//! that does not touch hardware, so the whole pipeline runs in host tests.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`sample`]: Switch snapshots ([`SwitchSample`], [`ButtonSet`], [`Dpad`])
//! - [`mode`]: Volatile runtime mode ([`RuntimeMode`], [`DirectionalMode`])
//! - [`translate`]: Sample + record + mode -> report ([`translate`])
//! - [`report`]: The 7-byte input report ([`PadReport`])
//! - [`gesture`]: Hold-to-trigger combo detection ([`HoldGesture`])
//! - [`store`]: Record persistence ([`MappingStore`], [`RecordStorage`])
//!
//! # Pipeline
//!
//! Once per 4 ms polling cycle the firmware samples the switches, advances
//! the gesture detectors, and translates:
//!
//! ```rust
//! use mapping_proto::{MappingRecord, PhysicalButton};
//! use remap_core::{translate, HoldGesture, RuntimeMode, SwitchSample,
//!                  TABLE_TOGGLE_HOLD_TICKS};
//!
//! let record = MappingRecord::factory_default();
//! let mut mode = RuntimeMode::BOOT;
//! let mut table_gesture = HoldGesture::new(TABLE_TOGGLE_HOLD_TICKS);
//!
//! let mut sample = SwitchSample::RELEASED;
//! sample.buttons.set(PhysicalButton::A, true);
//!
//! if table_gesture.advance(sample.combo_held(PhysicalButton::Start, PhysicalButton::R)) {
//!     mode.toggle_table();
//! }
//! let report = translate(&sample, &record, mode);
//! assert_eq!(report.buttons, [0x01, 0x00]);
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

pub mod gesture;
pub mod mode;
pub mod report;
pub mod sample;
pub mod store;
pub mod translate;

// Re-export main types at crate root
pub use gesture::{HoldGesture, DIRECTIONAL_HOLD_TICKS, TABLE_TOGGLE_HOLD_TICKS};
pub use mode::{DirectionalMode, RuntimeMode};
pub use report::{
    PadReport, AXIS_CENTER, AXIS_HIGH, AXIS_LOW, HAT_EAST, HAT_NORTH, HAT_NORTH_EAST,
    HAT_NORTH_WEST, HAT_NULL, HAT_SOUTH, HAT_SOUTH_EAST, HAT_SOUTH_WEST, HAT_WEST,
};
pub use sample::{ButtonSet, Dpad, SwitchSample};
pub use store::{
    MappingStore, RecordOrigin, RecordStorage, StorageError, ERASED_WORD, ROW_WORDS, WORD_PAD,
};
pub use translate::translate;
