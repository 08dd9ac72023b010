//! Pure translation from a switch sample to the host-facing report.

use mapping_proto::{usage, MappingRecord, PhysicalButton};

use crate::mode::{DirectionalMode, RuntimeMode};
use crate::report::{
    PadReport, AXIS_CENTER, AXIS_HIGH, AXIS_LOW, HAT_EAST, HAT_NORTH, HAT_NORTH_EAST,
    HAT_NORTH_WEST, HAT_NULL, HAT_SOUTH, HAT_SOUTH_EAST, HAT_SOUTH_WEST, HAT_WEST,
};
use crate::sample::{Dpad, SwitchSample};

/// Report byte holding each usage code's bit, indexed by usage.
const USAGE_BYTE: [usize; 15] = [
    0, // usage 0: unmapped, never looked up
    0, 0, 0, 0, 0, 0, 0, 0, // usages 1-8 live in buttons[0]
    1, 1, 1, 1, 1, // usages 9-13 live in buttons[1]
    1, // usage 14 as well
];

/// Bit mask for each usage code within its report byte.
const USAGE_MASK: [u8; 15] = [
    0x00, // usage 0: unmapped
    0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, // usages 1-8
    0x01, 0x02, 0x04, 0x08, 0x10, // usages 9-13
    0x20, // usage 14
];

/// Build the report for one polling cycle.
///
/// Every held button is looked up in the active table and its usage bit
/// OR-ed into the report, so buttons mapped to the same usage compose.
/// Usage 0 and codes above [`usage::MAX`] leave the report untouched.
/// Directions are encoded per the directional mode; axes the mode does
/// not drive stay centered.
#[must_use]
pub fn translate(sample: &SwitchSample, record: &MappingRecord, mode: RuntimeMode) -> PadReport {
    let mut report = PadReport::neutral();

    for button in PhysicalButton::ALL {
        if !sample.buttons.contains(button) {
            continue;
        }
        let code = record.usage(mode.active_table, button);
        if code == usage::NONE || code > usage::MAX {
            continue;
        }
        report.buttons[USAGE_BYTE[code as usize]] |= USAGE_MASK[code as usize];
    }

    let dpad = sample.dpad;
    match mode.directional {
        DirectionalMode::Analog => {
            // Up beats down, left beats right when both are held.
            if dpad.left {
                report.x = AXIS_LOW;
            } else if dpad.right {
                report.x = AXIS_HIGH;
            }
            if dpad.up {
                report.y = AXIS_LOW;
            } else if dpad.down {
                report.y = AXIS_HIGH;
            }
        }
        DirectionalMode::HatSwitch => {
            report.hat = hat_encode(dpad);
        }
        DirectionalMode::TwinAxis => {
            if dpad.left {
                report.z = AXIS_LOW;
            } else if dpad.right {
                report.z = AXIS_HIGH;
            }
            if dpad.up {
                report.rz = AXIS_LOW;
            } else if dpad.down {
                report.rz = AXIS_HIGH;
            }
        }
    }

    report
}

/// Map held directions onto the 8-way hat. Diagonals are checked before
/// singles; contradictory inputs fall through to whichever arm matches
/// first.
const fn hat_encode(dpad: Dpad) -> u8 {
    if dpad.up && dpad.left {
        HAT_NORTH_WEST
    } else if dpad.up && dpad.right {
        HAT_NORTH_EAST
    } else if dpad.down && dpad.left {
        HAT_SOUTH_WEST
    } else if dpad.down && dpad.right {
        HAT_SOUTH_EAST
    } else if dpad.up {
        HAT_NORTH
    } else if dpad.right {
        HAT_EAST
    } else if dpad.down {
        HAT_SOUTH
    } else if dpad.left {
        HAT_WEST
    } else {
        HAT_NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ButtonSet;
    use mapping_proto::{ActiveTable, TABLE_LEN};

    fn press(buttons: &[PhysicalButton]) -> SwitchSample {
        let mut sample = SwitchSample::RELEASED;
        for &button in buttons {
            sample.buttons.set(button, true);
        }
        sample
    }

    fn dpad(up: bool, down: bool, left: bool, right: bool) -> SwitchSample {
        SwitchSample {
            buttons: ButtonSet::EMPTY,
            dpad: Dpad {
                up,
                down,
                left,
                right,
            },
        }
    }

    #[test]
    fn test_default_normal_buttons() {
        let record = MappingRecord::factory_default();
        let mode = RuntimeMode::BOOT;

        let report = translate(&press(&[PhysicalButton::A]), &record, mode);
        assert_eq!(report.buttons, [0x01, 0x00]);

        let report = translate(&press(&[PhysicalButton::Start]), &record, mode);
        assert_eq!(report.buttons, [0x80, 0x00]);

        let report = translate(&press(&[PhysicalButton::Select]), &record, mode);
        assert_eq!(report.buttons, [0x40, 0x00]);
    }

    #[test]
    fn test_special_table_reaches_high_usages() {
        let record = MappingRecord::factory_default();
        let mode = RuntimeMode {
            active_table: ActiveTable::Special,
            ..RuntimeMode::BOOT
        };

        // B maps to Home (usage 11) in the special table.
        let report = translate(&press(&[PhysicalButton::B]), &record, mode);
        assert_eq!(report.buttons, [0x00, 0x04]);

        // L maps to L2 (usage 9), R to R2 (usage 10).
        let report = translate(&press(&[PhysicalButton::L, PhysicalButton::R]), &record, mode);
        assert_eq!(report.buttons, [0x00, 0x03]);
    }

    #[test]
    fn test_same_usage_buttons_compose() {
        let mut record = MappingRecord::factory_default();
        let mut normal = record.normal_table();
        normal[PhysicalButton::B.index()] = usage::BUTTON_A;
        record.set_tables(&normal, &record.special_table());

        let sample = press(&[PhysicalButton::A, PhysicalButton::B]);
        let report = translate(&sample, &record, RuntimeMode::BOOT);
        assert_eq!(report.buttons, [0x01, 0x00]);
    }

    #[test]
    fn test_unmapped_and_out_of_range_usages_ignored() {
        let mut record = MappingRecord::factory_default();
        record.set_tables(&[usage::NONE; TABLE_LEN], &[15; TABLE_LEN]);

        let sample = press(&[
            PhysicalButton::A,
            PhysicalButton::B,
            PhysicalButton::X,
            PhysicalButton::Y,
        ]);
        for table in [ActiveTable::Normal, ActiveTable::Special] {
            let mode = RuntimeMode {
                active_table: table,
                ..RuntimeMode::BOOT
            };
            assert_eq!(translate(&sample, &record, mode), PadReport::neutral());
        }
    }

    #[test]
    fn test_highest_usage_lands_in_second_byte() {
        let mut record = MappingRecord::factory_default();
        record.set_tables(&[usage::MAX; TABLE_LEN], &record.special_table());

        let report = translate(&press(&[PhysicalButton::Y]), &record, RuntimeMode::BOOT);
        assert_eq!(report.buttons, [0x00, 0x20]);
    }

    #[test]
    fn test_wildly_out_of_range_usage_has_no_effect() {
        let mut record = MappingRecord::factory_default();
        record.set_tables(&[200; TABLE_LEN], &record.special_table());

        let report = translate(&press(&[PhysicalButton::A]), &record, RuntimeMode::BOOT);
        assert_eq!(report, PadReport::neutral());
    }

    #[test]
    fn test_analog_directions() {
        let record = MappingRecord::factory_default();
        let mode = RuntimeMode::BOOT;

        let report = translate(&dpad(true, false, false, false), &record, mode);
        assert_eq!((report.x, report.y), (AXIS_CENTER, AXIS_LOW));

        let report = translate(&dpad(false, true, false, true), &record, mode);
        assert_eq!((report.x, report.y), (AXIS_HIGH, AXIS_HIGH));

        // Contradictory inputs: up beats down, left beats right.
        let report = translate(&dpad(true, true, true, true), &record, mode);
        assert_eq!((report.x, report.y), (AXIS_LOW, AXIS_LOW));

        // Hat and twin axes stay released in analog mode.
        assert_eq!(report.hat, HAT_NULL);
        assert_eq!((report.z, report.rz), (AXIS_CENTER, AXIS_CENTER));
    }

    #[test]
    fn test_hat_covers_all_directions() {
        let record = MappingRecord::factory_default();
        let mode = RuntimeMode {
            directional: DirectionalMode::HatSwitch,
            ..RuntimeMode::BOOT
        };

        let cases = [
            (dpad(false, false, false, false), HAT_NULL),
            (dpad(true, false, false, false), HAT_NORTH),
            (dpad(true, false, false, true), HAT_NORTH_EAST),
            (dpad(false, false, false, true), HAT_EAST),
            (dpad(false, true, false, true), HAT_SOUTH_EAST),
            (dpad(false, true, false, false), HAT_SOUTH),
            (dpad(false, true, true, false), HAT_SOUTH_WEST),
            (dpad(false, false, true, false), HAT_WEST),
            (dpad(true, false, true, false), HAT_NORTH_WEST),
        ];
        for (sample, expected) in cases {
            let report = translate(&sample, &record, mode);
            assert_eq!(report.hat, expected);
            // X/Y stay centered when the hat carries the directions.
            assert_eq!((report.x, report.y), (AXIS_CENTER, AXIS_CENTER));
        }
    }

    #[test]
    fn test_twin_axis_directions() {
        let record = MappingRecord::factory_default();
        let mode = RuntimeMode {
            directional: DirectionalMode::TwinAxis,
            ..RuntimeMode::BOOT
        };

        let report = translate(&dpad(true, false, true, false), &record, mode);
        assert_eq!((report.z, report.rz), (AXIS_LOW, AXIS_LOW));
        assert_eq!((report.x, report.y), (AXIS_CENTER, AXIS_CENTER));

        let report = translate(&dpad(false, true, false, true), &record, mode);
        assert_eq!((report.z, report.rz), (AXIS_HIGH, AXIS_HIGH));
    }

    #[test]
    fn test_translation_is_deterministic() {
        let record = MappingRecord::factory_default();
        let mode = RuntimeMode::BOOT;
        let mut sample = press(&[PhysicalButton::A, PhysicalButton::R]);
        sample.dpad.left = true;

        let first = translate(&sample, &record, mode);
        let second = translate(&sample, &record, mode);
        assert_eq!(first, second);
    }
}
