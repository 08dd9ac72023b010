//! GPIO switch sampling.

use embassy_rp::gpio::Input;
use mapping_proto::{PhysicalButton, NUM_BUTTONS};
use remap_core::{ButtonSet, Dpad, SwitchSample};

/// The twelve switch inputs, wired active-low with pull-ups enabled.
pub struct SwitchBank {
    buttons: [Input<'static>; NUM_BUTTONS],
    up: Input<'static>,
    down: Input<'static>,
    left: Input<'static>,
    right: Input<'static>,
}

impl SwitchBank {
    /// Bundle the configured inputs. `buttons` follows [`PhysicalButton`]
    /// order: A, B, X, Y, L, R, Start, Select.
    pub fn new(
        buttons: [Input<'static>; NUM_BUTTONS],
        up: Input<'static>,
        down: Input<'static>,
        left: Input<'static>,
        right: Input<'static>,
    ) -> Self {
        Self {
            buttons,
            up,
            down,
            left,
            right,
        }
    }

    /// Snapshot every switch. A low pin reads as pressed.
    pub fn sample(&self) -> SwitchSample {
        let mut buttons = ButtonSet::EMPTY;
        for (button, input) in PhysicalButton::ALL.iter().zip(self.buttons.iter()) {
            buttons.set(*button, input.is_low());
        }
        SwitchSample {
            buttons,
            dpad: Dpad {
                up: self.up.is_low(),
                down: self.down.is_low(),
                left: self.left.is_low(),
                right: self.right.is_low(),
            },
        }
    }
}
