//! Debounce-free snapshots of the physical switches: ButtonSet, Dpad, SwitchSample.

use mapping_proto::PhysicalButton;

/// Pressed-state of the eight mappable buttons as a bitfield.
///
/// Bit positions follow [`PhysicalButton`] indices, so bit 0 is A and
/// bit 7 is Select.
///
/// # Example
///
/// ```
/// use mapping_proto::PhysicalButton;
/// use remap_core::ButtonSet;
///
/// let mut buttons = ButtonSet::EMPTY;
/// buttons.set(PhysicalButton::A, true);
/// buttons.set(PhysicalButton::Start, true);
/// assert!(buttons.contains(PhysicalButton::A));
/// assert!(!buttons.contains(PhysicalButton::B));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(pub u8);

impl ButtonSet {
    /// No buttons pressed.
    pub const EMPTY: Self = Self(0);

    /// Check if the given button is pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: PhysicalButton) -> bool {
        (self.0 >> button.index()) & 1 != 0
    }

    /// Press or release a button.
    #[inline]
    pub fn set(&mut self, button: PhysicalButton, pressed: bool) {
        if pressed {
            self.0 |= 1 << button.index();
        } else {
            self.0 &= !(1 << button.index());
        }
    }

    /// Get the raw u8 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Pressed-state of the four directional switches.
///
/// The pad is mechanical, so opposing directions can be held at once;
/// translation resolves those conflicts, not sampling.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dpad {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Dpad {
    /// No direction held.
    pub const RELEASED: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Check if any direction is held.
    #[inline]
    #[must_use]
    pub const fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// One polling-cycle snapshot of every physical switch.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchSample {
    pub buttons: ButtonSet,
    pub dpad: Dpad,
}

impl SwitchSample {
    /// Nothing pressed.
    pub const RELEASED: Self = Self {
        buttons: ButtonSet::EMPTY,
        dpad: Dpad::RELEASED,
    };

    /// Check if both buttons of a gesture combo are held this cycle.
    #[inline]
    #[must_use]
    pub const fn combo_held(&self, a: PhysicalButton, b: PhysicalButton) -> bool {
        self.buttons.contains(a) && self.buttons.contains(b)
    }
}
