//! The 7-byte gamepad input report sent to the host.

/// Axis value for a centered stick.
pub const AXIS_CENTER: u8 = 0x80;
/// Axis value at the low extreme (up or left).
pub const AXIS_LOW: u8 = 0x00;
/// Axis value at the high extreme (down or right).
pub const AXIS_HIGH: u8 = 0xFF;

/// Hat switch positions, clockwise from north.
pub const HAT_NORTH: u8 = 0;
pub const HAT_NORTH_EAST: u8 = 1;
pub const HAT_EAST: u8 = 2;
pub const HAT_SOUTH_EAST: u8 = 3;
pub const HAT_SOUTH: u8 = 4;
pub const HAT_SOUTH_WEST: u8 = 5;
pub const HAT_WEST: u8 = 6;
pub const HAT_NORTH_WEST: u8 = 7;
/// Out-of-range hat value the descriptor declares as the null state.
pub const HAT_NULL: u8 = 8;

/// One gamepad input report, matching the HID report descriptor.
///
/// Wire layout: `[buttons 0-7, buttons 8-13, hat, x, y, z, rz]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadReport {
    /// Usage bitmaps: `buttons[0]` carries usages 1-8, `buttons[1]` 9-14.
    pub buttons: [u8; 2],
    pub hat: u8,
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub rz: u8,
}

impl PadReport {
    /// Report size on the wire, in bytes.
    pub const SIZE: usize = 7;

    /// Nothing pressed: no buttons, hat released, all axes centered.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: [0, 0],
            hat: HAT_NULL,
            x: AXIS_CENTER,
            y: AXIS_CENTER,
            z: AXIS_CENTER,
            rz: AXIS_CENTER,
        }
    }

    /// Serialize to the wire layout.
    ///
    /// Only the low nibble of the hat is sent; the upper descriptor bits
    /// are constant padding.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; Self::SIZE] {
        [
            self.buttons[0],
            self.buttons[1],
            self.hat & 0x0F,
            self.x,
            self.y,
            self.z,
            self.rz,
        ]
    }
}

impl Default for PadReport {
    fn default() -> Self {
        Self::neutral()
    }
}
