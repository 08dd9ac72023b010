//! Identities shared by the stored record and the runtime: physical buttons,
//! table selection, and the logical usage codes.

/// Number of wired physical buttons, and entries per mapping table.
pub const NUM_BUTTONS: usize = 8;

/// One of the eight wired button inputs.
///
/// The discriminant is the index into a mapping table. It is part of the
/// stored record format and must never be renumbered.
///
/// # Example
///
/// ```
/// use mapping_proto::PhysicalButton;
///
/// assert_eq!(PhysicalButton::A.index(), 0);
/// assert_eq!(PhysicalButton::from_index(7), Some(PhysicalButton::Select));
/// assert_eq!(PhysicalButton::from_index(8), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PhysicalButton {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    L = 4,
    R = 5,
    Start = 6,
    Select = 7,
}

impl PhysicalButton {
    /// All buttons in table-index order.
    pub const ALL: [Self; NUM_BUTTONS] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::L,
        Self::R,
        Self::Start,
        Self::Select,
    ];

    /// Mapping-table index of this button.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Button for a raw table index; `None` when out of range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_BUTTONS {
            Some(Self::ALL[index])
        } else {
            None
        }
    }
}

/// Which of the record's two mapping tables drives translation.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveTable {
    /// The table at record offset 8; selected at power-on.
    #[default]
    Normal,
    /// The alternate table at record offset 24.
    Special,
}

impl ActiveTable {
    /// The other table.
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Special,
            Self::Special => Self::Normal,
        }
    }
}

/// Logical usage codes stored in mapping-table entries.
///
/// A table entry is [`NONE`](usage::NONE) (button produces no effect) or a
/// code in `1..=`[`MAX`](usage::MAX) naming a gamepad action. Values above
/// `MAX` may be stored but translate to no effect.
pub mod usage {
    /// Entry is unmapped.
    pub const NONE: u8 = 0;
    pub const BUTTON_A: u8 = 1;
    pub const BUTTON_B: u8 = 2;
    pub const BUTTON_X: u8 = 3;
    pub const BUTTON_Y: u8 = 4;
    pub const BUTTON_L1: u8 = 5;
    pub const BUTTON_R1: u8 = 6;
    pub const BUTTON_SELECT: u8 = 7;
    pub const BUTTON_START: u8 = 8;
    pub const BUTTON_L2: u8 = 9;
    pub const BUTTON_R2: u8 = 10;
    pub const BUTTON_HOME: u8 = 11;
    /// Right-stick click.
    pub const BUTTON_R_STICK: u8 = 12;
    /// Left-stick click.
    pub const BUTTON_L_STICK: u8 = 13;
    /// Highest code carrying a report bit; 14 itself is a reserved slot.
    pub const MAX: u8 = 14;
}
