//! Runtime mode selected through hold gestures: active table and directional mode.

use mapping_proto::ActiveTable;

/// How the directional pad is presented to the host.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectionalMode {
    /// Directions drive the X/Y axes to their extremes.
    #[default]
    Analog,
    /// Directions drive the 8-way hat switch.
    HatSwitch,
    /// Directions drive the Z/Rz axes, leaving X/Y centered.
    TwinAxis,
}

impl DirectionalMode {
    /// The next mode in the fixed Analog -> HatSwitch -> TwinAxis cycle.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Analog => Self::HatSwitch,
            Self::HatSwitch => Self::TwinAxis,
            Self::TwinAxis => Self::Analog,
        }
    }
}

/// Volatile mode state owned by the polling loop.
///
/// Gestures mutate this; nothing here is persisted, so every boot starts
/// from [`RuntimeMode::BOOT`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuntimeMode {
    pub active_table: ActiveTable,
    pub directional: DirectionalMode,
}

impl RuntimeMode {
    /// Power-on state: normal table, analog directions.
    pub const BOOT: Self = Self {
        active_table: ActiveTable::Normal,
        directional: DirectionalMode::Analog,
    };

    /// Switch between the normal and special tables.
    #[inline]
    pub fn toggle_table(&mut self) {
        self.active_table = self.active_table.toggled();
    }

    /// Advance the directional mode one step through its cycle.
    #[inline]
    pub fn cycle_directional(&mut self) {
        self.directional = self.directional.next();
    }
}
