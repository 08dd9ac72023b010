//! Hold-to-trigger gesture detection, advanced once per polling cycle.

/// Cycles Start+R must be held to toggle the active table.
///
/// 250 ticks of the 4 ms polling cycle, about one second.
pub const TABLE_TOGGLE_HOLD_TICKS: u16 = 250;

/// Cycles Start+L must be held to cycle the directional mode.
pub const DIRECTIONAL_HOLD_TICKS: u16 = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum HoldState {
    /// Combo not held.
    Idle,
    /// Combo held for this many consecutive cycles so far.
    Holding(u16),
    /// Threshold reached this cycle; the action fires exactly once here.
    Triggered,
    /// Fired; ignore the combo until every button is released.
    AwaitingRelease,
}

/// Detects one hold-for-a-second combo without blocking the polling loop.
///
/// [`advance`](Self::advance) is called every cycle with whether the combo
/// is currently held and returns `true` on exactly the cycle the hold
/// reaches the threshold. Releasing the combo at any point re-arms the
/// detector, so keeping the buttons down never repeats the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldGesture {
    threshold: u16,
    state: HoldState,
}

impl HoldGesture {
    /// Detector that fires after `threshold` consecutive held cycles.
    #[must_use]
    pub const fn new(threshold: u16) -> Self {
        Self {
            threshold,
            state: HoldState::Idle,
        }
    }

    /// Advance one polling cycle. Returns `true` when the gesture fires.
    pub fn advance(&mut self, combo_held: bool) -> bool {
        match self.state {
            HoldState::Idle => {
                if combo_held {
                    if self.threshold <= 1 {
                        self.state = HoldState::Triggered;
                        return true;
                    }
                    self.state = HoldState::Holding(1);
                }
                false
            }
            HoldState::Holding(ticks) => {
                if !combo_held {
                    self.state = HoldState::Idle;
                    return false;
                }
                let ticks = ticks + 1;
                if ticks >= self.threshold {
                    self.state = HoldState::Triggered;
                    true
                } else {
                    self.state = HoldState::Holding(ticks);
                    false
                }
            }
            HoldState::Triggered => {
                self.state = if combo_held {
                    HoldState::AwaitingRelease
                } else {
                    HoldState::Idle
                };
                false
            }
            HoldState::AwaitingRelease => {
                if !combo_held {
                    self.state = HoldState::Idle;
                }
                false
            }
        }
    }
}
