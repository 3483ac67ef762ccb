//! Hysteresis state machine turning the hero's visible ratio into an
//! intensity regime.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum VisibilityState {
    #[default]
    Full,
    Reduced,
    Frozen,
}

impl VisibilityState {
    /// Next regime for a visibility `ratio` in \[0, 1\].
    ///
    /// Entering and leaving each regime use different thresholds, so a ratio
    /// hovering around one boundary does not flicker between states. The only
    /// multi-step moves are Full -> Frozen and Frozen -> Full.
    pub fn next(self, ratio: f32) -> Self {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self {
            VisibilityState::Full => {
                if ratio < VIS_FROZEN_ENTER {
                    VisibilityState::Frozen
                } else if ratio < VIS_FULL_EXIT {
                    VisibilityState::Reduced
                } else {
                    VisibilityState::Full
                }
            }
            VisibilityState::Reduced => {
                if ratio >= VIS_FULL_ENTER {
                    VisibilityState::Full
                } else if ratio < VIS_FROZEN_ENTER {
                    VisibilityState::Frozen
                } else {
                    VisibilityState::Reduced
                }
            }
            VisibilityState::Frozen => {
                if ratio >= VIS_FULL_ENTER {
                    VisibilityState::Full
                } else if ratio >= VIS_FROZEN_EXIT {
                    VisibilityState::Reduced
                } else {
                    VisibilityState::Frozen
                }
            }
        }
    }

    pub fn intensity(self) -> f32 {
        match self {
            VisibilityState::Full => INTENSITY_FULL,
            VisibilityState::Reduced => INTENSITY_REDUCED,
            VisibilityState::Frozen => INTENSITY_FROZEN,
        }
    }

    /// Frozen suppresses every new trigger.
    #[inline]
    pub fn allows_triggers(self) -> bool {
        self != VisibilityState::Frozen
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisibilityState::Full => "full",
            VisibilityState::Reduced => "reduced",
            VisibilityState::Frozen => "frozen",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTransition {
    pub from: VisibilityState,
    pub to: VisibilityState,
}

/// Tracks the current regime and the last ratio that fed it.
#[derive(Clone, Debug)]
pub struct VisibilityMachine {
    state: VisibilityState,
    last_ratio: f32,
}

impl Default for VisibilityMachine {
    /// Starts fully visible.
    fn default() -> Self {
        Self::new(VisibilityState::Full)
    }
}

impl VisibilityMachine {
    pub fn new(initial: VisibilityState) -> Self {
        Self {
            state: initial,
            last_ratio: 1.0,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn last_ratio(&self) -> f32 {
        self.last_ratio
    }

    /// Feed one visibility update. Returns the transition, if any.
    pub fn update(&mut self, ratio: f32) -> Option<VisibilityTransition> {
        self.last_ratio = ratio;
        let next = self.state.next(ratio);
        if next == self.state {
            return None;
        }
        let t = VisibilityTransition {
            from: self.state,
            to: next,
        };
        self.state = next;
        log::info!(
            "[visibility] {} -> {} (ratio {:.2})",
            t.from.as_str(),
            t.to.as_str(),
            ratio
        );
        Some(t)
    }
}
