//! Mapping from raised-finger counts to home-automation actions.

use std::fmt;

/// Closed set of actions the raised-finger count can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureAction {
    /// Count 0: closed fist
    LightOff,
    /// Count 1
    FanOn,
    /// Count 4
    FanOff,
    /// Count 5: open hand
    LightOn,
    /// Counts 2 and 3 carry no action
    Unspecified,
}

impl GestureAction {
    /// Map a raised-finger count to an action. Pure and total; any count
    /// outside the four assigned values yields [`GestureAction::Unspecified`].
    #[must_use]
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::LightOff,
            1 => Self::FanOn,
            4 => Self::FanOff,
            5 => Self::LightOn,
            _ => Self::Unspecified,
        }
    }

    /// True if this action should be emitted (i.e. not `Unspecified`)
    #[must_use]
    pub fn is_actionable(self) -> bool {
        !matches!(self, Self::Unspecified)
    }

    /// Human-readable label shown on the display
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LightOff => "Light OFF",
            Self::FanOn => "Fan ON",
            Self::FanOff => "Fan OFF",
            Self::LightOn => "Light ON",
            Self::Unspecified => "Unknown Gesture",
        }
    }
}

impl fmt::Display for GestureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
