//! Session lifecycle states and the control enablement derived from them.

use std::fmt;

/// Lifecycle of a single session attempt.
///
/// `Idle -> Connecting -> Connected -> Disconnecting -> Idle`, with
/// `Connecting -> Idle` on failure and `Connecting -> Disconnecting -> Idle`
/// when the operator cancels a pending join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnecting,
}

impl SessionState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnecting => "disconnecting",
        }
    }

    /// Enablement of the operator controls in this state.
    #[must_use]
    pub fn controls(self) -> ControlState {
        let idle = self == Self::Idle;
        ControlState {
            identity_enabled: idle,
            name_enabled: idle,
            connect_enabled: idle,
            disconnect_enabled: matches!(self, Self::Connecting | Self::Connected),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which operator inputs are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub identity_enabled: bool,
    pub name_enabled: bool,
    pub connect_enabled: bool,
    pub disconnect_enabled: bool,
}
