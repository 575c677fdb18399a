use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the display server issued for a window.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u32);

impl WindowHandle {
    /// The "no window" value used by the X protocol.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u32> for WindowHandle {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
