use super::WindowHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a stack's windows are tiled.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutType {
    #[default]
    Columns,
    Rows,
    Grid,
}

impl LayoutType {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Columns => Self::Rows,
            Self::Rows => Self::Grid,
            Self::Grid => Self::Columns,
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Columns => "columns",
            Self::Rows => "rows",
            Self::Grid => "grid",
        };
        f.write_str(name)
    }
}

/// An independent workspace.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    /// Tiled members in order. Transient windows never appear here.
    pub windows: Vec<WindowHandle>,
    pub active_window: Option<WindowHandle>,
    pub layout: LayoutType,
    pub zoomed: bool,
}

impl Stack {
    #[must_use]
    pub fn position(&self, handle: WindowHandle) -> Option<usize> {
        self.windows.iter().position(|w| *w == handle)
    }

    #[must_use]
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.contains(&handle)
    }

    /// Removes `handle` from the window list. Returns whether it was there.
    pub fn remove(&mut self, handle: WindowHandle) -> bool {
        let Some(index) = self.position(handle) else {
            return false;
        };
        self.windows.remove(index);
        true
    }
}
