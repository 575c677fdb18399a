use crate::command::Command;
use crate::utils::modmask_lookup::ModMask;
use crate::utils::xkeysym_lookup::XKeysym;
use serde::{Deserialize, Serialize};

/// A key combination bound to a command.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Keybind {
    pub command: Command,
    pub modifier: ModMask,
    pub key: XKeysym,
}

/// Border pixel values for the three highlight states.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderColors {
    pub none: u32,
    pub active: u32,
    pub follow: u32,
}

impl Default for BorderColors {
    fn default() -> Self {
        Self {
            none: 0x00_00_00,
            active: 0x95_A3_B3,
            follow: 0x84_DC_C6,
        }
    }
}

pub trait Config {
    /// Returns a collection of bindings with the mod key mapped.
    fn mapped_bindings(&self) -> Vec<Keybind>;

    fn stack_count(&self) -> usize {
        9
    }

    /// Rows reserved at the top of the screen for an external status line.
    fn status_bar_height(&self) -> u32 {
        20
    }

    fn layout_padding(&self) -> u32 {
        2
    }

    /// Inset of a client's transient windows within the client.
    fn subwindow_margin(&self) -> u32 {
        20
    }

    fn border_width(&self) -> u32 {
        2
    }

    fn border_colors(&self) -> BorderColors {
        BorderColors::default()
    }

    /// Repeated close requests within this window are dropped.
    fn close_debounce_ms(&self) -> u32 {
        100
    }

    /// How close pointer motion has to be to an enter event for it to move focus.
    fn pointer_follow_window_ms(&self) -> u32 {
        3
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct TestConfig {
    pub bindings: Vec<Keybind>,
}

#[cfg(test)]
impl Config for TestConfig {
    fn mapped_bindings(&self) -> Vec<Keybind> {
        self.bindings.clone()
    }
}
