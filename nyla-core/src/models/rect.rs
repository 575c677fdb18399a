//! Window and screen geometry.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position and size of a window. x,y from top left, size excludes the border.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrinks both axes by twice `padding`. The origin stays put: the border drawn around
    /// the window fills the freed space.
    ///
    /// Returns the rect unchanged if the result would not have a positive area.
    #[must_use]
    pub const fn try_apply_padding(self, padding: u32) -> Self {
        match padding.checked_mul(2) {
            Some(both) if self.width > both && self.height > both => {
                Self::new(self.x, self.y, self.width - both, self.height - both)
            }
            _ => self,
        }
    }

    /// Insets every side by `margin`.
    ///
    /// Returns the rect unchanged if the result would not have a positive area.
    #[must_use]
    pub const fn try_apply_margin(self, margin: u32) -> Self {
        match margin.checked_mul(2) {
            Some(both) if self.width > both && self.height > both => Self::new(
                self.x.saturating_add_unsigned(margin),
                self.y.saturating_add_unsigned(margin),
                self.width - both,
                self.height - both,
            ),
            _ => self,
        }
    }

    /// Reserves `margin` rows at the top, e.g. for a status line.
    #[must_use]
    pub const fn try_apply_margin_top(self, margin: u32) -> Self {
        if self.height > margin {
            Self::new(
                self.x,
                self.y.saturating_add_unsigned(margin),
                self.width,
                self.height - margin,
            )
        } else {
            self
        }
    }

    /// Shrinks the rect to at most `max_width` x `max_height` and centers the result within
    /// the original area.
    #[must_use]
    pub fn center_within_max(self, max_width: Option<u32>, max_height: Option<u32>) -> Self {
        let mut rect = self;
        if let Some(max_width) = max_width.filter(|&w| w < rect.width) {
            rect.x += ((rect.width - max_width) / 2) as i32;
            rect.width = max_width;
        }
        if let Some(max_height) = max_height.filter(|&h| h < rect.height) {
            rect.y += ((rect.height - max_height) / 2) as i32;
            rect.height = max_height;
        }
        rect
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
