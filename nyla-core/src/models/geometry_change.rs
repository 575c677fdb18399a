use super::{Rect, WindowHandle};
use serde::{Deserialize, Serialize};

/// The fields of a window's geometry that need to be sent to the display server.
/// Fields left as `None` keep their current value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeometryChange {
    pub handle: WindowHandle,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub border_width: Option<u32>,
}

impl GeometryChange {
    /// Diffs the last applied geometry against the wanted one.
    #[must_use]
    pub fn between(handle: WindowHandle, old: (Rect, u32), new: (Rect, u32)) -> Self {
        fn changed<T: PartialEq>(old: T, new: T) -> Option<T> {
            (old != new).then_some(new)
        }
        let ((old_rect, old_border), (new_rect, new_border)) = (old, new);
        Self {
            handle,
            x: changed(old_rect.x, new_rect.x),
            y: changed(old_rect.y, new_rect.y),
            width: changed(old_rect.width, new_rect.width),
            height: changed(old_rect.height, new_rect.height),
            border_width: changed(old_border, new_border),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.border_width.is_none()
    }

    /// Whether the server will send a real configure notification on its own.
    #[must_use]
    pub const fn resizes(&self) -> bool {
        self.width.is_some() || self.height.is_some() || self.border_width.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_changed_fields_are_kept() {
        let handle = WindowHandle(7);
        let change = GeometryChange::between(
            handle,
            (Rect::new(0, 0, 100, 100), 2),
            (Rect::new(5, 0, 100, 100), 2),
        );
        assert_eq!(change.x, Some(5));
        assert!(change.y.is_none() && change.width.is_none() && change.border_width.is_none());
        assert!(!change.resizes());
        assert!(!change.is_empty());
    }

    #[test]
    fn border_changes_count_as_resizes() {
        let rect = Rect::new(0, 0, 100, 100);
        let change = GeometryChange::between(WindowHandle(7), (rect, 0), (rect, 2));
        assert!(change.resizes());
        assert!(GeometryChange::between(WindowHandle(7), (rect, 2), (rect, 2)).is_empty());
    }
}
