use crate::config::Keybind;
use crate::models::{GeometryChange, Rect, Timestamp, WindowHandle};
use serde::{Deserialize, Serialize};

/// Client messages nyla sends through `WM_PROTOCOLS`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    TakeFocus,
    DeleteWindow,
}

/// These are requests from the window manager.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DisplayAction {
    /// Start receiving focus, enter and property notifications for a window.
    Subscribe(WindowHandle),

    /// Grant a map request.
    MapWindow(WindowHandle),

    /// Move, resize or change the border of a window. Only the `Some` fields are sent.
    Configure(GeometryChange),

    /// Tell a window where it is when the server will not do so itself.
    SendConfigureNotify {
        handle: WindowHandle,
        rect: Rect,
        border_width: u32,
    },

    SetBorderColor(WindowHandle, u32),

    /// Give raw input focus to a window (or the root).
    SetInputFocus(WindowHandle, Timestamp),

    SendProtocol(WindowHandle, Protocol, Timestamp),

    /// Forcefully disconnect a client that cannot be asked to close.
    KillClient(WindowHandle),

    /// Replace the grabbed key combinations.
    ReloadKeyGrabs(Vec<Keybind>),
}
