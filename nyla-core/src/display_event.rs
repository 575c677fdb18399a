use crate::models::{GeometryChange, PropertyKind, Timestamp, WindowHandle};
use crate::utils::modmask_lookup::ModMask;
use crate::utils::xkeysym_lookup::XKeysym;
use serde::{Deserialize, Serialize};

/// Whether a focus change came from a real focus request or from a keyboard grab.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMode {
    Normal,
    Grab,
}

/// Notifications from the display server, already filtered down to what nyla reacts to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    KeyCombo(ModMask, XKeysym, Timestamp),
    /// The keyboard mapping changed, key grabs need to be redone.
    KeyGrabReload,
    ConfigureRequest(GeometryChange),
    MapRequest(WindowHandle),
    Mapped {
        handle: WindowHandle,
        override_redirect: bool,
    },
    Unmapped(WindowHandle),
    Destroyed(WindowHandle),
    PropertyChanged(WindowHandle, PropertyKind),
    FocusIn(WindowHandle, FocusMode),
    /// The pointer entered a window.
    Entered(WindowHandle, Timestamp),
    /// The pointer physically moved.
    RawMotion(Timestamp),
    ProtocolError(String),
}
