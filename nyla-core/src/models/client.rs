use super::{PropertyKind, Rect, RequestToken, WindowHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cached metadata for one managed window.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub handle: WindowHandle,
    /// Last geometry actually sent to the display server.
    pub rect: Rect,
    pub border_width: u32,
    pub name: String,
    pub wants_input_hint: bool,
    pub supports_take_focus: bool,
    pub supports_delete: bool,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub urgent: bool,
    pub wants_configure_notify: bool,
    pub transient_owner: Option<WindowHandle>,
    pub subwindows: Vec<WindowHandle>,
    #[serde(skip)]
    pub pending_requests: HashMap<PropertyKind, RequestToken>,
}

impl Client {
    #[must_use]
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            rect: Rect::default(),
            border_width: 0,
            name: String::new(),
            // Matches what an absent WM_HINTS decodes to.
            wants_input_hint: true,
            supports_take_focus: false,
            supports_delete: false,
            max_width: None,
            max_height: None,
            urgent: false,
            wants_configure_notify: false,
            transient_owner: None,
            subwindows: vec![],
            pending_requests: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.transient_owner.is_some()
    }

    /// The name with everything outside printable ASCII removed.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .chars()
            .filter(|c| (' '..='\u{7f}').contains(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_drops_control_and_non_ascii_characters() {
        let mut client = Client::new(WindowHandle(1));
        client.name = "vim\t– main.rs\n".to_owned();
        assert_eq!(client.display_name(), "vim main.rs");
    }
}
