//! Everything nyla knows about the windows it manages.
use crate::config::{BorderColors, Config};
use crate::display_action::DisplayAction;
use crate::models::{Client, Rect, Stack, StackId, Timestamp, WindowHandle};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt::Write;

#[derive(Serialize, Deserialize, Debug)]
pub struct State {
    pub stacks: Vec<Stack>,
    pub active_stack: StackId,
    pub clients: HashMap<WindowHandle, Client>,
    /// Mapped windows that are not yet placed in a stack or under an owner.
    pub pending_windows: Vec<WindowHandle>,
    pub layout_dirty: bool,
    pub border_dirty: bool,
    /// Focus, and the active window itself on stack switches, travel with the user.
    pub follow: bool,
    pub last_entered: Option<WindowHandle>,
    pub last_motion: Timestamp,
    pub last_close: Option<Timestamp>,
    pub actions: VecDeque<DisplayAction>,
    pub root: WindowHandle,
    pub screen: Rect,
    pub status_bar_height: u32,
    pub layout_padding: u32,
    pub subwindow_margin: u32,
    pub border_width: u32,
    pub border_colors: BorderColors,
    pub close_debounce: Timestamp,
    pub pointer_follow_window: Timestamp,
}

impl State {
    pub(crate) fn new(config: &impl Config, root: WindowHandle, screen: Rect) -> Self {
        Self {
            stacks: vec![Stack::default(); config.stack_count().max(1)],
            active_stack: 0,
            clients: HashMap::new(),
            pending_windows: vec![],
            layout_dirty: false,
            border_dirty: false,
            follow: false,
            last_entered: None,
            last_motion: 0,
            last_close: None,
            actions: VecDeque::new(),
            root,
            screen,
            status_bar_height: config.status_bar_height(),
            layout_padding: config.layout_padding(),
            subwindow_margin: config.subwindow_margin(),
            border_width: config.border_width(),
            border_colors: config.border_colors(),
            close_debounce: config.close_debounce_ms(),
            pointer_follow_window: config.pointer_follow_window_ms(),
        }
    }

    #[must_use]
    pub fn active_stack(&self) -> &Stack {
        &self.stacks[self.active_stack]
    }

    pub fn active_stack_mut(&mut self) -> &mut Stack {
        &mut self.stacks[self.active_stack]
    }

    /// The stack whose window list holds `handle`.
    #[must_use]
    pub fn stack_of(&self, handle: WindowHandle) -> Option<StackId> {
        self.stacks.iter().position(|s| s.contains(handle))
    }

    #[must_use]
    pub fn is_tracked(&self, handle: WindowHandle) -> bool {
        self.clients.contains_key(&handle)
    }

    /// One line for an external status bar: the active window's title, or the stack number
    /// when the stack is empty.
    #[must_use]
    pub fn status_text(&self) -> String {
        let mut text = match self.active_stack().active_window {
            None => format!("nyla {}", self.active_stack + 1),
            Some(handle) => match self.clients.get(&handle) {
                Some(client) => client.display_name(),
                None => format!("invalid {handle}"),
            },
        };
        let urgent: Vec<String> = self
            .stacks
            .iter()
            .enumerate()
            .filter(|(id, stack)| *id != self.active_stack && self.holds_urgent(stack))
            .map(|(id, _)| (id + 1).to_string())
            .collect();
        if !urgent.is_empty() {
            _ = write!(text, " [urgent: {}]", urgent.join(" "));
        }
        text
    }

    fn holds_urgent(&self, stack: &Stack) -> bool {
        stack
            .windows
            .iter()
            .filter_map(|w| self.clients.get(w))
            .flat_map(|c| std::iter::once(c.handle).chain(c.subwindows.iter().copied()))
            .filter_map(|w| self.clients.get(&w))
            .any(|c| c.urgent)
    }

    /// Multi-line description of every stack and client, for debugging.
    #[must_use]
    pub fn dump_clients(&self) -> String {
        let mut out = String::new();
        _ = writeln!(out, "follow: {}", self.follow);
        for (id, stack) in self.stacks.iter().enumerate() {
            if stack.windows.is_empty() && id != self.active_stack {
                continue;
            }
            let marker = if id == self.active_stack { "*" } else { " " };
            _ = writeln!(
                out,
                "{marker}stack {}: layout={} zoomed={} active={}",
                id + 1,
                stack.layout,
                stack.zoomed,
                stack.active_window.map_or_else(|| "none".to_owned(), |w| w.to_string()),
            );
        }
        let mut clients: Vec<&Client> = self.clients.values().collect();
        clients.sort_by_key(|c| c.handle);
        for client in clients {
            _ = writeln!(
                out,
                "  {} {:?} rect={} border={} input={} take_focus={} delete={} urgent={} owner={} subwindows={:?}",
                client.handle,
                client.name,
                client.rect,
                client.border_width,
                client.wants_input_hint,
                client.supports_take_focus,
                client.supports_delete,
                client.urgent,
                client.transient_owner.map_or_else(|| "none".to_owned(), |w| w.to_string()),
                client.subwindows,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;

    fn state() -> State {
        State::new(&TestConfig::default(), WindowHandle(1), Rect::new(0, 0, 1920, 1080))
    }

    fn track(state: &mut State, stack: StackId, handle: u32, name: &str) -> WindowHandle {
        let handle = WindowHandle(handle);
        let mut client = Client::new(handle);
        client.name = name.to_owned();
        state.clients.insert(handle, client);
        state.stacks[stack].windows.push(handle);
        handle
    }

    #[test]
    fn a_new_state_has_nine_empty_stacks() {
        let state = state();
        assert_eq!(state.stacks.len(), 9);
        assert!(state.stacks.iter().all(|s| s.windows.is_empty()));
        assert_eq!(state.active_stack, 0);
    }

    #[test]
    fn status_text_names_the_stack_when_nothing_is_active() {
        let mut state = state();
        state.active_stack = 4;
        assert_eq!(state.status_text(), "nyla 5");
    }

    #[test]
    fn status_text_shows_the_active_window_title() {
        let mut state = state();
        let w = track(&mut state, 0, 10, "mutt\x07");
        state.stacks[0].active_window = Some(w);
        assert_eq!(state.status_text(), "mutt");

        state.stacks[0].active_window = Some(WindowHandle(0xdead));
        assert_eq!(state.status_text(), "invalid 0xdead");
    }

    #[test]
    fn status_text_lists_other_stacks_with_urgent_windows() {
        let mut state = state();
        let w = track(&mut state, 2, 10, "irc");
        state.clients.get_mut(&w).unwrap().urgent = true;
        let own = track(&mut state, 0, 11, "editor");
        state.clients.get_mut(&own).unwrap().urgent = true;
        assert_eq!(state.status_text(), "nyla 1 [urgent: 3]");
    }

    #[test]
    fn dump_lists_every_client() {
        let mut state = state();
        track(&mut state, 0, 10, "a");
        track(&mut state, 1, 11, "b");
        let dump = state.dump_clients();
        assert!(dump.contains("*stack 1"));
        assert!(dump.contains(" stack 2"));
        assert!(dump.contains("0xa \"a\""));
        assert!(dump.contains("0xb \"b\""));
    }

    #[test]
    fn status_and_dump_follow_the_managed_windows() {
        use crate::handlers::test_support::{map, tick};
        use crate::models::{Manager, PropertyKind, PropertyReply, PropertyType};

        let mut manager = Manager::new_test(vec![]);
        let (irc, editor) = (WindowHandle(10), WindowHandle(11));
        let properties = &mut manager.display_server.properties;
        properties.insert(
            (irc, PropertyKind::Name),
            PropertyReply::new(PropertyType::Text, 8, b"irc".to_vec()),
        );
        properties.insert(
            (irc, PropertyKind::Capabilities),
            PropertyReply::from_u32s(PropertyType::WmHints, &[1 << 8, 0, 0, 0, 0, 0, 0, 0, 0]),
        );
        properties.insert(
            (editor, PropertyKind::Name),
            PropertyReply::new(PropertyType::Text, 8, b"editor".to_vec()),
        );
        map(&mut manager, irc);
        tick(&mut manager);
        manager.state.goto_stack(1, 0);
        map(&mut manager, editor);
        tick(&mut manager);

        assert_eq!(manager.state.status_text(), "editor [urgent: 1]");
        let dump = manager.state.dump_clients();
        assert!(dump.contains(" stack 1:"));
        assert!(dump.contains("*stack 2:"));
        assert!(dump.contains("active=0xb"));
        assert!(dump.contains("0xa \"irc\" rect=1916x1056+1920+1080 border=2"));
        assert!(dump.contains("urgent=true"));
        assert!(dump.contains("0xb \"editor\" rect=1916x1056+0+20"));
    }
}
