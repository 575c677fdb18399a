use crate::config::Config;
use crate::display_action::{DisplayAction, Protocol};
use crate::display_servers::DisplayServer;
use crate::models::{CURRENT_TIME, Manager, StackId, Timestamp, WindowHandle};
use crate::state::State;

impl State {
    /// Re-assert input focus for the stack's active window, or the root if there is none.
    pub fn activate(&mut self, stack: StackId, time: Timestamp) {
        let active = self.stacks[stack].active_window;
        let Some(client) = active.and_then(|h| self.clients.get(&h)) else {
            self.actions
                .push_back(DisplayAction::SetInputFocus(self.root, time));
            self.last_entered = None;
            return;
        };
        self.border_dirty = true;
        // Clients that only take focus through WM_TAKE_FOCUS must not get raw input focus.
        let recipient = if client.wants_input_hint {
            client.handle
        } else {
            self.root
        };
        self.actions
            .push_back(DisplayAction::SetInputFocus(recipient, time));
        if client.supports_take_focus {
            self.actions.push_back(DisplayAction::SendProtocol(
                client.handle,
                Protocol::TakeFocus,
                time,
            ));
        }
    }

    /// Make `handle` the stack's active window and focus it.
    pub fn activate_window(
        &mut self,
        stack: StackId,
        handle: Option<WindowHandle>,
        time: Timestamp,
    ) {
        let current = self.stacks[stack].active_window;
        if current != handle {
            if let Some(old) = current.filter(|w| self.is_tracked(*w)) {
                self.actions
                    .push_back(DisplayAction::SetBorderColor(old, self.border_colors.none));
            }
            self.stacks[stack].active_window = handle;
            self.border_dirty = true;
        }
        self.activate(stack, time);
    }

    /// Focus follows the pointer, but only when the enter was caused by the user moving it.
    pub(crate) fn activate_under_pointer(&mut self, time: Timestamp) {
        let stack = self.active_stack();
        if stack.zoomed || self.follow {
            return;
        }
        let Some(entered) = self.last_entered else {
            return;
        };
        if entered == self.root || Some(entered) == stack.active_window {
            return;
        }
        // Windows rearranged under a still pointer produce enters without motion.
        if self.last_motion < time || self.last_motion - time > self.pointer_follow_window {
            return;
        }
        if self.is_tracked(entered) {
            self.activate_window(self.active_stack, Some(entered), time);
        }
    }
}

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// A client took focus on its own. Give it back to the active window unless the new
    /// holder is a dialog belonging to it.
    pub(crate) fn check_focus_theft(&mut self) {
        // The server has to see our own focus requests before we ask it.
        self.execute_actions();
        let focused = match self.display_server.input_focus() {
            Ok(focused) => focused,
            Err(err) => {
                tracing::error!(error = ?err, "Could not query the input focus.");
                return;
            }
        };
        let Some(mut focused) = focused.filter(|w| !w.is_none() && *w != self.state.root) else {
            return;
        };
        let active = self.state.active_stack().active_window;
        if Some(focused) == active {
            return;
        }

        // Toolkits like to focus a child of their top-level window.
        while !self.state.is_tracked(focused) {
            match self.display_server.parent(focused) {
                Ok(Some(parent)) if !parent.is_none() && parent != self.state.root => {
                    focused = parent;
                }
                Ok(_) => return self.reassert_focus(focused),
                Err(err) => {
                    tracing::debug!(window = %focused, error = ?err, "Lost track of focused window.");
                    return self.reassert_focus(focused);
                }
            }
        }
        if Some(focused) == active {
            return;
        }

        let owner = self.state.clients.get(&focused).and_then(|c| c.transient_owner);
        let active_owner = active
            .and_then(|a| self.state.clients.get(&a))
            .and_then(|c| c.transient_owner);
        if owner.is_some() && (owner == active || owner == active_owner) {
            return;
        }
        self.reassert_focus(focused);
    }

    fn reassert_focus(&mut self, thief: WindowHandle) {
        tracing::debug!(window = %thief, "focus stolen, restoring the active window");
        self.state.activate(self.state.active_stack, CURRENT_TIME);
    }
}
