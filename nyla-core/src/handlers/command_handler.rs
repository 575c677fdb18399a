use crate::command::Command;
use crate::config::Config;
use crate::display_action::{DisplayAction, Protocol};
use crate::display_servers::DisplayServer;
use crate::models::{Manager, StackId, Timestamp};
use crate::state::State;
use crate::utils::child_process;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run a command bound to a key press that happened at `time`.
    pub fn command_handler(&mut self, command: &Command, time: Timestamp) {
        tracing::debug!(?command, "running command");
        match command {
            Command::Spawn(cmd) => self.spawn(cmd),
            Command::CloseActive => self.state.close_active(time),
            Command::NextLayout => self.state.next_layout(),
            Command::ToggleZoom => self.state.toggle_zoom(),
            Command::ToggleFollow => self.state.toggle_follow(),
            Command::MoveStack(delta) => self.state.move_stack(*delta, time),
            Command::GotoStack(stack) => self.state.goto_stack(*stack, time),
            Command::MoveLocal { delta, clears_zoom } => {
                self.state.move_local(*delta, *clears_zoom, time);
            }
            Command::Quit => self.quit(),
        }
    }

    pub fn spawn(&mut self, command: &str) {
        if let Err(err) = child_process::exec_shell(command, &mut self.children) {
            tracing::error!(error = ?err, command, "Unable to spawn.");
        }
    }
}

impl State {
    /// Switch to the stack `delta` positions away, wrapping around.
    pub fn move_stack(&mut self, delta: i32, time: Timestamp) {
        let count = self.stacks.len() as i64;
        let target = (self.active_stack as i64 + i64::from(delta)).rem_euclid(count);
        self.switch_stack(target as StackId, time);
    }

    pub fn goto_stack(&mut self, stack: StackId, time: Timestamp) {
        if stack >= self.stacks.len() {
            tracing::warn!(stack, "no such stack");
            return;
        }
        self.switch_stack(stack, time);
    }

    fn switch_stack(&mut self, target: StackId, time: Timestamp) {
        let old = self.active_stack;
        if target == old {
            return;
        }
        self.active_stack = target;
        let leaving = self.stacks[old].active_window;

        if self.follow {
            // The active window comes along.
            if let Some(window) = leaving.filter(|w| self.stacks[old].contains(*w)) {
                let from = &mut self.stacks[old];
                from.remove(window);
                from.active_window = from.windows.first().copied();
                from.zoomed = false;
                if let Some(previous) = self.stacks[target].active_window {
                    self.actions
                        .push_back(DisplayAction::SetBorderColor(previous, self.border_colors.none));
                }
                let to = &mut self.stacks[target];
                to.windows.push(window);
                to.active_window = Some(window);
                to.zoomed = false;
            }
        } else {
            if let Some(window) = leaving.filter(|w| self.is_tracked(*w)) {
                self.actions
                    .push_back(DisplayAction::SetBorderColor(window, self.border_colors.none));
            }
            let target_window = self.stacks[target].active_window;
            self.activate_window(target, target_window, time);
        }
        self.layout_dirty = true;
        self.border_dirty = true;
    }

    /// Cycle through the active stack. In follow mode the active window is moved instead.
    pub fn move_local(&mut self, delta: i32, clears_zoom: bool, time: Timestamp) {
        if clears_zoom {
            self.clear_zoom();
        }
        let id = self.active_stack;
        let stack = &self.stacks[id];
        let Some(&first) = stack.windows.first() else {
            return;
        };
        let Some(active) = stack.active_window else {
            if !self.follow {
                self.activate_window(id, Some(first), time);
            }
            return;
        };
        if stack.windows.len() < 2 {
            return;
        }
        let Some(index) = stack.position(active) else {
            return;
        };
        let count = stack.windows.len() as i64;
        let neighbor = (index as i64 + i64::from(delta)).rem_euclid(count) as usize;

        if self.follow {
            self.stacks[id].windows.swap(index, neighbor);
            self.layout_dirty = true;
        } else {
            let target = self.stacks[id].windows[neighbor];
            self.activate_window(id, Some(target), time);
            // A zoomed stack shows only the active window.
            if !clears_zoom {
                self.layout_dirty = true;
            }
        }
    }

    pub fn toggle_zoom(&mut self) {
        let stack = self.active_stack_mut();
        stack.zoomed = !stack.zoomed;
        self.layout_dirty = true;
        self.border_dirty = true;
    }

    /// Follow mode needs a tracked, top-level active window.
    pub fn toggle_follow(&mut self) {
        let eligible = self
            .active_stack()
            .active_window
            .and_then(|w| self.clients.get(&w))
            .is_some_and(|c| !c.is_transient());
        if !eligible {
            self.follow = false;
            self.border_dirty = true;
            return;
        }
        self.follow = !self.follow;
        if !self.follow {
            self.clear_zoom();
        }
        self.border_dirty = true;
    }

    pub fn next_layout(&mut self) {
        let stack = self.active_stack_mut();
        stack.layout = stack.layout.next();
        self.layout_dirty = true;
        self.clear_zoom();
    }

    /// Ask the active window to close. Repeats within the debounce window are dropped.
    pub fn close_active(&mut self, time: Timestamp) {
        let Some(active) = self.active_stack().active_window else {
            return;
        };
        let previous = self.last_close.replace(time);
        if previous.is_some_and(|last| time.wrapping_sub(last) < self.close_debounce) {
            tracing::debug!(window = %active, "ignoring repeated close");
            return;
        }
        let Some(client) = self.clients.get(&active) else {
            return;
        };
        let action = if client.supports_delete {
            DisplayAction::SendProtocol(active, Protocol::DeleteWindow, time)
        } else {
            DisplayAction::KillClient(active)
        };
        self.actions.push_back(action);
    }

    fn clear_zoom(&mut self) {
        let stack = self.active_stack_mut();
        if stack.zoomed {
            stack.zoomed = false;
            self.layout_dirty = true;
            self.border_dirty = true;
        }
    }
}
