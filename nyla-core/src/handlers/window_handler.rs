use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::{CURRENT_TIME, Client, Manager, PropertyKind, WindowHandle};
use crate::state::State;

/// Longest transient chain followed before the window is treated as top-level.
const MAX_TRANSIENT_HOPS: usize = 10;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Start tracking a newly mapped window. Placement happens at the end of the tick, once
    /// its properties are known.
    pub fn manage(&mut self, handle: WindowHandle) {
        if self.state.is_tracked(handle) {
            return;
        }
        tracing::debug!(window = %handle, "managing window");
        // Subscribe first so no property change slips in between the fetches.
        self.display_server.execute_action(DisplayAction::Subscribe(handle));
        self.state.clients.insert(handle, Client::new(handle));
        for kind in PropertyKind::ALL {
            self.request_property(handle, kind);
        }
        self.state.pending_windows.push(handle);
    }

    /// Forget a window that was unmapped or destroyed.
    pub fn unmanage(&mut self, handle: WindowHandle) {
        let Some(client) = self.state.clients.remove(&handle) else {
            return;
        };
        tracing::debug!(window = %handle, "unmanaging window");
        for token in client.pending_requests.values() {
            self.display_server.discard_property(*token);
        }
        self.state.forget_client(&client);
    }

    /// (Re)fetch one property of a tracked window, replacing an outstanding fetch of it.
    pub(crate) fn request_property(&mut self, handle: WindowHandle, kind: PropertyKind) {
        let Some(client) = self.state.clients.get_mut(&handle) else {
            return;
        };
        if let Some(stale) = client.pending_requests.remove(&kind) {
            self.display_server.discard_property(stale);
        }
        match self.display_server.request_property(handle, kind) {
            Some(token) => {
                client.pending_requests.insert(kind, token);
            }
            None => tracing::warn!(window = %handle, ?kind, "could not request property"),
        }
    }

    /// Collect every outstanding property reply and apply it.
    pub(crate) fn resolve_properties(&mut self) {
        let atoms = self.display_server.protocol_atoms();
        let State {
            clients,
            pending_windows,
            ..
        } = &mut self.state;
        for client in clients.values_mut() {
            if client.pending_requests.is_empty() {
                continue;
            }
            let awaiting_placement = pending_windows.contains(&client.handle);
            let mut requests: Vec<_> = client.pending_requests.drain().collect();
            requests.sort_unstable_by_key(|(_, token)| token.0);
            for (kind, token) in requests {
                let reply = self.display_server.resolve_property(token);
                kind.apply(client, reply.as_ref(), atoms, awaiting_placement);
            }
        }
    }
}

impl State {
    /// Drop every reference to a client that was just removed from the registry.
    pub(crate) fn forget_client(&mut self, client: &Client) {
        let handle = client.handle;
        self.pending_windows.retain(|w| *w != handle);

        if let Some(owner) = client.transient_owner {
            debug_assert!(
                client.subwindows.is_empty(),
                "transient window {handle} owns subwindows"
            );
            if let Some(owner) = self.clients.get_mut(&owner) {
                owner.subwindows.retain(|w| *w != handle);
            }
            self.layout_dirty = true;
        } else {
            // Orphans stay hidden until they are mapped again.
            for sub in &client.subwindows {
                if let Some(sub) = self.clients.get_mut(sub) {
                    sub.transient_owner = None;
                }
            }
        }

        let mut refocus = None;
        let mut listed = false;
        for (id, stack) in self.stacks.iter_mut().enumerate() {
            if stack.remove(handle) {
                listed = true;
                stack.zoomed = false;
            }
            if stack.active_window == Some(handle) {
                let fallback = client
                    .transient_owner
                    .or_else(|| stack.windows.first().copied());
                if id == self.active_stack {
                    stack.active_window = None;
                    refocus = Some(fallback);
                } else {
                    stack.active_window = fallback;
                }
            }
        }
        if listed {
            self.follow = false;
            self.layout_dirty = true;
        }
        if self.last_entered == Some(handle) {
            self.last_entered = None;
        }
        if let Some(fallback) = refocus {
            self.activate_window(self.active_stack, fallback, CURRENT_TIME);
        }
    }

    /// Place the windows mapped during this tick: top-level ones at the end of the active
    /// stack, transient ones under their owner.
    pub(crate) fn place_pending_windows(&mut self) {
        if self.pending_windows.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_windows);
        let active = self.active_stack().active_window;

        // Resolve every chain before rewriting any owner, so cycles are seen whole.
        let owners: Vec<_> = pending
            .iter()
            .map(|&handle| (handle, self.ultimate_owner(handle)))
            .collect();
        for (handle, owner) in owners {
            let Some(client) = self.clients.get_mut(&handle) else {
                continue;
            };
            client.transient_owner = owner;
            // A dialog of anything but the zoomed window must be visible.
            if owner.is_none() || owner != active {
                self.active_stack_mut().zoomed = false;
            }
        }

        let mut activated = false;
        for handle in pending {
            let Some(client) = self.clients.get(&handle) else {
                continue;
            };
            if let Some(owner) = client.transient_owner {
                if let Some(owner) = self.clients.get_mut(&owner) {
                    owner.subwindows.push(handle);
                }
                continue;
            }
            let stack = self.active_stack;
            self.stacks[stack].windows.push(handle);
            if !activated {
                activated = true;
                self.activate_window(stack, Some(handle), CURRENT_TIME);
            }
        }

        self.follow = false;
        self.layout_dirty = true;
    }

    /// Follows the transient chain of `handle` to its top-level ancestor. Chains that do not
    /// end within a few hops, or that lead to an untracked window, count as no owner.
    fn ultimate_owner(&self, handle: WindowHandle) -> Option<WindowHandle> {
        let mut owner = self.clients.get(&handle)?.transient_owner?;
        for _ in 0..MAX_TRANSIENT_HOPS {
            match self.clients.get(&owner)?.transient_owner {
                None => return Some(owner),
                Some(next) => owner = next,
            }
        }
        tracing::warn!(window = %handle, "transient chain does not end, treating window as top-level");
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::DisplayEvent;
    use crate::display_action::DisplayAction;
    use crate::handlers::test_support::*;
    use crate::models::{Manager, PropertyKind, PropertyReply, PropertyType, WindowHandle};

    #[test]
    fn mapping_a_window_twice_tracks_it_once() {
        let mut manager = Manager::new_test(vec![]);
        let w = WindowHandle(10);
        map(&mut manager, w);
        map(&mut manager, w);
        let actions = tick(&mut manager);
        assert_eq!(manager.state.clients.len(), 1);
        assert_eq!(manager.state.stacks[0].windows, vec![w]);
        let subscribes = actions
            .iter()
            .filter(|a| **a == DisplayAction::Subscribe(w))
            .count();
        assert_eq!(subscribes, 1);
    }

    #[test]
    fn override_redirect_windows_are_ignored() {
        let mut manager = Manager::new_test(vec![]);
        manager.display_server.events.push_back(DisplayEvent::Mapped {
            handle: WindowHandle(10),
            override_redirect: true,
        });
        tick(&mut manager);
        assert!(manager.state.clients.is_empty());
    }

    #[test]
    fn removing_the_active_window_activates_the_first_one() {
        let (mut manager, windows) = with_windows(3);
        manager.state.activate_window(0, Some(windows[2]), 0);
        tick(&mut manager);

        manager
            .display_server
            .events
            .push_back(DisplayEvent::Destroyed(windows[2]));
        let actions = tick(&mut manager);
        assert_eq!(manager.state.stacks[0].windows, &windows[..2]);
        assert_eq!(manager.state.stacks[0].active_window, Some(windows[0]));
        assert!(actions.contains(&DisplayAction::SetInputFocus(windows[0], 0)));
        assert!(!manager.state.is_tracked(windows[2]));
    }

    #[test]
    fn removing_the_active_window_leaves_zoom_and_follow_mode() {
        let (mut manager, windows) = with_windows(3);
        manager.state.activate_window(0, Some(windows[2]), 0);
        manager.state.toggle_follow();
        manager.state.toggle_zoom();
        tick(&mut manager);

        manager
            .display_server
            .events
            .push_back(DisplayEvent::Destroyed(windows[2]));
        tick(&mut manager);
        assert!(!manager.state.stacks[0].zoomed);
        assert!(!manager.state.follow);
        assert_eq!(manager.state.stacks[0].active_window, Some(windows[0]));
    }

    #[test]
    fn removing_an_active_dialog_gives_focus_back_to_its_owner() {
        let (mut manager, windows) = with_windows(2);
        let dialog = WindowHandle(20);
        transient_for(&mut manager, dialog, windows[1]);
        map(&mut manager, dialog);
        tick(&mut manager);
        manager.state.activate_window(0, Some(dialog), 0);
        tick(&mut manager);

        manager
            .display_server
            .events
            .push_back(DisplayEvent::Destroyed(dialog));
        let actions = tick(&mut manager);
        assert_eq!(manager.state.stacks[0].active_window, Some(windows[1]));
        assert!(actions.contains(&DisplayAction::SetInputFocus(windows[1], 0)));
    }

    #[test]
    fn removing_a_window_from_a_hidden_stack_does_not_move_focus() {
        let (mut manager, windows) = with_windows(2);
        manager.state.goto_stack(1, 0);
        tick(&mut manager);

        manager
            .display_server
            .events
            .push_back(DisplayEvent::Unmapped(windows[0]));
        let actions = tick(&mut manager);
        assert_eq!(manager.state.stacks[0].active_window, Some(windows[1]));
        assert!(
            !actions
                .iter()
                .any(|a| matches!(a, DisplayAction::SetInputFocus(..)))
        );
    }

    #[test]
    fn outstanding_fetches_are_discarded_with_the_window() {
        let mut manager = Manager::new_test(vec![]);
        let w = WindowHandle(10);
        manager.manage(w);
        let tokens: Vec<_> = manager.state.clients[&w]
            .pending_requests
            .values()
            .copied()
            .collect();
        assert_eq!(tokens.len(), PropertyKind::ALL.len());

        manager.unmanage(w);
        for token in tokens {
            assert!(manager.display_server.discarded.contains(&token));
        }
        assert!(manager.display_server.in_flight.is_empty());
    }

    #[test]
    fn a_refetch_replaces_the_outstanding_request() {
        let mut manager = Manager::new_test(vec![]);
        let w = WindowHandle(10);
        manager.manage(w);
        let stale = manager.state.clients[&w].pending_requests[&PropertyKind::Name];

        manager.display_server.properties.insert(
            (w, PropertyKind::Name),
            PropertyReply::new(PropertyType::Text, 8, b"xterm".to_vec()),
        );
        manager
            .display_server
            .events
            .push_back(DisplayEvent::PropertyChanged(w, PropertyKind::Name));
        tick(&mut manager);

        assert_eq!(manager.display_server.discarded, vec![stale]);
        assert_eq!(manager.state.clients[&w].name, "xterm");
    }

    #[test]
    fn transient_windows_are_placed_under_their_top_level_owner() {
        let (mut manager, windows) = with_windows(1);
        let (dialog, nested) = (WindowHandle(20), WindowHandle(21));
        transient_for(&mut manager, dialog, windows[0]);
        transient_for(&mut manager, nested, dialog);
        map(&mut manager, dialog);
        map(&mut manager, nested);
        tick(&mut manager);

        assert_eq!(manager.state.stacks[0].windows, windows);
        assert_eq!(
            manager.state.clients[&windows[0]].subwindows,
            vec![dialog, nested]
        );
        assert_eq!(
            manager.state.clients[&nested].transient_owner,
            Some(windows[0])
        );
    }

    #[test]
    fn a_transient_cycle_is_treated_as_top_level() {
        let mut manager = Manager::new_test(vec![]);
        let windows: Vec<WindowHandle> = (20..31).map(WindowHandle).collect();
        for (i, w) in windows.iter().enumerate() {
            let owner = windows[(i + 1) % windows.len()];
            transient_for(&mut manager, *w, owner);
            map(&mut manager, *w);
        }
        tick(&mut manager);

        assert_eq!(manager.state.stacks[0].windows, windows);
        assert!(windows.iter().all(|w| !manager.state.clients[w].is_transient()));
    }

    #[test]
    fn the_owner_of_a_placed_window_does_not_change() {
        let (mut manager, windows) = with_windows(2);
        transient_for(&mut manager, windows[1], windows[0]);
        manager.display_server.events.push_back(DisplayEvent::PropertyChanged(
            windows[1],
            PropertyKind::TransientOwner,
        ));
        tick(&mut manager);
        assert!(!manager.state.clients[&windows[1]].is_transient());
        assert_eq!(manager.state.stacks[0].windows, windows);
    }

    #[test]
    fn subwindows_of_a_removed_owner_are_orphaned() {
        let (mut manager, windows) = with_windows(1);
        let dialog = WindowHandle(20);
        transient_for(&mut manager, dialog, windows[0]);
        map(&mut manager, dialog);
        tick(&mut manager);

        manager
            .display_server
            .events
            .push_back(DisplayEvent::Destroyed(windows[0]));
        tick(&mut manager);
        let orphan = &manager.state.clients[&dialog];
        assert_eq!(orphan.transient_owner, None);
        assert!(manager.state.stack_of(dialog).is_none());
        assert_eq!(manager.state.stacks[0].active_window, None);
    }

    #[test]
    fn removing_a_dialog_detaches_it_from_its_owner() {
        let (mut manager, windows) = with_windows(1);
        let dialog = WindowHandle(20);
        transient_for(&mut manager, dialog, windows[0]);
        map(&mut manager, dialog);
        tick(&mut manager);
        assert_eq!(manager.state.clients[&windows[0]].subwindows, vec![dialog]);

        manager
            .display_server
            .events
            .push_back(DisplayEvent::Destroyed(dialog));
        tick(&mut manager);
        assert!(manager.state.clients[&windows[0]].subwindows.is_empty());
    }
}
