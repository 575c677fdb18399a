//! Turns the dirty flags set while handling events into geometry and border requests.
use crate::display_action::DisplayAction;
use crate::layouts::compute_layout;
use crate::models::{GeometryChange, LayoutType, Rect, WindowHandle};
use crate::state::State;

impl State {
    /// Runs once per tick, after events and pending windows have been handled.
    pub(crate) fn reconcile(&mut self) {
        if self.border_dirty {
            self.border_dirty = false;
            self.repaint_border();
        }
        if self.layout_dirty {
            self.layout_dirty = false;
            self.apply_layout();
        }
        self.flush_configure_notifies();
    }

    fn repaint_border(&mut self) {
        let stack = self.active_stack();
        let Some(active) = stack.active_window.filter(|w| self.is_tracked(*w)) else {
            return;
        };
        let colors = self.border_colors;
        let color = if self.follow {
            colors.follow
        } else if stack.zoomed || stack.windows.len() < 2 {
            colors.none
        } else {
            colors.active
        };
        self.actions.push_back(DisplayAction::SetBorderColor(active, color));
    }

    fn apply_layout(&mut self) {
        let stack = self.active_stack().clone();
        if stack.zoomed {
            let border = if self.follow { self.border_width } else { 0 };
            for &window in &stack.windows {
                if Some(window) == stack.active_window {
                    self.configure_client(window, self.screen, border);
                    self.arrange_subwindows(window);
                } else {
                    self.hide_with_subwindows(window);
                }
            }
        } else {
            let bounds = self.screen.try_apply_margin_top(self.status_bar_height);
            self.tile(&stack.windows, bounds, stack.layout);
            for &window in &stack.windows {
                self.arrange_subwindows(window);
            }
        }

        let hidden: Vec<WindowHandle> = self
            .stacks
            .iter()
            .enumerate()
            .filter(|(id, _)| *id != self.active_stack)
            .flat_map(|(_, stack)| stack.windows.iter().copied())
            .collect();
        for window in hidden {
            self.hide_with_subwindows(window);
        }
    }

    fn tile(&mut self, windows: &[WindowHandle], bounds: Rect, layout: LayoutType) {
        let cells = compute_layout(bounds, windows.len(), self.layout_padding, layout);
        for (&window, cell) in windows.iter().zip(cells) {
            let Some(client) = self.clients.get(&window) else {
                continue;
            };
            let rect = cell.center_within_max(client.max_width, client.max_height);
            self.configure_client(window, rect, self.border_width);
        }
    }

    /// Stacks a client's transient windows in rows inside it.
    fn arrange_subwindows(&mut self, owner: WindowHandle) {
        let Some(client) = self.clients.get(&owner) else {
            return;
        };
        if client.subwindows.is_empty() {
            return;
        }
        let bounds = client.rect.try_apply_margin(self.subwindow_margin);
        let subwindows = client.subwindows.clone();
        self.tile(&subwindows, bounds, LayoutType::Rows);
    }

    fn hide_with_subwindows(&mut self, window: WindowHandle) {
        let subwindows = self
            .clients
            .get(&window)
            .map(|c| c.subwindows.clone())
            .unwrap_or_default();
        for w in std::iter::once(window).chain(subwindows) {
            self.hide(w);
        }
    }

    /// Parks a window just past the bottom right corner of the screen.
    fn hide(&mut self, window: WindowHandle) {
        let Some(client) = self.clients.get(&window) else {
            return;
        };
        let (size, border_width) = ((client.rect.width, client.rect.height), client.border_width);
        let offscreen = Rect::new(
            self.screen.x + self.screen.width as i32,
            self.screen.y + self.screen.height as i32,
            size.0,
            size.1,
        );
        self.configure_client(window, offscreen, border_width);
    }

    /// Sends only the geometry fields that differ from what the window already has.
    fn configure_client(&mut self, window: WindowHandle, rect: Rect, border_width: u32) {
        let Some(client) = self.clients.get_mut(&window) else {
            return;
        };
        let change = GeometryChange::between(
            window,
            (client.rect, client.border_width),
            (rect, border_width),
        );
        if change.is_empty() {
            return;
        }
        // A move alone does not make the server notify the client.
        client.wants_configure_notify = !change.resizes();
        client.rect = rect;
        client.border_width = border_width;
        self.actions.push_back(DisplayAction::Configure(change));
    }

    fn flush_configure_notifies(&mut self) {
        for client in self
            .clients
            .values_mut()
            .filter(|c| c.wants_configure_notify)
        {
            client.wants_configure_notify = false;
            self.actions.push_back(DisplayAction::SendConfigureNotify {
                handle: client.handle,
                rect: client.rect,
                border_width: client.border_width,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::DisplayEvent;
    use crate::display_action::DisplayAction;
    use crate::handlers::test_support::*;
    use crate::models::{
        GeometryChange, Manager, PropertyKind, PropertyReply, PropertyType, Rect, WindowHandle,
    };

    const ACTIVE: u32 = 0x95_A3_B3;
    const FOLLOW: u32 = 0x84_DC_C6;

    #[test]
    fn a_single_window_fills_the_screen_below_the_status_bar() {
        let (manager, windows) = with_windows(1);
        let client = &manager.state.clients[&windows[0]];
        assert_eq!(manager.state.stacks[0].active_window, Some(windows[0]));
        assert_eq!(client.rect, Rect::new(0, 20, 1916, 1056));
        assert_eq!(client.border_width, 2);
    }

    #[test]
    fn a_second_window_splits_the_screen_into_columns() {
        let (mut manager, windows) = with_windows(1);
        let second = WindowHandle(11);
        map(&mut manager, second);
        tick(&mut manager);

        assert_eq!(manager.state.stacks[0].windows, vec![windows[0], second]);
        assert_eq!(
            manager.state.clients[&windows[0]].rect,
            Rect::new(0, 20, 956, 1056)
        );
        assert_eq!(
            manager.state.clients[&second].rect,
            Rect::new(960, 20, 956, 1056)
        );
    }

    #[test]
    fn a_dialog_of_an_inactive_window_is_tiled_inside_it_and_unzooms() {
        let (mut manager, windows) = with_windows(2);
        manager.state.toggle_zoom();
        tick(&mut manager);

        let dialog = WindowHandle(20);
        transient_for(&mut manager, dialog, windows[1]);
        map(&mut manager, dialog);
        tick(&mut manager);

        assert!(!manager.state.stacks[0].zoomed);
        assert_eq!(manager.state.stacks[0].windows, windows);
        assert_eq!(manager.state.clients[&windows[1]].subwindows, vec![dialog]);
        assert_eq!(
            manager.state.clients[&dialog].rect,
            Rect::new(980, 40, 912, 1012)
        );
    }

    #[test]
    fn zooming_gives_the_active_window_the_whole_screen_without_border() {
        let (mut manager, windows) = with_windows(2);
        manager.state.toggle_zoom();
        tick(&mut manager);

        let active = &manager.state.clients[&windows[0]];
        assert_eq!(active.rect, Rect::new(0, 0, 1920, 1080));
        assert_eq!(active.border_width, 0);
        let other = &manager.state.clients[&windows[1]];
        assert_eq!((other.rect.x, other.rect.y), (1920, 1080));
    }

    #[test]
    fn zooming_in_follow_mode_keeps_the_border() {
        let (mut manager, windows) = with_windows(2);
        manager.state.toggle_follow();
        manager.state.toggle_zoom();
        let actions = tick(&mut manager);

        let active = &manager.state.clients[&windows[0]];
        assert_eq!(active.rect, Rect::new(0, 0, 1920, 1080));
        assert_eq!(active.border_width, 2);
        assert!(actions.contains(&DisplayAction::SetBorderColor(windows[0], FOLLOW)));
        assert_eq!(manager.state.clients[&windows[1]].rect.x, 1920);
    }

    #[test]
    fn a_dialog_of_the_zoomed_window_is_shown_inside_it() {
        let (mut manager, windows) = with_windows(2);
        manager.state.toggle_zoom();
        tick(&mut manager);

        let dialog = WindowHandle(20);
        transient_for(&mut manager, dialog, windows[0]);
        map(&mut manager, dialog);
        tick(&mut manager);

        assert!(manager.state.stacks[0].zoomed);
        assert_eq!(
            manager.state.clients[&windows[0]].rect,
            Rect::new(0, 0, 1920, 1080)
        );
        assert_eq!(
            manager.state.clients[&dialog].rect,
            Rect::new(20, 20, 1876, 1036)
        );
        assert_eq!(manager.state.clients[&windows[1]].rect.x, 1920);
    }

    #[test]
    fn windows_with_a_maximum_size_are_centered_in_their_cell() {
        let mut manager = Manager::new_test(vec![]);
        let w = WindowHandle(10);
        let mut hints = [0_u32; 18];
        hints[0] = 1 << 5;
        hints[7] = 640;
        hints[8] = 480;
        manager.display_server.properties.insert(
            (w, PropertyKind::SizeHints),
            PropertyReply::from_u32s(PropertyType::WmSizeHints, &hints),
        );
        map(&mut manager, w);
        tick(&mut manager);

        let client = &manager.state.clients[&w];
        assert_eq!(client.rect, Rect::new(638, 308, 640, 480));
        assert_eq!(client.border_width, 2);
    }

    #[test]
    fn only_changed_geometry_is_sent() {
        let (mut manager, windows) = with_windows(1);
        map(&mut manager, WindowHandle(11));
        let actions = tick(&mut manager);
        let change = GeometryChange {
            handle: windows[0],
            width: Some(956),
            ..Default::default()
        };
        assert!(actions.contains(&DisplayAction::Configure(change)));
    }

    #[test]
    fn a_moved_window_is_told_its_new_geometry() {
        let (mut manager, windows) = with_windows(2);
        manager.state.move_stack(1, 0);
        let actions = tick(&mut manager);
        assert!(actions.contains(&DisplayAction::SendConfigureNotify {
            handle: windows[1],
            rect: Rect::new(1920, 1080, 956, 1056),
            border_width: 2,
        }));
    }

    #[test]
    fn the_border_shows_the_focus_state() {
        let (mut manager, windows) = with_windows(1);
        manager.state.border_dirty = true;
        let actions = tick(&mut manager);
        assert!(actions.contains(&DisplayAction::SetBorderColor(windows[0], 0)));

        // New windows take over focus.
        let second = WindowHandle(11);
        map(&mut manager, second);
        let actions = tick(&mut manager);
        assert!(actions.contains(&DisplayAction::SetBorderColor(windows[0], 0)));
        assert!(actions.contains(&DisplayAction::SetBorderColor(second, ACTIVE)));

        manager.state.toggle_follow();
        let actions = tick(&mut manager);
        assert!(actions.contains(&DisplayAction::SetBorderColor(second, FOLLOW)));
    }

    #[test]
    fn configure_requests_of_managed_windows_are_answered_with_their_geometry() {
        let (mut manager, windows) = with_windows(1);
        let request = GeometryChange {
            handle: windows[0],
            width: Some(300),
            ..Default::default()
        };
        manager
            .display_server
            .events
            .push_back(DisplayEvent::ConfigureRequest(request));
        let actions = tick(&mut manager);
        assert_eq!(
            actions,
            vec![DisplayAction::SendConfigureNotify {
                handle: windows[0],
                rect: Rect::new(0, 20, 1916, 1056),
                border_width: 2,
            }]
        );
    }

    #[test]
    fn configure_requests_of_unmanaged_windows_are_granted() {
        let mut manager = Manager::new_test(vec![]);
        let request = GeometryChange {
            handle: WindowHandle(40),
            x: Some(5),
            ..Default::default()
        };
        manager
            .display_server
            .events
            .push_back(DisplayEvent::ConfigureRequest(request));
        assert_eq!(tick(&mut manager), vec![DisplayAction::Configure(request)]);
    }
}
