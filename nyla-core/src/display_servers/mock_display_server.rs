use super::{Config, DisplayServer};
use crate::DisplayEvent;
use crate::config::Keybind;
use crate::display_action::DisplayAction;
use crate::errors::{NylaError, Result};
use crate::models::{PropertyKind, PropertyReply, ProtocolAtoms, Rect, RequestToken, WindowHandle};
use std::collections::{HashMap, VecDeque};

pub const ROOT: WindowHandle = WindowHandle(1);
pub const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);
pub const ATOMS: ProtocolAtoms = ProtocolAtoms {
    take_focus: 300,
    delete_window: 301,
};

/// Records what the window manager asks for and answers queries from scripted values.
#[derive(Default)]
pub struct MockDisplayServer {
    pub events: VecDeque<DisplayEvent>,
    pub executed: Vec<DisplayAction>,
    pub properties: HashMap<(WindowHandle, PropertyKind), PropertyReply>,
    pub in_flight: HashMap<RequestToken, (WindowHandle, PropertyKind)>,
    pub discarded: Vec<RequestToken>,
    pub focus: Option<WindowHandle>,
    pub parents: HashMap<WindowHandle, WindowHandle>,
    pub existing_windows: Vec<WindowHandle>,
    pub another_wm_running: bool,
    pub grabbed: Vec<Keybind>,
    next_token: u64,
}

impl MockDisplayServer {
    pub fn take_executed(&mut self) -> Vec<DisplayAction> {
        std::mem::take(&mut self.executed)
    }
}

impl DisplayServer for MockDisplayServer {
    fn new(_: &impl Config) -> Result<Self> {
        Ok(Self::default())
    }

    fn init(&mut self, bindings: &[Keybind]) -> Result<()> {
        if self.another_wm_running {
            return Err(NylaError::AlreadyRunning);
        }
        self.grabbed = bindings.to_vec();
        Ok(())
    }

    fn root(&self) -> WindowHandle {
        ROOT
    }

    fn screen_rect(&self) -> Rect {
        SCREEN
    }

    fn protocol_atoms(&self) -> ProtocolAtoms {
        ATOMS
    }

    fn top_level_windows(&mut self) -> Result<Vec<WindowHandle>> {
        Ok(self.existing_windows.clone())
    }

    fn next_event(&mut self) -> Option<DisplayEvent> {
        self.events.pop_front()
    }

    fn execute_action(&mut self, act: DisplayAction) {
        if let DisplayAction::ReloadKeyGrabs(bindings) = &act {
            self.grabbed.clone_from(bindings);
        }
        self.executed.push(act);
    }

    fn request_property(
        &mut self,
        handle: WindowHandle,
        kind: PropertyKind,
    ) -> Option<RequestToken> {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.in_flight.insert(token, (handle, kind));
        Some(token)
    }

    fn resolve_property(&mut self, token: RequestToken) -> Option<PropertyReply> {
        let key = self.in_flight.remove(&token)?;
        self.properties.get(&key).cloned()
    }

    fn discard_property(&mut self, token: RequestToken) {
        self.in_flight.remove(&token);
        self.discarded.push(token);
    }

    fn input_focus(&mut self) -> Result<Option<WindowHandle>> {
        Ok(self.focus)
    }

    fn parent(&mut self, handle: WindowHandle) -> Result<Option<WindowHandle>> {
        Ok(self.parents.get(&handle).copied())
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(futures::future::ready(()))
    }

    fn flush(&self) {}
}
