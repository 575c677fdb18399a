//! x11rb backend for nyla

use nyla_core::{
    Config, DisplayAction, DisplayEvent, DisplayServer, Keybind, Protocol,
    models::{PropertyKind, PropertyReply, ProtocolAtoms, Rect, RequestToken, WindowHandle},
};
use x11rb::protocol::xproto;

use crate::xwrap::XWrap;
use error::Result;

mod error;
mod event_translate;
mod xatom;
mod xwrap;

pub struct X11rbDisplayServer {
    xw: XWrap,
}

impl DisplayServer for X11rbDisplayServer {
    fn new(_config: &impl Config) -> nyla_core::Result<Self> {
        let xw = XWrap::new()?;
        Ok(Self { xw })
    }

    fn init(&mut self, bindings: &[Keybind]) -> nyla_core::Result<()> {
        self.xw.init(bindings)?;
        Ok(())
    }

    fn root(&self) -> WindowHandle {
        self.xw.root().into()
    }

    fn screen_rect(&self) -> Rect {
        self.xw.screen()
    }

    fn protocol_atoms(&self) -> ProtocolAtoms {
        self.xw.protocol_atoms()
    }

    fn top_level_windows(&mut self) -> nyla_core::Result<Vec<WindowHandle>> {
        let windows = self.xw.get_managed_candidates()?;
        Ok(windows.into_iter().map(WindowHandle::from).collect())
    }

    fn next_event(&mut self) -> Option<DisplayEvent> {
        loop {
            match self.xw.poll_next_event() {
                Ok(Some(ev)) => {
                    if let Some(ev) = event_translate::translate(ev, &mut self.xw) {
                        return Some(ev);
                    }
                }
                Ok(None) => return None,
                Err(e) => {
                    tracing::error!(error = ?e, "An error occurred when polling for events.");
                    return None;
                }
            }
        }
    }

    fn execute_action(&mut self, act: DisplayAction) {
        tracing::trace!("DisplayAction: {:?}", act);
        let xw = &mut self.xw;
        let result: Result<()> = match act.clone() {
            DisplayAction::Subscribe(h) => xw.subscribe_to_window_events(h.0),
            DisplayAction::MapWindow(h) => xw.map_window(h.0),
            DisplayAction::Configure(change) => from_configure(xw, change),
            DisplayAction::SendConfigureNotify {
                handle,
                rect,
                border_width,
            } => xw.send_configure_notify(handle.0, rect, border_width),
            DisplayAction::SetBorderColor(h, color) => xw.set_window_border_color(h.0, color),
            DisplayAction::SetInputFocus(h, time) => xw.set_input_focus(h.0, time),
            DisplayAction::SendProtocol(h, protocol, time) => {
                from_send_protocol(xw, h, protocol, time)
            }
            DisplayAction::KillClient(h) => xw.kill_client(h.0),
            DisplayAction::ReloadKeyGrabs(bindings) => from_reload_key_grabs(xw, &bindings),
        };
        if let Err(e) = result {
            tracing::error!(action = ?act, error = ?e, "Error when processing a display action.");
        }
    }

    fn request_property(
        &mut self,
        handle: WindowHandle,
        kind: PropertyKind,
    ) -> Option<RequestToken> {
        self.xw
            .request_property(handle.0, kind)
            .map_err(|e| tracing::error!(window = %handle, error = ?e, "Unable to request a property."))
            .ok()
    }

    fn resolve_property(&mut self, token: RequestToken) -> Option<PropertyReply> {
        self.xw
            .resolve_property(token)
            .map_err(|e| tracing::error!(error = ?e, "Unable to read a property reply."))
            .ok()
            .flatten()
    }

    fn discard_property(&mut self, token: RequestToken) {
        self.xw.discard_property(token);
    }

    fn input_focus(&mut self) -> nyla_core::Result<Option<WindowHandle>> {
        Ok(self.xw.get_input_focus()?.map(WindowHandle::from))
    }

    fn parent(&mut self, handle: WindowHandle) -> nyla_core::Result<Option<WindowHandle>> {
        Ok(self.xw.get_parent(handle.0)?.map(WindowHandle::from))
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn futures::Future<Output = ()>>> {
        let task_notify = self.xw.task_notify.clone();
        Box::pin(async move {
            task_notify.notified().await;
        })
    }

    fn flush(&self) {
        if let Err(e) = self.xw.flush() {
            tracing::error!(error = ?e, "Error when flushing the connection.");
        }
    }
}

// Display actions.
fn from_configure(xw: &XWrap, change: nyla_core::models::GeometryChange) -> Result<()> {
    let aux = xproto::ConfigureWindowAux {
        x: change.x,
        y: change.y,
        width: change.width,
        height: change.height,
        border_width: change.border_width,
        ..Default::default()
    };
    xw.set_window_config(change.handle.0, &aux)
}

fn from_send_protocol(
    xw: &XWrap,
    handle: WindowHandle,
    protocol: Protocol,
    time: xproto::Timestamp,
) -> Result<()> {
    let atom = match protocol {
        Protocol::TakeFocus => xw.atoms.WMTakeFocus,
        Protocol::DeleteWindow => xw.atoms.WMDelete,
    };
    xw.send_protocol(handle.0, atom, time)
}

fn from_reload_key_grabs(xw: &mut XWrap, bindings: &[Keybind]) -> Result<()> {
    xw.refresh_keymap()?;
    xw.grab_keys(bindings)?;
    Ok(())
}
