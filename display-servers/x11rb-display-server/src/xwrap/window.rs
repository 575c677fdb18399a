use nyla_core::models::Rect;
use x11rb::protocol::xproto;

use super::{XWrap, client_event_mask};
use crate::error::Result;

impl XWrap {
    /// Maps a window that asked to be mapped.
    pub fn map_window(&self, window: xproto::Window) -> Result<()> {
        xproto::map_window(&self.conn, window)?;
        Ok(())
    }

    /// Send a `ConfigureNotify` for a window to X, describing where it really is.
    pub fn send_configure_notify(
        &self,
        window: xproto::Window,
        rect: Rect,
        border_width: u32,
    ) -> Result<()> {
        let configure_event = xproto::ConfigureNotifyEvent {
            response_type: xproto::CONFIGURE_NOTIFY_EVENT,
            event: window,
            window,
            x: i16::try_from(rect.x)?,
            y: i16::try_from(rect.y)?,
            width: u16::try_from(rect.width)?,
            height: u16::try_from(rect.height)?,
            border_width: u16::try_from(border_width)?,
            above_sibling: x11rb::NONE,
            override_redirect: false,
            ..Default::default()
        };
        xproto::send_event(
            &self.conn,
            false,
            window,
            xproto::EventMask::STRUCTURE_NOTIFY,
            configure_event,
        )?;
        Ok(())
    }

    /// Sends a `WM_PROTOCOLS` client message carrying `protocol`.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    pub fn send_protocol(
        &self,
        window: xproto::Window,
        protocol: xproto::Atom,
        time: xproto::Timestamp,
    ) -> Result<()> {
        let event = xproto::ClientMessageEvent::new(
            32,
            window,
            self.atoms.WMProtocols,
            [protocol, time, 0, 0, 0],
        );
        xproto::send_event(&self.conn, false, window, xproto::EventMask::NO_EVENT, event)?;
        Ok(())
    }

    /// Kills the client owning a window.
    pub fn kill_client(&self, window: xproto::Window) -> Result<()> {
        xproto::kill_client(&self.conn, window)?;
        Ok(())
    }

    /// Subscribe to the wanted events of a window.
    pub fn subscribe_to_window_events(&self, window: xproto::Window) -> Result<()> {
        let attrs = xproto::ChangeWindowAttributesAux {
            event_mask: Some(client_event_mask()),
            ..Default::default()
        };
        xproto::change_window_attributes(&self.conn, window, &attrs)?;
        Ok(())
    }
}
