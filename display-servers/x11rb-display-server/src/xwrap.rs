use std::{os::fd::AsRawFd, sync::Arc, time::Duration};

use nyla_core::models::{ProtocolAtoms, Rect};
use tokio::sync::{Notify, oneshot};
use x11rb::{
    connection::Connection,
    wrapper::ConnectionExt as _,
    protocol::{
        ErrorKind,
        xinput::{self, ConnectionExt as _},
        xproto::{self, ChangeWindowAttributesAux},
    },
    rust_connection::{ReplyError, RustConnection},
};

use crate::error::{Error, Result};
use crate::xatom::AtomCollection;

mod getters;
mod keyboard;
mod setters;
mod window;

pub(crate) use keyboard::Keymap;

const MAX_PROPERTY_VALUE_LEN: u32 = 4096;

#[inline]
pub fn root_event_mask() -> xproto::EventMask {
    xproto::EventMask::SUBSTRUCTURE_REDIRECT
        | xproto::EventMask::SUBSTRUCTURE_NOTIFY
        | xproto::EventMask::STRUCTURE_NOTIFY
        | xproto::EventMask::PROPERTY_CHANGE
}

#[inline]
pub fn client_event_mask() -> xproto::EventMask {
    xproto::EventMask::ENTER_WINDOW
        | xproto::EventMask::FOCUS_CHANGE
        | xproto::EventMask::PROPERTY_CHANGE
}

/// Contains Xserver information and origins.
pub(crate) struct XWrap {
    conn: RustConnection,
    root: xproto::Window,
    screen: Rect,
    pub atoms: AtomCollection,
    pub keymap: Keymap,

    _task_guard: oneshot::Receiver<()>,
    pub task_notify: Arc<Notify>,
}

impl XWrap {
    /// Connects to the display named by `$DISPLAY` and starts watching its socket.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Result<Self> {
        const SERVER: mio::Token = mio::Token(0);
        let (conn, display) = x11rb::connect(None)?;

        let fd = conn.stream().as_raw_fd();

        let (guard, _task_guard) = oneshot::channel::<()>();
        let notify = Arc::new(Notify::new());
        let task_notify = notify.clone();

        let mut poll = mio::Poll::new()?;
        let mut events = mio::Events::with_capacity(1);
        poll.registry().register(
            &mut mio::unix::SourceFd(&fd),
            SERVER,
            mio::Interest::READABLE,
        )?;
        let timeout = Duration::from_millis(100);
        tokio::task::spawn_blocking(move || {
            loop {
                if guard.is_closed() {
                    tracing::info!("x11rb socket closed");
                    return;
                }

                if let Err(err) = poll.poll(&mut events, Some(timeout)) {
                    tracing::warn!("x11rb socket poll failed with {:?}", err);
                    continue;
                }

                events
                    .iter()
                    .filter(|event| SERVER == event.token())
                    .for_each(|_| notify.notify_one());
            }
        });

        let atoms = AtomCollection::new(&conn)?.reply()?;
        let screen = &conn.setup().roots[display];
        let root = screen.root;
        let screen = Rect::new(
            0,
            0,
            u32::from(screen.width_in_pixels),
            u32::from(screen.height_in_pixels),
        );
        let keymap = Keymap::fetch(&conn)?;
        let display_num = display;
        tracing::debug!(root, %screen, "connected to display {}", display_num);

        Ok(Self {
            conn,
            root,
            screen,
            atoms,
            keymap,
            _task_guard,
            task_notify,
        })
    }

    /// Become the window manager, then listen for raw pointer motion and grab the keys.
    pub fn init(&mut self, bindings: &[nyla_core::Keybind]) -> Result<()> {
        self.become_wm()?;
        if let Err(e) = self.select_raw_motion() {
            tracing::warn!(error = ?e, "XInput2 is unavailable, focus will not follow the pointer.");
        }
        self.grab_keys(bindings)?;
        self.sync()?;
        Ok(())
    }

    /// Only one client may select substructure redirection on the root window.
    fn become_wm(&self) -> Result<()> {
        let result = xproto::change_window_attributes(
            &self.conn,
            self.root,
            &ChangeWindowAttributesAux::new().event_mask(root_event_mask()),
        )?
        .check();
        match result {
            Err(ReplyError::X11Error(e)) if e.error_kind == ErrorKind::Access => {
                Err(Error::AlreadyRunning)
            }
            result => Ok(result?),
        }
    }

    // Raw events are delivered no matter which window the pointer is in, and only when the
    // pointer actually moves.
    fn select_raw_motion(&self) -> Result<()> {
        self.conn.xinput_xi_query_version(2, 0)?.reply()?;
        let mask = xinput::EventMask {
            deviceid: xinput::Device::ALL_MASTER.into(),
            mask: vec![xinput::XIEventMask::RAW_MOTION.into()],
        };
        self.conn
            .xinput_xi_select_events(self.root, &[mask])?
            .check()?;
        Ok(())
    }

    pub const fn root(&self) -> xproto::Window {
        self.root
    }

    pub const fn screen(&self) -> Rect {
        self.screen
    }

    pub const fn protocol_atoms(&self) -> ProtocolAtoms {
        ProtocolAtoms {
            take_focus: self.atoms.WMTakeFocus,
            delete_window: self.atoms.WMDelete,
        }
    }

    /// Flush and sync the xserver.
    pub fn sync(&self) -> Result<()> {
        self.conn.sync()?;
        Ok(())
    }

    /// Flush the xserver.
    // `XFlush`: https://tronche.com/gui/x/xlib/event-handling/XFlush.html
    pub fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selects(mask: xproto::EventMask, flag: xproto::EventMask) -> bool {
        u32::from(mask) & u32::from(flag) != 0
    }

    #[test]
    fn the_root_mask_redirects_substructure_requests() {
        let mask = root_event_mask();
        assert!(selects(mask, xproto::EventMask::SUBSTRUCTURE_REDIRECT));
        assert!(selects(mask, xproto::EventMask::SUBSTRUCTURE_NOTIFY));
    }

    #[test]
    fn clients_report_enter_focus_and_property_changes() {
        let mask = client_event_mask();
        assert!(selects(mask, xproto::EventMask::ENTER_WINDOW));
        assert!(selects(mask, xproto::EventMask::FOCUS_CHANGE));
        assert!(selects(mask, xproto::EventMask::PROPERTY_CHANGE));
        assert!(!selects(mask, xproto::EventMask::SUBSTRUCTURE_REDIRECT));
    }
}
