use x11rb::protocol::xproto::{self, ChangeWindowAttributesAux};

use super::XWrap;
use crate::error::Result;

impl XWrap {
    // Public functions.

    /// Sets a windows border color.
    pub fn set_window_border_color(&self, window: xproto::Window, color: u32) -> Result<()> {
        xproto::change_window_attributes(
            &self.conn,
            window,
            &ChangeWindowAttributesAux::new().border_pixel(color),
        )?;
        Ok(())
    }

    /// Gives the keyboard focus to a window. Focus reverts to the pointer root if the window
    /// goes away.
    pub fn set_input_focus(&self, window: xproto::Window, time: xproto::Timestamp) -> Result<()> {
        xproto::set_input_focus(&self.conn, xproto::InputFocus::POINTER_ROOT, window, time)?;
        Ok(())
    }

    /// Sets the geometry fields present in `changes`.
    pub fn set_window_config(
        &self,
        window: xproto::Window,
        changes: &xproto::ConfigureWindowAux,
    ) -> Result<()> {
        xproto::configure_window(&self.conn, window, changes)?;
        Ok(())
    }
}
