use nyla_core::models::{PropertyKind, PropertyReply, PropertyType, RequestToken};
use x11rb::{
    connection::{Connection, DiscardMode, ReplyOrError, RequestConnection, RequestKind},
    protocol::xproto,
    x11_utils::TryParse,
};

use super::{MAX_PROPERTY_VALUE_LEN, XWrap};
use crate::error::Result;

impl XWrap {
    // Public functions.

    /// Returns the mapped, non override-redirect children of the root window.
    ///
    /// The server is grabbed while the tree is walked so no window can appear or vanish
    /// half way through.
    pub fn get_managed_candidates(&self) -> Result<Vec<xproto::Window>> {
        xproto::grab_server(&self.conn)?;
        let windows = self.get_viewable_children();
        xproto::ungrab_server(&self.conn)?;
        windows
    }

    fn get_viewable_children(&self) -> Result<Vec<xproto::Window>> {
        let tree = xproto::query_tree(&self.conn, self.root)?.reply()?;
        // Send every attribute request before waiting for the first reply.
        let cookies = tree
            .children
            .iter()
            .map(|w| xproto::get_window_attributes(&self.conn, *w))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tree
            .children
            .into_iter()
            .zip(cookies)
            .filter_map(|(window, cookie)| match cookie.reply() {
                Ok(attrs) => Some((window, attrs)),
                Err(e) => {
                    tracing::debug!(window, error = ?e, "Window vanished while scanning.");
                    None
                }
            })
            .filter(|(_, attrs)| {
                attrs.map_state == xproto::MapState::VIEWABLE && !attrs.override_redirect
            })
            .map(|(window, _)| window)
            .collect())
    }

    /// Returns the window holding the input focus, `None` for no window or pointer root.
    pub fn get_input_focus(&self) -> Result<Option<xproto::Window>> {
        let focus = xproto::get_input_focus(&self.conn)?.reply()?.focus;
        let pointer_root: xproto::Window = xproto::InputFocus::POINTER_ROOT.into();
        Ok((focus != x11rb::NONE && focus != pointer_root).then_some(focus))
    }

    /// Returns the parent of a window, `None` for the root itself.
    pub fn get_parent(&self, window: xproto::Window) -> Result<Option<xproto::Window>> {
        let parent = xproto::query_tree(&self.conn, window)?.reply()?.parent;
        Ok((parent != x11rb::NONE).then_some(parent))
    }

    /// Returns the next `Xevent` of the xserver.
    pub fn poll_next_event(&self) -> Result<Option<x11rb::protocol::Event>> {
        Ok(self.conn.poll_for_event()?)
    }

    /// Sends a `GetProperty` request for `kind` without waiting for the reply. The request's
    /// sequence number is the token.
    pub fn request_property(
        &self,
        window: xproto::Window,
        kind: PropertyKind,
    ) -> Result<RequestToken> {
        let (property, long_length) = match kind {
            PropertyKind::Capabilities => (xproto::Atom::from(xproto::AtomEnum::WM_HINTS), 9),
            PropertyKind::SizeHints => (xproto::AtomEnum::WM_NORMAL_HINTS.into(), 18),
            PropertyKind::Name => (
                xproto::AtomEnum::WM_NAME.into(),
                MAX_PROPERTY_VALUE_LEN / 4,
            ),
            PropertyKind::TransientOwner => (xproto::AtomEnum::WM_TRANSIENT_FOR.into(), 1),
            PropertyKind::SupportedProtocols => (self.atoms.WMProtocols, 32),
        };
        let cookie = xproto::get_property(
            &self.conn,
            false,
            window,
            property,
            xproto::AtomEnum::ANY,
            0,
            long_length,
        )?;
        let sequence = cookie.sequence_number();
        // The reply is collected by sequence number, a dropped cookie would discard it.
        std::mem::forget(cookie);
        Ok(RequestToken(sequence))
    }

    /// Waits for the reply to an earlier [`XWrap::request_property`]. An absent property or
    /// an error reply (e.g. the window is gone) both give `None`.
    pub fn resolve_property(&self, token: RequestToken) -> Result<Option<PropertyReply>> {
        let buf = match self.conn.wait_for_reply_or_raw_error(token.0)? {
            ReplyOrError::Reply(buf) => buf,
            ReplyOrError::Error(_) => {
                tracing::trace!(sequence = token.0, "Property request failed.");
                return Ok(None);
            }
        };
        let (reply, _) = xproto::GetPropertyReply::try_parse(&buf)?;
        if reply.type_ == x11rb::NONE {
            return Ok(None);
        }
        let value_type = self.property_type(reply.type_);
        Ok(Some(PropertyReply::new(value_type, reply.format, reply.value)))
    }

    /// Drops the reply to an earlier [`XWrap::request_property`] once it arrives.
    pub fn discard_property(&self, token: RequestToken) {
        self.conn.discard_reply(
            token.0,
            RequestKind::HasResponse,
            DiscardMode::DiscardReplyAndError,
        );
    }

    fn property_type(&self, atom: xproto::Atom) -> PropertyType {
        let is = |predefined: xproto::AtomEnum| atom == xproto::Atom::from(predefined);
        if is(xproto::AtomEnum::ATOM) {
            PropertyType::Atom
        } else if is(xproto::AtomEnum::WINDOW) {
            PropertyType::Window
        } else if is(xproto::AtomEnum::WM_HINTS) {
            PropertyType::WmHints
        } else if is(xproto::AtomEnum::WM_SIZE_HINTS) {
            PropertyType::WmSizeHints
        } else if is(xproto::AtomEnum::STRING)
            || atom == self.atoms.UTF8String
            || atom == self.atoms.CompoundText
        {
            PropertyType::Text
        } else {
            PropertyType::Other(atom)
        }
    }
}
