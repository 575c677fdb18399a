#[cfg(test)]
pub(crate) mod mock_display_server;

use crate::DisplayEvent;
use crate::config::{Config, Keybind};
use crate::display_action::DisplayAction;
use crate::errors::Result;
use crate::models::{PropertyKind, PropertyReply, ProtocolAtoms, Rect, RequestToken, WindowHandle};

use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The connection to the display server, as seen by the window manager.
///
/// Requests that change state go through [`DisplayServer::execute_action`] and must not
/// block. Property fetches are split in two: [`DisplayServer::request_property`] sends the
/// request and [`DisplayServer::resolve_property`] later collects the reply, so a whole batch
/// of fetches costs one round trip.
pub trait DisplayServer {
    /// # Errors
    ///
    /// Will error if no connection to the display server can be made.
    fn new(config: &impl Config) -> Result<Self>
    where
        Self: Sized;

    /// Become the window manager and grab the bound keys.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NylaError::AlreadyRunning`] if another client already redirects the
    /// root window's substructure.
    fn init(&mut self, bindings: &[Keybind]) -> Result<()>;

    fn root(&self) -> WindowHandle;

    fn screen_rect(&self) -> Rect;

    fn protocol_atoms(&self) -> ProtocolAtoms;

    /// Mapped, non override-redirect children of the root.
    ///
    /// # Errors
    ///
    /// Will error if the window tree can not be queried.
    fn top_level_windows(&mut self) -> Result<Vec<WindowHandle>>;

    /// The next already queued event, without waiting for more.
    fn next_event(&mut self) -> Option<DisplayEvent>;

    fn execute_action(&mut self, act: DisplayAction);

    /// Returns `None` if the request could not be sent.
    fn request_property(&mut self, handle: WindowHandle, kind: PropertyKind)
    -> Option<RequestToken>;

    /// `None` when the property is unset or the window is gone.
    fn resolve_property(&mut self, token: RequestToken) -> Option<PropertyReply>;

    /// Forget a request whose reply is no longer wanted.
    fn discard_property(&mut self, token: RequestToken);

    /// # Errors
    ///
    /// Will error if the focus can not be queried.
    fn input_focus(&mut self) -> Result<Option<WindowHandle>>;

    /// # Errors
    ///
    /// Will error if the window is gone.
    fn parent(&mut self, handle: WindowHandle) -> Result<Option<WindowHandle>>;

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
