//! Objects (such as clients and stacks) tracked by nyla.
mod client;
mod geometry_change;
mod manager;
mod property;
mod rect;
mod stack;
mod window_handle;

pub use client::Client;
pub use geometry_change::GeometryChange;
pub use manager::Manager;
pub use property::{ProtocolAtoms, PropertyKind, PropertyReply, PropertyType, RequestToken};
pub use rect::Rect;
pub use stack::{LayoutType, Stack};
pub use window_handle::WindowHandle;

/// Server time in milliseconds, as stamped on input events.
pub type Timestamp = u32;

/// Asks the display server to use its own notion of "now".
pub const CURRENT_TIME: Timestamp = 0;

pub type StackId = usize;
