use crate::models::StackId;
use serde::{Deserialize, Serialize};

/// Actions a key binding can trigger.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Run a shell command.
    Spawn(String),
    CloseActive,
    NextLayout,
    ToggleZoom,
    ToggleFollow,
    /// Switch stacks by a relative offset, wrapping around.
    MoveStack(i32),
    GotoStack(StackId),
    /// Move within the active stack by a relative offset, wrapping around.
    MoveLocal {
        delta: i32,
        clears_zoom: bool,
    },
    Quit,
}
