//! Window properties nyla fetches, and how each reply updates a [`Client`].
use super::{Client, WindowHandle};
use serde::{Deserialize, Serialize};

/// Correlates an asynchronous property fetch with its reply.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

/// The fixed set of window properties nyla cares about.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
    /// `WM_HINTS`: input model and urgency.
    Capabilities,
    /// `WM_NORMAL_HINTS`: maximum size.
    SizeHints,
    /// `WM_NAME`
    Name,
    /// `WM_TRANSIENT_FOR`
    TransientOwner,
    /// `WM_PROTOCOLS`
    SupportedProtocols,
}

/// The type a property reply was stored with.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyType {
    Atom,
    Window,
    WmHints,
    WmSizeHints,
    Text,
    Other(u32),
}

/// Raw bytes of a resolved property fetch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PropertyReply {
    pub value_type: PropertyType,
    pub format: u8,
    pub value: Vec<u8>,
}

/// Atoms a client may list in `WM_PROTOCOLS`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProtocolAtoms {
    pub take_focus: u32,
    pub delete_window: u32,
}

// WM_HINTS is 9 CARD32s.
const WM_HINTS_LEN: usize = 9 * 4;
const INPUT_HINT: u32 = 1;
const URGENCY_HINT: u32 = 1 << 8;

// WM_SIZE_HINTS is 18 CARD32s; max width and height sit at 7 and 8.
const WM_SIZE_HINTS_LEN: usize = 18 * 4;
const P_MAX_SIZE: u32 = 1 << 5;

impl PropertyReply {
    #[must_use]
    pub fn new(value_type: PropertyType, format: u8, value: Vec<u8>) -> Self {
        Self {
            value_type,
            format,
            value,
        }
    }

    /// Builds a 32 bit formatted reply.
    #[must_use]
    pub fn from_u32s(value_type: PropertyType, values: &[u32]) -> Self {
        let value = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        Self::new(value_type, 32, value)
    }

    /// The value as a list of CARD32, if it is 32 bit formatted.
    pub fn value32(&self) -> Option<impl Iterator<Item = u32> + '_> {
        if self.format != 32 || self.value.len() % 4 != 0 {
            return None;
        }
        Some(
            self.value
                .chunks_exact(4)
                .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]])),
        )
    }

    fn fixed_u32s(&self, len: usize) -> Option<Vec<u32>> {
        if self.value.len() != len {
            return None;
        }
        self.value32().map(Iterator::collect)
    }
}

impl PropertyKind {
    pub const ALL: [Self; 5] = [
        Self::Capabilities,
        Self::SizeHints,
        Self::Name,
        Self::TransientOwner,
        Self::SupportedProtocols,
    ];

    /// Decodes `reply` into `client`. A missing or malformed reply stands for the property's
    /// default value.
    ///
    /// The transient owner is sticky: it is only taken while the client still awaits
    /// placement and has no owner yet, so an already placed window never turns transient.
    pub fn apply(
        self,
        client: &mut Client,
        reply: Option<&PropertyReply>,
        atoms: ProtocolAtoms,
        awaiting_placement: bool,
    ) {
        match self {
            Self::Capabilities => {
                let hints = reply.and_then(|r| r.fixed_u32s(WM_HINTS_LEN));
                let flags = hints.as_ref().map_or(0, |h| h[0]);
                // Clients that do not set the input hint get focus.
                client.wants_input_hint = flags & INPUT_HINT == 0 || hints.is_some_and(|h| h[1] != 0);
                client.urgent = flags & URGENCY_HINT != 0;
            }
            Self::SizeHints => {
                let hints = reply.and_then(|r| r.fixed_u32s(WM_SIZE_HINTS_LEN));
                let (max_width, max_height) = match hints {
                    Some(h) if h[0] & P_MAX_SIZE != 0 => (positive(h[7]), positive(h[8])),
                    _ => (None, None),
                };
                client.max_width = max_width;
                client.max_height = max_height;
            }
            Self::Name => {
                client.name = reply
                    .filter(|r| r.format == 8)
                    .map(|r| String::from_utf8_lossy(&r.value).into_owned())
                    .unwrap_or_default();
            }
            Self::TransientOwner => {
                if !awaiting_placement || client.transient_owner.is_some() {
                    return;
                }
                let owner = reply
                    .filter(|r| r.value_type == PropertyType::Window)
                    .and_then(|r| r.value32()?.next())
                    .map(WindowHandle)
                    .filter(|w| !w.is_none());
                client.transient_owner = owner;
            }
            Self::SupportedProtocols => {
                let protocols: Vec<u32> = reply
                    .filter(|r| r.value_type == PropertyType::Atom)
                    .and_then(PropertyReply::value32)
                    .map(Iterator::collect)
                    .unwrap_or_default();
                client.supports_take_focus = protocols.contains(&atoms.take_focus);
                client.supports_delete = protocols.contains(&atoms.delete_window);
            }
        }
    }
}

// Size hints are INT32 on the wire.
fn positive(value: u32) -> Option<u32> {
    let value = value as i32;
    (value > 0).then_some(value as u32)
}
