use nyla_core::{DisplayEvent, models::PropertyKind};
use x11rb::protocol::xproto;

use crate::xwrap::XWrap;

/// Property changes on the five properties nyla reads trigger a refetch.
pub(crate) fn from_event(event: &xproto::PropertyNotifyEvent, xw: &XWrap) -> Option<DisplayEvent> {
    if event.window == xw.root() {
        return None;
    }
    let kind = property_kind(event.atom, xw.atoms.WMProtocols)?;
    tracing::trace!(window = event.window, ?kind, "PropertyNotify");
    Some(DisplayEvent::PropertyChanged(event.window.into(), kind))
}

fn property_kind(atom: xproto::Atom, wm_protocols: xproto::Atom) -> Option<PropertyKind> {
    let is = |predefined: xproto::AtomEnum| atom == xproto::Atom::from(predefined);
    if is(xproto::AtomEnum::WM_HINTS) {
        Some(PropertyKind::Capabilities)
    } else if is(xproto::AtomEnum::WM_NORMAL_HINTS) {
        Some(PropertyKind::SizeHints)
    } else if is(xproto::AtomEnum::WM_NAME) {
        Some(PropertyKind::Name)
    } else if is(xproto::AtomEnum::WM_TRANSIENT_FOR) {
        Some(PropertyKind::TransientOwner)
    } else if atom == wm_protocols {
        Some(PropertyKind::SupportedProtocols)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WM_PROTOCOLS: xproto::Atom = 300;

    #[test]
    fn known_properties_map_to_their_kind() {
        let kind = |atom: xproto::AtomEnum| property_kind(atom.into(), WM_PROTOCOLS);
        assert_eq!(kind(xproto::AtomEnum::WM_HINTS), Some(PropertyKind::Capabilities));
        assert_eq!(kind(xproto::AtomEnum::WM_NORMAL_HINTS), Some(PropertyKind::SizeHints));
        assert_eq!(kind(xproto::AtomEnum::WM_NAME), Some(PropertyKind::Name));
        assert_eq!(
            kind(xproto::AtomEnum::WM_TRANSIENT_FOR),
            Some(PropertyKind::TransientOwner)
        );
        assert_eq!(
            property_kind(WM_PROTOCOLS, WM_PROTOCOLS),
            Some(PropertyKind::SupportedProtocols)
        );
    }

    #[test]
    fn other_properties_are_ignored() {
        assert_eq!(
            property_kind(xproto::AtomEnum::WM_ICON_NAME.into(), WM_PROTOCOLS),
            None
        );
    }
}
