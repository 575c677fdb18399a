use nyla_core::{
    DisplayEvent, FocusMode, ModMask,
    models::{GeometryChange, WindowHandle},
};
use x11rb::protocol::{Event, xproto};

use crate::xwrap::XWrap;

mod property_notify;

/// Translate events from x11rb to nyla's `DisplayEvent`
pub(crate) fn translate(event: Event, xw: &mut XWrap) -> Option<DisplayEvent> {
    match event {
        Event::KeyPress(e) => from_key_press(&e, xw),
        Event::MappingNotify(e) => from_mapping_notify(&e, xw),
        Event::ConfigureRequest(e) => Some(from_configure_request(&e)),
        Event::MapRequest(e) => Some(DisplayEvent::MapRequest(e.window.into())),
        Event::MapNotify(e) => Some(DisplayEvent::Mapped {
            handle: e.window.into(),
            override_redirect: e.override_redirect,
        }),
        Event::UnmapNotify(e) => Some(DisplayEvent::Unmapped(e.window.into())),
        Event::DestroyNotify(e) => Some(DisplayEvent::Destroyed(e.window.into())),
        Event::PropertyNotify(e) => property_notify::from_event(&e, xw),
        Event::FocusIn(e) => from_focus_in(&e),
        Event::EnterNotify(e) => from_enter_notify(&e),
        Event::XinputRawMotion(e) => Some(DisplayEvent::RawMotion(e.time)),
        Event::Error(e) => Some(DisplayEvent::ProtocolError(format!("{e:?}"))),
        _ => None,
    }
}

fn from_key_press(event: &xproto::KeyPressEvent, xw: &XWrap) -> Option<DisplayEvent> {
    let keysym = xw.keymap.keysym(event.detail)?;
    let mask = ModMask::from_bits_retain(u16::from(event.state)).clean();
    Some(DisplayEvent::KeyCombo(mask, keysym, event.time))
}

fn from_mapping_notify(event: &xproto::MappingNotifyEvent, xw: &mut XWrap) -> Option<DisplayEvent> {
    if event.request != xproto::Mapping::KEYBOARD {
        return None;
    }
    if let Err(e) = xw.refresh_keymap() {
        tracing::error!(error = ?e, "Unable to read the new keyboard mapping.");
        return None;
    }
    Some(DisplayEvent::KeyGrabReload)
}

fn from_configure_request(event: &xproto::ConfigureRequestEvent) -> DisplayEvent {
    let requested = |flag: xproto::ConfigWindow| {
        u16::from(event.value_mask) & u16::from(flag) != 0
    };
    DisplayEvent::ConfigureRequest(GeometryChange {
        handle: event.window.into(),
        x: requested(xproto::ConfigWindow::X).then_some(event.x.into()),
        y: requested(xproto::ConfigWindow::Y).then_some(event.y.into()),
        width: requested(xproto::ConfigWindow::WIDTH).then_some(event.width.into()),
        height: requested(xproto::ConfigWindow::HEIGHT).then_some(event.height.into()),
        border_width: requested(xproto::ConfigWindow::BORDER_WIDTH)
            .then_some(event.border_width.into()),
    })
}

fn from_focus_in(event: &xproto::FocusInEvent) -> Option<DisplayEvent> {
    if event.detail == xproto::NotifyDetail::POINTER {
        return None;
    }
    let mode = match event.mode {
        xproto::NotifyMode::GRAB | xproto::NotifyMode::UNGRAB => FocusMode::Grab,
        _ => FocusMode::Normal,
    };
    Some(DisplayEvent::FocusIn(event.event.into(), mode))
}

fn from_enter_notify(event: &xproto::EnterNotifyEvent) -> Option<DisplayEvent> {
    if event.mode != xproto::NotifyMode::NORMAL || event.detail == xproto::NotifyDetail::INFERIOR
    {
        return None;
    }
    let handle = WindowHandle::from(event.event);
    Some(DisplayEvent::Entered(handle, event.time))
}
