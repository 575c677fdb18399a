//! Helpers shared by the handler tests.
use crate::DisplayEvent;
use crate::config::TestConfig;
use crate::display_action::DisplayAction;
use crate::display_servers::MockDisplayServer;
use crate::display_servers::mock_display_server::ATOMS;
use crate::models::{Manager, PropertyKind, PropertyReply, PropertyType, WindowHandle};

pub type TestManager = Manager<TestConfig, MockDisplayServer>;

pub const TAKE_FOCUS: u32 = ATOMS.take_focus;
pub const DELETE_WINDOW: u32 = ATOMS.delete_window;

/// Queue a map notification for `handle`.
pub fn map(manager: &mut TestManager, handle: WindowHandle) {
    manager.display_server.events.push_back(DisplayEvent::Mapped {
        handle,
        override_redirect: false,
    });
}

/// Run one tick and return what was sent to the display server.
pub fn tick(manager: &mut TestManager) -> Vec<DisplayAction> {
    let mut running = true;
    manager.process(&mut running);
    manager.display_server.take_executed()
}

pub fn protocols(atoms: &[u32]) -> PropertyReply {
    PropertyReply::from_u32s(PropertyType::Atom, atoms)
}

pub fn transient_for(manager: &mut TestManager, handle: WindowHandle, owner: WindowHandle) {
    manager.display_server.properties.insert(
        (handle, PropertyKind::TransientOwner),
        PropertyReply::from_u32s(PropertyType::Window, &[owner.0]),
    );
}

/// Map and place windows `10..10 + count` on the active stack.
pub fn with_windows(count: u32) -> (TestManager, Vec<WindowHandle>) {
    let mut manager = Manager::new_test(vec![]);
    let windows: Vec<WindowHandle> = (10..10 + count).map(WindowHandle).collect();
    for w in &windows {
        map(&mut manager, *w);
    }
    tick(&mut manager);
    (manager, windows)
}
