use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_event::{DisplayEvent, FocusMode};
use crate::display_servers::DisplayServer;
use crate::models::Manager;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Apply one event to the state. Anything that needs redrawing is only marked dirty.
    pub fn display_event_handler(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::KeyCombo(mod_mask, xkeysym, time) => {
                //look through the config and build a command if its defined in the config
                let command = self
                    .config
                    .mapped_bindings()
                    .into_iter()
                    .find(|k| k.modifier == mod_mask && k.key == xkeysym)
                    .map(|k| k.command);
                if let Some(command) = command {
                    self.command_handler(&command, time);
                }
            }

            DisplayEvent::KeyGrabReload => {
                self.state
                    .actions
                    .push_back(DisplayAction::ReloadKeyGrabs(self.config.mapped_bindings()));
            }

            // Managed windows keep the geometry nyla gives them, but are told what it is.
            DisplayEvent::ConfigureRequest(change) => {
                match self.state.clients.get_mut(&change.handle) {
                    Some(client) => client.wants_configure_notify = true,
                    None => self.state.actions.push_back(DisplayAction::Configure(change)),
                }
            }

            DisplayEvent::MapRequest(handle) => {
                self.state.actions.push_back(DisplayAction::MapWindow(handle));
            }

            DisplayEvent::Mapped {
                handle,
                override_redirect,
            } => {
                if !override_redirect {
                    self.manage(handle);
                }
            }

            DisplayEvent::Unmapped(handle) | DisplayEvent::Destroyed(handle) => {
                self.unmanage(handle);
            }

            DisplayEvent::PropertyChanged(handle, kind) => self.request_property(handle, kind),

            DisplayEvent::FocusIn(_, FocusMode::Normal) => self.check_focus_theft(),
            DisplayEvent::FocusIn(_, FocusMode::Grab) => {}

            DisplayEvent::Entered(handle, time) => {
                self.state.last_entered = Some(handle);
                self.state.activate_under_pointer(time);
            }

            DisplayEvent::RawMotion(time) => {
                self.state.last_motion = self.state.last_motion.max(time);
                self.state.activate_under_pointer(self.state.last_motion);
            }

            DisplayEvent::ProtocolError(err) => {
                tracing::error!(error = %err, "Protocol error reported by the display server.");
            }
        }
    }
}
