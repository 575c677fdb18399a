use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::models::Manager;
use std::sync::atomic::Ordering;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Take over the display and adopt the windows that are already mapped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NylaError::AlreadyRunning`] if another window manager is active, or
    /// an error if the existing windows can not be listed.
    pub fn init(&mut self) -> Result<()> {
        self.display_server.init(&self.config.mapped_bindings())?;
        let windows = self.display_server.top_level_windows()?;
        tracing::info!(count = windows.len(), "adopting existing windows");
        for window in windows {
            self.manage(window);
        }
        Ok(())
    }

    /// One tick: drain queued events, resolve property replies, place new windows, then
    /// push layout and focus changes to the display server. Clears `running` on quit.
    pub fn process(&mut self, running: &mut bool) {
        while let Some(event) = self.display_server.next_event() {
            tracing::trace!(?event, "DisplayEvent");
            self.display_event_handler(event);
        }
        self.resolve_properties();
        self.state.place_pending_windows();
        self.state.reconcile();
        self.execute_actions();

        if self.reap_requested.swap(false, Ordering::SeqCst) {
            self.children.remove_finished_children();
        }
        if self.dump_requested.swap(false, Ordering::SeqCst) {
            tracing::info!("client dump:\n{}", self.state.dump_clients());
        }
        if self.quit_requested {
            *running = false;
        }
    }

    //preform any actions requested by the handler
    pub(crate) fn execute_actions(&mut self) {
        while let Some(act) = self.state.actions.pop_front() {
            self.display_server.execute_action(act);
        }
    }

    /// Run until a quit command, waking up whenever the display server has something to say.
    ///
    /// # Errors
    ///
    /// Fails if the manager could not take over the display.
    pub async fn start_event_loop(mut self) -> Result<()> {
        self.init()?;
        let mut running = true;
        while running {
            self.process(&mut running);
            self.display_server.flush();
            if !running {
                break;
            }
            // Replies read while resolving properties can leave events buffered without the
            // socket becoming readable again, so never sleep for long.
            tokio::select! {
                () = self.display_server.wait_readable() => {}
                () = timeout(100) => {}
            }
        }
        tracing::info!("event loop finished");
        Ok(())
    }
}

async fn timeout(mills: u64) {
    use tokio::time::{Duration, sleep};
    sleep(Duration::from_millis(mills)).await;
}
