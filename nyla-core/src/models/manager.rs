use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::state::State;
use crate::utils::child_process::Children;
use std::sync::{Arc, atomic::AtomicBool};

/// Owns the window manager state together with the display server connection.
#[derive(Debug)]
pub struct Manager<C, SERVER> {
    pub state: State,
    pub config: C,
    pub display_server: SERVER,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub(crate) dump_requested: Arc<AtomicBool>,
    pub(crate) quit_requested: bool,
}

impl<C, SERVER> Manager<C, SERVER>
where
    C: Config,
    SERVER: DisplayServer,
{
    /// # Errors
    ///
    /// Will error if the display server cannot be reached.
    pub fn new(config: C) -> Result<Self> {
        let display_server = SERVER::new(&config)?;
        let state = State::new(
            &config,
            display_server.root(),
            display_server.screen_rect(),
        );

        Ok(Self {
            state,
            config,
            display_server,
            children: Default::default(),
            reap_requested: Default::default(),
            dump_requested: Default::default(),
            quit_requested: false,
        })
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }

    /// Log a dump of all clients whenever `SIGUSR1` arrives.
    pub fn register_dump_hook(&self) {
        _ = signal_hook::flag::register(
            signal_hook::consts::signal::SIGUSR1,
            self.dump_requested.clone(),
        )
        .map_err(|err| tracing::error!("Cannot register SIGUSR1 signal handler: {:?}", err));
    }

    /// Stop after the current tick.
    pub fn quit(&mut self) {
        self.quit_requested = true;
    }
}

#[cfg(test)]
impl Manager<crate::config::TestConfig, crate::display_servers::MockDisplayServer> {
    pub fn new_test(bindings: Vec<crate::config::Keybind>) -> Self {
        Self::new(crate::config::TestConfig { bindings }).expect("the mock server always connects")
    }
}
