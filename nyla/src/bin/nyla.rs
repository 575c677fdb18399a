use anyhow::{Context, Result, bail};
use clap::Parser;
use nyla_core::Manager;
use std::panic;
use std::path::PathBuf;
use x11rb_display_server::X11rbDisplayServer;

/// A small tiling window manager with stacks, zoom and follow mode.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Log at debug level, ignoring `RUST_LOG` and the config file.
    #[arg(short, long)]
    verbose: bool,
    /// Read the configuration from this file instead of the XDG config directory.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => nyla::load_from_path(path)?,
        None => nyla::load(),
    };

    if args.check {
        return check(&config);
    }

    let directives = nyla::utils::log::log_directives(
        args.verbose,
        std::env::var("RUST_LOG").ok(),
        config.log_level.as_deref(),
    );
    if let Some(err) = nyla::utils::log::setup_logging(&directives) {
        tracing::warn!(error = %err, "Invalid log filter, falling back to info");
    }
    tracing::info!("nyla booting...");

    let exit_status = panic::catch_unwind(move || -> Result<()> {
        let rt = tokio::runtime::Runtime::new().context("couldn't init Tokio runtime")?;
        let _rt_guard = rt.enter();

        let manager = Manager::<nyla::Config, X11rbDisplayServer>::new(config)?;
        manager.register_child_hook();
        manager.register_dump_hook();
        rt.block_on(manager.start_event_loop())?;
        Ok(())
    });

    match exit_status {
        Ok(Ok(())) => {
            tracing::info!("Completed");
            Ok(())
        }
        Ok(Err(err)) => {
            tracing::error!(error = ?err, "Completed with event loop error");
            Err(err)
        }
        Err(err) => {
            tracing::error!("Completed with error: {:?}", err);
            bail!("nyla panicked")
        }
    }
}

fn check(config: &nyla::Config) -> Result<()> {
    let keybind_errors = config.keybind_errors();
    let color_errors = config.color_errors();
    for (keybind, err) in &keybind_errors {
        println!("keybind {:?} on {:?}: {err:#}", keybind.command, keybind.key);
    }
    for (name, err) in &color_errors {
        println!("{name}: {err:#}");
    }
    if keybind_errors.is_empty() && color_errors.is_empty() {
        println!("Configuration OK");
        Ok(())
    } else {
        bail!(
            "{} invalid setting(s)",
            keybind_errors.len() + color_errors.len()
        )
    }
}
