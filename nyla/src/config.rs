//! nyla general configuration
mod default;
mod keybind;

pub use self::keybind::{Keybind, Modifier};

use anyhow::{Context, Result, ensure};
use nyla_core::BorderColors;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use xdg::BaseDirectories;

/// Commands a `[[keybind]]` entry can name.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseCommand {
    /// Runs `value` through `sh -c`.
    Execute,
    OpenTerminal,
    CloseWindow,
    NextLayout,
    ToggleZoom,
    ToggleFollow,
    PreviousStack,
    NextStack,
    /// Jumps to the 1-based stack in `value`.
    GotoStack,
    PreviousWindow,
    NextWindow,
    Quit,
}

/// General configuration, read from `$XDG_CONFIG_HOME/nyla/config.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Substituted for `"modkey"` in keybind modifiers.
    pub modkey: String,
    pub terminal: String,
    /// `tracing` filter directives, overridden by `RUST_LOG`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub stack_count: usize,
    pub status_bar_height: u32,
    pub layout_padding: u32,
    pub subwindow_margin: u32,
    pub border_width: u32,
    pub default_border_color: String,
    pub focused_border_color: String,
    pub follow_border_color: String,
    pub keybind: Vec<Keybind>,
}

#[must_use]
pub fn load() -> Config {
    load_from_file()
        .map_err(|err| eprintln!("ERROR LOADING CONFIG: {err:?}"))
        .unwrap_or_default()
}

/// # Errors
///
/// Fails if the XDG directories cannot be determined, or if the config file cannot be read,
/// parsed, or (on first run) written.
pub fn load_from_file() -> Result<Config> {
    tracing::debug!("Loading config file");
    let path = BaseDirectories::with_prefix("nyla")?;
    let config_file = path.place_config_file("config.toml")?;
    load_from_path(&config_file)
}

/// Reads the config at `path`, writing the default config there first if it does not exist.
///
/// # Errors
///
/// Fails if the file cannot be read or written, or holds invalid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if path.exists() {
        tracing::debug!("Config file '{}' found.", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("could not parse {}", path.display()))?;
        Ok(config)
    } else {
        tracing::debug!("Config file not found. Writing the default config.");
        let config = Config::default();
        let toml = toml::to_string(&config)?;
        fs::write(path, toml).with_context(|| format!("could not write {}", path.display()))?;
        Ok(config)
    }
}

impl Config {
    /// Every keybind that does not convert, with the reason.
    pub fn keybind_errors(&self) -> Vec<(&Keybind, anyhow::Error)> {
        self.keybind
            .iter()
            .filter_map(|keybind| {
                keybind
                    .try_convert_to_core_keybind(self)
                    .err()
                    .map(|err| (keybind, err))
            })
            .collect()
    }

    /// Color strings that do not parse, by config key.
    pub fn color_errors(&self) -> Vec<(&'static str, anyhow::Error)> {
        self.colors()
            .into_iter()
            .filter_map(|(name, color)| parse_color(color).err().map(|err| (name, err)))
            .collect()
    }

    fn colors(&self) -> [(&'static str, &str); 3] {
        [
            ("default_border_color", self.default_border_color.as_str()),
            ("focused_border_color", self.focused_border_color.as_str()),
            ("follow_border_color", self.follow_border_color.as_str()),
        ]
    }
}

/// Parses a `"#RRGGBB"` color into a pixel value.
///
/// # Errors
///
/// Fails on anything but a `#` followed by six hex digits.
pub fn parse_color(color: &str) -> Result<u32> {
    let hex = color
        .strip_prefix('#')
        .with_context(|| format!("color {color:?} must start with '#'"))?;
    ensure!(
        hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        "color {color:?} must have six hex digits"
    );
    Ok(u32::from_str_radix(hex, 16)?)
}

fn color_or(color: &str, fallback: u32) -> u32 {
    parse_color(color).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid border color, using the default");
        fallback
    })
}

impl nyla_core::Config for Config {
    fn mapped_bindings(&self) -> Vec<nyla_core::Keybind> {
        self.keybind
            .iter()
            .filter_map(|keybind| match keybind.try_convert_to_core_keybind(self) {
                Ok(converted) => Some(converted),
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        key = %keybind.key,
                        "Invalid key binding, skipping it"
                    );
                    None
                }
            })
            .collect()
    }

    fn stack_count(&self) -> usize {
        self.stack_count
    }

    fn status_bar_height(&self) -> u32 {
        self.status_bar_height
    }

    fn layout_padding(&self) -> u32 {
        self.layout_padding
    }

    fn subwindow_margin(&self) -> u32 {
        self.subwindow_margin
    }

    fn border_width(&self) -> u32 {
        self.border_width
    }

    fn border_colors(&self) -> BorderColors {
        let fallback = BorderColors::default();
        BorderColors {
            none: color_or(&self.default_border_color, fallback.none),
            active: color_or(&self.focused_border_color, fallback.active),
            follow: color_or(&self.follow_border_color, fallback.follow),
        }
    }
}
