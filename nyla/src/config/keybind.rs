use super::{BaseCommand, Config};
use anyhow::{Context, Result, bail, ensure};
use nyla_core::Command;
use nyla_core::utils::{modmask_lookup, xkeysym_lookup};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub command: BaseCommand,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    pub modifier: Option<Modifier>,
    pub key: String,
}

impl Keybind {
    pub fn try_convert_to_core_keybind(&self, config: &Config) -> Result<nyla_core::Keybind> {
        let command = match self.command {
            BaseCommand::Execute => {
                ensure!(!self.value.is_empty(), "value must not be empty");
                Command::Spawn(self.value.clone())
            }
            BaseCommand::OpenTerminal => {
                ensure!(!config.terminal.is_empty(), "no terminal configured");
                Command::Spawn(config.terminal.clone())
            }
            BaseCommand::CloseWindow => Command::CloseActive,
            BaseCommand::NextLayout => Command::NextLayout,
            BaseCommand::ToggleZoom => Command::ToggleZoom,
            BaseCommand::ToggleFollow => Command::ToggleFollow,
            BaseCommand::PreviousStack => Command::MoveStack(-1),
            BaseCommand::NextStack => Command::MoveStack(1),
            BaseCommand::GotoStack => {
                let stack = usize::from_str(&self.value).context("invalid index value for GotoStack")?;
                ensure!(
                    (1..=config.stack_count).contains(&stack),
                    "GotoStack index {stack} is outside 1..={}",
                    config.stack_count
                );
                Command::GotoStack(stack - 1)
            }
            BaseCommand::PreviousWindow => Command::MoveLocal {
                delta: -1,
                clears_zoom: true,
            },
            BaseCommand::NextWindow => Command::MoveLocal {
                delta: 1,
                clears_zoom: true,
            },
            BaseCommand::Quit => Command::Quit,
        };

        let Some(key) = xkeysym_lookup::into_keysym(&self.key) else {
            bail!("unknown key {:?}", self.key);
        };
        let modifiers: Vec<String> = self
            .modifier
            .iter()
            .flatten()
            .map(|m| if m == "modkey" { config.modkey.clone() } else { m })
            .collect();
        for m in &modifiers {
            ensure!(
                m == "None" || !modmask_lookup::into_mod(m).is_empty(),
                "unknown modifier {m:?}"
            );
        }

        Ok(nyla_core::Keybind {
            command,
            modifier: modmask_lookup::into_modmask(&modifiers),
            key,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    pub fn is_empty(&self) -> bool {
        match self {
            Modifier::Single(single) => single.is_empty(),
            Modifier::List(list) => list.is_empty(),
        }
    }
}

impl IntoIterator for &Modifier {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        let ms = match self {
            Modifier::Single(m) => vec![m.clone()],
            Modifier::List(ms) => ms.clone(),
        };
        ms.into_iter()
    }
}

impl From<Vec<&str>> for Modifier {
    fn from(l: Vec<&str>) -> Self {
        Self::List(l.into_iter().map(str::to_owned).collect())
    }
}

impl From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{modifier}"),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}
