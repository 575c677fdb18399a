use super::{BaseCommand, Config, Keybind};
use std::env;
use std::fs;

const STACK_COUNT: usize = 9;

impl Default for Config {
    fn default() -> Self {
        let mut keybind = vec![
            // Mod + Enter => open a terminal
            Keybind {
                command: BaseCommand::OpenTerminal,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "Return".to_owned(),
            },
            // Mod + q => close the active window
            Keybind {
                command: BaseCommand::CloseWindow,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "q".to_owned(),
            },
            // Mod + w => cycle the layout of the active stack
            Keybind {
                command: BaseCommand::NextLayout,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "w".to_owned(),
            },
            Keybind {
                command: BaseCommand::PreviousStack,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "e".to_owned(),
            },
            Keybind {
                command: BaseCommand::NextStack,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "r".to_owned(),
            },
            Keybind {
                command: BaseCommand::PreviousWindow,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "a".to_owned(),
            },
            Keybind {
                command: BaseCommand::NextWindow,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "s".to_owned(),
            },
            Keybind {
                command: BaseCommand::ToggleZoom,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "z".to_owned(),
            },
            // Mod + f => carry the active window along when switching stacks
            Keybind {
                command: BaseCommand::ToggleFollow,
                value: String::default(),
                modifier: Some("modkey".into()),
                key: "f".to_owned(),
            },
            // Mod + Shift + Escape => exit nyla
            Keybind {
                command: BaseCommand::Quit,
                value: String::default(),
                modifier: Some(vec!["modkey", "Shift"].into()),
                key: "Escape".to_owned(),
            },
        ];

        // Mod + n => jump to stack n
        keybind.extend((1..=STACK_COUNT).map(|n| Keybind {
            command: BaseCommand::GotoStack,
            value: n.to_string(),
            modifier: Some("modkey".into()),
            key: n.to_string(),
        }));

        Self {
            modkey: "Mod4".to_owned(),
            terminal: default_terminal().to_owned(),
            log_level: None,
            stack_count: STACK_COUNT,
            status_bar_height: 20,
            layout_padding: 2,
            subwindow_margin: 20,
            border_width: 2,
            default_border_color: "#000000".to_owned(),
            focused_border_color: "#95A3B3".to_owned(),
            follow_border_color: "#84DCC6".to_owned(),
            keybind,
        }
    }
}

fn is_program_in_path(program: &str) -> bool {
    env::var("PATH").is_ok_and(|path| {
        path.split(':')
            .any(|dir| fs::metadata(format!("{dir}/{program}")).is_ok())
    })
}

/// The first of a few common terminals that is installed, `xterm` otherwise.
fn default_terminal<'s>() -> &'s str {
    ["alacritty", "kitty", "st", "urxvt", "xterm"]
        .into_iter()
        .find(|term| is_program_in_path(term))
        .unwrap_or("xterm")
}
