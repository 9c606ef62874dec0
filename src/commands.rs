//! User commands and the keys bound to them.

use egui::{Key, Modifiers};

use crate::navigation::{NavigationError, NavigationSequencer, SettingsStore};
use crate::playback::TransportFactory;

/// Something the user asked the player to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move to the next verse and start it.
    Next,
    /// Move to the previous verse without playing.
    Previous,
    Play,
    Pause,
    /// Toggle "play beginning of verse".
    TogglePreview,
    SpeedUp,
    SpeedDown,
    SelectSurah(i64),
    SelectAya { sura: i64, aya: i64 },
}

/// Key press that triggers a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HotkeyGesture {
    pub key: Key,
}

impl HotkeyGesture {
    pub const fn new(key: Key) -> Self {
        Self { key }
    }

    /// Human readable key name for tooltips.
    pub fn label(&self) -> &'static str {
        match self.key {
            Key::ArrowRight => "→",
            Key::ArrowLeft => "←",
            Key::Space => "Space",
            Key::Plus => "+",
            Key::Equals => "=",
            Key::Minus => "-",
            other => other.name(),
        }
    }
}

/// Hotkey metadata surfaced to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HotkeyAction {
    pub id: &'static str,
    pub label: &'static str,
    pub gesture: HotkeyGesture,
    pub command: Command,
}

const HOTKEY_ACTIONS: &[HotkeyAction] = &[
    HotkeyAction {
        id: "next",
        label: "Next verse",
        gesture: HotkeyGesture::new(Key::ArrowRight),
        command: Command::Next,
    },
    HotkeyAction {
        id: "previous",
        label: "Previous verse",
        gesture: HotkeyGesture::new(Key::ArrowLeft),
        command: Command::Previous,
    },
    HotkeyAction {
        id: "play",
        label: "Play",
        gesture: HotkeyGesture::new(Key::Space),
        command: Command::Play,
    },
    HotkeyAction {
        id: "toggle-preview",
        label: "Play beginning of verse",
        gesture: HotkeyGesture::new(Key::P),
        command: Command::TogglePreview,
    },
    HotkeyAction {
        id: "speed-up",
        label: "Increase speed",
        gesture: HotkeyGesture::new(Key::Plus),
        command: Command::SpeedUp,
    },
    HotkeyAction {
        id: "speed-up-equals",
        label: "Increase speed",
        gesture: HotkeyGesture::new(Key::Equals),
        command: Command::SpeedUp,
    },
    HotkeyAction {
        id: "speed-down",
        label: "Decrease speed",
        gesture: HotkeyGesture::new(Key::Minus),
        command: Command::SpeedDown,
    },
];

pub fn iter_actions() -> impl Iterator<Item = &'static HotkeyAction> {
    HOTKEY_ACTIONS.iter()
}

/// First gesture bound to `command`, for button tooltips.
pub fn gesture_for(command: Command) -> Option<HotkeyGesture> {
    iter_actions()
        .find(|action| action.command == command)
        .map(|action| action.gesture)
}

/// Command bound to a key press. Presses with Ctrl/Cmd or Alt are left to the OS.
pub fn command_for_key(key: Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.command || modifiers.ctrl || modifiers.alt {
        return None;
    }
    iter_actions()
        .find(|action| action.gesture.key == key)
        .map(|action| action.command)
}

/// Run `command` against the sequencer.
pub fn dispatch<S, F>(
    sequencer: &mut NavigationSequencer<S, F>,
    command: Command,
) -> Result<(), NavigationError>
where
    S: SettingsStore,
    F: TransportFactory,
{
    tracing::debug!(?command, "Dispatching command");
    match command {
        Command::Next => sequencer.advance_and_play(),
        Command::Previous => sequencer.retreat(),
        Command::Play => {
            sequencer.play();
            Ok(())
        }
        Command::Pause => {
            sequencer.pause();
            Ok(())
        }
        Command::TogglePreview => {
            sequencer.toggle_preview_mode();
            Ok(())
        }
        Command::SpeedUp => sequencer.speed_up(),
        Command::SpeedDown => sequencer.speed_down(),
        Command::SelectSurah(sura) => sequencer.jump_to_surah(sura),
        Command::SelectAya { sura, aya } => sequencer.jump_to_aya(sura, aya),
    }
}
