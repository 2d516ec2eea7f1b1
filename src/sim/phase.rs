//! Run state machine
//!
//! A pure transition table; the engine decides what a transition into
//! `Playing` from `Menu`/`GameOver` means (a freshly built run).

use serde::{Deserialize, Serialize};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Waiting for a start command
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Commands from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCommand {
    Start,
    Pause,
    Resume,
    Restart,
    ReturnToMenu,
}

impl GamePhase {
    /// Phase after applying `command`, or `None` if the command does not
    /// apply in this phase
    pub fn apply(self, command: RunCommand) -> Option<GamePhase> {
        use GamePhase::*;
        use RunCommand::*;
        match (self, command) {
            (Menu, Start) => Some(Playing),
            (Playing, Pause) => Some(Paused),
            (Paused, Resume) => Some(Playing),
            (GameOver, Restart) => Some(Playing),
            (GameOver, ReturnToMenu) => Some(Menu),
            _ => None,
        }
    }

    /// Whether entering `Playing` via `command` begins a fresh run
    pub fn starts_run(self, command: RunCommand) -> bool {
        matches!(
            (self, command),
            (GamePhase::Menu, RunCommand::Start) | (GamePhase::GameOver, RunCommand::Restart)
        )
    }

    /// Simulation only advances while playing
    pub fn is_running(self) -> bool {
        self == GamePhase::Playing
    }
}
