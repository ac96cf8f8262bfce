//! Session state and the events it produces
//!
//! The `Session` aggregate is the single owner of score, clock and progress
//! flags. Only the controller and the components it calls mutate it.

use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::droplet::{DropletId, DropletKind};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for start
    #[default]
    Idle,
    /// Cadences active, droplets falling
    Running,
    /// Won or timed out; only reset leads back to Idle
    Ended,
}

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub spawned: u32,
    pub caught_regular: u32,
    pub caught_penalty: u32,
    pub missed: u32,
}

impl SessionStats {
    pub fn caught(&self) -> u32 {
        self.caught_regular + self.caught_penalty
    }
}

/// The session aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub state: SessionState,
    pub score: u32,
    /// Whole seconds left on the countdown
    pub time_remaining: u32,
    pub difficulty: Difficulty,
    pub win_target: u32,
    /// Set once per session when the score first reaches half the target
    pub halfway_announced: bool,
    pub stats: SessionStats,
}

impl Session {
    /// Create an idle session with the difficulty's profile loaded
    pub fn new(difficulty: Difficulty) -> Self {
        let mut session = Self {
            state: SessionState::Idle,
            score: 0,
            time_remaining: 0,
            difficulty,
            win_target: 0,
            halfway_announced: false,
            stats: SessionStats::default(),
        };
        session.load_profile();
        session
    }

    /// Copy duration and win target from the current difficulty
    pub fn load_profile(&mut self) {
        let profile = self.difficulty.profile();
        self.time_remaining = profile.duration_secs;
        self.win_target = profile.win_target;
    }

    /// Clear per-session progress and reload the profile
    pub fn reinitialize(&mut self) {
        self.score = 0;
        self.halfway_announced = false;
        self.stats = SessionStats::default();
        self.load_profile();
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }
}

/// Message shown when a session ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalMessage {
    Win {
        score: u32,
        target: u32,
        difficulty: Difficulty,
    },
    Loss {
        score: u32,
    },
}

impl TerminalMessage {
    pub fn is_win(&self) -> bool {
        matches!(self, TerminalMessage::Win { .. })
    }

    pub fn text(&self) -> String {
        match self {
            TerminalMessage::Win {
                target, difficulty, ..
            } => format!(
                "You did it! You reached {} points on {} mode and brought clean water to the village!",
                target, difficulty
            ),
            TerminalMessage::Loss { score } => {
                format!("Time's up! You scored {} points. Try again!", score)
            }
        }
    }
}

/// Things that happened during a session, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started {
        difficulty: Difficulty,
    },
    DropletSpawned {
        id: DropletId,
        kind: DropletKind,
    },
    DropletCaught {
        id: DropletId,
        kind: DropletKind,
        score: u32,
    },
    DropletMissed {
        id: DropletId,
    },
    /// Forced removal by end/reset
    DropletCleared {
        id: DropletId,
    },
    Halfway {
        score: u32,
    },
    Ended {
        won: bool,
        score: u32,
    },
    Reset,
    DifficultyChanged {
        difficulty: Difficulty,
    },
}

impl SessionEvent {
    /// Droplet id for terminal droplet events
    pub fn terminal_droplet(&self) -> Option<DropletId> {
        match self {
            SessionEvent::DropletCaught { id, .. }
            | SessionEvent::DropletMissed { id }
            | SessionEvent::DropletCleared { id } => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_loads_profile() {
        let session = Session::new(Difficulty::Hard);
        assert_eq!(session.state, SessionState::Idle);
        assert_eq!(session.time_remaining, 30);
        assert_eq!(session.win_target, 200);
        assert_eq!(session.score, 0);
        assert!(!session.halfway_announced);
    }

    #[test]
    fn test_reinitialize_clears_progress() {
        let mut session = Session::new(Difficulty::Easy);
        session.score = 70;
        session.halfway_announced = true;
        session.time_remaining = 3;
        session.stats.missed = 4;
        session.difficulty = Difficulty::Normal;

        session.reinitialize();
        assert_eq!(session.score, 0);
        assert!(!session.halfway_announced);
        assert_eq!(session.time_remaining, 35);
        assert_eq!(session.win_target, 150);
        assert_eq!(session.stats, SessionStats::default());
    }

    #[test]
    fn test_terminal_message_text() {
        let win = TerminalMessage::Win {
            score: 100,
            target: 100,
            difficulty: Difficulty::Easy,
        };
        assert!(win.is_win());
        assert!(win.text().contains("100"));
        assert!(win.text().contains("easy"));

        let loss = TerminalMessage::Loss { score: 40 };
        assert!(!loss.is_win());
        assert!(loss.text().contains("40"));
    }

    #[test]
    fn test_terminal_droplet() {
        assert_eq!(SessionEvent::DropletMissed { id: 3 }.terminal_droplet(), Some(3));
        assert_eq!(
            SessionEvent::DropletSpawned {
                id: 3,
                kind: DropletKind::Regular
            }
            .terminal_droplet(),
            None
        );
    }
}
