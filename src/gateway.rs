//! Boundary to the presentation layer
//!
//! The engine never touches rendering, audio or device input directly. It
//! tells a `PresentationGateway` what to show and consumes a clamped catcher
//! coordinate. Gateway failures are reported back as `GatewayError` and the
//! engine logs and ignores them.

use glam::Vec2;
use thiserror::Error;

use crate::sim::droplet::{DropletId, DropletKind};
use crate::sim::state::TerminalMessage;

/// A presentation side effect could not be carried out
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("presentation surface unavailable")]
    Unavailable,
}

pub type GatewayResult = Result<(), GatewayError>;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Regular droplet caught
    Catch,
    /// Penalty droplet caught
    PenaltyCatch,
    /// Win target reached
    Win,
    /// Time ran out
    GameOver,
}

/// Everything the engine asks of the rendering/audio side.
///
/// All methods default to doing nothing, so a gateway only implements what
/// it can show.
pub trait PresentationGateway {
    fn add_visual(&mut self, _id: DropletId, _kind: DropletKind, _size: f32, _pos: Vec2) -> GatewayResult {
        Ok(())
    }

    fn update_visual_position(&mut self, _id: DropletId, _pos: Vec2) -> GatewayResult {
        Ok(())
    }

    fn remove_visual(&mut self, _id: DropletId) -> GatewayResult {
        Ok(())
    }

    fn set_score_display(&mut self, _score: u32) -> GatewayResult {
        Ok(())
    }

    fn set_time_display(&mut self, _seconds: u32) -> GatewayResult {
        Ok(())
    }

    fn show_terminal_message(&mut self, _message: &TerminalMessage) -> GatewayResult {
        Ok(())
    }

    fn show_progress_message(&mut self, _text: &str) -> GatewayResult {
        Ok(())
    }

    /// Remove terminal and progress messages
    fn clear_messages(&mut self) -> GatewayResult {
        Ok(())
    }

    /// Confetti or similar
    fn emit_celebration(&mut self) -> GatewayResult {
        Ok(())
    }

    fn play_sound(&mut self, _effect: SoundEffect) -> GatewayResult {
        Ok(())
    }

    /// Move the catcher visual to a left-edge coordinate
    fn position_catcher(&mut self, _x: f32) -> GatewayResult {
        Ok(())
    }
}

/// Gateway that shows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGateway;

impl PresentationGateway for NullGateway {}

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    AddVisual {
        id: DropletId,
        kind: DropletKind,
        size: f32,
        pos: Vec2,
    },
    UpdateVisualPosition {
        id: DropletId,
        pos: Vec2,
    },
    RemoveVisual(DropletId),
    SetScore(u32),
    SetTime(u32),
    TerminalMessage(TerminalMessage),
    ProgressMessage(String),
    ClearMessages,
    Celebration,
    Sound(SoundEffect),
    PositionCatcher(f32),
}

/// Gateway that records every call, optionally failing all of them
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    pub calls: Vec<GatewayCall>,
    /// Record the call but report failure
    pub fail: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    fn record(&mut self, call: GatewayCall) -> GatewayResult {
        self.calls.push(call);
        if self.fail {
            Err(GatewayError::Unavailable)
        } else {
            Ok(())
        }
    }

    /// Number of calls matching a predicate
    pub fn count(&self, pred: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls.iter().filter(|&c| pred(c)).count()
    }

    pub fn terminal_messages(&self) -> Vec<&TerminalMessage> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GatewayCall::TerminalMessage(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn progress_messages(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GatewayCall::ProgressMessage(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Visuals added but not yet removed
    pub fn visible(&self) -> Vec<DropletId> {
        let mut visible = Vec::new();
        for call in &self.calls {
            match call {
                GatewayCall::AddVisual { id, .. } => visible.push(*id),
                GatewayCall::RemoveVisual(id) => visible.retain(|v| v != id),
                _ => {}
            }
        }
        visible
    }
}

impl PresentationGateway for RecordingGateway {
    fn add_visual(&mut self, id: DropletId, kind: DropletKind, size: f32, pos: Vec2) -> GatewayResult {
        self.record(GatewayCall::AddVisual { id, kind, size, pos })
    }

    fn update_visual_position(&mut self, id: DropletId, pos: Vec2) -> GatewayResult {
        self.record(GatewayCall::UpdateVisualPosition { id, pos })
    }

    fn remove_visual(&mut self, id: DropletId) -> GatewayResult {
        self.record(GatewayCall::RemoveVisual(id))
    }

    fn set_score_display(&mut self, score: u32) -> GatewayResult {
        self.record(GatewayCall::SetScore(score))
    }

    fn set_time_display(&mut self, seconds: u32) -> GatewayResult {
        self.record(GatewayCall::SetTime(seconds))
    }

    fn show_terminal_message(&mut self, message: &TerminalMessage) -> GatewayResult {
        self.record(GatewayCall::TerminalMessage(message.clone()))
    }

    fn show_progress_message(&mut self, text: &str) -> GatewayResult {
        self.record(GatewayCall::ProgressMessage(text.to_string()))
    }

    fn clear_messages(&mut self) -> GatewayResult {
        self.record(GatewayCall::ClearMessages)
    }

    fn emit_celebration(&mut self) -> GatewayResult {
        self.record(GatewayCall::Celebration)
    }

    fn play_sound(&mut self, effect: SoundEffect) -> GatewayResult {
        self.record(GatewayCall::Sound(effect))
    }

    fn position_catcher(&mut self, x: f32) -> GatewayResult {
        self.record(GatewayCall::PositionCatcher(x))
    }
}

/// Log and drop a failed presentation call
pub(crate) fn isolate(op: &'static str, result: GatewayResult) {
    if let Err(e) = result {
        log::warn!("Presentation call {} failed: {}", op, e);
    }
}
