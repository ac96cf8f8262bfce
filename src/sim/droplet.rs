//! Falling droplet entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Stable droplet identifier, unique within a controller's lifetime
pub type DropletId = u32;

/// Droplet types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropletKind {
    /// Adds points when caught
    #[default]
    Regular,
    /// Costs points when caught
    Penalty,
}

/// How a droplet left play. Every droplet ends exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalEvent {
    /// Intersected the catcher
    Caught,
    /// Reached the bottom of the playfield
    Missed,
    /// Removed by session end or reset, no score effect
    Cleared,
}

/// A droplet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Droplet {
    pub id: DropletId,
    pub kind: DropletKind,
    /// Top-left corner (x fixed at spawn, y follows fall progress)
    pub pos: Vec2,
    /// Edge length (droplets are square)
    pub size: f32,
    /// Virtual clock time of spawn (ms)
    pub spawn_time: u64,
    pub fall_duration_ms: u64,
    /// Fall progress in [0, 1]
    pub progress: f32,
}

impl Droplet {
    pub fn new(
        id: DropletId,
        kind: DropletKind,
        x: f32,
        size: f32,
        spawn_time: u64,
        fall_duration_ms: u64,
    ) -> Self {
        Self {
            id,
            kind,
            // Start fully above the playfield
            pos: Vec2::new(x, -size),
            size,
            spawn_time,
            fall_duration_ms,
            progress: 0.0,
        }
    }

    /// Move to where the fall animation is at `now` for a playfield of the given height
    pub fn advance_to(&mut self, now: u64, playfield_height: f32) {
        let elapsed = now.saturating_sub(self.spawn_time);
        self.progress = (elapsed as f32 / self.fall_duration_ms.max(1) as f32).clamp(0.0, 1.0);
        self.pos.y = -self.size + self.progress * (playfield_height + self.size);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn is_penalty(&self) -> bool {
        self.kind == DropletKind::Penalty
    }
}
