//! Per-droplet catch detection
//!
//! Each live droplet carries two timers: a collision poll and a landing
//! deadline. Whichever terminal path fires first releases the watch, which
//! hands back both handles so the caller cancels them together.

use super::droplet::{Droplet, DropletId};
use super::geometry::{Rect, intersects};
use super::scheduler::TaskHandle;
use crate::tuning::Tuning;

/// Timers attached to one live droplet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watch {
    pub droplet_id: DropletId,
    /// Repeating collision poll
    pub poll: TaskHandle,
    /// One-shot landing (miss) deadline
    pub landing: TaskHandle,
}

impl Watch {
    pub fn handles(&self) -> [TaskHandle; 2] {
        [self.poll, self.landing]
    }
}

/// Tracks which droplets are being polled
#[derive(Debug, Clone, Default)]
pub struct CollisionMonitor {
    watches: Vec<Watch>,
}

impl CollisionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&mut self, droplet_id: DropletId, poll: TaskHandle, landing: TaskHandle) {
        debug_assert!(!self.is_watching(droplet_id));
        self.watches.push(Watch {
            droplet_id,
            poll,
            landing,
        });
    }

    /// Stop watching a droplet. Returns `None` if it was already released.
    pub fn release(&mut self, droplet_id: DropletId) -> Option<Watch> {
        let idx = self.watches.iter().position(|w| w.droplet_id == droplet_id)?;
        Some(self.watches.remove(idx))
    }

    pub fn is_watching(&self, droplet_id: DropletId) -> bool {
        self.watches.iter().any(|w| w.droplet_id == droplet_id)
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Whether the droplet currently overlaps the catcher
    pub fn is_caught(drop: &Droplet, catcher: &Rect) -> bool {
        intersects(&drop.rect(), catcher)
    }
}

/// Catcher rectangle for a left-edge position
pub fn catcher_rect(x: f32, tuning: &Tuning) -> Rect {
    Rect::new(
        x,
        tuning.catcher_top(),
        tuning.catcher_width,
        tuning.catcher_height,
    )
}
