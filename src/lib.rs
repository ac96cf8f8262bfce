//! Droplet Catch - a timed droplet-catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic session engine (spawning, collisions, scoring, lifecycle)
//! - `gateway`: Boundary to rendering, audio and pointer input
//! - `controls`: Start/reset/difficulty command surface
//! - `tuning`: Data-driven game balance

pub mod controls;
pub mod gateway;
pub mod sim;
pub mod tuning;

pub use controls::Command;
pub use gateway::{GatewayError, NullGateway, PresentationGateway, RecordingGateway};
pub use sim::{Difficulty, SessionController, SessionState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Base droplet edge length before the random size factor is applied
    pub const BASE_DROP_SIZE: f32 = 60.0;
    /// Random size factor range (uniform)
    pub const DROP_SIZE_MIN_FACTOR: f32 = 0.5;
    pub const DROP_SIZE_MAX_FACTOR: f32 = 1.3;

    /// Catcher defaults - sits just above the bottom edge
    pub const CATCHER_WIDTH: f32 = 100.0;
    pub const CATCHER_HEIGHT: f32 = 30.0;
    pub const CATCHER_BOTTOM_MARGIN: f32 = 10.0;

    /// Chance that a spawned droplet is a penalty droplet
    pub const PENALTY_CHANCE: f64 = 0.25;

    /// Time for a droplet to fall the full playfield height
    pub const FALL_DURATION_MS: u64 = 4000;
    /// One droplet per spawn tick
    pub const SPAWN_INTERVAL_MS: u64 = 1000;
    /// Countdown decrements one second per tick
    pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
    /// Per-droplet collision poll period
    pub const POLL_INTERVAL_MS: u64 = 50;

    /// Score deltas
    pub const REGULAR_POINTS: u32 = 10;
    pub const PENALTY_POINTS: u32 = 10;
}
