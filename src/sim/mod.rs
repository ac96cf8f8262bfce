//! Deterministic session engine
//!
//! `SessionController` owns a virtual-clock `Scheduler` and dispatches its
//! tasks one at a time: the spawn and countdown cadences, plus a poll and a
//! landing task for every droplet in flight. Poll and landing race to release
//! the droplet's watch in `CollisionMonitor`; the loser finds it gone, so each
//! droplet is caught, missed or cleared exactly once. Randomness comes from the
//! seeded `Spawner`, and the presentation side only ever hears about results
//! through the gateway.

pub mod collision;
pub mod controller;
pub mod difficulty;
pub mod droplet;
pub mod geometry;
pub mod scheduler;
pub mod score;
pub mod spawn;
pub mod state;

pub use collision::{CollisionMonitor, catcher_rect};
pub use controller::SessionController;
pub use difficulty::{Difficulty, DifficultyProfile};
pub use droplet::{Droplet, DropletId, DropletKind, TerminalEvent};
pub use geometry::{Rect, intersects};
pub use scheduler::{Scheduler, TaskHandle};
pub use score::{CatchOutcome, report_catch};
pub use spawn::Spawner;
pub use state::{Session, SessionEvent, SessionState, SessionStats, TerminalMessage};
