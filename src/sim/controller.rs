//! Session lifecycle and the timed game loop
//!
//! The controller owns the session, the virtual clock and every live
//! droplet. Time advances only through `advance`, which dispatches due tasks
//! one at a time, so each spawn, countdown or poll callback runs to
//! completion before the next one starts.

use super::collision::{CollisionMonitor, catcher_rect};
use super::difficulty::Difficulty;
use super::droplet::{Droplet, DropletId, DropletKind, TerminalEvent};
use super::scheduler::{Scheduler, TaskHandle};
use super::score::{self, halfway_message};
use super::spawn::Spawner;
use super::state::{Session, SessionEvent, SessionState, SessionStats, TerminalMessage};
use crate::controls::Command;
use crate::gateway::{PresentationGateway, SoundEffect, isolate};
use crate::tuning::{Tuning, TuningError};

/// Timed work the controller dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Spawn,
    Countdown,
    Poll(DropletId),
    Land(DropletId),
}

/// Handles of the two session-wide cadences
#[derive(Debug, Clone, Copy)]
struct Cadences {
    spawn: TaskHandle,
    countdown: TaskHandle,
}

/// Drives one game session at a time against a presentation gateway
pub struct SessionController<G: PresentationGateway> {
    session: Session,
    tuning: Tuning,
    gateway: G,
    scheduler: Scheduler<Task>,
    spawner: Spawner,
    monitor: CollisionMonitor,
    /// Present exactly while the session is running
    cadences: Option<Cadences>,
    /// Catcher left edge, already clamped to the playfield
    catcher_x: f32,
    events: Vec<SessionEvent>,
}

impl<G: PresentationGateway> SessionController<G> {
    /// Create an idle controller. The seed fixes every random droplet attribute.
    pub fn new(tuning: Tuning, gateway: G, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, gateway, seed))
    }

    /// Create an idle controller with default tuning
    pub fn with_defaults(gateway: G, seed: u64) -> Self {
        Self::build(Tuning::default(), gateway, seed)
    }

    fn build(tuning: Tuning, gateway: G, seed: u64) -> Self {
        let catcher_x = tuning.catcher_center_x();
        Self {
            session: Session::new(Difficulty::default()),
            tuning,
            gateway,
            scheduler: Scheduler::new(),
            spawner: Spawner::new(seed),
            monitor: CollisionMonitor::new(),
            cadences: None,
            catcher_x,
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining
    }

    pub fn win_target(&self) -> u32 {
        self.session.win_target
    }

    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty
    }

    pub fn stats(&self) -> SessionStats {
        self.session.stats
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Live droplets, oldest first
    pub fn droplets(&self) -> &[Droplet] {
        self.spawner.live()
    }

    pub fn catcher_x(&self) -> f32 {
        self.catcher_x
    }

    /// Virtual clock (ms since the controller was created)
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Control surface ===

    /// Run a parsed player command. Returns whether it took effect.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Reset => {
                self.reset();
                true
            }
            Command::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
        }
    }

    /// Begin a session. Ignored while one is already running.
    ///
    /// Starting from `Ended` goes through `reset` first.
    pub fn start(&mut self) -> bool {
        match self.session.state {
            SessionState::Running => {
                log::debug!("Start ignored: session already running");
                return false;
            }
            SessionState::Ended => self.reset(),
            SessionState::Idle => {}
        }

        self.session.reinitialize();
        self.session.state = SessionState::Running;
        self.cadences = Some(Cadences {
            spawn: self
                .scheduler
                .schedule_repeating(self.tuning.spawn_interval_ms, Task::Spawn),
            countdown: self
                .scheduler
                .schedule_repeating(self.tuning.countdown_interval_ms, Task::Countdown),
        });

        isolate("set_score_display", self.gateway.set_score_display(0));
        isolate(
            "set_time_display",
            self.gateway.set_time_display(self.session.time_remaining),
        );

        log::info!(
            "Session started on {} ({}s, target {})",
            self.session.difficulty,
            self.session.time_remaining,
            self.session.win_target
        );
        self.events.push(SessionEvent::Started {
            difficulty: self.session.difficulty,
        });
        true
    }

    /// Pick a difficulty. Ignored while running; otherwise refreshes the
    /// displayed timer and target without starting anything.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.session.is_running() {
            log::debug!("Difficulty change to {} ignored while running", difficulty);
            return false;
        }

        self.session.difficulty = difficulty;
        self.session.load_profile();
        isolate(
            "set_time_display",
            self.gateway.set_time_display(self.session.time_remaining),
        );

        log::info!("Difficulty set to {}", difficulty);
        self.events
            .push(SessionEvent::DifficultyChanged { difficulty });
        true
    }

    /// Finish the running session as a win or a loss.
    ///
    /// Cancels both cadences, clears every live droplet without scoring it
    /// and shows the terminal message. Ignored unless running.
    pub fn end(&mut self, is_win: bool) -> bool {
        if !self.session.is_running() {
            log::debug!("End ignored: session is {:?}", self.session.state);
            return false;
        }

        self.halt();
        self.session.state = SessionState::Ended;

        let score = self.session.score;
        let message = if is_win {
            TerminalMessage::Win {
                score,
                target: self.session.win_target,
                difficulty: self.session.difficulty,
            }
        } else {
            isolate("play_sound", self.gateway.play_sound(SoundEffect::GameOver));
            TerminalMessage::Loss { score }
        };
        isolate(
            "show_terminal_message",
            self.gateway.show_terminal_message(&message),
        );

        log::info!(
            "Session ended ({}) with {} points",
            if is_win { "win" } else { "time up" },
            score
        );
        self.events.push(SessionEvent::Ended { won: is_win, score });
        true
    }

    /// Return to `Idle` from any state with the current difficulty reloaded
    pub fn reset(&mut self) {
        if self.session.is_running() {
            log::info!("Resetting running session");
        }
        self.halt();

        self.session.reinitialize();
        self.session.state = SessionState::Idle;
        self.catcher_x = self.tuning.catcher_center_x();

        isolate("clear_messages", self.gateway.clear_messages());
        isolate("position_catcher", self.gateway.position_catcher(self.catcher_x));
        isolate("set_score_display", self.gateway.set_score_display(0));
        isolate(
            "set_time_display",
            self.gateway.set_time_display(self.session.time_remaining),
        );

        self.events.push(SessionEvent::Reset);
    }

    // === Input ===

    /// Update the catcher's left edge, clamped to the playfield. Non-finite values are ignored.
    pub fn set_catcher_x(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.catcher_x = x.clamp(self.tuning.catcher_min_x(), self.tuning.catcher_max_x());
    }

    // === Clock ===

    /// Advance the virtual clock by `ms`, running every task that falls due
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            match task {
                Task::Spawn => self.on_spawn(),
                Task::Countdown => self.on_countdown(),
                Task::Poll(id) => self.on_poll(id),
                Task::Land(id) => {
                    self.resolve(id, TerminalEvent::Missed);
                }
            }
        }
        self.scheduler.settle(until);
    }

    // === Task handlers ===

    fn on_spawn(&mut self) {
        let now = self.scheduler.now();
        let drop = self.spawner.spawn(now, &self.tuning);
        let (id, kind, size, pos) = (drop.id, drop.kind, drop.size, drop.pos);

        let poll = self
            .scheduler
            .schedule_repeating(self.tuning.poll_interval_ms, Task::Poll(id));
        let landing = self
            .scheduler
            .schedule_once(self.tuning.fall_duration_ms, Task::Land(id));
        self.monitor.watch(id, poll, landing);

        self.session.stats.spawned += 1;
        isolate("add_visual", self.gateway.add_visual(id, kind, size, pos));
        self.events.push(SessionEvent::DropletSpawned { id, kind });
    }

    fn on_countdown(&mut self) {
        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        isolate(
            "set_time_display",
            self.gateway.set_time_display(self.session.time_remaining),
        );

        if self.session.time_remaining == 0 {
            self.end(false);
        }
    }

    fn on_poll(&mut self, id: DropletId) {
        let now = self.scheduler.now();
        let height = self.tuning.playfield_height;
        let catcher = catcher_rect(self.catcher_x, &self.tuning);

        let Some(drop) = self.spawner.get_mut(id) else {
            return;
        };
        drop.advance_to(now, height);
        let pos = drop.pos;
        let caught = CollisionMonitor::is_caught(drop, &catcher);

        isolate(
            "update_visual_position",
            self.gateway.update_visual_position(id, pos),
        );
        if caught {
            self.resolve(id, TerminalEvent::Caught);
        }
    }

    /// Consume a droplet through one terminal path.
    ///
    /// Releasing the watch is the exclusivity point: whichever path gets
    /// there first cancels the other's timer, and a late path finds nothing.
    fn resolve(&mut self, id: DropletId, event: TerminalEvent) -> bool {
        let Some(watch) = self.monitor.release(id) else {
            return false;
        };
        for handle in watch.handles() {
            self.scheduler.cancel(handle);
        }
        let Some(drop) = self.spawner.take(id) else {
            return false;
        };
        isolate("remove_visual", self.gateway.remove_visual(id));

        match event {
            TerminalEvent::Caught => self.on_catch(id, drop.kind),
            TerminalEvent::Missed => {
                log::debug!("Droplet {} missed", id);
                self.session.stats.missed += 1;
                self.events.push(SessionEvent::DropletMissed { id });
            }
            TerminalEvent::Cleared => {
                self.events.push(SessionEvent::DropletCleared { id });
            }
        }
        true
    }

    /// Score a caught droplet, then evaluate milestones in the same step
    fn on_catch(&mut self, id: DropletId, kind: DropletKind) {
        let outcome = score::report_catch(&mut self.session, kind, &self.tuning);

        match kind {
            DropletKind::Regular => self.session.stats.caught_regular += 1,
            DropletKind::Penalty => self.session.stats.caught_penalty += 1,
        }
        log::debug!("Caught {:?} droplet {}, score {}", kind, id, outcome.score);
        self.events.push(SessionEvent::DropletCaught {
            id,
            kind,
            score: outcome.score,
        });

        isolate(
            "set_score_display",
            self.gateway.set_score_display(outcome.score),
        );
        let effect = match kind {
            DropletKind::Regular => SoundEffect::Catch,
            DropletKind::Penalty => SoundEffect::PenaltyCatch,
        };
        isolate("play_sound", self.gateway.play_sound(effect));

        if outcome.halfway {
            let text = halfway_message(&self.session);
            isolate("show_progress_message", self.gateway.show_progress_message(&text));
            self.events.push(SessionEvent::Halfway {
                score: outcome.score,
            });
        }

        if outcome.won {
            isolate("play_sound", self.gateway.play_sound(SoundEffect::Win));
            isolate("emit_celebration", self.gateway.emit_celebration());
            self.end(true);
        }
    }

    /// Stop both cadences and clear every live droplet. No score effect, no message.
    fn halt(&mut self) {
        if let Some(cadences) = self.cadences.take() {
            self.scheduler.cancel(cadences.spawn);
            self.scheduler.cancel(cadences.countdown);
        }

        let ids: Vec<DropletId> = self.spawner.live().iter().map(|d| d.id).collect();
        for id in ids {
            self.resolve(id, TerminalEvent::Cleared);
        }

        debug_assert!(self.spawner.is_empty());
        debug_assert!(self.monitor.is_empty());
        debug_assert!(self.scheduler.is_empty());
    }
}
