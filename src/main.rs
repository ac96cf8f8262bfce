//! Droplet Catch entry point
//!
//! Runs one session headless on the virtual clock with an autopilot catcher
//! and a gateway that logs what a real presentation layer would show.
//!
//! Usage: `droplet-catch [seed] [easy|normal|hard] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;
    use glam::Vec2;

    use droplet_catch::gateway::{GatewayResult, PresentationGateway, SoundEffect};
    use droplet_catch::sim::{DropletId, DropletKind, SessionController, SessionState, TerminalMessage};
    use droplet_catch::{Command, Difficulty, Tuning};

    /// Gateway that narrates presentation calls through the logger
    pub struct LogGateway;

    impl PresentationGateway for LogGateway {
        fn add_visual(&mut self, id: DropletId, kind: DropletKind, size: f32, pos: Vec2) -> GatewayResult {
            log::debug!("+ droplet {} {:?} size {:.0} at x={:.0}", id, kind, size, pos.x);
            Ok(())
        }

        fn remove_visual(&mut self, id: DropletId) -> GatewayResult {
            log::debug!("- droplet {}", id);
            Ok(())
        }

        fn set_score_display(&mut self, score: u32) -> GatewayResult {
            log::debug!("Score: {}", score);
            Ok(())
        }

        fn set_time_display(&mut self, seconds: u32) -> GatewayResult {
            log::debug!("Time: {}s", seconds);
            Ok(())
        }

        fn show_terminal_message(&mut self, message: &TerminalMessage) -> GatewayResult {
            log::info!("{}", message.text());
            Ok(())
        }

        fn show_progress_message(&mut self, text: &str) -> GatewayResult {
            log::info!("{}", text);
            Ok(())
        }

        fn emit_celebration(&mut self) -> GatewayResult {
            log::info!("*** confetti ***");
            Ok(())
        }

        fn play_sound(&mut self, effect: SoundEffect) -> GatewayResult {
            log::trace!("Sound: {:?}", effect);
            Ok(())
        }
    }

    /// Run one headless session on the virtual clock
    #[derive(Debug, Parser)]
    #[command(name = "droplet-catch", version)]
    pub struct Args {
        /// RNG seed; defaults to the wall clock
        pub seed: Option<u64>,

        /// easy, normal or hard
        #[arg(value_parser = parse_difficulty, default_value = "normal")]
        pub difficulty: Difficulty,

        /// JSON file overriding gameplay tuning
        pub tuning: Option<PathBuf>,
    }

    fn parse_difficulty(key: &str) -> Result<Difficulty, String> {
        Difficulty::from_key(key).ok_or_else(|| format!("unknown difficulty '{key}'"))
    }

    fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("Invalid tuning in {}", path.display()))
    }

    fn wall_clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Chase the lowest regular droplet, like a player ignoring penalties
    fn autopilot(controller: &mut SessionController<LogGateway>) {
        let half_catcher = controller.tuning().catcher_width / 2.0;
        let target = controller
            .droplets()
            .iter()
            .filter(|d| d.kind == DropletKind::Regular)
            .max_by(|a, b| {
                a.progress
                    .partial_cmp(&b.progress)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|d| d.rect().center().x - half_catcher);

        if let Some(x) = target {
            controller.set_catcher_x(x);
        }
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = load_tuning(args.tuning.as_deref())?;
        let seed = args.seed.unwrap_or_else(wall_clock_seed);

        log::info!("Droplet Catch (headless) starting with seed {}", seed);
        let step = tuning.poll_interval_ms;
        let mut controller =
            SessionController::new(tuning, LogGateway, seed).context("Tuning rejected")?;

        controller.execute(Command::SetDifficulty(args.difficulty));
        controller.execute(Command::Start);
        while controller.state() == SessionState::Running {
            autopilot(&mut controller);
            controller.advance(step);
        }

        let stats = controller.stats();
        println!(
            "{} on {}: {} points in {:.1}s ({} spawned, {} caught, {} penalties, {} missed)",
            if controller.score() >= controller.win_target() { "Won" } else { "Lost" },
            controller.difficulty(),
            controller.score(),
            controller.now() as f64 / 1000.0,
            stats.spawned,
            stats.caught_regular,
            stats.caught_penalty,
            stats.missed,
        );

        controller.execute(Command::Reset);
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    if let Err(e) = headless::run(headless::Args::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; the page embeds the library directly
}
