//! Pong Deluxe headless runner
//!
//! Plays AI against AI at a fixed frame rate and prints the result.
//!
//! Usage:
//!   pong-deluxe --mode power --walls solid --seconds 120
//!   RUST_LOG=debug pong-deluxe --settings settings.json --seed 42

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use pong_deluxe::persistence::{load_settings, save_settings};
    use pong_deluxe::sim::{MatchPhase, TickInput, tick};
    use pong_deluxe::snapshot::Frame;
    use pong_deluxe::{AiDifficulty, GameState, Mode, Settings, WallMode};

    #[derive(Parser)]
    #[command(name = "pong-deluxe")]
    #[command(about = "Run a headless AI-vs-AI Pong Deluxe match")]
    pub struct Args {
        /// Settings document to start from
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Write the effective settings here before playing
        #[arg(long)]
        save_settings: Option<PathBuf>,
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated seconds before giving up
        #[arg(long, default_value_t = 300.0)]
        seconds: f32,
        /// Frames per simulated second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// classic, time, sudden, multiball, curve, power or endless
        #[arg(long)]
        mode: Option<String>,
        /// open, wrap or solid
        #[arg(long)]
        walls: Option<String>,
        /// easy, normal, hard or insane
        #[arg(long)]
        ai: Option<String>,
        /// Print the final frame as JSON
        #[arg(long)]
        json: bool,
    }

    fn effective_settings(args: &Args) -> Result<Settings> {
        let mut settings = match &args.settings {
            Some(path) => load_settings(path),
            None => Settings::default(),
        };
        if let Some(name) = &args.mode {
            settings.mode = Mode::from_str(name).with_context(|| format!("unknown mode {name:?}"))?;
        }
        if let Some(name) = &args.walls {
            settings.walls =
                WallMode::from_str(name).with_context(|| format!("unknown wall mode {name:?}"))?;
        }
        if let Some(name) = &args.ai {
            settings.ai =
                AiDifficulty::from_str(name).with_context(|| format!("unknown AI tier {name:?}"))?;
        }
        settings.players = 0;
        Ok(settings.sanitize())
    }

    pub fn run(args: Args) -> Result<()> {
        if args.fps == 0 {
            bail!("--fps must be positive");
        }
        let settings = effective_settings(&args)?;
        if let Some(path) = &args.save_settings {
            save_settings(path, &settings)
                .with_context(|| format!("writing {}", path.display()))?;
        }

        let seed = args.seed.unwrap_or_else(rand::random);
        let mut state = GameState::new(settings, seed);
        let dt = 1.0 / args.fps as f32;
        let frames = (args.seconds.max(0.0) * args.fps as f32) as u64;

        let mut played = 0;
        while played < frames && state.phase != MatchPhase::Finished {
            let input = TickInput {
                serve: state.phase == MatchPhase::WaitingToServe,
                ..Default::default()
            };
            tick(&mut state, &input, dt);
            played += 1;
        }

        println!("Seed:    {seed}");
        println!("Mode:    {}", state.settings.mode.as_str());
        println!("Frames:  {played} ({:.1}s)", state.elapsed);
        println!("Score:   {} - {}", state.scores.left, state.scores.right);
        match state.outcome {
            Some(outcome) => println!("Result:  {}", outcome.message()),
            None => println!("Result:  unfinished"),
        }

        if args.json {
            let frame = Frame::capture(&state);
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Pong Deluxe (headless) starting...");
    runner::run(runner::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web
}
