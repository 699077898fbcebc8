//! Footsmash Headless Driver
//!
//! Runs a scripted match through the frame pump, then replays the recording
//! and checks the simulation landed on the same state.
//!
//! Usage: `footsmash [config.json]`

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use footsmash::{
    VERSION,
    game::{
        clock::ManualClock,
        config::MatchConfig,
        contact::HitboxDetector,
        events::Presenter,
        input::ScriptedInput,
        outcome::RoundOutcome,
        replay::{replay, MatchRecording},
        runner::MatchRunner,
        state::{Facing, PerPlayer, PlayerId},
    },
};

/// Host frame rate for the demo (Hz)
const FRAME_RATE: u32 = 60;

/// Demo length in frames (20 seconds)
const DEMO_FRAMES: usize = 1200;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Footsmash v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => MatchConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => MatchConfig::default(),
    };
    info!(
        "Arena {:.0}..{:.0}, game speed {:.2}",
        config.arena.wall_left, config.arena.wall_right, config.game_speed
    );

    demo_match(config)
}

/// Logs what a renderer would draw.
struct LogPresenter;

impl Presenter for LogPresenter {
    fn on_position_changed(&mut self, player: PlayerId, x: f64, height: f64, facing: Facing) {
        debug!("{} at x={:.2} h={:.2} facing {:?}", player, x, height, facing);
    }

    fn on_round_end(&mut self, outcome: RoundOutcome, scores: PerPlayer<u32>) {
        info!("Round over: {} (score {}-{})", outcome, scores.first, scores.second);
    }
}

/// Button schedule: both players trade jumps and dives for a few rounds.
fn demo_input() -> ScriptedInput {
    let first: &[(usize, usize)] = &[
        (0, 50),
        (52, 54),
        (200, 230),
        (240, 242),
        (420, 470),
        (480, 482),
        (700, 750),
        (755, 757),
    ];
    let second: &[(usize, usize)] = &[
        (0, 50),
        (52, 54),
        (210, 260),
        (262, 264),
        (430, 445),
        (600, 640),
        (650, 652),
        (700, 750),
        (755, 757),
    ];
    ScriptedInput::holds(DEMO_FRAMES, PerPlayer::new(first, second))
}

/// Run the demo match and verify it replays identically.
fn demo_match(config: MatchConfig) -> Result<()> {
    info!("=== Starting Demo Match ===");

    let detector = HitboxDetector::new(config.hitboxes.clone());
    let mut runner = MatchRunner::new(
        config,
        ManualClock::new(),
        demo_input(),
        detector,
        LogPresenter,
    )?;

    let frame = 1.0 / f64::from(FRAME_RATE);
    for _ in 0..DEMO_FRAMES {
        runner.clock().advance_secs(frame);
        runner.pump();
    }

    // Print final results
    info!("=== Match Results ===");
    let state = runner.state();
    let scores = state.scores();
    info!("Rounds played: {}", state.round - 1);
    info!("Final score: P1 {} - P2 {}", scores.first, scores.second);

    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let bytes = runner
        .into_recording()
        .to_bytes()
        .context("failed to encode recording")?;
    info!("Recording: {} bytes", bytes.len());

    let recording = MatchRecording::from_bytes(&bytes).context("failed to decode recording")?;
    let (replayed, events) = replay(&recording).context("replay failed")?;
    let replay_hash = replayed.compute_hash();

    info!("Replay State Hash: {} ({} events)", hex::encode(replay_hash), events.len());

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
