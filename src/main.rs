//! Turn Control Demo
//!
//! Drives a scripted session through the turn controller and verifies it
//! by replaying the recorded inputs.
//!
//! Usage: `turn-control [config.json]`

use std::time::Duration;
use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use turn_control::{
    VERSION,
    game::{
        config::TurnConfig,
        events::TurnEventData,
        replay::{DriverInput, RecordedSession, verify_recording},
    },
};

/// Frame delta of the simulated host (60 Hz).
const FRAME: Duration = Duration::from_micros(16_667);

/// Tiles on the demo board.
const TILES_IN_PLAY: u32 = 24;

/// Tiles revealed per frame while the board animates in.
const TILES_PER_FRAME: u32 = 3;

/// Turns played before the demo game ends.
const DEMO_TURNS: u32 = 6;

/// Turn from which the pause between turns is lengthened.
const SLOW_FROM_TURN: u32 = 4;

/// Extra pause used once the game slows down.
const SLOW_DELAY: Duration = Duration::from_millis(300);

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Turn Control v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => TurnConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => TurnConfig::default(),
    };
    info!(
        "Time between turns: {:?}, next turn delay: {:?} ({:?})",
        config.time_between_turns, config.next_turn_delay, config.delay_mode
    );
    debug!("Config: {}", config.to_json()?);

    demo_session(config)
}

/// Play a short scripted session, then replay it.
fn demo_session(config: TurnConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Session ===");

    let mut session = RecordedSession::new(config, TILES_IN_PLAY)?;
    log_events(&session.apply(DriverInput::StartGame));

    // Reveal the board a few tiles per frame
    while !session.controller().board_setup_finished() {
        session.apply(DriverInput::RevealTiles(TILES_PER_FRAME));
        log_events(&session.apply(DriverInput::tick(FRAME)));
    }

    // Each player acts for half a second, then ends their turn
    let mut frames_in_turn = 0;
    let mut slowed = false;
    while session.controller().turns_started() <= DEMO_TURNS {
        if !slowed && session.controller().turns_started() == SLOW_FROM_TURN {
            info!("Slowing down: {:?} extra between turns", SLOW_DELAY);
            session.apply(DriverInput::set_next_turn_delay(SLOW_DELAY));
            slowed = true;
        }
        if session.controller().current_seat().is_some() {
            frames_in_turn += 1;
            if frames_in_turn == 30 {
                session.apply(DriverInput::SignalTurnEnded);
                frames_in_turn = 0;
            }
        }
        log_events(&session.apply(DriverInput::tick(FRAME)));
    }

    log_events(&session.apply(DriverInput::GameEnd));

    let (controller, recording) = session.finish();
    let snapshot = controller.snapshot();
    info!("=== Session Results ===");
    info!("Ticks: {}, turns started: {}", snapshot.tick, snapshot.turns_started);
    info!("Final phase: {}", snapshot.phase);
    info!("Final State Hash: {}", hex::encode(controller.compute_hash()));

    let bytes = recording.to_bytes()?;
    info!("Recording: {} inputs, {} bytes", recording.inputs.len(), bytes.len());

    info!("=== Verifying Replay ===");
    let outcome = verify_recording(&recording)?;
    info!("Replay State Hash: {}", hex::encode(outcome.final_hash));
    info!("REPLAY VERIFIED: {} events reproduced", outcome.events.len());

    Ok(())
}

fn log_events(events: &[turn_control::TurnEvent]) {
    for event in events {
        match &event.data {
            TurnEventData::BoardSetupFinished { first } => {
                info!("Tick {}: board ready, {} opens", event.tick, first);
            }
            TurnEventData::TurnStarted { player, turn_number } => {
                info!("Tick {}: turn {} - {} to act", event.tick, turn_number, player);
            }
            TurnEventData::TurnEnded { player, next, delay } => {
                info!("Tick {}: {} ended turn, {} in {:?}", event.tick, player, next, delay);
            }
            TurnEventData::GameEnded => info!("Tick {}: game over, menu shown", event.tick),
            _ => {}
        }
    }
}
