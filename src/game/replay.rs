//! Session Recording and Replay
//!
//! Records every scheduler input a session received so it can be replayed
//! against a fresh controller. Since the controller is fully deterministic
//! given its inputs, a replay must land on the same state hash.

use std::time::Duration;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::hash::{StateHash, StateHasher};
use crate::game::board::RevealingBoard;
use crate::game::config::TurnConfig;
use crate::game::controller::{TurnController, TurnError};
use crate::game::events::TurnEvent;
use crate::game::menu::MenuEntity;
use crate::game::player::Seat;

/// Recording format version.
pub const RECORDING_VERSION: u8 = 1;

/// Controller used for recorded sessions. Seats double as player handles.
pub type RecordedController = TurnController<RevealingBoard, Seat, MenuEntity>;

/// One scheduler input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverInput {
    /// `start_game()`
    StartGame,
    /// Host revealed `count` more tiles.
    RevealTiles(u32),
    /// `tick(elapsed)`
    Tick {
        /// Frame delta in microseconds.
        elapsed_micros: u64,
    },
    /// `signal_turn_ended()`
    SignalTurnEnded,
    /// `on_game_end()`
    GameEnd,
    /// `set_next_turn_delay(delay)`
    SetNextTurnDelay {
        /// New extra delay in microseconds.
        micros: u64,
    },
}

impl DriverInput {
    /// Tick input from a frame delta.
    pub fn tick(elapsed: Duration) -> Self {
        DriverInput::Tick {
            elapsed_micros: saturating_micros(elapsed),
        }
    }

    /// Delay-change input.
    pub fn set_next_turn_delay(delay: Duration) -> Self {
        DriverInput::SetNextTurnDelay {
            micros: saturating_micros(delay),
        }
    }

    /// Feed this input to a controller, returning any events it produced.
    pub fn apply(self, controller: &mut RecordedController) -> Vec<TurnEvent> {
        match self {
            DriverInput::StartGame => controller.start_game(),
            DriverInput::RevealTiles(count) => {
                controller.board_mut().advance_reveal(count);
            }
            DriverInput::Tick { elapsed_micros } => {
                return controller.tick(Duration::from_micros(elapsed_micros)).events;
            }
            DriverInput::SignalTurnEnded => controller.signal_turn_ended(),
            DriverInput::GameEnd => controller.on_game_end(),
            DriverInput::SetNextTurnDelay { micros } => {
                controller.set_next_turn_delay(Duration::from_micros(micros));
            }
        }
        Vec::new()
    }

    fn hash_into(&self, hasher: &mut StateHasher) {
        match self {
            DriverInput::StartGame => hasher.update_u8(0),
            DriverInput::RevealTiles(count) => {
                hasher.update_u8(1);
                hasher.update_u32(*count);
            }
            DriverInput::Tick { elapsed_micros } => {
                hasher.update_u8(2);
                hasher.update_u64(*elapsed_micros);
            }
            DriverInput::SignalTurnEnded => hasher.update_u8(3),
            DriverInput::GameEnd => hasher.update_u8(4),
            DriverInput::SetNextTurnDelay { micros } => {
                hasher.update_u8(5);
                hasher.update_u64(*micros);
            }
        }
    }
}

fn saturating_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Everything needed to replay a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecording {
    /// Format version.
    pub version: u8,
    /// Timing configuration at construction.
    pub config: TurnConfig,
    /// Board size.
    pub tiles_in_play: u32,
    /// Inputs, in order.
    pub inputs: Vec<DriverInput>,
    /// Controller hash after the last input (set by `finish`).
    pub final_hash: Option<StateHash>,
}

impl SessionRecording {
    /// Create an empty recording.
    pub fn new(config: TurnConfig, tiles_in_play: u32) -> Self {
        Self {
            version: RECORDING_VERSION,
            config,
            tiles_in_play,
            inputs: Vec::new(),
            final_hash: None,
        }
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReplayError> {
        let recording: SessionRecording = bincode::deserialize(data)?;
        if recording.version != RECORDING_VERSION {
            return Err(ReplayError::VersionMismatch {
                expected: RECORDING_VERSION,
                got: recording.version,
            });
        }
        Ok(recording)
    }

    /// Hash of the recorded inputs.
    pub fn inputs_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_driver_inputs();
        hasher.update_u32(self.tiles_in_play);
        hasher.update_duration(self.config.time_between_turns);
        hasher.update_duration(self.config.next_turn_delay);
        hasher.update_u8(self.config.delay_mode.tag());
        for input in &self.inputs {
            input.hash_into(&mut hasher);
        }
        hasher.finalize()
    }
}

/// Build the controller a recording is played against.
pub fn recorded_controller(config: TurnConfig, tiles_in_play: u32) -> Result<RecordedController, TurnError> {
    TurnController::new(
        RevealingBoard::new(tiles_in_play),
        Seat::Blue,
        Seat::Red,
        vec![MenuEntity::new("main-menu")],
        config,
    )
}

/// A live session that records its inputs as it goes.
pub struct RecordedSession {
    controller: RecordedController,
    recording: SessionRecording,
}

impl RecordedSession {
    /// Start recording a new session.
    pub fn new(config: TurnConfig, tiles_in_play: u32) -> Result<Self, TurnError> {
        Ok(Self {
            controller: recorded_controller(config.clone(), tiles_in_play)?,
            recording: SessionRecording::new(config, tiles_in_play),
        })
    }

    /// Apply and record one input.
    pub fn apply(&mut self, input: DriverInput) -> Vec<TurnEvent> {
        self.recording.inputs.push(input);
        input.apply(&mut self.controller)
    }

    /// The live controller.
    pub fn controller(&self) -> &RecordedController {
        &self.controller
    }

    /// Stop recording and stamp the final hash.
    pub fn finish(mut self) -> (RecordedController, SessionRecording) {
        self.recording.final_hash = Some(self.controller.compute_hash());
        (self.controller, self.recording)
    }
}

/// Result of a replay.
#[derive(Debug)]
pub struct ReplayOutcome {
    /// Hash after the last input.
    pub final_hash: StateHash,
    /// Every event produced, in order.
    pub events: Vec<TurnEvent>,
    /// Turns started during the replay.
    pub turns_started: u32,
}

/// Re-drive a fresh controller with a recording's inputs.
pub fn replay_session(recording: &SessionRecording) -> Result<ReplayOutcome, ReplayError> {
    let mut controller = recorded_controller(recording.config.clone(), recording.tiles_in_play)?;
    let mut events = Vec::new();

    for input in &recording.inputs {
        events.extend(input.apply(&mut controller));
    }
    // Events produced after the last tick
    events.extend(controller.take_events());

    debug!("Replayed {} inputs, {} events", recording.inputs.len(), events.len());

    Ok(ReplayOutcome {
        final_hash: controller.compute_hash(),
        events,
        turns_started: controller.turns_started(),
    })
}

/// Replay a finished recording and check it lands on the recorded hash.
pub fn verify_recording(recording: &SessionRecording) -> Result<ReplayOutcome, ReplayError> {
    let expected = recording.final_hash.ok_or(ReplayError::Incomplete)?;
    let outcome = replay_session(recording)?;

    if outcome.final_hash != expected {
        return Err(ReplayError::HashMismatch {
            expected: hex::encode(expected),
            computed: hex::encode(outcome.final_hash),
        });
    }

    info!("Recording verified: {}", hex::encode(&expected[..8]));
    Ok(outcome)
}

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Bytes did not decode.
    #[error("recording decode failed: {0}")]
    Decode(#[from] bincode::Error),

    /// Recording written by an incompatible version.
    #[error("recording version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Supported version.
        expected: u8,
        /// Version found.
        got: u8,
    },

    /// Recording has no final hash.
    #[error("recording is incomplete")]
    Incomplete,

    /// Replay diverged.
    #[error("final state hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch {
        /// Recorded hash (hex).
        expected: String,
        /// Replayed hash (hex).
        computed: String,
    },

    /// Recorded config could not build a controller.
    #[error("{0}")]
    Controller(#[from] TurnError),
}
