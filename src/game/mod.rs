//! Turn Control Module
//!
//! All turn-sequencing code. Deterministic given its inputs.
//!
//! ## Module Structure
//!
//! - `player`: Seats and the two player handles
//! - `board`: Board collaborator trait and an in-memory board
//! - `menu`: Main-menu visibility handles
//! - `config`: Turn timing configuration
//! - `state`: Turn phases and snapshots
//! - `controller`: The turn state machine and its tick
//! - `events`: Transition events for hosts and replay
//! - `replay`: Session recording and replay verification

pub mod player;
pub mod board;
pub mod menu;
pub mod config;
pub mod state;
pub mod controller;
pub mod events;
pub mod replay;

// Re-export key types
pub use player::{Roster, Seat};
pub use board::{Board, BoardCall, RevealingBoard};
pub use menu::{MainMenu, MenuEntity, MenuToggle};
pub use config::{ConfigError, DelayMode, TurnConfig};
pub use state::{TurnPhase, TurnSnapshot};
pub use controller::{TickResult, TurnController, TurnError};
pub use events::{TurnEvent, TurnEventData};
pub use replay::{DriverInput, RecordedSession, ReplayError, SessionRecording};
