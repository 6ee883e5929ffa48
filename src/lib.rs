//! # Turn Control
//!
//! Turn sequencing for a two-player summoning board game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TURN CONTROL                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── timer.rs     - Polled countdown over Duration           │
//! │  └── hash.rs      - State hashing for verification           │
//! │                                                              │
//! │  game/            - Turn sequencing (deterministic)          │
//! │  ├── player.rs    - Blue/Red seats and player handles        │
//! │  ├── board.rs     - Board collaborator                       │
//! │  ├── menu.rs      - Main-menu visibility                     │
//! │  ├── config.rs    - Turn timing configuration                │
//! │  ├── state.rs     - Turn phases and snapshots                │
//! │  ├── controller.rs- Turn state machine                       │
//! │  ├── events.rs    - Transition events                        │
//! │  └── replay.rs    - Session recording and replay             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Driving Model
//!
//! The host calls [`TurnController::tick`] once per frame with the frame
//! delta. Nothing is scheduled asynchronously: board readiness and the
//! inter-turn delay are polled on every tick.
//!
//! ```
//! use std::time::Duration;
//! use turn_control::{TurnController, TurnConfig, RevealingBoard, MenuEntity, Seat};
//!
//! let mut controller = TurnController::new(
//!     RevealingBoard::new(4),
//!     "blue",
//!     "red",
//!     vec![MenuEntity::new("title")],
//!     TurnConfig::default(),
//! ).unwrap();
//!
//! controller.start_game();
//! controller.board_mut().finish_reveal();
//! controller.tick(Duration::from_millis(16));
//! assert_eq!(controller.current_seat(), Some(Seat::Blue));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

use std::time::Duration;

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::timer::Countdown;
pub use crate::core::hash::StateHash;
pub use game::board::{Board, RevealingBoard};
pub use game::config::{TurnConfig, DelayMode, ConfigError};
pub use game::controller::{TurnController, TickResult, TurnError};
pub use game::events::{TurnEvent, TurnEventData};
pub use game::menu::{MenuEntity, MenuToggle};
pub use game::player::Seat;
pub use game::state::TurnPhase;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default pause between a turn ending and the next starting.
pub const DEFAULT_TIME_BETWEEN_TURNS: Duration = Duration::from_millis(200);
