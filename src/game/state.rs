//! Turn State Definitions
//!
//! The controller's phases as an explicit tagged enum. Each variant carries
//! exactly the data that is meaningful in that phase, so combinations such
//! as "a player is acting while the inter-turn delay is armed" cannot be
//! represented.

use std::fmt;
use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::core::timer::Countdown;
use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::game::config::DelayMode;
use crate::game::player::Seat;

// =============================================================================
// TURN PHASE
// =============================================================================

/// Turn-sequencing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum TurnPhase {
    /// Tiles are still being revealed.
    #[default]
    AwaitingBoardSetup,

    /// Board is ready; the opening turn has not started yet.
    AwaitingFirstTurn {
        /// Seat that will open the game.
        next: Seat,
    },

    /// Pause between one turn ending and the next beginning.
    InterTurnDelay {
        /// Seat that acts once the delay drains.
        next: Seat,
        /// Time left before the next turn.
        timer: Countdown,
    },

    /// A player is acting.
    TurnActive {
        /// Acting seat.
        current: Seat,
    },

    /// Gameplay asked to end the current turn; handled on the next tick.
    TurnEndingPending {
        /// Seat whose turn is ending.
        current: Seat,
    },
}

impl TurnPhase {
    /// Phase name, for logs and snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingBoardSetup => "AwaitingBoardSetup",
            TurnPhase::AwaitingFirstTurn { .. } => "AwaitingFirstTurn",
            TurnPhase::InterTurnDelay { .. } => "InterTurnDelay",
            TurnPhase::TurnActive { .. } => "TurnActive",
            TurnPhase::TurnEndingPending { .. } => "TurnEndingPending",
        }
    }

    /// Stable tag, used for hashing.
    fn tag(&self) -> u8 {
        match self {
            TurnPhase::AwaitingBoardSetup => 0,
            TurnPhase::AwaitingFirstTurn { .. } => 1,
            TurnPhase::InterTurnDelay { .. } => 2,
            TurnPhase::TurnActive { .. } => 3,
            TurnPhase::TurnEndingPending { .. } => 4,
        }
    }

    /// Has the board finished its reveal?
    #[inline]
    pub fn board_setup_finished(&self) -> bool {
        !matches!(self, TurnPhase::AwaitingBoardSetup)
    }

    /// Seat currently acting (including a turn that is about to end).
    #[inline]
    pub fn current(&self) -> Option<Seat> {
        match self {
            TurnPhase::TurnActive { current } | TurnPhase::TurnEndingPending { current } => Some(*current),
            _ => None,
        }
    }

    /// Seat queued to act next.
    #[inline]
    pub fn next(&self) -> Option<Seat> {
        match self {
            TurnPhase::AwaitingFirstTurn { next } | TurnPhase::InterTurnDelay { next, .. } => Some(*next),
            _ => None,
        }
    }

    /// Inter-turn timer. Zero outside the delay.
    #[inline]
    pub fn turn_end_timer(&self) -> Duration {
        match self {
            TurnPhase::InterTurnDelay { timer, .. } => timer.remaining(),
            _ => Duration::ZERO,
        }
    }

    /// Hash this phase for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.tag());
        hasher.update_opt_u8(self.current().map(Seat::index));
        hasher.update_opt_u8(self.next().map(Seat::index));
        hasher.update_duration(self.turn_end_timer());
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Plain copy of the controller's observable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// Ticks processed since construction.
    pub tick: u64,
    /// Current phase.
    pub phase: TurnPhase,
    /// Has the board finished its reveal?
    pub board_setup_finished: bool,
    /// Acting seat.
    pub current: Option<Seat>,
    /// Queued seat.
    pub next: Option<Seat>,
    /// Inter-turn timer.
    pub turn_end_timer: Duration,
    /// Turns started this session.
    pub turns_started: u32,
    /// Extra delay currently configured.
    pub next_turn_delay: Duration,
    /// Whether that delay survives a turn end.
    pub delay_mode: DelayMode,
}

impl TurnSnapshot {
    /// Deterministic hash of this snapshot.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            self.phase.hash_into(hasher);
            hasher.update_u32(self.turns_started);
            hasher.update_duration(self.next_turn_delay);
            hasher.update_u8(self.delay_mode.tag());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase() {
        let phase = TurnPhase::default();
        assert_eq!(phase, TurnPhase::AwaitingBoardSetup);
        assert!(!phase.board_setup_finished());
        assert_eq!(phase.current(), None);
        assert_eq!(phase.next(), None);
        assert_eq!(phase.turn_end_timer(), Duration::ZERO);
    }

    #[test]
    fn test_current_and_next_are_exclusive() {
        let phases = [
            TurnPhase::AwaitingFirstTurn { next: Seat::Blue },
            TurnPhase::InterTurnDelay { next: Seat::Red, timer: Countdown::new(Duration::from_millis(200)) },
            TurnPhase::TurnActive { current: Seat::Blue },
            TurnPhase::TurnEndingPending { current: Seat::Red },
        ];

        for phase in phases {
            assert!(phase.board_setup_finished());
            assert!(phase.current().is_some() ^ phase.next().is_some(), "{}", phase);
        }
    }

    #[test]
    fn test_timer_only_in_delay() {
        let delay = TurnPhase::InterTurnDelay { next: Seat::Red, timer: Countdown::new(Duration::from_millis(250)) };
        assert_eq!(delay.turn_end_timer(), Duration::from_millis(250));
        assert_eq!(TurnPhase::TurnActive { current: Seat::Blue }.turn_end_timer(), Duration::ZERO);
    }

    #[test]
    fn test_snapshot_hash_tracks_phase() {
        let base = TurnSnapshot {
            tick: 5,
            phase: TurnPhase::TurnActive { current: Seat::Blue },
            board_setup_finished: true,
            current: Some(Seat::Blue),
            next: None,
            turn_end_timer: Duration::ZERO,
            turns_started: 1,
            next_turn_delay: Duration::ZERO,
            delay_mode: DelayMode::Persistent,
        };
        let mut other = base.clone();
        other.phase = TurnPhase::TurnActive { current: Seat::Red };

        assert_eq!(base.compute_hash(), base.clone().compute_hash());
        assert_ne!(base.compute_hash(), other.compute_hash());

        let mut one_shot = base.clone();
        one_shot.delay_mode = DelayMode::OneShot;
        assert_ne!(base.compute_hash(), one_shot.compute_hash());
    }
}
