//! Turn Events
//!
//! Transitions reported to the host, in the order they happened.

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::game::player::Seat;
use crate::game::state::TurnPhase;

/// Turn event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEventData {
    /// Menu hidden, tile reveal requested.
    SessionStarted,

    /// `start_game` arrived while a session was already running.
    SessionRestarted {
        /// Phase that was abandoned.
        abandoned_phase: TurnPhase,
    },

    /// Every tile in play is revealed.
    BoardSetupFinished {
        /// Seat that will open the game.
        first: Seat,
    },

    /// A turn ended and the inter-turn delay was armed.
    TurnEnded {
        /// Seat whose turn ended.
        player: Seat,
        /// Seat that acts next.
        next: Seat,
        /// Delay armed before the next turn.
        delay: Duration,
    },

    /// A player became the acting player.
    TurnStarted {
        /// Acting seat.
        player: Seat,
        /// 1-based turn number within the session.
        turn_number: u32,
    },

    /// A turn-end signal arrived outside an active turn and was dropped.
    SignalIgnored {
        /// Phase at the time of the signal.
        phase: TurnPhase,
    },

    /// Menu shown again.
    GameEnded,
}

/// A turn event with timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    /// Tick when the event occurred
    pub tick: u64,

    /// Event data
    pub data: TurnEventData,
}

impl TurnEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: TurnEventData) -> Self {
        Self { tick, data }
    }

    /// Create turn started event.
    pub fn turn_started(tick: u64, player: Seat, turn_number: u32) -> Self {
        Self::new(tick, TurnEventData::TurnStarted { player, turn_number })
    }

    /// Create turn ended event.
    pub fn turn_ended(tick: u64, player: Seat, next: Seat, delay: Duration) -> Self {
        Self::new(tick, TurnEventData::TurnEnded { player, next, delay })
    }

    /// Seat that started a turn, if this is a turn start.
    pub fn started_seat(&self) -> Option<Seat> {
        match self.data {
            TurnEventData::TurnStarted { player, .. } => Some(player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_seat() {
        assert_eq!(TurnEvent::turn_started(3, Seat::Red, 2).started_seat(), Some(Seat::Red));
        assert_eq!(TurnEvent::new(3, TurnEventData::GameEnded).started_seat(), None);
    }

    #[test]
    fn test_event_json_shape() {
        let event = TurnEvent::turn_ended(7, Seat::Blue, Seat::Red, Duration::from_millis(200));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["tick"], 7);
        assert_eq!(json["data"]["TurnEnded"]["player"], "Blue");
        assert_eq!(json["data"]["TurnEnded"]["next"], "Red");
    }

    #[test]
    fn test_ignored_signal_carries_phase() {
        let event = TurnEvent::new(2, TurnEventData::SignalIgnored { phase: TurnPhase::AwaitingBoardSetup });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["SignalIgnored"]["phase"], "AwaitingBoardSetup");

        let restarted = TurnEventData::SessionRestarted {
            abandoned_phase: TurnPhase::TurnActive { current: Seat::Red },
        };
        let json = serde_json::to_value(&restarted).unwrap();
        assert_eq!(json["SessionRestarted"]["abandoned_phase"]["TurnActive"]["current"], "Red");
    }
}
