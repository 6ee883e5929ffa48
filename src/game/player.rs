//! Player Seats
//!
//! The controller never looks inside a player. It only needs to know which
//! of the two seats is acting, and which handle sits in each seat.

use std::fmt;
use serde::{Serialize, Deserialize};

// =============================================================================
// SEAT
// =============================================================================

/// One of the two sides at the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    /// Always moves first.
    Blue = 0,
    /// Moves second.
    Red = 1,
}

impl Seat {
    /// Seat that opens every session.
    pub const FIRST: Seat = Seat::Blue;

    /// The opposing seat.
    #[inline]
    pub fn other(self) -> Seat {
        match self {
            Seat::Blue => Seat::Red,
            Seat::Red => Seat::Blue,
        }
    }

    /// Stable index, used for hashing.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Blue => f.write_str("Blue"),
            Seat::Red => f.write_str("Red"),
        }
    }
}

// =============================================================================
// ROSTER
// =============================================================================

/// The two player handles of a session, one per seat.
///
/// Handles are opaque: they are only ever cloned out or compared.
#[derive(Clone, Debug)]
pub struct Roster<P> {
    blue: P,
    red: P,
}

impl<P: PartialEq> Roster<P> {
    /// Seat both players. Returns `None` if both handles are the same player.
    pub fn new(blue: P, red: P) -> Option<Self> {
        if blue == red {
            return None;
        }
        Some(Self { blue, red })
    }

    /// Handle sitting in `seat`.
    #[inline]
    pub fn get(&self, seat: Seat) -> &P {
        match seat {
            Seat::Blue => &self.blue,
            Seat::Red => &self.red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seats_alternate() {
        assert_eq!(Seat::Blue.other(), Seat::Red);
        assert_eq!(Seat::Red.other(), Seat::Blue);
        assert_eq!(Seat::FIRST, Seat::Blue);
    }

    #[test]
    fn test_roster_rejects_same_player_twice() {
        assert!(Roster::new("alice", "alice").is_none());
    }

    #[test]
    fn test_roster_lookup() {
        let roster = Roster::new("blue-player", "red-player").unwrap();

        assert_eq!(*roster.get(Seat::Blue), "blue-player");
        assert_eq!(*roster.get(Seat::Red), "red-player");
        assert_eq!(*roster.get(Seat::Blue.other()), "red-player");
    }
}
