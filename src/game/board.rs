//! Board Collaborator
//!
//! The turn controller owns no geometry or rules. It reads reveal progress
//! from the board and asks it to refresh summoning targets and highlights.

use serde::{Serialize, Deserialize};

/// Board operations the turn controller depends on.
///
/// All calls are synchronous and take effect immediately.
pub trait Board {
    /// Number of tiles revealed so far.
    fn revealed_tiles(&self) -> u32;

    /// Number of tiles that take part in this session.
    fn tiles_in_play(&self) -> u32;

    /// Begin revealing the tiles in play.
    fn reveal_tiles(&mut self);

    /// Recompute which tiles the acting player may summon onto.
    fn update_valid_tiles_for_summoning(&mut self);

    /// Refresh tile highlights for the current turn state.
    fn set_tile_highlights(&mut self);

    /// Has every tile in play been revealed?
    #[inline]
    fn is_setup_complete(&self) -> bool {
        self.revealed_tiles() == self.tiles_in_play()
    }
}

/// A call made by the controller on a [`RevealingBoard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCall {
    /// `reveal_tiles()`
    RevealTiles,
    /// `update_valid_tiles_for_summoning()`
    UpdateValidTiles,
    /// `set_tile_highlights()`
    SetTileHighlights,
}

/// In-memory board that reveals its tiles progressively.
///
/// `reveal_tiles` only starts the reveal; the host then calls
/// [`RevealingBoard::advance_reveal`] as the reveal animation progresses.
/// Every call the controller makes is recorded.
#[derive(Clone, Debug, Default)]
pub struct RevealingBoard {
    tiles_in_play: u32,
    revealed_tiles: u32,
    revealing: bool,
    calls: Vec<BoardCall>,
}

impl RevealingBoard {
    /// Create a board with `tiles_in_play` hidden tiles.
    pub fn new(tiles_in_play: u32) -> Self {
        Self {
            tiles_in_play,
            ..Self::default()
        }
    }

    /// Reveal up to `count` more tiles. Does nothing until a reveal started.
    ///
    /// Returns the number of tiles actually revealed.
    pub fn advance_reveal(&mut self, count: u32) -> u32 {
        if !self.revealing {
            return 0;
        }
        let hidden = self.tiles_in_play - self.revealed_tiles;
        let step = count.min(hidden);
        self.revealed_tiles += step;
        if self.revealed_tiles == self.tiles_in_play {
            self.revealing = false;
        }
        step
    }

    /// Reveal everything that is left.
    pub fn finish_reveal(&mut self) {
        self.advance_reveal(u32::MAX);
    }

    /// Calls recorded so far, oldest first.
    pub fn calls(&self) -> &[BoardCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<BoardCall> {
        std::mem::take(&mut self.calls)
    }

    /// How many times `call` was made.
    pub fn count(&self, call: BoardCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl Board for RevealingBoard {
    fn revealed_tiles(&self) -> u32 {
        self.revealed_tiles
    }

    fn tiles_in_play(&self) -> u32 {
        self.tiles_in_play
    }

    fn reveal_tiles(&mut self) {
        self.calls.push(BoardCall::RevealTiles);
        // A fresh session hides the board again
        self.revealed_tiles = 0;
        self.revealing = self.tiles_in_play > 0;
    }

    fn update_valid_tiles_for_summoning(&mut self) {
        self.calls.push(BoardCall::UpdateValidTiles);
    }

    fn set_tile_highlights(&mut self) {
        self.calls.push(BoardCall::SetTileHighlights);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_requires_start() {
        let mut board = RevealingBoard::new(10);
        assert_eq!(board.advance_reveal(3), 0);
        assert_eq!(board.revealed_tiles(), 0);
        assert!(!board.is_setup_complete());
    }

    #[test]
    fn test_progressive_reveal() {
        let mut board = RevealingBoard::new(5);
        board.reveal_tiles();

        assert_eq!(board.advance_reveal(2), 2);
        assert!(!board.is_setup_complete());
        assert_eq!(board.advance_reveal(10), 3);
        assert!(board.is_setup_complete());
        assert_eq!(board.advance_reveal(1), 0);
    }

    #[test]
    fn test_reveal_restart_hides_tiles() {
        let mut board = RevealingBoard::new(4);
        board.reveal_tiles();
        board.finish_reveal();
        assert!(board.is_setup_complete());

        board.reveal_tiles();
        assert_eq!(board.revealed_tiles(), 0);
        assert_eq!(board.advance_reveal(1), 1);
    }

    #[test]
    fn test_calls_are_recorded() {
        let mut board = RevealingBoard::new(1);
        board.reveal_tiles();
        board.update_valid_tiles_for_summoning();
        board.set_tile_highlights();

        assert_eq!(
            board.calls(),
            &[BoardCall::RevealTiles, BoardCall::UpdateValidTiles, BoardCall::SetTileHighlights]
        );
        assert_eq!(board.count(BoardCall::SetTileHighlights), 1);
        assert_eq!(board.take_calls().len(), 3);
        assert!(board.calls().is_empty());
    }
}
