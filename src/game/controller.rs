//! Turn Controller
//!
//! Sequences turns for a two-player session. Driven once per frame by the
//! host through [`TurnController::tick`], it polls the board for reveal
//! progress, drains the inter-turn delay and alternates the acting player.
//!
//! Each tick runs four steps in a fixed order:
//!
//! 1. decay the inter-turn timer (clamped at zero)
//! 2. finish board setup once every tile in play is revealed
//! 3. consume a pending turn-end request
//! 4. start the next turn if nobody is acting and the timer has drained
//!
//! Step 2 must precede step 4 so no turn can start on an unrevealed board,
//! and step 3 must precede step 4 because ending a turn arms the timer that
//! step 4 reads.

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::hash::StateHash;
use crate::core::timer::{Countdown, duration_from_secs};
use crate::game::board::Board;
use crate::game::config::{ConfigError, DelayMode, TurnConfig};
use crate::game::events::{TurnEvent, TurnEventData};
use crate::game::menu::{MainMenu, MenuToggle};
use crate::game::player::{Roster, Seat};
use crate::game::state::{TurnPhase, TurnSnapshot};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated since the previous tick
    pub events: Vec<TurnEvent>,
    /// Did a turn start this tick?
    pub turn_started: Option<Seat>,
}

/// Turn controller construction errors.
#[derive(Debug, Error)]
pub enum TurnError {
    /// Blue and Red were given the same player handle.
    #[error("blue and red must be distinct players")]
    DuplicatePlayers,

    /// Timing configuration rejected.
    #[error("invalid turn config: {0}")]
    Config(#[from] ConfigError),
}

/// Turn-sequencing state machine for one game session.
///
/// * `B` - the board collaborator
/// * `P` - opaque player handle, compared only for identity
/// * `M` - main-menu element toggled on session start/end
pub struct TurnController<B, P, M> {
    /// Board being played on.
    board: B,
    /// Blue and Red handles.
    roster: Roster<P>,
    /// Menu hidden during play.
    menu: MainMenu<M>,
    /// Timing configuration.
    config: TurnConfig,
    /// Current phase.
    phase: TurnPhase,
    /// Ticks processed.
    tick: u64,
    /// Turns started since the last `start_game`.
    turns_started: u32,
    /// Between `start_game` and `on_game_end`.
    in_session: bool,
    /// Events not yet handed to the host.
    events: Vec<TurnEvent>,
}

impl<B, P, M> TurnController<B, P, M>
where
    B: Board,
    P: Clone + PartialEq + fmt::Debug,
    M: MenuToggle,
{
    /// Create a controller wired to its collaborators.
    ///
    /// Fails if both seats get the same player or the config is invalid.
    pub fn new(
        board: B,
        blue: P,
        red: P,
        menu: Vec<M>,
        config: TurnConfig,
    ) -> Result<Self, TurnError> {
        config.validate()?;
        let roster = Roster::new(blue, red).ok_or(TurnError::DuplicatePlayers)?;

        Ok(Self {
            board,
            roster,
            menu: MainMenu::new(menu),
            config,
            phase: TurnPhase::AwaitingBoardSetup,
            tick: 0,
            turns_started: 0,
            in_session: false,
            events: Vec::new(),
        })
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Start a session: hide the menu and begin revealing the board.
    ///
    /// Calling this while a session is running abandons it and starts over.
    pub fn start_game(&mut self) {
        if self.in_session {
            warn!("start_game during {}, restarting session", self.phase);
            self.push_event(TurnEventData::SessionRestarted {
                abandoned_phase: self.phase,
            });
        }

        self.menu.hide();

        self.phase = TurnPhase::AwaitingBoardSetup;
        self.turns_started = 0;
        self.in_session = true;
        self.board.reveal_tiles();

        info!(
            "Session started, {} menu entries hidden, revealing {} tiles",
            self.menu.len(),
            self.board.tiles_in_play()
        );
        self.push_event(TurnEventData::SessionStarted);
    }

    /// Request that the current turn end. Takes effect on the next tick.
    ///
    /// Ignored outside an active turn.
    pub fn signal_turn_ended(&mut self) {
        match self.phase {
            TurnPhase::TurnActive { current } => {
                debug!("Turn end requested for {}", current);
                self.phase = TurnPhase::TurnEndingPending { current };
            }
            phase => {
                warn!("Turn end signal ignored during {}", phase);
                self.push_event(TurnEventData::SignalIgnored { phase });
            }
        }
    }

    /// Show the menu again. Turn state is left untouched.
    pub fn on_game_end(&mut self) {
        self.menu.show();
        self.in_session = false;

        info!("Game ended after {} turns", self.turns_started);
        self.push_event(TurnEventData::GameEnded);
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advance the state machine by one scheduling step.
    pub fn tick(&mut self, elapsed: Duration) -> TickResult {
        self.tick += 1;
        let mut result = TickResult::default();

        #[cfg(feature = "debug-tracing")]
        tracing::trace!(tick = self.tick, ?elapsed, phase = %self.phase, "tick");

        // 1. Decay inter-turn timer
        if let TurnPhase::InterTurnDelay { timer, .. } = &mut self.phase {
            timer.decay(elapsed);
        }

        // 2. Board setup
        if !self.phase.board_setup_finished() && self.board.is_setup_complete() {
            self.on_board_setup_finished();
        }

        // 3. End turn
        if let TurnPhase::TurnEndingPending { current } = self.phase {
            self.on_turn_ended(current);
        }

        // 4. Start turn
        match self.phase {
            TurnPhase::AwaitingFirstTurn { next } => {
                self.on_turn_start(next);
                result.turn_started = Some(next);
            }
            TurnPhase::InterTurnDelay { next, timer } if timer.is_elapsed() => {
                self.on_turn_start(next);
                result.turn_started = Some(next);
            }
            _ => {}
        }

        result.events = self.take_events();
        result
    }

    fn on_board_setup_finished(&mut self) {
        self.board.update_valid_tiles_for_summoning();
        self.board.set_tile_highlights();

        self.phase = TurnPhase::AwaitingFirstTurn { next: Seat::FIRST };

        debug!("Board setup finished at tick {}, {} opens", self.tick, Seat::FIRST);
        self.push_event(TurnEventData::BoardSetupFinished { first: Seat::FIRST });
    }

    fn on_turn_ended(&mut self, current: Seat) {
        let delay = self.config.turn_end_delay();
        if self.config.delay_mode == DelayMode::OneShot {
            self.config.next_turn_delay = Duration::ZERO;
        }

        let next = current.other();
        self.phase = TurnPhase::InterTurnDelay {
            next,
            timer: Countdown::new(delay),
        };

        self.board.set_tile_highlights();

        debug!("{} ended turn, {} acts in {:?}", current, next, delay);
        self.events.push(TurnEvent::turn_ended(self.tick, current, next, delay));
    }

    fn on_turn_start(&mut self, next: Seat) {
        self.phase = TurnPhase::TurnActive { current: next };
        self.turns_started += 1;

        self.board.update_valid_tiles_for_summoning();
        self.board.set_tile_highlights();

        debug!("Turn {} started for {} ({:?})", self.turns_started, next, self.roster.get(next));
        self.events.push(TurnEvent::turn_started(self.tick, next, self.turns_started));
    }

    fn push_event(&mut self, data: TurnEventData) {
        self.events.push(TurnEvent::new(self.tick, data));
    }

    /// Drain events not yet returned by [`TurnController::tick`].
    pub fn take_events(&mut self) -> Vec<TurnEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Has the board finished its reveal?
    pub fn board_setup_finished(&self) -> bool {
        self.phase.board_setup_finished()
    }

    /// Acting player handle.
    pub fn current_player(&self) -> Option<&P> {
        self.phase.current().map(|seat| self.roster.get(seat))
    }

    /// Player handle queued to act next.
    pub fn next_player(&self) -> Option<&P> {
        self.phase.next().map(|seat| self.roster.get(seat))
    }

    /// Acting seat.
    pub fn current_seat(&self) -> Option<Seat> {
        self.phase.current()
    }

    /// Queued seat.
    pub fn next_seat(&self) -> Option<Seat> {
        self.phase.next()
    }

    /// Inter-turn timer (zero outside the delay).
    pub fn turn_end_timer(&self) -> Duration {
        self.phase.turn_end_timer()
    }

    /// Fixed pause between turns.
    pub fn time_between_turns(&self) -> Duration {
        self.config.time_between_turns
    }

    /// Extra pause applied at the next turn end.
    pub fn next_turn_delay(&self) -> Duration {
        self.config.next_turn_delay
    }

    /// Change the extra pause applied at turn ends.
    pub fn set_next_turn_delay(&mut self, delay: Duration) {
        self.config.next_turn_delay = delay;
    }

    /// Change the extra pause, in seconds.
    pub fn set_next_turn_delay_secs(&mut self, secs: f64) -> Result<(), ConfigError> {
        let delay = duration_from_secs(secs)
            .ok_or(ConfigError::InvalidSeconds { field: "next_turn_delay", value: secs })?;
        self.set_next_turn_delay(delay);
        Ok(())
    }

    /// Timing configuration.
    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    /// Turns started since the last `start_game`.
    pub fn turns_started(&self) -> u32 {
        self.turns_started
    }

    /// Ticks processed.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Is a session running (started and not yet ended)?
    pub fn in_session(&self) -> bool {
        self.in_session
    }

    /// Player handles.
    pub fn roster(&self) -> &Roster<P> {
        &self.roster
    }

    /// The board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// The board, for host-side updates such as reveal progress.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Menu handles.
    pub fn menu(&self) -> &MainMenu<M> {
        &self.menu
    }

    /// Copy of the observable state.
    pub fn snapshot(&self) -> TurnSnapshot {
        TurnSnapshot {
            tick: self.tick,
            phase: self.phase,
            board_setup_finished: self.phase.board_setup_finished(),
            current: self.phase.current(),
            next: self.phase.next(),
            turn_end_timer: self.phase.turn_end_timer(),
            turns_started: self.turns_started,
            next_turn_delay: self.config.next_turn_delay,
            delay_mode: self.config.delay_mode,
        }
    }

    /// Deterministic hash of the observable state.
    pub fn compute_hash(&self) -> StateHash {
        self.snapshot().compute_hash()
    }
}
