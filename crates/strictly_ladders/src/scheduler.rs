//! Turn scheduler: the state machine that runs a game.
//!
//! The scheduler is driven by commands (`start_game`, `request_roll`,
//! `submit_roll`, `on_arrived`, `reset_game`) and publishes
//! [`GameEvent`]s. The only suspension point is between a dice move
//! request and the mover's arrival report; arrivals are tagged with an
//! [`Epoch`] so that reports issued before a reset are dropped.

use crate::action::{Roll, TurnError};
use crate::board::{BoardTopology, OFF_BOARD, Square};
use crate::boundary::{DiceSource, Epoch, MoveRequest, Mover};
use crate::config::{ConfigError, GameConfig};
use crate::contracts::{AwaitingRoll, Contract, RollContract, assert_invariants};
use crate::error::SetupError;
use crate::events::GameEvent;
use crate::phases::Phase;
use crate::player::{Player, PlayerId, PlayerRegistry};
use crate::resolver::{Outcome, resolve};
use crate::rules::GameRules;
use crate::shortcuts::{ShortcutError, ShortcutTable};
use crate::state::GameState;
use tracing::{debug, info, instrument, warn};

/// What a command did to the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    /// A dice move was sent to the mover; report arrival with `epoch`.
    Moving {
        /// Player being moved.
        player: PlayerId,
        /// Destination square.
        to: Square,
        /// Epoch to pass to `on_arrived`.
        epoch: Epoch,
    },
    /// The same player rolls again.
    BonusTurn(PlayerId),
    /// The turn passed to this player.
    NextTurn(PlayerId),
    /// This player won.
    Won(PlayerId),
    /// A stale arrival from before a reset was dropped.
    Ignored,
}

/// A dice move waiting for the mover.
#[derive(Debug, Clone, Copy)]
struct PendingMove {
    player_index: usize,
    outcome: Outcome,
}

/// Runs turns for one game.
///
/// Generic over the [`DiceSource`] and [`Mover`] it is wired to; both are
/// owned so the scheduler needs no runtime lookup.
#[derive(Debug)]
pub struct TurnScheduler<D, M> {
    state: GameState,
    shortcuts: ShortcutTable,
    board: BoardTopology,
    dice: D,
    mover: M,
    pending: Option<PendingMove>,
    roll_requested: bool,
    epoch: Epoch,
    events: Vec<GameEvent>,
}

impl<D: DiceSource, M: Mover> TurnScheduler<D, M> {
    /// Wires a scheduler from its parts. The game starts `Idle`.
    #[instrument(skip_all, fields(players = players.len(), shortcuts = shortcuts.len()))]
    pub fn new(
        players: PlayerRegistry,
        rules: GameRules,
        shortcuts: ShortcutTable,
        board: BoardTopology,
        dice: D,
        mover: M,
    ) -> Self {
        Self {
            state: GameState::new(players, rules),
            shortcuts,
            board,
            dice,
            mover,
            pending: None,
            roll_requested: false,
            epoch: Epoch::default(),
            events: Vec::new(),
        }
    }

    /// Builds a scheduler from a validated configuration.
    ///
    /// Rejected shortcuts are returned alongside; they never abort setup.
    #[instrument(skip_all)]
    pub fn from_config(
        config: &GameConfig,
        dice: D,
        mover: M,
    ) -> Result<(Self, Vec<ShortcutError>), ConfigError> {
        config.validate()?;
        let board = config.topology();
        let (shortcuts, rejected) = config.shortcut_table(&board);
        let scheduler = Self::new(
            config.registry(),
            *config.rules(),
            shortcuts,
            board,
            dice,
            mover,
        );
        Ok((scheduler, rejected))
    }

    // ─────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────

    /// Starts a game from `Idle`.
    ///
    /// # Errors
    ///
    /// Configuration problems leave the scheduler `Idle`.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> Result<PlayerId, SetupError> {
        if self.state.phase != Phase::Idle {
            return Err(SetupError::AlreadyStarted(self.state.phase));
        }
        if !self.board.is_ready() {
            return Err(SetupError::NotReady);
        }
        if self.state.players.len() < 2 {
            return Err(SetupError::PlayerCount(self.state.players.len()));
        }
        self.state.rules.validate(&self.board)?;
        for entry in self.shortcuts.entries() {
            self.board.validate_shortcut(&entry)?;
            self.state.rules.validate_shortcut(&entry)?;
        }
        let first = self
            .state
            .players
            .next_active_from(0)
            .ok_or(SetupError::NoActivePlayers)?;

        self.state.current_player_index = first;
        self.state.phase = Phase::AwaitingRoll;
        self.state.winner = None;
        self.state.last_dice_value = None;
        info!(players = self.state.players.len(), "Game started");
        Ok(self.begin_turn())
    }

    /// Asks the dice source to roll for the current player.
    ///
    /// # Errors
    ///
    /// - [`TurnError::MoveInProgress`] while a dice move is animating
    /// - [`TurnError::NotAwaitingRoll`] outside a running game
    /// - [`TurnError::RollAlreadyPending`] if a request is outstanding
    #[instrument(skip(self))]
    pub fn request_roll(&mut self) -> Result<PlayerId, TurnError> {
        AwaitingRoll::check(&self.state)?;
        if self.roll_requested {
            return Err(TurnError::RollAlreadyPending);
        }
        let player = self
            .state
            .current_player()
            .filter(|p| p.is_active())
            .ok_or(TurnError::NoActivePlayers)?;
        let id = player.id();
        self.dice.request_roll(player);
        self.roll_requested = true;
        self.emit(GameEvent::RollRequested(id));
        debug!(player = %id, "Roll requested");
        Ok(id)
    }

    /// Applies a dice value for the current player.
    ///
    /// A player entering or moving on the board is handed to the mover and
    /// the scheduler waits in `ResolvingMove` for [`Self::on_arrived`]. A
    /// missed start passes the turn immediately.
    ///
    /// # Errors
    ///
    /// Rejected rolls leave the state untouched.
    #[instrument(skip(self))]
    pub fn submit_roll(&mut self, dice_value: u8) -> Result<TurnStep, TurnError> {
        let roller = self
            .state
            .current_player()
            .map(Player::id)
            .ok_or(TurnError::NoActivePlayers)?;
        let roll = Roll::new(roller, dice_value);
        RollContract::pre(&self.state, &roll)?;

        #[cfg(debug_assertions)]
        let before = self.state.clone();

        let step = self.apply_roll(roll)?;

        #[cfg(debug_assertions)]
        crate::contracts::assert_roll_postconditions(&before, &self.state);

        Ok(step)
    }

    /// Reports that the mover finished the dice move tagged `epoch`.
    ///
    /// Follows shortcuts from the arrival square, then decides between a
    /// win, a bonus turn and the next player.
    ///
    /// # Errors
    ///
    /// - [`TurnError::NoMoveInProgress`] if nothing was waiting
    /// - [`TurnError::NoActivePlayers`] if the rotation is empty
    #[instrument(skip(self))]
    pub fn on_arrived(&mut self, epoch: Epoch) -> Result<TurnStep, TurnError> {
        if epoch != self.epoch {
            debug!(stale = %epoch, current = %self.epoch, "Ignoring stale arrival");
            return Ok(TurnStep::Ignored);
        }
        let pending = self.pending.take().ok_or(TurnError::NoMoveInProgress)?;
        let step = self.resolve_arrival(pending)?;
        assert_invariants(&self.state);
        Ok(step)
    }

    /// Returns every player to the start and the scheduler to `Idle`.
    ///
    /// Safe in any phase. Arrivals for moves issued before the reset are
    /// ignored afterwards.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        let squares: Vec<(PlayerId, Square)> = self
            .state
            .players
            .iter()
            .map(|p| (p.id(), p.current_square()))
            .collect();

        self.epoch = self.epoch.next();
        self.pending = None;
        self.roll_requested = false;
        self.state.players.reset_all();
        self.state.current_player_index = 0;
        self.state.phase = Phase::Idle;
        self.state.last_dice_value = None;
        self.state.winner = None;

        let epoch = self.epoch;
        for (id, from) in squares {
            self.mover
                .move_to(MoveRequest::new(id, from, OFF_BOARD, false, epoch));
        }
        info!(%epoch, "Game reset");
    }

    /// Takes a player out of the rotation.
    ///
    /// If it is that player's turn and no move is in flight, the turn
    /// passes on.
    ///
    /// # Errors
    ///
    /// - [`TurnError::UnknownPlayer`] for an unknown id
    /// - [`TurnError::MoveInProgress`] for the player currently moving
    #[instrument(skip(self))]
    pub fn deactivate_player(&mut self, id: PlayerId) -> Result<Option<TurnStep>, TurnError> {
        let index = self
            .state
            .players
            .index_of(id)
            .ok_or(TurnError::UnknownPlayer(id))?;
        let is_current = index == self.state.current_player_index;
        if is_current && self.state.phase == Phase::ResolvingMove {
            return Err(TurnError::MoveInProgress);
        }
        self.state.players.deactivate(id);
        if is_current && self.state.phase == Phase::AwaitingRoll {
            self.roll_requested = false;
            return self.advance().map(Some);
        }
        Ok(None)
    }

    /// Takes the events published since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ─────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────

    fn apply_roll(&mut self, roll: Roll) -> Result<TurnStep, TurnError> {
        let index = self.state.current_player_index;
        self.roll_requested = false;
        self.state.last_dice_value = Some(roll.value);
        self.emit(GameEvent::DiceRolled(roll.value));

        let (outcome, from) = {
            let player = self
                .state
                .players
                .get(index)
                .ok_or(TurnError::NoActivePlayers)?;
            (resolve(player, roll.value, &self.state.rules), player.current_square())
        };
        debug!(%roll, ?outcome, "Roll resolved");

        if outcome.turn_passed {
            debug!(
                player = %roll.player,
                needed = self.state.rules.starting_dice_value,
                "Start value missed, turn passed"
            );
            self.emit(GameEvent::TurnPassed(roll.player));
            return self.advance();
        }

        if let Some(player) = self.state.players.get_mut(index) {
            if outcome.started {
                player.start();
            } else {
                player.move_to(outcome.new_square);
            }
        }
        if outcome.started {
            info!(player = %roll.player, "Player entered the board");
            self.emit(GameEvent::PlayerStarted(roll.player));
        }
        self.emit(GameEvent::PlayerMoved {
            player: roll.player,
            square: outcome.new_square,
        });

        self.state.phase = Phase::ResolvingMove;
        self.pending = Some(PendingMove {
            player_index: index,
            outcome,
        });
        let epoch = self.epoch;
        self.mover.move_to(MoveRequest::new(
            roll.player,
            from,
            outcome.new_square,
            true,
            epoch,
        ));
        Ok(TurnStep::Moving {
            player: roll.player,
            to: outcome.new_square,
            epoch,
        })
    }

    fn resolve_arrival(&mut self, pending: PendingMove) -> Result<TurnStep, TurnError> {
        let PendingMove {
            player_index,
            outcome,
        } = pending;
        let (id, arrived) = self
            .state
            .players
            .get(player_index)
            .map(|p| (p.id(), p.current_square()))
            .ok_or(TurnError::NoActivePlayers)?;

        // A dice win ends the game before any shortcut is looked at.
        if outcome.won {
            return Ok(self.finish(id));
        }

        let chain = self
            .shortcuts
            .resolve_chain(arrived, self.state.rules.max_shortcut_chain_length);
        let epoch = self.epoch;
        for entry in &chain.hops {
            self.mover
                .move_to(MoveRequest::new(id, entry.start(), entry.end(), false, epoch));
            self.emit(GameEvent::ShortcutTaken { player: id, entry: *entry });
            debug!(player = %id, %entry, "Shortcut taken");
        }
        if chain.limit_exceeded {
            warn!(player = %id, square = chain.final_square, "Shortcut chain truncated");
            self.emit(GameEvent::ChainLimitExceeded {
                player: id,
                square: chain.final_square,
            });
        }
        if chain.hopped() {
            if let Some(player) = self.state.players.get_mut(player_index) {
                player.move_to(chain.final_square);
            }
            self.emit(GameEvent::PlayerMoved {
                player: id,
                square: chain.final_square,
            });
        }

        if chain.hopped()
            && self.state.rules.shortcut_can_win
            && chain.final_square == self.state.rules.winning_square
        {
            return Ok(self.finish(id));
        }

        if outcome.bonus_turn {
            debug!(player = %id, "Bonus turn");
            self.begin_turn();
            return Ok(TurnStep::BonusTurn(id));
        }

        self.advance()
    }

    /// Moves the turn to the next active player after the current one.
    fn advance(&mut self) -> Result<TurnStep, TurnError> {
        let len = self.state.players.len();
        if len == 0 {
            self.state.phase = Phase::Idle;
            return Err(TurnError::NoActivePlayers);
        }
        let start = (self.state.current_player_index + 1) % len;
        match self.state.players.next_active_from(start) {
            Some(next) => {
                self.state.current_player_index = next;
                Ok(TurnStep::NextTurn(self.begin_turn()))
            }
            None => {
                warn!("No active players left, stopping game");
                self.state.phase = Phase::Idle;
                self.pending = None;
                Err(TurnError::NoActivePlayers)
            }
        }
    }

    /// Opens a turn for the current player.
    fn begin_turn(&mut self) -> PlayerId {
        self.state.phase = Phase::AwaitingRoll;
        self.roll_requested = false;
        let id = self
            .state
            .current_player()
            .map(Player::id)
            .unwrap_or_else(|| PlayerId::new(0));
        debug!(player = %id, "Turn started");
        self.emit(GameEvent::TurnStarted(id));
        id
    }

    fn finish(&mut self, winner: PlayerId) -> TurnStep {
        self.state.phase = Phase::GameOver;
        self.state.winner = Some(winner);
        self.pending = None;
        info!(player = %winner, "Player won");
        self.emit(GameEvent::PlayerWon(winner));
        TurnStep::Won(winner)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // ─────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────

    /// Full game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        self.state.players.as_slice()
    }

    /// Most recently accepted dice value.
    pub fn last_dice_value(&self) -> Option<u8> {
        self.state.last_dice_value
    }

    /// Winner once the game is over.
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    /// Current reset generation.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Whether a roll request is outstanding.
    pub fn roll_requested(&self) -> bool {
        self.roll_requested
    }

    /// Rules in force.
    pub fn rules(&self) -> &GameRules {
        &self.state.rules
    }

    /// Registered shortcuts.
    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    /// Board layout.
    pub fn board(&self) -> &BoardTopology {
        &self.board
    }

    /// Mutable board layout, for generating or clearing it while idle.
    pub fn board_mut(&mut self) -> &mut BoardTopology {
        &mut self.board
    }

    /// The dice source.
    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// The mover.
    pub fn mover(&self) -> &M {
        &self.mover
    }
}
