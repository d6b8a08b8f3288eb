//! Game state and turn controller.
//!
//! `GameState` is a snapshot. Every action borrows the current snapshot,
//! builds a candidate board, validates it, and returns a new snapshot:
//!
//! ```text
//! try_place / try_move / try_remove
//!        │  per-action legality (legality.rs)
//!        ▼
//!     commit ── footprint + connectivity re-check
//!        │
//!        ▼
//!  next player, check_win ──► new GameState
//! ```
//!
//! A rejected action returns `Err(Rejected)` and the caller keeps using
//! the snapshot it already has.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::error::{ConfigError, MoveFault, PlacementFault, Rejected, RemovalFault};
use crate::geometry::{neighbors4, neighbors8};
use crate::legality::{can_move, can_place, can_remove};
use crate::reserve::Reserve;
use crate::rules::{Rules, TurnOrder};
use crate::{Piece, PieceType, Player, Pos};

/// Starting squares of the two bosses: one column, one row apart.
pub const PLAYER_ONE_BOSS: Pos = Pos::new(2, 1);
pub const PLAYER_TWO_BOSS: Pos = Pos::new(1, 1);

/// One thing the player to move can do.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Place a bird of this type from the mover's reserve.
    Place { kind: PieceType, to: Pos },
    /// Move one of the mover's birds.
    Move { from: Pos, to: Pos },
    /// Take one of the mover's birds back into the reserve.
    Remove { at: Pos },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place { kind, to } => write!(f, "{}{}", kind.symbol(), to),
            Action::Move { from, to } => write!(f, "{}->{}", from, to),
            Action::Remove { at } => write!(f, "x{}", at),
        }
    }
}

/// Structural check failed at commit time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Breach {
    FootprintExceeded { max_rows: u32, max_cols: u32 },
    Disconnected,
}

impl Breach {
    fn placement(self) -> PlacementFault {
        match self {
            Breach::FootprintExceeded { max_rows, max_cols } => {
                PlacementFault::FootprintExceeded { max_rows, max_cols }
            }
            Breach::Disconnected => PlacementFault::Disconnected,
        }
    }

    fn movement(self) -> MoveFault {
        match self {
            Breach::FootprintExceeded { max_rows, max_cols } => {
                MoveFault::FootprintExceeded { max_rows, max_cols }
            }
            Breach::Disconnected => MoveFault::Disconnected,
        }
    }

    fn removal(self) -> RemovalFault {
        match self {
            Breach::FootprintExceeded { max_rows, max_cols } => {
                RemovalFault::FootprintExceeded { max_rows, max_cols }
            }
            Breach::Disconnected => RemovalFault::Disconnected,
        }
    }
}

/// Complete game snapshot: board, reserves, player to move, outcome.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current: Player,
    reserves: [Reserve; 2],
    rules: Rules,
    winner: Option<Player>,
}

/// Starting position under the default rules.
pub fn new_game() -> GameState {
    GameState::new()
}

impl GameState {
    /// Starting position under the default rules: both bosses on the
    /// board, full reserves, player one to move.
    pub fn new() -> GameState {
        GameState::opening(Rules::default())
    }

    /// Starting position under custom rules.
    pub fn with_rules(rules: Rules) -> Result<GameState, ConfigError> {
        rules.validate()?;
        Ok(GameState::opening(rules))
    }

    fn opening(rules: Rules) -> GameState {
        let board = Board::from_cells([
            (PLAYER_ONE_BOSS, Piece::new(PieceType::Boss, Player::One)),
            (PLAYER_TWO_BOSS, Piece::new(PieceType::Boss, Player::Two)),
        ]);
        GameState {
            board,
            current: Player::One,
            reserves: [Reserve::starting(); 2],
            rules,
            winner: None,
        }
    }

    /// Snapshot of an arbitrary position, for analysis and tests.
    ///
    /// The board is taken as given; only actions played from it are
    /// validated. The winner is computed from the board.
    pub fn from_position(
        board: Board,
        current: Player,
        reserves: [Reserve; 2],
        rules: Rules,
    ) -> GameState {
        let winner = check_win(&board, &rules);
        GameState {
            board,
            current,
            reserves,
            rules,
            winner,
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move.
    #[inline]
    pub fn current_player(&self) -> Player {
        self.current
    }

    #[inline]
    pub fn reserve(&self, player: Player) -> Reserve {
        self.reserves[player.index()]
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The winner, once a boss has been surrounded.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    // ========== Actions ==========

    /// Place `piece` from the mover's reserve on `pos`.
    pub fn try_place(&self, pos: Pos, piece: Piece) -> Result<GameState, Rejected> {
        self.place(pos, piece)
            .inspect_err(|e| debug!(%pos, ?piece, error = %e, "placement rejected"))
    }

    /// Move the mover's bird on `from` to `to`.
    pub fn try_move(&self, from: Pos, to: Pos) -> Result<GameState, Rejected> {
        self.relocate(from, to)
            .inspect_err(|e| debug!(%from, %to, error = %e, "move rejected"))
    }

    /// Take the mover's bird on `pos` back into their reserve.
    pub fn try_remove(&self, pos: Pos) -> Result<GameState, Rejected> {
        self.remove(pos).inspect_err(|e| debug!(%pos, error = %e, "removal rejected"))
    }

    /// Play `action` for the player to move.
    pub fn apply(&self, action: Action) -> Result<GameState, Rejected> {
        match action {
            Action::Place { kind, to } => self.try_place(to, Piece::new(kind, self.current)),
            Action::Move { from, to } => self.try_move(from, to),
            Action::Remove { at } => self.try_remove(at),
        }
    }

    fn ensure_ongoing(&self) -> Result<(), Rejected> {
        match self.winner {
            Some(winner) => Err(Rejected::GameOver { winner }),
            None => Ok(()),
        }
    }

    fn place(&self, pos: Pos, piece: Piece) -> Result<GameState, Rejected> {
        self.ensure_ongoing()?;
        let fault = |reason| Rejected::InvalidPlacement { pos, reason };

        if piece.owner != self.current {
            return Err(fault(PlacementFault::WrongOwner(piece.owner)));
        }
        if piece.is_boss() {
            return Err(fault(PlacementFault::BossNotPlaceable));
        }
        let drawn = self
            .reserve(piece.owner)
            .take(piece.kind)
            .ok_or(fault(PlacementFault::NotInReserve(piece.kind)))?;
        can_place(pos, &self.board, self.current, &self.rules).map_err(fault)?;

        let mut reserves = self.reserves;
        reserves[piece.owner.index()] = drawn;
        self.commit(self.board.with_piece(pos, piece), reserves, self.current.opponent())
            .map_err(|b| fault(b.placement()))
    }

    fn relocate(&self, from: Pos, to: Pos) -> Result<GameState, Rejected> {
        self.ensure_ongoing()?;
        let fault = |reason| Rejected::InvalidMove { from, to, reason };

        let piece = self.board.get(from).ok_or(fault(MoveFault::EmptySquare))?;
        if piece.owner != self.current {
            return Err(fault(MoveFault::WrongOwner(piece.owner)));
        }
        can_move(from, to, piece.kind, &self.board, &self.rules).map_err(fault)?;

        let next = match self.rules.turn_order {
            TurnOrder::BossMoveYieldsToPlayerTwo if piece.is_boss() => Player::Two,
            _ => self.current.opponent(),
        };
        self.commit(self.board.with_move(from, to), self.reserves, next)
            .map_err(|b| fault(b.movement()))
    }

    fn remove(&self, pos: Pos) -> Result<GameState, Rejected> {
        self.ensure_ongoing()?;
        can_remove(pos, &self.board, self.current)?;

        let fault = |reason| Rejected::InvalidRemoval { pos, reason };
        let piece = self.board.get(pos).ok_or(fault(RemovalFault::EmptySquare))?;
        let returned = self
            .reserve(piece.owner)
            .put(piece.kind)
            .ok_or(Rejected::IllegalBossRemoval { pos })?;

        let mut reserves = self.reserves;
        reserves[piece.owner.index()] = returned;
        self.commit(self.board.without(pos), reserves, self.current.opponent())
            .map_err(|b| fault(b.removal()))
    }

    /// The single gate every accepted action passes through. Re-checks the
    /// footprint and connectivity of the candidate, then publishes it.
    fn commit(
        &self,
        board: Board,
        reserves: [Reserve; 2],
        next: Player,
    ) -> Result<GameState, Breach> {
        if !board.fits(self.rules.max_rows, self.rules.max_cols) {
            return Err(Breach::FootprintExceeded {
                max_rows: self.rules.max_rows,
                max_cols: self.rules.max_cols,
            });
        }
        if !board.is_connected() {
            return Err(Breach::Disconnected);
        }

        let winner = check_win(&board, &self.rules);
        match winner {
            Some(winner) => info!(%winner, birds = board.len(), "boss surrounded, game over"),
            None => debug!(mover = %self.current, %next, birds = board.len(), "action committed"),
        }

        Ok(GameState {
            board,
            current: next,
            reserves,
            rules: self.rules,
            winner,
        })
    }

    // ========== Legal action generation ==========

    /// Empty squares touching the hive. Every legal destination is one.
    fn frontier(&self) -> BTreeSet<Pos> {
        self.board
            .positions()
            .flat_map(neighbors8)
            .filter(|&p| !self.board.is_occupied(p))
            .collect()
    }

    /// Squares where the mover could place a `kind` bird now.
    pub fn placement_targets(&self, kind: PieceType) -> Vec<Pos> {
        let piece = Piece::new(kind, self.current);
        self.frontier()
            .into_iter()
            .filter(|&to| self.place(to, piece).is_ok())
            .collect()
    }

    /// Squares the mover's bird on `from` could move to now.
    pub fn move_targets(&self, from: Pos) -> Vec<Pos> {
        self.frontier()
            .into_iter()
            .filter(|&to| self.relocate(from, to).is_ok())
            .collect()
    }

    /// The mover's birds that could be taken back now.
    pub fn removable(&self) -> Vec<Pos> {
        self.board
            .positions()
            .filter(|&at| self.remove(at).is_ok())
            .collect()
    }

    /// Every action the mover could take, each one accepted by [`apply`].
    /// Empty once the game is over.
    ///
    /// [`apply`]: GameState::apply
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_over() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for kind in self.reserve(self.current).available() {
            for to in self.placement_targets(kind) {
                actions.push(Action::Place { kind, to });
            }
        }
        let own: Vec<Pos> = self
            .board
            .iter()
            .filter(|(_, piece)| piece.owner == self.current)
            .map(|(pos, _)| pos)
            .collect();
        for from in own {
            for to in self.move_targets(from) {
                actions.push(Action::Move { from, to });
            }
        }
        for at in self.removable() {
            actions.push(Action::Remove { at });
        }
        actions
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Winner implied by `board`, if any boss is surrounded.
///
/// A boss is surrounded when each of its four orthogonal neighbors is
/// blocked: occupied, or outside the footprint along an axis that already
/// spans its maximum (no bird could ever stand there). Bosses are checked
/// in row-major order; the first surrounded one decides, and its owner's
/// opponent wins.
pub fn check_win(board: &Board, rules: &Rules) -> Option<Player> {
    let bounds = board.bounds();
    let rows_full = bounds.rows() >= rules.max_rows;
    let cols_full = bounds.cols() >= rules.max_cols;

    let blocked = |p: Pos| {
        board.is_occupied(p)
            || (rows_full && !bounds.contains_row(p.row))
            || (cols_full && !bounds.contains_col(p.col))
    };

    board
        .bosses()
        .find(|&(pos, _)| neighbors4(pos).into_iter().all(blocked))
        .map(|(_, boss)| boss.owner.opponent())
}
