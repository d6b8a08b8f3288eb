//! Ka-kaw rules engine.
//!
//! Two players grow a single "hive" of birds on an unbounded grid. Each
//! turn the player to move places a bird from their reserve, moves one of
//! their birds, or takes one back into the reserve. The game ends when a
//! boss is surrounded on all four orthogonal sides.
//!
//! # Coordinates
//!
//! ```text
//! Pos { row, col } with any i32 values. Rows grow downward.
//!
//!          col-1   col   col+1
//!   row-1   NW      N     NE
//!   row      W     pos    E
//!   row+1   SW      S     SE
//!
//! neighbors8: all eight cells above (hive adjacency)
//! neighbors4: N, S, W, E only (boss surround, boss proximity)
//! ```
//!
//! # Structural invariants (checked on every candidate board)
//!
//! ```text
//! 1. Every occupied cell reaches every other through neighbors8.
//! 2. The occupied bounding box spans at most 4 rows × 4 columns
//!    (configurable through `Rules`).
//! ```
//!
//! # Action notation
//!
//! ```text
//! R(3,1)         place a Regular at (3,1)   (R S H A B, K = boss)
//! (2,1)->(3,1)   move the bird at (2,1) to (3,1)
//! x(3,1)         take the bird at (3,1) back into the reserve
//! ```
//!
//! Every state transition is copy-on-write: `GameState::try_*` borrow the
//! current state and return a fresh one, so a rejected action leaves the
//! caller's state untouched.

pub mod board;
pub mod error;
pub mod game;
pub mod geometry;
pub mod legality;
pub mod notation;
pub mod reserve;
pub mod rules;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use board::Board;
pub use error::{ConfigError, MoveFault, NotationError, PlacementFault, Rejected, RemovalFault};
pub use game::{check_win, new_game, Action, GameState};
pub use geometry::{neighbors4, neighbors8, Bounds};
pub use reserve::Reserve;
pub use rules::{Rules, TurnOrder};

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = Player> {
        [Player::One, Player::Two].into_iter()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player one"),
            Player::Two => write!(f, "player two"),
        }
    }
}

/// Bird type. Determines how a bird moves once it is on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PieceType {
    /// One orthogonal step.
    Regular = 0,
    /// One diagonal step.
    Shooter = 1,
    /// One step in any of the eight directions.
    HitMan = 2,
    /// Any distance along a row or column, without jumping.
    Agent = 3,
    /// Knight jump.
    Bomber = 4,
    /// One step in any direction. Starts on the board, never leaves it.
    Boss = 5,
}

impl PieceType {
    /// The five types a reserve holds (everything but the boss).
    pub const RESERVE_TYPES: [PieceType; 5] = [
        PieceType::Regular,
        PieceType::Shooter,
        PieceType::HitMan,
        PieceType::Agent,
        PieceType::Bomber,
    ];

    /// Get all types as an iterator.
    pub fn all() -> impl Iterator<Item = PieceType> {
        Self::RESERVE_TYPES.into_iter().chain([PieceType::Boss])
    }

    #[inline]
    pub fn is_boss(self) -> bool {
        self == PieceType::Boss
    }

    /// Single-letter symbol used by the action notation.
    pub fn symbol(self) -> char {
        match self {
            PieceType::Regular => 'R',
            PieceType::Shooter => 'S',
            PieceType::HitMan => 'H',
            PieceType::Agent => 'A',
            PieceType::Bomber => 'B',
            PieceType::Boss => 'K',
        }
    }

    /// Inverse of [`PieceType::symbol`]. Case-insensitive.
    pub fn from_symbol(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'R' => Some(PieceType::Regular),
            'S' => Some(PieceType::Shooter),
            'H' => Some(PieceType::HitMan),
            'A' => Some(PieceType::Agent),
            'B' => Some(PieceType::Bomber),
            'K' => Some(PieceType::Boss),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::Regular => "regular",
            PieceType::Shooter => "shooter",
            PieceType::HitMan => "hit man",
            PieceType::Agent => "agent",
            PieceType::Bomber => "bomber",
            PieceType::Boss => "boss",
        };
        f.write_str(name)
    }
}

/// A bird: its type and who owns it. Equal birds are interchangeable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub owner: Player,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceType, owner: Player) -> Piece {
        Piece { kind, owner }
    }

    #[inline]
    pub fn is_boss(self) -> bool {
        self.kind.is_boss()
    }
}

/// Grid position. Any pair of integers is a valid position.
///
/// Ordering is row-major, which is also the iteration order of [`Board`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Pos {
        Pos { row, col }
    }

    /// Offset this position by (d_row, d_col). Wraps at the edges of `i32`.
    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Pos {
        Pos {
            row: self.row.wrapping_add(d_row),
            col: self.col.wrapping_add(d_col),
        }
    }

    /// Absolute row and column distance to `other`.
    #[inline]
    pub fn delta(self, other: Pos) -> (u32, u32) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
