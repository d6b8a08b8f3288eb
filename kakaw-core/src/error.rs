use std::path::PathBuf;

use crate::{PieceType, Player, Pos};

/// Why a placement was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum PlacementFault {
    #[error("it is not {0}'s turn")]
    WrongOwner(Player),

    #[error("the boss cannot be placed")]
    BossNotPlaceable,

    #[error("no {0} left in reserve")]
    NotInReserve(PieceType),

    #[error("square is occupied")]
    Occupied,

    #[error("square does not touch any of the player's birds")]
    NotTouchingOwnHive,

    #[error("square is orthogonally next to the opposing boss")]
    NextToOpposingBoss,

    #[error("footprint would exceed {max_rows}x{max_cols}")]
    FootprintExceeded { max_rows: u32, max_cols: u32 },

    #[error("hive would be disconnected")]
    Disconnected,
}

/// Why a move was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum MoveFault {
    #[error("no bird on the source square")]
    EmptySquare,

    #[error("bird belongs to {0}")]
    WrongOwner(Player),

    #[error("destination is occupied")]
    Occupied,

    #[error("destination does not touch the hive")]
    Detached,

    #[error("footprint would exceed {max_rows}x{max_cols}")]
    FootprintExceeded { max_rows: u32, max_cols: u32 },

    #[error("a {0} cannot move that way")]
    Geometry(PieceType),

    #[error("path is blocked at {0}")]
    PathBlocked(Pos),

    #[error("hive would be disconnected")]
    Disconnected,
}

/// Why a removal was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum RemovalFault {
    #[error("no bird on the square")]
    EmptySquare,

    #[error("bird belongs to {0}")]
    WrongOwner(Player),

    #[error("hive would be disconnected")]
    Disconnected,

    /// Only reachable from a position that already broke the footprint.
    #[error("footprint would exceed {max_rows}x{max_cols}")]
    FootprintExceeded { max_rows: u32, max_cols: u32 },
}

/// A refused action. The state the action was tried against is unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Rejected {
    #[error("invalid placement at {pos}: {reason}")]
    InvalidPlacement { pos: Pos, reason: PlacementFault },

    #[error("invalid move {from}->{to}: {reason}")]
    InvalidMove {
        from: Pos,
        to: Pos,
        reason: MoveFault,
    },

    #[error("invalid removal at {pos}: {reason}")]
    InvalidRemoval { pos: Pos, reason: RemovalFault },

    #[error("the boss at {pos} cannot be removed")]
    IllegalBossRemoval { pos: Pos },

    #[error("game is over, {winner} won")]
    GameOver { winner: Player },
}

/// Errors that can occur when loading rules.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rules file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("rules validation error: {0}")]
    Validation(String),
}

/// Malformed action notation.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum NotationError {
    #[error("empty action")]
    Empty,

    #[error("unknown bird symbol '{0}'")]
    UnknownSymbol(char),

    #[error("malformed coordinates '{0}'")]
    BadCoordinates(String),

    #[error("unrecognized action '{0}'")]
    Unrecognized(String),
}
