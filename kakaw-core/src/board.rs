//! Occupancy map and hive connectivity.

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::geometry::{neighbors8, Bounds};
use crate::{Piece, Pos};

/// Birds on the grid, keyed by position.
///
/// A `Board` is treated as an immutable snapshot: the editing methods
/// (`with_piece`, `without`, `with_move`) return a new board and leave
/// `self` alone. Iteration is row-major.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Cell>", from = "Vec<Cell>")]
pub struct Board {
    cells: BTreeMap<Pos, Piece>,
}

/// Serialized form of one occupied square.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Pos,
    pub piece: Piece,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Board {
        Board::default()
    }

    /// Build a board from (position, piece) pairs. Later pairs win on
    /// duplicate positions.
    pub fn from_cells<I>(cells: I) -> Board
    where
        I: IntoIterator<Item = (Pos, Piece)>,
    {
        Board {
            cells: cells.into_iter().collect(),
        }
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.cells.get(&pos).copied()
    }

    #[inline]
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Number of occupied squares.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied squares in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.cells.iter().map(|(&pos, &piece)| (pos, piece))
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.keys().copied()
    }

    /// Bosses on the board in row-major order.
    pub fn bosses(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.iter().filter(|(_, piece)| piece.is_boss())
    }

    // ========== Copy-on-write edits ==========

    /// A copy of this board with `piece` at `pos` (replacing anything there).
    pub fn with_piece(&self, pos: Pos, piece: Piece) -> Board {
        let mut next = self.clone();
        next.cells.insert(pos, piece);
        next
    }

    /// A copy of this board with `pos` cleared.
    pub fn without(&self, pos: Pos) -> Board {
        let mut next = self.clone();
        next.cells.remove(&pos);
        next
    }

    /// A copy of this board with the piece at `from` relocated to `to`.
    /// Returns an unchanged copy if `from` is empty.
    pub fn with_move(&self, from: Pos, to: Pos) -> Board {
        let mut next = self.clone();
        if let Some(piece) = next.cells.remove(&from) {
            next.cells.insert(to, piece);
        }
        next
    }

    // ========== Structure ==========

    /// Bounding box of the occupied squares, `(0,0,0,0)` when empty.
    pub fn bounds(&self) -> Bounds {
        Bounds::of(self.positions())
    }

    /// Whether the occupied footprint spans at most `max_rows` × `max_cols`.
    pub fn fits(&self, max_rows: u32, max_cols: u32) -> bool {
        self.bounds().fits(max_rows, max_cols)
    }

    /// Whether all occupied squares form one 8-connected group.
    ///
    /// Breadth-first search from the first occupied square; the board is
    /// connected when the search reaches every square. An empty board is
    /// connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.positions().next() else {
            return true;
        };

        let mut visited = HashSet::with_capacity(self.len());
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in neighbors8(current) {
                if self.is_occupied(neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.len() == self.len()
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Vec<Cell> {
        board
            .cells
            .into_iter()
            .map(|(pos, piece)| Cell { pos, piece })
            .collect()
    }
}

impl From<Vec<Cell>> for Board {
    fn from(cells: Vec<Cell>) -> Board {
        Board::from_cells(cells.into_iter().map(|c| (c.pos, c.piece)))
    }
}
