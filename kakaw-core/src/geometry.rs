//! Adjacency and bounding boxes.

use serde::{Deserialize, Serialize};

use crate::Pos;

/// Offsets of the eight surrounding cells, row-major.
const RING8: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the four orthogonal cells: N, W, E, S.
const RING4: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// The eight cells touching `pos` orthogonally or diagonally.
#[inline]
pub fn neighbors8(pos: Pos) -> [Pos; 8] {
    RING8.map(|(dr, dc)| pos.offset(dr, dc))
}

/// The four cells sharing an edge with `pos`.
#[inline]
pub fn neighbors4(pos: Pos) -> [Pos; 4] {
    RING4.map(|(dr, dc)| pos.offset(dr, dc))
}

/// Bounding box of a set of positions, inclusive on all sides.
///
/// The box of an empty set is the degenerate `(0, 0, 0, 0)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

impl Bounds {
    /// Compute the box around `positions`.
    pub fn of<I>(positions: I) -> Bounds
    where
        I: IntoIterator<Item = Pos>,
    {
        let mut iter = positions.into_iter();
        let Some(first) = iter.next() else {
            return Bounds::default();
        };
        iter.fold(
            Bounds {
                min_row: first.row,
                max_row: first.row,
                min_col: first.col,
                max_col: first.col,
            },
            |b, p| Bounds {
                min_row: b.min_row.min(p.row),
                max_row: b.max_row.max(p.row),
                min_col: b.min_col.min(p.col),
                max_col: b.max_col.max(p.col),
            },
        )
    }

    /// Number of rows covered.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.min_row.abs_diff(self.max_row).saturating_add(1)
    }

    /// Number of columns covered.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.min_col.abs_diff(self.max_col).saturating_add(1)
    }

    /// Whether the box spans at most `max_rows` × `max_cols`.
    #[inline]
    pub fn fits(&self, max_rows: u32, max_cols: u32) -> bool {
        self.rows() <= max_rows && self.cols() <= max_cols
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.contains_row(pos.row) && self.contains_col(pos.col)
    }

    #[inline]
    pub fn contains_row(&self, row: i32) -> bool {
        (self.min_row..=self.max_row).contains(&row)
    }

    #[inline]
    pub fn contains_col(&self, col: i32) -> bool {
        (self.min_col..=self.max_col).contains(&col)
    }

    /// The box grown by `margin` cells on every side.
    pub fn expand(&self, margin: i32) -> Bounds {
        Bounds {
            min_row: self.min_row.saturating_sub(margin),
            max_row: self.max_row.saturating_add(margin),
            min_col: self.min_col.saturating_sub(margin),
            max_col: self.max_col.saturating_add(margin),
        }
    }
}
