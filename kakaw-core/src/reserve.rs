//! Birds waiting off the board.

use serde::{Deserialize, Serialize};

use crate::PieceType;

/// Per-type counts of one player's unplaced birds.
///
/// Birds of the same type and owner are interchangeable, so a reserve is a
/// count per type rather than a list. The boss never enters a reserve.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Reserve {
    counts: [u8; 5],
}

impl Reserve {
    /// One bird of every non-boss type.
    pub const fn starting() -> Reserve {
        Reserve { counts: [1; 5] }
    }

    /// Slot of `kind` in `counts`, `None` for the boss.
    #[inline]
    fn slot(kind: PieceType) -> Option<usize> {
        if kind.is_boss() {
            None
        } else {
            Some(kind as usize)
        }
    }

    /// How many birds of `kind` are waiting.
    #[inline]
    pub fn count(&self, kind: PieceType) -> u8 {
        Self::slot(kind).map_or(0, |i| self.counts[i])
    }

    #[inline]
    pub fn contains(&self, kind: PieceType) -> bool {
        self.count(kind) > 0
    }

    /// Total birds waiting.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Types with at least one bird waiting.
    pub fn available(&self) -> impl Iterator<Item = PieceType> + '_ {
        PieceType::RESERVE_TYPES
            .into_iter()
            .filter(|&kind| self.contains(kind))
    }

    /// This reserve with one `kind` drawn, or `None` if there is none to draw.
    pub fn take(self, kind: PieceType) -> Option<Reserve> {
        let i = Self::slot(kind)?;
        let mut next = self;
        next.counts[i] = next.counts[i].checked_sub(1)?;
        Some(next)
    }

    /// This reserve with one `kind` returned, or `None` for the boss.
    pub fn put(self, kind: PieceType) -> Option<Reserve> {
        let i = Self::slot(kind)?;
        let mut next = self;
        next.counts[i] = next.counts[i].saturating_add(1);
        Some(next)
    }
}
