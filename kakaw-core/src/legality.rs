//! Legality checks for placing, moving and removing birds.
//!
//! Each check runs its gates in a fixed order and reports the first one
//! that fails. None of them mutate anything: candidate boards are built
//! as copies.

use crate::board::Board;
use crate::error::{MoveFault, PlacementFault, Rejected, RemovalFault};
use crate::geometry::{neighbors4, neighbors8};
use crate::rules::Rules;
use crate::{Piece, PieceType, Player, Pos};

/// Whether `player` may put a new bird on `pos`.
///
/// Gates, in order:
/// 1. `pos` is empty.
/// 2. Some 8-neighbor of `pos` holds one of `player`'s birds.
/// 3. No orthogonal neighbor of `pos` holds the opposing boss.
/// 4. The board with a bird on `pos` stays within the footprint.
///
/// Connectivity is not checked here: an empty square next to a connected
/// hive cannot split it. The commit gate re-checks it anyway.
pub fn can_place(
    pos: Pos,
    board: &Board,
    player: Player,
    rules: &Rules,
) -> Result<(), PlacementFault> {
    if board.is_occupied(pos) {
        return Err(PlacementFault::Occupied);
    }

    let touches_own = neighbors8(pos)
        .into_iter()
        .any(|n| board.get(n).is_some_and(|p| p.owner == player));
    if !touches_own {
        return Err(PlacementFault::NotTouchingOwnHive);
    }

    let next_to_enemy_boss = neighbors4(pos)
        .into_iter()
        .any(|n| board.get(n).is_some_and(|p| p.is_boss() && p.owner != player));
    if next_to_enemy_boss {
        return Err(PlacementFault::NextToOpposingBoss);
    }

    // The placeholder's type is irrelevant to the footprint.
    let candidate = board.with_piece(pos, Piece::new(PieceType::Regular, player));
    if !candidate.fits(rules.max_rows, rules.max_cols) {
        return Err(PlacementFault::FootprintExceeded {
            max_rows: rules.max_rows,
            max_cols: rules.max_cols,
        });
    }

    Ok(())
}

/// Whether a `kind` bird standing on `from` may move to `to`.
///
/// Gates, in order:
/// 1. `to` is empty.
/// 2. Some 8-neighbor of `to` is occupied on the current board. The
///    mover's own square counts, so a step that only touches the vacated
///    square passes this gate and is caught by gate 5 instead.
/// 3. The board after the move stays within the footprint.
/// 4. The step matches the bird's movement pattern ([`check_geometry`]).
/// 5. The board after the move is connected.
pub fn can_move(
    from: Pos,
    to: Pos,
    kind: PieceType,
    board: &Board,
    rules: &Rules,
) -> Result<(), MoveFault> {
    if board.is_occupied(to) {
        return Err(MoveFault::Occupied);
    }

    if !neighbors8(to).into_iter().any(|n| board.is_occupied(n)) {
        return Err(MoveFault::Detached);
    }

    let candidate = board.with_move(from, to);
    if !candidate.fits(rules.max_rows, rules.max_cols) {
        return Err(MoveFault::FootprintExceeded {
            max_rows: rules.max_rows,
            max_cols: rules.max_cols,
        });
    }

    check_geometry(kind, from, to, &board.without(from))?;

    if !candidate.is_connected() {
        return Err(MoveFault::Disconnected);
    }

    Ok(())
}

/// Movement pattern of each bird type.
///
/// | Type     | Step                                         |
/// |----------|----------------------------------------------|
/// | Regular  | one orthogonal step                          |
/// | Shooter  | one diagonal step                            |
/// | HitMan   | one step in any direction                    |
/// | Agent    | any distance along a row or column, unblocked|
/// | Bomber   | knight jump                                  |
/// | Boss     | one step in any direction                    |
///
/// `board` should not contain the moving bird; only the Agent consults it.
pub fn check_geometry(
    kind: PieceType,
    from: Pos,
    to: Pos,
    board: &Board,
) -> Result<(), MoveFault> {
    let (dr, dc) = from.delta(to);
    let ok = match kind {
        PieceType::Regular => dr + dc == 1,
        PieceType::Shooter => dr == 1 && dc == 1,
        PieceType::HitMan | PieceType::Boss => dr.max(dc) == 1,
        PieceType::Bomber => matches!((dr, dc), (2, 1) | (1, 2)),
        PieceType::Agent if (dr == 0) != (dc == 0) => {
            return match first_blocker(from, to, board) {
                Some(at) => Err(MoveFault::PathBlocked(at)),
                None => Ok(()),
            };
        }
        PieceType::Agent => false,
    };
    if ok {
        Ok(())
    } else {
        Err(MoveFault::Geometry(kind))
    }
}

/// Occupied square strictly between `from` and `to` on a straight
/// orthogonal line, nearest to `from`.
///
/// Scans the occupied squares, not the line itself.
fn first_blocker(from: Pos, to: Pos, board: &Board) -> Option<Pos> {
    let between = |a: i32, b: i32, x: i32| a.min(b) < x && x < a.max(b);
    board
        .positions()
        .filter(|p| {
            if from.row == to.row {
                p.row == from.row && between(from.col, to.col, p.col)
            } else {
                p.col == from.col && between(from.row, to.row, p.row)
            }
        })
        .min_by_key(|&p| {
            let (dr, dc) = from.delta(p);
            dr.max(dc)
        })
}

/// Whether `player` may take the bird on `pos` back into their reserve.
///
/// The boss is never removable, whoever owns it. Otherwise the bird must
/// be `player`'s and the hive must stay connected without it. The
/// footprint can only shrink, so it is not checked.
pub fn can_remove(pos: Pos, board: &Board, player: Player) -> Result<(), Rejected> {
    let fault = |reason| Rejected::InvalidRemoval { pos, reason };

    let piece = board.get(pos).ok_or(fault(RemovalFault::EmptySquare))?;
    if piece.is_boss() {
        return Err(Rejected::IllegalBossRemoval { pos });
    }
    if piece.owner != player {
        return Err(fault(RemovalFault::WrongOwner(piece.owner)));
    }
    if !board.without(pos).is_connected() {
        return Err(fault(RemovalFault::Disconnected));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn p(row: i32, col: i32) -> Pos {
        Pos::new(row, col)
    }

    fn piece(kind: PieceType, owner: Player) -> Piece {
        Piece::new(kind, owner)
    }

    /// Starting position: P2 boss at (1,1), P1 boss at (2,1).
    fn start() -> Board {
        Board::from_cells([
            (p(1, 1), piece(PieceType::Boss, Player::Two)),
            (p(2, 1), piece(PieceType::Boss, Player::One)),
        ])
    }

    // ========== Placement ==========

    #[test]
    fn test_place_next_to_own_boss() {
        let rules = Rules::default();
        assert_eq!(can_place(p(3, 1), &start(), Player::One, &rules), Ok(()));
        assert_eq!(can_place(p(3, 2), &start(), Player::One, &rules), Ok(()));
    }

    #[test]
    fn test_place_occupied() {
        let rules = Rules::default();
        assert_eq!(
            can_place(p(1, 1), &start(), Player::One, &rules),
            Err(PlacementFault::Occupied)
        );
    }

    #[test]
    fn test_place_must_touch_own_bird() {
        let rules = Rules::default();
        assert_eq!(
            can_place(p(3, 3), &start(), Player::One, &rules),
            Err(PlacementFault::NotTouchingOwnHive)
        );
        // (0,0) touches only P2's boss
        assert_eq!(
            can_place(p(0, 0), &start(), Player::One, &rules),
            Err(PlacementFault::NotTouchingOwnHive)
        );
    }

    #[test]
    fn test_place_not_orthogonal_to_enemy_boss() {
        let rules = Rules::default();
        // (1,0) touches P1's boss diagonally but sits west of P2's boss
        assert_eq!(
            can_place(p(1, 0), &start(), Player::One, &rules),
            Err(PlacementFault::NextToOpposingBoss)
        );
        // Diagonal contact with the enemy boss is fine
        assert_eq!(can_place(p(2, 0), &start(), Player::One, &rules), Ok(()));
    }

    #[test]
    fn test_own_boss_proximity_allowed() {
        let rules = Rules::default();
        assert_eq!(can_place(p(0, 1), &start(), Player::Two, &rules), Ok(()));
    }

    #[test]
    fn test_place_footprint() {
        let rules = Rules::default();
        let board = start()
            .with_piece(p(3, 1), piece(PieceType::Regular, Player::One))
            .with_piece(p(0, 1), piece(PieceType::Regular, Player::Two));
        // Rows 0..=3 already used; row 4 would make five
        assert_eq!(
            can_place(p(4, 1), &board, Player::One, &rules),
            Err(PlacementFault::FootprintExceeded { max_rows: 4, max_cols: 4 })
        );
    }

    // ========== Geometry ==========

    #[test]
    fn test_geometry_table() {
        let empty = Board::new();
        let o = p(0, 0);
        let cases = [
            (PieceType::Regular, p(1, 0), true),
            (PieceType::Regular, p(1, 1), false),
            (PieceType::Shooter, p(1, 1), true),
            (PieceType::Shooter, p(0, 1), false),
            (PieceType::Shooter, p(2, 2), false),
            (PieceType::HitMan, p(-1, 1), true),
            (PieceType::HitMan, p(0, -1), true),
            (PieceType::HitMan, p(0, 2), false),
            (PieceType::Boss, p(1, -1), true),
            (PieceType::Boss, p(2, 0), false),
            (PieceType::Bomber, p(2, 1), true),
            (PieceType::Bomber, p(-1, -2), true),
            (PieceType::Bomber, p(2, 2), false),
            (PieceType::Bomber, p(1, 0), false),
            (PieceType::Agent, p(0, 3), true),
            (PieceType::Agent, p(-2, 0), true),
            (PieceType::Agent, p(1, 1), false),
        ];
        for (kind, to, legal) in cases {
            assert_eq!(
                check_geometry(kind, o, to, &empty).is_ok(),
                legal,
                "{:?} from {} to {}",
                kind,
                o,
                to
            );
        }
    }

    #[test]
    fn test_zero_step_never_geometric() {
        let empty = Board::new();
        for kind in PieceType::all() {
            assert!(check_geometry(kind, p(0, 0), p(0, 0), &empty).is_err());
        }
    }

    #[test]
    fn test_agent_path_blocked() {
        let board = Board::from_cells([(p(0, 1), piece(PieceType::Regular, Player::Two))]);
        assert_eq!(
            check_geometry(PieceType::Agent, p(0, 0), p(0, 3), &board),
            Err(MoveFault::PathBlocked(p(0, 1)))
        );
        assert_eq!(check_geometry(PieceType::Agent, p(0, 0), p(1, 0), &board), Ok(()));
    }

    #[test]
    fn test_agent_blocker_nearest_to_start() {
        let board = Board::from_cells([
            (p(0, -7), piece(PieceType::Regular, Player::One)),
            (p(0, 5), piece(PieceType::Regular, Player::Two)),
            (p(1, 0), piece(PieceType::Regular, Player::Two)),
        ]);
        assert_eq!(
            check_geometry(PieceType::Agent, p(0, i32::MIN), p(0, i32::MAX), &board),
            Err(MoveFault::PathBlocked(p(0, -7)))
        );
        assert_eq!(
            check_geometry(PieceType::Agent, p(0, i32::MAX), p(0, i32::MIN), &board),
            Err(MoveFault::PathBlocked(p(0, 5)))
        );
        assert_eq!(
            check_geometry(PieceType::Agent, p(i32::MAX, 0), p(2, 0), &board),
            Ok(())
        );
    }

    // ========== Moves ==========

    #[test]
    fn test_move_occupied() {
        let rules = Rules::default();
        assert_eq!(
            can_move(p(2, 1), p(1, 1), PieceType::Boss, &start(), &rules),
            Err(MoveFault::Occupied)
        );
    }

    #[test]
    fn test_move_detached() {
        let rules = Rules::default();
        let board = start().with_piece(p(3, 1), piece(PieceType::Agent, Player::One));
        assert_eq!(
            can_move(p(3, 1), p(3, 4), PieceType::Agent, &board, &rules),
            Err(MoveFault::Detached)
        );
    }

    #[test]
    fn test_move_touching_only_vacated_square() {
        // The neighbor gate sees the mover's own square, so the step passes
        // it; the disconnection is reported instead.
        let rules = Rules::default();
        let board = start().with_piece(p(3, 1), piece(PieceType::Regular, Player::One));
        assert_eq!(
            can_move(p(3, 1), p(4, 1), PieceType::Regular, &board, &rules),
            Err(MoveFault::Disconnected)
        );
    }

    #[test]
    fn test_move_geometry_rejected() {
        let rules = Rules::default();
        let board = start().with_piece(p(3, 1), piece(PieceType::Regular, Player::One));
        assert_eq!(
            can_move(p(3, 1), p(3, 2), PieceType::Shooter, &board, &rules),
            Err(MoveFault::Geometry(PieceType::Shooter))
        );
        assert_eq!(can_move(p(3, 1), p(3, 2), PieceType::Regular, &board, &rules), Ok(()));
    }

    #[test]
    fn test_move_footprint_checked_before_geometry() {
        let rules = Rules::default();
        // Row 2 spans columns 0..=3; a bird landing on column 4 makes five
        let board = Board::from_cells([
            (p(1, 1), piece(PieceType::Regular, Player::One)),
            (p(2, 0), piece(PieceType::Regular, Player::Two)),
            (p(2, 1), piece(PieceType::Boss, Player::One)),
            (p(2, 2), piece(PieceType::Regular, Player::One)),
            (p(2, 3), piece(PieceType::Regular, Player::Two)),
        ]);
        assert_eq!(
            can_move(p(1, 1), p(1, 4), PieceType::Regular, &board, &rules),
            Err(MoveFault::FootprintExceeded { max_rows: 4, max_cols: 4 })
        );
    }

    #[test]
    fn test_move_splitting_hive() {
        let rules = Rules::default();
        // Diagonal chain (0,0)-(1,1)-(2,2); the middle stepping down to
        // (2,1) still touches (2,2) but strands (0,0)
        let board = Board::from_cells([
            (p(0, 0), piece(PieceType::Regular, Player::One)),
            (p(1, 1), piece(PieceType::Regular, Player::One)),
            (p(2, 2), piece(PieceType::Regular, Player::Two)),
        ]);
        assert_eq!(
            can_move(p(1, 1), p(2, 1), PieceType::Regular, &board, &rules),
            Err(MoveFault::Disconnected)
        );
    }

    #[test]
    fn test_move_keeping_hive_whole() {
        let rules = Rules::default();
        // (1,0) touches both (0,0) and (2,1), so the chain survives
        let board = Board::from_cells([
            (p(0, 0), piece(PieceType::Regular, Player::One)),
            (p(1, 1), piece(PieceType::Regular, Player::One)),
            (p(2, 1), piece(PieceType::Regular, Player::Two)),
        ]);
        assert_eq!(can_move(p(1, 1), p(1, 0), PieceType::Regular, &board, &rules), Ok(()));
    }

    // ========== Removal ==========

    #[test]
    fn test_remove_boss_always_illegal() {
        assert_eq!(
            can_remove(p(2, 1), &start(), Player::One),
            Err(Rejected::IllegalBossRemoval { pos: p(2, 1) })
        );
        assert_eq!(
            can_remove(p(1, 1), &start(), Player::One),
            Err(Rejected::IllegalBossRemoval { pos: p(1, 1) })
        );
    }

    #[test]
    fn test_remove_leaf() {
        let board = start().with_piece(p(3, 1), piece(PieceType::Regular, Player::One));
        assert_eq!(can_remove(p(3, 1), &board, Player::One), Ok(()));
        assert_eq!(
            can_remove(p(3, 1), &board, Player::Two),
            Err(Rejected::InvalidRemoval {
                pos: p(3, 1),
                reason: RemovalFault::WrongOwner(Player::One)
            })
        );
    }

    #[test]
    fn test_remove_bridge() {
        let board = start()
            .with_piece(p(3, 1), piece(PieceType::Regular, Player::One))
            .with_piece(p(4, 1), piece(PieceType::Shooter, Player::One));
        assert_eq!(
            can_remove(p(3, 1), &board, Player::One),
            Err(Rejected::InvalidRemoval {
                pos: p(3, 1),
                reason: RemovalFault::Disconnected
            })
        );
    }

    #[test]
    fn test_remove_empty() {
        assert_eq!(
            can_remove(p(9, 9), &start(), Player::One),
            Err(Rejected::InvalidRemoval {
                pos: p(9, 9),
                reason: RemovalFault::EmptySquare
            })
        );
    }
}
