//! Text notation for actions.
//!
//! ```text
//! R(3,1)         place   (R S H A B; K parses but the boss is never placeable)
//! (2,1)->(3,1)   move
//! x(3,1)         remove
//! ```
//!
//! Coordinates may be negative and may carry spaces: `( -1 , 2 )`.

use std::str::FromStr;

use crate::error::NotationError;
use crate::game::Action;
use crate::{PieceType, Pos};

impl FromStr for Action {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Action, NotationError> {
        let s = s.trim();
        let first = s.chars().next().ok_or(NotationError::Empty)?;

        // Move: (r,c)->(r,c)
        if let Some((from, to)) = s.split_once("->") {
            return Ok(Action::Move {
                from: parse_coords(from)?,
                to: parse_coords(to)?,
            });
        }

        // Remove: x(r,c)
        if let Some(rest) = s.strip_prefix(['x', 'X']) {
            return Ok(Action::Remove { at: parse_coords(rest)? });
        }

        // Place: R(r,c)
        if first.is_ascii_alphabetic() {
            let kind = PieceType::from_symbol(first).ok_or(NotationError::UnknownSymbol(first))?;
            return Ok(Action::Place {
                kind,
                to: parse_coords(&s[first.len_utf8()..])?,
            });
        }

        Err(NotationError::Unrecognized(s.to_string()))
    }
}

/// Parse "(r,c)" into a position.
pub fn parse_coords(s: &str) -> Result<Pos, NotationError> {
    let bad = || NotationError::BadCoordinates(s.trim().to_string());
    let inner = s
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(bad)?;
    let (row, col) = inner.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let col = col.trim().parse().map_err(|_| bad())?;
    Ok(Pos::new(row, col))
}

/// Parse a whitespace-separated sequence of actions, e.g.
/// `"R(3,1) R(0,1) (2,1)->(2,2)"`. Actions themselves must not contain
/// spaces here.
pub fn parse_actions(s: &str) -> Result<Vec<Action>, NotationError> {
    s.split_whitespace().map(str::parse::<Action>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place() {
        assert_eq!(
            "R(3,1)".parse(),
            Ok(Action::Place { kind: PieceType::Regular, to: Pos::new(3, 1) })
        );
        assert_eq!(
            "h(-1,0)".parse(),
            Ok(Action::Place { kind: PieceType::HitMan, to: Pos::new(-1, 0) })
        );
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            "(2,1)->(2,2)".parse(),
            Ok(Action::Move { from: Pos::new(2, 1), to: Pos::new(2, 2) })
        );
        assert_eq!(
            " ( 0 , -3 ) -> (0,2) ".parse(),
            Ok(Action::Move { from: Pos::new(0, -3), to: Pos::new(0, 2) })
        );
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!("x(3,1)".parse(), Ok(Action::Remove { at: Pos::new(3, 1) }));
        assert_eq!("X(0,0)".parse(), Ok(Action::Remove { at: Pos::new(0, 0) }));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Action>(), Err(NotationError::Empty));
        assert_eq!("Q(1,1)".parse::<Action>(), Err(NotationError::UnknownSymbol('Q')));
        assert_eq!(
            "R(1;1)".parse::<Action>(),
            Err(NotationError::BadCoordinates("(1;1)".to_string()))
        );
        assert_eq!(
            "(1,1)->".parse::<Action>(),
            Err(NotationError::BadCoordinates(String::new()))
        );
        assert_eq!("42".parse::<Action>(), Err(NotationError::Unrecognized("42".to_string())));
    }

    #[test]
    fn test_display_parses_back() {
        let actions = [
            Action::Place { kind: PieceType::Bomber, to: Pos::new(-2, 7) },
            Action::Move { from: Pos::new(1, 1), to: Pos::new(1, -4) },
            Action::Remove { at: Pos::new(0, 3) },
        ];
        for action in actions {
            assert_eq!(action.to_string().parse(), Ok(action));
        }
    }

    #[test]
    fn test_parse_sequence() {
        let actions = parse_actions("R(3,1)  R(0,1)\n(2,1)->(2,2) x(3,1)").unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[3], Action::Remove { at: Pos::new(3, 1) });
        assert!(parse_actions("R(3,1) nope").is_err());
    }
}
