//! The game-description codec: a comma-separated, row-major list of
//! `<value><flag>*` cell descriptors.

use core::fmt::Write as _;

use crate::board::{Board, ClueFlags, Direction};
use crate::domain::{all_bits, value_count};
use crate::error::CoreError;
use crate::params::Params;

#[derive(Debug, thiserror::Error)]
pub enum DescError {
    #[error("Out-of-range number in game description")]
    OutOfRangeNumber,

    #[error("Expecting number in game description")]
    ExpectingNumber,

    #[error("Expecting flag URDL in game description")]
    ExpectingFlag,

    #[error("Missing separator")]
    MissingSeparator,

    #[error("Too much data to fill grid")]
    TooMuchData,

    #[error("Not enough data to fill grid")]
    NotEnoughData,

    #[error("Flags go off grid")]
    FlagsOffGrid,

    #[error("Flags contradicting each other")]
    FlagsContradicting,

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Parse a game description into a [`Board`] of the given `params`.
pub fn parse(params: Params, desc: &str) -> Result<Board, DescError> {
    params.validate()?;
    let area = params.area();
    let full = all_bits(params.n);
    let limit = value_count(params.n) as u64;

    let mut chars = desc.chars().peekable();
    let mut clues = Vec::with_capacity(area);
    let mut immutable = Vec::with_capacity(area);
    let mut known = Vec::with_capacity(area);
    let mut mask = Vec::with_capacity(area);

    for cell_idx in 0..area {
        let (cell_immutable, cell_known) = match chars.peek() {
            Some('_') => {
                chars.next();
                (0, 0)
            }
            Some(c) if c.is_ascii_digit() => {
                let mut n: u64 = 0;
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    n = n * 10 + (d as u64 - '0' as u64);
                    chars.next();
                }
                if n >= limit {
                    return Err(DescError::OutOfRangeNumber);
                }
                (full, n as u32)
            }
            _ => return Err(DescError::ExpectingNumber),
        };

        let mut cell_clues = ClueFlags::NONE;
        loop {
            match chars.peek() {
                Some('U') => {
                    cell_clues.set(Direction::Up);
                    chars.next();
                }
                Some('R') => {
                    cell_clues.set(Direction::Right);
                    chars.next();
                }
                Some('D') => {
                    cell_clues.set(Direction::Down);
                    chars.next();
                }
                Some('L') => {
                    cell_clues.set(Direction::Left);
                    chars.next();
                }
                Some(',') | None => break,
                // A digit or `_` here means the next cell's value ran
                // straight into this one with no comma between them; that's
                // a missing separator, not an invalid flag character.
                Some(c) if c.is_ascii_digit() || *c == '_' => break,
                Some(_) => return Err(DescError::ExpectingFlag),
            }
        }

        clues.push(cell_clues);
        immutable.push(cell_immutable);
        known.push(cell_known);
        mask.push(if cell_immutable == full {
            cell_known
        } else {
            full
        });

        let is_last = cell_idx + 1 == area;
        match chars.peek() {
            Some(',') => {
                if is_last {
                    return Err(DescError::TooMuchData);
                }
                chars.next();
            }
            None => {
                if !is_last {
                    return Err(DescError::NotEnoughData);
                }
            }
            Some(_) => return Err(DescError::MissingSeparator),
        }
    }

    if chars.peek().is_some() {
        return Err(DescError::TooMuchData);
    }

    let board = Board {
        params,
        clues,
        immutable,
        known,
        mask,
    };
    board.validate_clues().map_err(|e| match e {
        CoreError::ArrowOffGrid { .. } => DescError::FlagsOffGrid,
        CoreError::ContradictingArrows { .. } => DescError::FlagsContradicting,
        other => DescError::Core(other),
    })?;
    Ok(board)
}

/// Encode `board` back into its game description. Every cell's
/// `immutable` mask is expected to be either `0` (blank) or the full
/// alphabet mask (a given value); anything else is encoded as blank.
pub fn encode(board: &Board) -> String {
    let full = all_bits(board.params.n);
    let mut out = String::new();
    for i in 0..board.len() {
        if i > 0 {
            out.push(',');
        }
        if board.immutable[i] == full {
            write!(out, "{}", board.known[i]).expect("String write is infallible");
        } else {
            out.push('_');
        }
        for dir in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            if board.clues[i].has(dir) {
                out.push(match dir {
                    Direction::Up => 'U',
                    Direction::Right => 'R',
                    Direction::Down => 'D',
                    Direction::Left => 'L',
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_desc(p: Params) -> String {
        vec!["_"; p.area()].join(",")
    }

    #[test]
    fn parses_all_blank() {
        let p = Params::standard();
        let b = parse(p, &blank_desc(p)).unwrap();
        assert!(b.immutable.iter().all(|&m| m == 0));
    }

    #[test]
    fn out_of_range_number_is_rejected() {
        let p = Params::standard();
        let mut cells = vec!["_".to_string(); p.area()];
        cells[0] = "16".to_string();
        let desc = cells.join(",");
        assert!(matches!(parse(p, &desc), Err(DescError::OutOfRangeNumber)));
    }

    #[test]
    fn flags_off_grid_is_rejected() {
        let p = Params::standard();
        let mut cells = vec!["_".to_string(); p.area()];
        cells[0] = "0U".to_string();
        let desc = cells.join(",");
        assert!(matches!(parse(p, &desc), Err(DescError::FlagsOffGrid)));
    }

    #[test]
    fn flags_contradicting_is_rejected() {
        let p = Params::standard();
        let mut cells = vec!["_".to_string(); p.area()];
        cells[0] = "0R".to_string();
        cells[1] = "0L".to_string();
        let desc = cells.join(",");
        assert!(matches!(
            parse(p, &desc),
            Err(DescError::FlagsContradicting)
        ));
    }

    #[test]
    fn missing_separator_is_rejected() {
        let p = Params::standard();
        let mut cells = vec!["_".to_string(); p.area()];
        cells[0] = "3U5".to_string(); // next cell's "5" runs on with no comma
        let desc = cells.join(",");
        assert!(matches!(parse(p, &desc), Err(DescError::MissingSeparator)));
    }

    #[test]
    fn round_trip_identity_board() {
        let p = Params::standard();
        let mut cells = Vec::with_capacity(p.area());
        for v in 0..p.area() {
            cells.push(v.to_string());
        }
        let desc = cells.join(",");
        let board = parse(p, &desc).unwrap();
        let back = encode(&board);
        let reparsed = parse(p, &back).unwrap();
        assert_eq!(board, reparsed);
    }

    #[test]
    fn not_enough_data_is_rejected() {
        let p = Params::standard();
        let cells = vec!["_".to_string(); p.area() - 1];
        let desc = cells.join(",");
        assert!(matches!(parse(p, &desc), Err(DescError::NotEnoughData)));
    }

    #[test]
    fn too_much_data_is_rejected() {
        let p = Params::standard();
        let cells = vec!["_".to_string(); p.area() + 1];
        let desc = cells.join(",");
        assert!(matches!(parse(p, &desc), Err(DescError::TooMuchData)));
    }
}
