//! The move engine: four thin cell operations plus whole-board
//! replacement, each re-validating the board and latching `completed` on
//! the non-complete -> complete transition.

use core::fmt;

use crate::board::{Board, CellId};
use crate::domain::Value;
use crate::params::Params;
use crate::validator::{SolveStatus, validate};

/// One user- or solver-originated mutation, per the wire encoding below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// `K<pos>,<bit>` — set bit `bit` of cell `pos` to known-present.
    SetKnown { cell: CellId, bit: u8 },
    /// `C<pos>,<bit>` — contradict bit `bit` of cell `pos` (rule it out).
    Contradict { cell: CellId, bit: u8 },
    /// `U<pos>,<bit>` — reset bit `bit` of cell `pos` to unknown.
    ResetUnknown { cell: CellId, bit: u8 },
    /// `S<known_0>,<mask_0>,..,<known_{a-1}>,<mask_{a-1}>` — replace every
    /// cell's bound wholesale, as when the solver hands its result back to
    /// the board.
    Solve { bounds: Vec<(Value, Value)> },
}

#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("malformed move string")]
    Malformed,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::SetKnown { cell, bit } => write!(f, "K{},{}", cell.0, bit),
            Move::Contradict { cell, bit } => write!(f, "C{},{}", cell.0, bit),
            Move::ResetUnknown { cell, bit } => write!(f, "U{},{}", cell.0, bit),
            Move::Solve { bounds } => {
                f.write_str("S")?;
                for (i, (known, mask)) in bounds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{},{}", known, mask)?;
                }
                Ok(())
            }
        }
    }
}

impl Move {
    /// Parse a move string against a board of the given `params`, needed
    /// only to know how many `<known>,<mask>` pairs a solve move carries.
    pub fn parse(s: &str, params: Params) -> Result<Move, MoveError> {
        let bad = || MoveError::Malformed;
        let mut chars = s.chars();
        let op = chars.next().ok_or_else(bad)?;
        let rest = chars.as_str();

        if op == 'S' {
            let mut bounds = Vec::with_capacity(params.area());
            let mut parts = rest.split(',');
            for _ in 0..params.area() {
                let known: Value = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
                let mask: Value = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
                bounds.push((known, mask));
            }
            if parts.next().is_some() {
                return Err(bad());
            }
            return Ok(Move::Solve { bounds });
        }

        let (pos_str, bit_str) = rest.split_once(',').ok_or_else(bad)?;
        let pos: u16 = pos_str.parse().map_err(|_| bad())?;
        let bit: u8 = bit_str.parse().map_err(|_| bad())?;
        let cell = CellId(pos);
        match op {
            'K' => Ok(Move::SetKnown { cell, bit }),
            'C' => Ok(Move::Contradict { cell, bit }),
            'U' => Ok(Move::ResetUnknown { cell, bit }),
            _ => Err(bad()),
        }
    }
}

/// Result of applying one move. Out-of-range cells/bits and attempts to
/// touch an immutable bit are rejected silently (`NoEffect`), matching the
/// "invalid positional move is a no-op" / "null move" handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    NoEffect,
    Applied {
        status: SolveStatus,
        newly_completed: bool,
    },
}

/// A board plus the latch tracking whether it has ever reached
/// `SolveStatus::Complete`.
#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    pub completed: bool,
}

impl Game {
    pub fn new(board: Board) -> Game {
        let completed = validate(&board, None, None) == SolveStatus::Complete;
        Game { board, completed }
    }

    /// Apply `mv`, re-validate, and latch `completed` on first reaching
    /// `SolveStatus::Complete`.
    pub fn apply(&mut self, mv: &Move) -> MoveOutcome {
        let applied = match *mv {
            Move::SetKnown { cell, bit } => self.set_bit(cell, bit, true),
            Move::Contradict { cell, bit } => self.clear_bit(cell, bit),
            Move::ResetUnknown { cell, bit } => self.reset_bit(cell, bit),
            Move::Solve { ref bounds } => self.apply_solve(bounds),
        };
        if !applied {
            return MoveOutcome::NoEffect;
        }
        let status = validate(&self.board, None, None);
        let newly_completed = status == SolveStatus::Complete && !self.completed;
        if newly_completed {
            self.completed = true;
        }
        MoveOutcome::Applied {
            status,
            newly_completed,
        }
    }

    fn in_range(&self, cell: CellId, bit: u8) -> bool {
        (cell.0 as usize) < self.board.len() && bit < self.board.params.n
    }

    fn immutable(&self, cell: CellId, bit: u8) -> bool {
        self.board.immutable[cell.0 as usize] & (1 << bit) != 0
    }

    fn set_bit(&mut self, cell: CellId, bit: u8, present: bool) -> bool {
        if !self.in_range(cell, bit) || self.immutable(cell, bit) {
            return false;
        }
        let i = cell.0 as usize;
        if present {
            self.board.known[i] |= 1 << bit;
            self.board.mask[i] |= 1 << bit;
        }
        true
    }

    fn clear_bit(&mut self, cell: CellId, bit: u8) -> bool {
        if !self.in_range(cell, bit) || self.immutable(cell, bit) {
            return false;
        }
        let i = cell.0 as usize;
        self.board.mask[i] &= !(1 << bit);
        self.board.known[i] &= !(1 << bit);
        true
    }

    fn reset_bit(&mut self, cell: CellId, bit: u8) -> bool {
        if !self.in_range(cell, bit) || self.immutable(cell, bit) {
            return false;
        }
        let i = cell.0 as usize;
        self.board.known[i] &= !(1 << bit);
        self.board.mask[i] |= 1 << bit;
        true
    }

    fn apply_solve(&mut self, bounds: &[(Value, Value)]) -> bool {
        if bounds.len() != self.board.len() {
            return false;
        }
        for (i, &(known, mask)) in bounds.iter().enumerate() {
            let imm = self.board.immutable[i];
            if known & imm != self.board.known[i] & imm || mask & imm != self.board.mask[i] & imm
            {
                return false;
            }
        }
        for (i, &(known, mask)) in bounds.iter().enumerate() {
            self.board.known[i] = known;
            self.board.mask[i] = mask;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    fn blank_game() -> Game {
        Game::new(Board::blank(Params::standard()).unwrap())
    }

    #[test]
    fn set_known_sets_both_bounds() {
        let mut g = blank_game();
        let outcome = g.apply(&Move::SetKnown {
            cell: CellId(0),
            bit: 1,
        });
        assert!(matches!(outcome, MoveOutcome::Applied { .. }));
        assert_eq!(g.board.known[0] & 0b10, 0b10);
        assert_eq!(g.board.mask[0] & 0b10, 0b10);
    }

    #[test]
    fn immutable_bit_is_rejected() {
        let mut b = Board::blank(Params::standard()).unwrap();
        b.immutable[0] = 0b0001;
        b.known[0] = 0b0001;
        b.mask[0] = 0b0001;
        let mut g = Game::new(b);
        let outcome = g.apply(&Move::Contradict {
            cell: CellId(0),
            bit: 0,
        });
        assert_eq!(outcome, MoveOutcome::NoEffect);
        assert_eq!(g.board.known[0], 0b0001);
    }

    #[test]
    fn out_of_range_move_has_no_effect() {
        let mut g = blank_game();
        let outcome = g.apply(&Move::SetKnown {
            cell: CellId(999),
            bit: 0,
        });
        assert_eq!(outcome, MoveOutcome::NoEffect);
    }

    #[test]
    fn parse_round_trips_player_move() {
        let p = Params::standard();
        let mv = Move::SetKnown {
            cell: CellId(3),
            bit: 2,
        };
        let s = mv.to_string();
        assert_eq!(Move::parse(&s, p).unwrap(), mv);
    }

    #[test]
    fn completed_latches_once() {
        let p = Params::standard();
        let mut b = Board::blank(p).unwrap();
        for i in 0..b.len() {
            b.known[i] = i as Value;
            b.mask[i] = i as Value;
            b.immutable[i] = i as Value;
        }
        let mut g = Game::new(b);
        assert!(g.completed);
        let outcome = g.apply(&Move::SetKnown {
            cell: CellId(0),
            bit: 0,
        });
        match outcome {
            MoveOutcome::NoEffect => {}
            MoveOutcome::Applied {
                newly_completed, ..
            } => assert!(!newly_completed),
        }
    }
}
