//! The board model: a grid of cells, each carrying a `(known, mask)` bound
//! on its value plus static adjacency clues and an immutability mask.

use crate::domain::{Value, all_bits};
use crate::error::CoreError;
use crate::params::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u16);

impl core::fmt::Display for CellId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: u16,
    pub col: u16,
}

/// A direction from a cell toward one of its orthogonal neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Right => 0b0010,
            Direction::Down => 0b0100,
            Direction::Left => 0b1000,
        }
    }
}

/// The set of arrow directions drawn out of one cell, as a 4-bit flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClueFlags(u8);

impl ClueFlags {
    pub const NONE: ClueFlags = ClueFlags(0);

    pub fn has(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn set(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn clear(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.has(d))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Map a row-major `coord` to its [`CellId`] within a `params`-sized grid.
pub fn cell_id(params: Params, coord: Coord) -> Result<CellId, CoreError> {
    if coord.row >= params.h || coord.col >= params.w {
        return Err(CoreError::CellOutOfRange {
            w: params.w,
            h: params.h,
            cell: CellId(coord.row * params.w + coord.col),
        });
    }
    Ok(CellId(coord.row * params.w + coord.col))
}

/// Map a [`CellId`] back to its row-major coordinate.
pub fn coord(params: Params, cell: CellId) -> Result<Coord, CoreError> {
    let idx = cell_index(params, cell)?;
    let w = params.w as usize;
    Ok(Coord {
        row: (idx / w) as u16,
        col: (idx % w) as u16,
    })
}

fn cell_index(params: Params, cell: CellId) -> Result<usize, CoreError> {
    let idx = cell.0 as usize;
    if idx >= params.area() {
        return Err(CoreError::CellOutOfRange {
            w: params.w,
            h: params.h,
            cell,
        });
    }
    Ok(idx)
}

/// The neighbour of `cell` in direction `dir`, or `None` if that would fall
/// off the grid.
pub fn neighbor(params: Params, cell: CellId, dir: Direction) -> Option<CellId> {
    let c = coord(params, cell).ok()?;
    let (dr, dc) = dir.delta();
    let nr = c.row as i32 + dr;
    let nc = c.col as i32 + dc;
    if nr < 0 || nc < 0 || nr >= params.h as i32 || nc >= params.w as i32 {
        return None;
    }
    cell_id(
        params,
        Coord {
            row: nr as u16,
            col: nc as u16,
        },
    )
    .ok()
}

/// A grid of cells plus their static adjacency clues and per-cell value
/// bounds. `clues` and `immutable` never change once loaded; `known` and
/// `mask` mutate as the solver (or a player) narrows each cell down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub params: Params,
    pub clues: Vec<ClueFlags>,
    pub immutable: Vec<Value>,
    pub known: Vec<Value>,
    pub mask: Vec<Value>,
}

impl Board {
    /// A blank board of the given size: no clues, nothing immutable, every
    /// cell's bound is the full `[0, ALL_BITS(n)]` interval.
    pub fn blank(params: Params) -> Result<Board, CoreError> {
        params.validate()?;
        let a = params.area();
        Ok(Board {
            params,
            clues: vec![ClueFlags::NONE; a],
            immutable: vec![0; a],
            known: vec![0; a],
            mask: vec![all_bits(params.n); a],
        })
    }

    pub fn len(&self) -> usize {
        self.params.area()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` iff the bound at `i` has collapsed to a single value.
    pub fn is_resolved(&self, i: usize) -> bool {
        self.known[i] == self.mask[i]
    }

    /// The cell's value, if its bound has collapsed.
    pub fn value_if_resolved(&self, i: usize) -> Option<Value> {
        self.is_resolved(i).then_some(self.known[i])
    }

    /// A deep copy, for callers (the solver, the generator's un-fix loop)
    /// that need to scribble on bounds without disturbing the original.
    pub fn dup(&self) -> Board {
        self.clone()
    }

    /// Reset every non-immutable cell's bound to `[0, ALL_BITS(n)]`. Used by
    /// the solver on entry so repeated solves over the same board start from
    /// a clean slate.
    pub fn reset_non_immutable(&mut self) {
        let full = all_bits(self.params.n);
        for i in 0..self.len() {
            if self.immutable[i] != full {
                self.known[i] = 0;
                self.mask[i] = full;
            }
        }
    }

    /// Structural consistency of the static clues (INV-4 and "arrows stay on
    /// the grid"), independent of any cell's current value bound.
    pub fn validate_clues(&self) -> Result<(), CoreError> {
        for i in 0..self.len() {
            let cell = CellId(i as u16);
            for dir in self.clues[i].iter() {
                let Some(n) = neighbor(self.params, cell, dir) else {
                    return Err(CoreError::ArrowOffGrid { cell, dir });
                };
                if self.clues[n.0 as usize].has(dir.opposite()) {
                    return Err(CoreError::ContradictingArrows { a: cell, b: n });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_coord_roundtrip() {
        let p = Params::standard();
        for row in 0..p.h {
            for col in 0..p.w {
                let c = Coord { row, col };
                let id = cell_id(p, c).unwrap();
                assert_eq!(coord(p, id).unwrap(), c);
            }
        }
    }

    #[test]
    fn neighbor_off_grid_is_none() {
        let p = Params::standard();
        let top_left = CellId(0);
        assert!(neighbor(p, top_left, Direction::Up).is_none());
        assert!(neighbor(p, top_left, Direction::Left).is_none());
        assert!(neighbor(p, top_left, Direction::Right).is_some());
        assert!(neighbor(p, top_left, Direction::Down).is_some());
    }

    #[test]
    fn blank_board_has_full_bounds() {
        let p = Params::standard();
        let b = Board::blank(p).unwrap();
        assert_eq!(b.len(), 16);
        for i in 0..b.len() {
            assert_eq!(b.known[i], 0);
            assert_eq!(b.mask[i], 0b1111);
            assert!(!b.is_resolved(i) || b.known[i] == b.mask[i]);
        }
    }

    #[test]
    fn validate_clues_rejects_off_grid_arrow() {
        let p = Params::standard();
        let mut b = Board::blank(p).unwrap();
        b.clues[0].set(Direction::Up);
        assert!(matches!(
            b.validate_clues(),
            Err(CoreError::ArrowOffGrid { .. })
        ));
    }

    #[test]
    fn validate_clues_rejects_mutual_arrows() {
        let p = Params::standard();
        let mut b = Board::blank(p).unwrap();
        b.clues[0].set(Direction::Right);
        b.clues[1].set(Direction::Left);
        assert!(matches!(
            b.validate_clues(),
            Err(CoreError::ContradictingArrows { .. })
        ));
    }
}
