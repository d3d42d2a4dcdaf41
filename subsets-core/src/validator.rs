//! The validator: a pure function over a [`Board`] that scores it as
//! complete, unfinished, or invalid, optionally reporting which edges are
//! offending and how many resolved cells hold each value.

use crate::board::{Board, CellId, ClueFlags, Direction, neighbor};
use crate::domain::{Value, value_count};

/// The outcome of scoring a board: the worst status observed wins
/// (`Invalid` > `Unfinished` > `Complete`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Complete,
    Unfinished,
    Invalid,
}

impl SolveStatus {
    fn worse(self, other: SolveStatus) -> SolveStatus {
        use SolveStatus::*;
        match (self, other) {
            (Invalid, _) | (_, Invalid) => Invalid,
            (Unfinished, _) | (_, Unfinished) => Unfinished,
            _ => Complete,
        }
    }
}

/// Score `board`. If `edge_flags` is provided (one [`ClueFlags`] slot per
/// cell, same length as the board), every offending edge is flagged on the
/// cell at its "lower" end, mirroring [`Board::clues`]'s own bit layout so a
/// renderer can overlay both on the same grid. If `counts` is provided
/// (length `2^n`), `counts[v]` ends up the number of resolved cells holding
/// value `v`.
pub fn validate(
    board: &Board,
    mut edge_flags: Option<&mut [ClueFlags]>,
    mut counts: Option<&mut [u32]>,
) -> SolveStatus {
    let n = board.len();
    let mut scratch_counts;
    let counts_buf: &mut [u32] = match counts.as_deref_mut() {
        Some(c) => c,
        None => {
            scratch_counts = vec![0u32; value_count(board.params.n)];
            &mut scratch_counts
        }
    };
    debug_assert_eq!(counts_buf.len(), value_count(board.params.n));

    let mut status = SolveStatus::Complete;
    let want_detail = edge_flags.is_some() || counts.is_some();

    let any_unresolved = (0..n).any(|i| !board.is_resolved(i));
    if any_unresolved {
        status = status.worse(SolveStatus::Unfinished);
        if !want_detail {
            return status;
        }
    }

    for i in 0..n {
        if let Some(v) = board.value_if_resolved(i) {
            counts_buf[v as usize] += 1;
        }
    }
    for &c in counts_buf.iter() {
        if c > 1 {
            status = status.worse(SolveStatus::Invalid);
            if !want_detail {
                return status;
            }
        }
    }

    // Only walk Right/Down from each cell: in a row-major grid those are
    // exactly the neighbours with a larger cell id, so every adjacent pair
    // is visited from its canonically-earlier cell exactly once.
    for i in 0..n {
        let Some(vi) = board.value_if_resolved(i) else {
            continue;
        };
        let cell_i = CellId(i as u16);
        for dir in [Direction::Right, Direction::Down] {
            let Some(j) = neighbor(board.params, cell_i, dir) else {
                continue;
            };
            let jidx = j.0 as usize;
            let Some(vj) = board.value_if_resolved(jidx) else {
                continue;
            };

            let violated = check_edge(board, cell_i, j, dir, vi, vj, &mut edge_flags);
            if violated {
                status = status.worse(SolveStatus::Invalid);
                if !want_detail {
                    return status;
                }
            }
        }
    }

    status
}

/// Check one adjacency edge `i --dir--> j` (both resolved). Returns `true`
/// if it violates INV-2/INV-3, flagging the offending side when a buffer is
/// supplied.
fn check_edge(
    board: &Board,
    i: CellId,
    j: CellId,
    dir: Direction,
    vi: Value,
    vj: Value,
    edge_flags: &mut Option<&mut [ClueFlags]>,
) -> bool {
    let x = vi & vj;
    if board.clues[i.0 as usize].has(dir) {
        // Arrow i -> j: set(j) subseteq set(i).
        if x != vj {
            flag(edge_flags, i, dir);
            return true;
        }
        false
    } else if board.clues[j.0 as usize].has(dir.opposite()) {
        // Arrow j -> i: set(i) subseteq set(j).
        if x != vi {
            flag(edge_flags, j, dir.opposite());
            return true;
        }
        false
    } else {
        // No arrow either way: the two sets must be incomparable.
        if x == vi || x == vj {
            flag(edge_flags, i, dir);
            return true;
        }
        false
    }
}

fn flag(edge_flags: &mut Option<&mut [ClueFlags]>, cell: CellId, dir: Direction) {
    if let Some(buf) = edge_flags.as_deref_mut() {
        buf[cell.0 as usize].set(dir);
    }
}
