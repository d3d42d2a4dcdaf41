//! The puzzle generator: build a full solved board, synthesise
//! every containment arrow the layout actually has, then try to un-fix each
//! cell in random order, keeping the cell blank only if the propagation
//! solver can still complete the board without it.
//!
//! Uniqueness follows for free: the solver is purely deductive (no search),
//! so if it completes a board from a set of givens, those givens forced
//! that completion ("uniqueness for free").

use rand::Rng;
use rand::seq::SliceRandom;

use subsets_core::board::{Board, CellId, Direction, neighbor};
use subsets_core::domain::{Value, all_bits, is_subset, value_count};
use subsets_core::format::desc::encode;
use subsets_core::params::Params;
use subsets_solver::{SolveStatus, solve};

use crate::GenError;
use crate::seed::rng_from_u64;

#[cfg(feature = "telemetry-tracing")]
use tracing::trace;

#[cfg(not(feature = "telemetry-tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

/// A generated puzzle instance: the minimal givens shipped to the player,
/// its textual description, and the full solution it was minimised from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The puzzle as a player would receive it: clues and a minimal set of
    /// immutable givens, every other cell's bound reset to blank.
    pub puzzle: Board,
    /// The puzzle description for `puzzle`.
    pub desc: String,
    /// The full board the puzzle was minimised from — every cell
    /// immutable and known, the unique target the solver will recover.
    pub solution: Board,
}

/// Generate a puzzle of the given `params`, deterministically from `seed`.
pub fn generate(params: Params, seed: u64) -> Result<GeneratedPuzzle, GenError> {
    params.validate()?;
    let mut rng = rng_from_u64(seed);

    let solution = full_solution(params, &mut rng)?;
    let mut puzzle = solution.clone();

    let mut order: Vec<usize> = (0..puzzle.len()).collect();
    order.shuffle(&mut rng);

    for i in order {
        let saved = puzzle.immutable[i];
        puzzle.immutable[i] = 0;
        let (_, status) = solve(&puzzle)?;
        if status != SolveStatus::Complete {
            puzzle.immutable[i] = saved;
        }
        trace!(cell = i, kept_blank = puzzle.immutable[i] == 0, "gen.unfix");
    }

    puzzle.reset_non_immutable();
    let desc = encode(&puzzle);

    Ok(GeneratedPuzzle {
        puzzle,
        desc,
        solution,
    })
}

/// Build a full solution: place every value `0..2^n` in a random permutation
/// across the cells, mark every cell fully immutable, then synthesise the
/// containment arrows that actually hold between neighbours.
fn full_solution(params: Params, rng: &mut impl Rng) -> Result<Board, GenError> {
    let mut board = Board::blank(params)?;
    let full = all_bits(params.n);

    let mut perm: Vec<Value> = (0..value_count(params.n) as Value).collect();
    perm.shuffle(rng);

    for i in 0..board.len() {
        board.known[i] = perm[i];
        board.mask[i] = perm[i];
        board.immutable[i] = full;
    }

    for i in 0..board.len() {
        let cell = CellId(i as u16);
        let vi = board.known[i];
        for dir in Direction::ALL {
            let Some(j) = neighbor(params, cell, dir) else {
                continue;
            };
            let vj = board.known[j.0 as usize];
            if is_subset(vj, vi) && vj != vi {
                board.clues[i].set(dir);
            }
        }
    }

    // INV-4 holds automatically: containment between distinct values is
    // antisymmetric, so no two cells can ever claim arrows at each other.
    board.validate_clues()?;
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use subsets_core::validator::{SolveStatus as CoreStatus, validate};

    #[test]
    fn full_solution_is_a_permutation_with_consistent_arrows() {
        let p = Params::standard();
        let mut rng = rng_from_u64(7);
        let board = full_solution(p, &mut rng).unwrap();

        let mut seen = vec![false; value_count(p.n)];
        for i in 0..board.len() {
            let v = board.known[i] as usize;
            assert!(!seen[v], "value {v} placed twice");
            seen[v] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(validate(&board, None, None), CoreStatus::Complete);
    }

    #[test]
    fn generate_produces_a_solvable_minimal_puzzle() {
        let p = Params::standard();
        let g = generate(p, 12345).unwrap();

        let (solved, status) = solve(&g.puzzle).unwrap();
        assert_eq!(status, SolveStatus::Complete);
        for i in 0..solved.len() {
            assert_eq!(solved.known[i], g.solution.known[i]);
        }
    }

    #[test]
    fn generate_has_at_least_one_blank_cell() {
        // A 16-cell board can't need every cell given: un-fixing the last
        // cell always leaves the solver able to place it by elimination
        // (it's the only value left with nowhere else to go).
        let p = Params::standard();
        let g = generate(p, 99).unwrap();
        assert!(g.puzzle.immutable.iter().any(|&m| m == 0));
    }

    #[test]
    fn generate_is_deterministic_for_a_fixed_seed() {
        let p = Params::standard();
        let a = generate(p, 42).unwrap();
        let b = generate(p, 42).unwrap();
        assert_eq!(a.desc, b.desc);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn desc_round_trips_through_the_codec() {
        let p = Params::standard();
        let g = generate(p, 555).unwrap();
        let reparsed = subsets_core::format::desc::parse(p, &g.desc).unwrap();
        assert_eq!(reparsed, g.puzzle);
    }
}
