//! The constraint-propagation solver: an iterative fixed-point
//! engine over a [`Board`]'s `known`/`mask` bounds plus a working "cube" of
//! per-cell feasible values, applying rules S0-S6 in priority order until
//! either the validator reaches a terminal status or a full pass fires no
//! rule.
//!
//! There is no search and no backtracking here: every elimination a rule
//! makes is licensed by one of INV-1, INV-2, or INV-3 under the current
//! bounds, so the solver can only ever narrow, never guess. An instance the
//! rule set cannot close is left `Unfinished`, not reported as an error.

use bitvec::prelude::*;
use subsets_core::board::{Board, CellId, Direction, neighbor};
use subsets_core::domain::{Value, all_bits, is_subset, value_count};
use subsets_core::validator::{SolveStatus, validate};

use crate::error::SolveError;

#[cfg(feature = "telemetry-tracing")]
use tracing::trace;

#[cfg(not(feature = "telemetry-tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

/// The working domain the bounds alone cannot encode: `feasible(cell, v)`
/// iff value `v` has not yet been ruled out at `cell`. Dense storage is
/// adequate at the shipped size (`area * 2^n` bits); a design note on the
/// larger `n` would want a sparser encoding, but that's an internal
/// implementation choice the rules below don't depend on.
struct Cube {
    values: usize,
    bits: BitBox<u64, Lsb0>,
}

impl Cube {
    fn all_true(area: usize, values: usize) -> Self {
        Cube {
            values,
            bits: bitvec![u64, Lsb0; 1; area * values].into_boxed_bitslice(),
        }
    }

    fn is_feasible(&self, cell: usize, v: usize) -> bool {
        self.bits[cell * self.values + v]
    }

    /// Rule out `v` at `cell`. Returns `true` iff it was still feasible
    /// (cube entries only ever go true -> false within a solve call, P2).
    fn eliminate(&mut self, cell: usize, v: usize) -> bool {
        let idx = cell * self.values + v;
        if self.bits[idx] {
            self.bits.set(idx, false);
            true
        } else {
            false
        }
    }

    fn candidates(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let base = cell * self.values;
        (0..self.values).filter(move |&v| self.bits[base + v])
    }
}

/// Rule-fire counters returned alongside the solved board, for diagnostics
/// and the `-v` CLI trace. This crate never grades puzzle difficulty;
/// these counts are not used for that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub passes: u32,
    pub rule_fires: [u32; 7],
}

/// Run the propagation engine on a duplicate of `board` and report the
/// resulting status. `board` itself is never mutated; callers that want the
/// narrowed bounds get them back in the returned [`Board`] — solving only
/// ever scribbles on a scratch copy.
///
/// Fails only if `board.params` itself is malformed (see [`SolveError`]);
/// `Unfinished`/`Invalid` are in-band results, not errors.
pub fn solve(board: &Board) -> Result<(Board, SolveStatus), SolveError> {
    let (b, status, _) = solve_with_stats(board)?;
    Ok((b, status))
}

/// As [`solve`], also reporting how many times each rule fired.
pub fn solve_with_stats(board: &Board) -> Result<(Board, SolveStatus, SolveStats), SolveError> {
    board.params.validate()?;
    let mut scratch = board.dup();
    let stats = run_rules(&mut scratch);
    let status = validate(&scratch, None, None);
    Ok((scratch, status, stats))
}

type Rule = fn(&mut Board, &mut Cube) -> bool;

const RULES: [Rule; 7] = [
    s0_cube_sync,
    s1_uniqueness,
    s2_arrow_bounds,
    s3_incomparability,
    s4_bounds_from_cube,
    s5_unique_location,
    s6_arrow_cube,
];

const RULE_NAMES: [&str; 7] = ["S0", "S1", "S2", "S3", "S4", "S5", "S6"];

fn run_rules(board: &mut Board) -> SolveStats {
    board.reset_non_immutable();
    let n = board.params.n;
    let values = value_count(n);
    let mut cube = Cube::all_true(board.len(), values);
    let mut stats = SolveStats::default();

    loop {
        let status = validate(board, None, None);
        if status != SolveStatus::Unfinished {
            break;
        }
        stats.passes += 1;

        let mut fired = None;
        for (idx, rule) in RULES.iter().enumerate() {
            if rule(board, &mut cube) {
                fired = Some(idx);
                break;
            }
        }
        match fired {
            Some(idx) => {
                stats.rule_fires[idx] += 1;
                trace!(rule = RULE_NAMES[idx], "fired");
            }
            None => break,
        }
    }

    stats
}

/// Rule S0 — eliminate any cube candidate inconsistent with the cell's own
/// current `known`/`mask` bounds.
fn s0_cube_sync(board: &mut Board, cube: &mut Cube) -> bool {
    let mut changed = false;
    for i in 0..board.len() {
        let known = board.known[i];
        let mask = board.mask[i];
        for v in cube.candidates(i).collect::<Vec<_>>() {
            let value = v as Value;
            if (mask & value) != value || (known & value) != known {
                changed |= cube.eliminate(i, v);
            }
        }
    }
    changed
}

/// Rule S1 — a value already resolved somewhere (`counts[v] == 1`) cannot
/// also be feasible at any other unresolved cell (INV-1).
fn s1_uniqueness(board: &mut Board, cube: &mut Cube) -> bool {
    let values = cube.values;
    let mut counts = vec![0u32; values];
    validate(board, None, Some(&mut counts));

    let mut changed = false;
    for (v, &count) in counts.iter().enumerate() {
        if count != 1 {
            continue;
        }
        for i in 0..board.len() {
            if board.value_if_resolved(i) == Some(v as Value) {
                continue;
            }
            changed |= cube.eliminate(i, v);
        }
    }
    changed
}

/// Rule S2 — bound propagation across arrows: the supercell's `known` picks
/// up everything the subcell already has confirmed, and the subcell's
/// `mask` loses everything the supercell has already ruled out. Run to a
/// fixed point within this one rule invocation.
fn s2_arrow_bounds(board: &mut Board, _cube: &mut Cube) -> bool {
    let mut any = false;
    loop {
        let mut changed = false;
        for i in 0..board.len() {
            let cell = CellId(i as u16);
            for dir in board.clues[i].iter() {
                let Some(j) = neighbor(board.params, cell, dir) else {
                    continue;
                };
                let jidx = j.0 as usize;

                let new_known_i = board.known[i] | board.known[jidx];
                if new_known_i != board.known[i] {
                    board.known[i] = new_known_i;
                    changed = true;
                }
                let new_mask_j = board.mask[jidx] & board.mask[i];
                if new_mask_j != board.mask[jidx] {
                    board.mask[jidx] = new_mask_j;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
        any = true;
    }
    any
}

/// Rule S3 — incomparability propagation: a resolved endpoint of a
/// no-arrow edge rules out every comparable candidate at its neighbour, and
/// neither the empty set nor the full alphabet is ever placeable at an
/// unresolved endpoint of such an edge (both are comparable to everything).
fn s3_incomparability(board: &mut Board, cube: &mut Cube) -> bool {
    let n = board.params.n;
    let full = all_bits(n) as usize;
    let mut changed = false;

    for i in 0..board.len() {
        let cell = CellId(i as u16);
        for dir in Direction::ALL {
            let Some(j) = neighbor(board.params, cell, dir) else {
                continue;
            };
            let jidx = j.0 as usize;
            if board.clues[i].has(dir) || board.clues[jidx].has(dir.opposite()) {
                continue; // an arrow exists between i and j: not an incomparability edge.
            }

            if let Some(vi) = board.value_if_resolved(i) {
                for v in cube.candidates(jidx).collect::<Vec<_>>() {
                    let vj = v as Value;
                    if is_subset(vj, vi) || is_subset(vi, vj) {
                        changed |= cube.eliminate(jidx, v);
                    }
                }
            }

            if !board.is_resolved(jidx) {
                changed |= cube.eliminate(jidx, 0);
                changed |= cube.eliminate(jidx, full);
            }
        }
    }

    changed
}

/// Rule S4 — tighten bounds from the surviving cube candidates: `mask`
/// becomes (at most) their union, `known` becomes (at least) their
/// intersection. Bounds only ever tighten, never loosen (P1).
fn s4_bounds_from_cube(board: &mut Board, cube: &mut Cube) -> bool {
    let n = board.params.n;
    let mut changed = false;
    for i in 0..board.len() {
        let mut any = false;
        let mut or_mask: Value = 0;
        let mut and_known: Value = all_bits(n);
        for v in cube.candidates(i) {
            any = true;
            let value = v as Value;
            or_mask |= value;
            and_known &= value;
        }
        if !any {
            continue;
        }
        let new_mask = board.mask[i] & or_mask;
        if new_mask != board.mask[i] {
            board.mask[i] = new_mask;
            changed = true;
        }
        let new_known = board.known[i] | and_known;
        if new_known != board.known[i] {
            board.known[i] = new_known;
            changed = true;
        }
    }
    changed
}

/// Rule S5 — if a value has no resolved home (`counts[v] == 0`) and exactly
/// one unresolved cell still admits it, that cell must hold it.
fn s5_unique_location(board: &mut Board, cube: &mut Cube) -> bool {
    let values = cube.values;
    let mut counts = vec![0u32; values];
    validate(board, None, Some(&mut counts));

    let mut changed = false;
    for (v, &count) in counts.iter().enumerate() {
        if count != 0 {
            continue;
        }
        let mut found = None;
        let mut unique = true;
        for i in 0..board.len() {
            if board.is_resolved(i) || !cube.is_feasible(i, v) {
                continue;
            }
            if found.is_some() {
                unique = false;
                break;
            }
            found = Some(i);
        }
        if !unique {
            continue;
        }
        if let Some(i) = found {
            let value = v as Value;
            if board.known[i] != value || board.mask[i] != value {
                board.known[i] = value;
                board.mask[i] = value;
                changed = true;
            }
        }
    }
    changed
}

/// Rule S6 — structural arrow propagation over the cube: a candidate at the
/// supercell needs a strict-subset witness still feasible at the subcell,
/// and (symmetrically, enabled here with strict
/// containment) a candidate at the subcell needs a strict-superset witness
/// still feasible at the supercell.
fn s6_arrow_cube(board: &mut Board, cube: &mut Cube) -> bool {
    let mut changed = false;
    for i in 0..board.len() {
        let cell = CellId(i as u16);
        for dir in board.clues[i].iter() {
            let Some(j) = neighbor(board.params, cell, dir) else {
                continue;
            };
            let jidx = j.0 as usize;

            let to_drop_i: Vec<usize> = cube
                .candidates(i)
                .filter(|&vi| {
                    let vi_val = vi as Value;
                    !cube.candidates(jidx).any(|vj| {
                        let vj_val = vj as Value;
                        vj_val != vi_val && is_subset(vj_val, vi_val)
                    })
                })
                .collect();
            for v in to_drop_i {
                changed |= cube.eliminate(i, v);
            }

            let to_drop_j: Vec<usize> = cube
                .candidates(jidx)
                .filter(|&vj| {
                    let vj_val = vj as Value;
                    !cube.candidates(i).any(|vi| {
                        let vi_val = vi as Value;
                        vi_val != vj_val && is_subset(vj_val, vi_val)
                    })
                })
                .collect();
            for v in to_drop_j {
                changed |= cube.eliminate(jidx, v);
            }
        }
    }
    changed
}
