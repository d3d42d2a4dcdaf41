#![forbid(unsafe_code)]
//! The constraint-propagation engine that sits on top of `subsets-core`'s
//! board model: given a board's clues and whatever bits are already known,
//! deduce as much of the rest as the fixed rule set allows.
//!
//! This crate never searches and never backtracks. It either narrows a
//! board down to `Complete`, gives up honestly at `Unfinished`, or catches
//! a self-contradictory input as `Invalid` — see [`subsets_core::SolveStatus`].
//!
//! Feature flags:
//! - `telemetry-tracing` (default): emits a `tracing::trace!` event every
//!   time a rule fires, scoped to the current solve call. No subscriber is
//!   required by the library; `subsets-cli` installs one under `-v`.

pub mod error;
pub mod solver;

pub use crate::error::SolveError;
pub use crate::solver::{SolveStats, solve, solve_with_stats};
pub use subsets_core::SolveStatus;
