#![forbid(unsafe_code)]
//! The puzzle generator: produces solvable Subsets instances of guaranteed
//! uniqueness by building a full solution and then un-fixing cells one at a
//! time, keeping each cell blank only so long as `subsets-solver` can still
//! complete the board without it.
//!
//! Feature flags:
//! - `telemetry-tracing` (default): traces each un-fix attempt during
//!   generation via `tracing::trace!`.

pub mod error;
pub mod generator;
pub mod seed;

pub use crate::error::GenError;
pub use crate::generator::{GeneratedPuzzle, generate};
