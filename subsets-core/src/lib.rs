#![forbid(unsafe_code)]
//! Board model, static validator, move engine, and description codec for
//! the Subsets puzzle: a grid in which every one of the `2^n` subsets of an
//! `n`-letter alphabet appears exactly once, constrained by containment
//! arrows and incomparability between orthogonal neighbours.
//!
//! This crate owns the data model only. Constraint propagation lives in the
//! solver crate built on top of it; generation lives above that again.

pub mod board;
pub mod domain;
pub mod error;
pub mod format;
pub mod moves;
pub mod params;
pub mod textdump;
pub mod validator;

pub use crate::board::{Board, CellId, ClueFlags, Coord, Direction};
pub use crate::domain::Value;
pub use crate::error::CoreError;
pub use crate::moves::{Move, MoveError, MoveOutcome};
pub use crate::params::Params;
pub use crate::validator::SolveStatus;
