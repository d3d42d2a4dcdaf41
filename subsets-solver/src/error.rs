use thiserror::Error;

/// Errors the solver can surface. A solve call is a pure function of its
/// input board; the only way it fails is if that board's own parameters are
/// malformed (see [`subsets_core::error::CoreError`]). Anything past that —
/// `Unfinished`, `Invalid` — is an in-band [`crate::SolveStatus`], not an
/// error.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Core(#[from] subsets_core::error::CoreError),
}
