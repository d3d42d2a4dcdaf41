use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Core(#[from] subsets_core::error::CoreError),

    #[error(transparent)]
    Solve(#[from] subsets_solver::SolveError),
}
