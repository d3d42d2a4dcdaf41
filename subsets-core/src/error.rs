use thiserror::Error;

use crate::board::{CellId, Direction};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("grid size N={0} not supported by this configuration")]
    InvalidGridSize(u8),

    #[error("params {w}x{h}n{n}: only square boards with w*h = 2^n are supported")]
    InvalidParams { w: u16, h: u16, n: u8 },

    #[error("params {w}x{h}n{n}: only 4x4n4 is accepted by this build")]
    UnsupportedSize { w: u16, h: u16, n: u8 },

    #[error("cell id {cell} out of range for board of {w}x{h}")]
    CellOutOfRange { w: u16, h: u16, cell: CellId },

    #[error("arrow from {cell} toward {dir:?} points off the grid")]
    ArrowOffGrid { cell: CellId, dir: Direction },

    #[error("cells {a} and {b} both claim an arrow pointing at each other")]
    ContradictingArrows { a: CellId, b: CellId },
}
