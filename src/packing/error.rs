use crate::domain::SolverError;

use super::Cell;

/// Errors raised while building, solving or decoding a packing model
#[derive(Debug, thiserror::Error)]
pub enum PackingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The solver returned values that do not assign exactly one color to a cell
    #[error("Decode failure at cell {cell}: {reason}")]
    DecodeFailure { cell: String, reason: String },

    /// The decoded coloring breaks the packing rule
    #[error("Coloring violates packing rule: color {color} at {first} and {second} (distance {distance})")]
    InvalidColoring {
        color: u32,
        first: Cell,
        second: Cell,
        distance: usize,
    },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Runtime failure: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, PackingError>;
