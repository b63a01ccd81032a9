// puzzle/mod.rs - Skyscraper puzzle grid: input parsing, block construction, board state

pub mod palette;
pub mod matrix;
pub mod input_parser;
pub mod grid_builder;
pub mod board;

pub use palette::*;
pub use matrix::*;
pub use input_parser::*;
pub use grid_builder::*;
pub use board::*;

/// Smallest accepted puzzle size
pub const MIN_PUZZLE_SIZE: usize = 4;
/// Largest accepted puzzle size
pub const MAX_PUZZLE_SIZE: usize = 9;

/// Puzzle validation errors. Display strings are the alert texts shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PuzzleError {
    #[error("No matching numbers found")]
    NoDigitsFound,

    #[error("Input Size different: {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Puzzle size must be range 4 ~ 9")]
    SizeOutOfRange { requested: i64 },

    #[error("Matrix row {row} has {actual} columns, expected {expected}")]
    NonRectangularMatrix { row: usize, expected: usize, actual: usize },

    #[error("Matrix has no cells")]
    EmptyMatrix,

    #[error("Cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
