//! # Plate Errors
//!
//! Error types for plate building. Only input problems are errors:
//! geometry degradation is reported through
//! [`crate::BuildReport`], never raised.

use thiserror::Error;

/// Result alias for plate operations.
pub type PlateResult<T> = Result<T, PlateError>;

/// Errors that can occur while validating plate input.
#[derive(Debug, Error, PartialEq)]
pub enum PlateError {
    /// A character outside the Unicode braille block (and not a space)
    #[error("line {line}: character '{character}' at column {column} is not a braille pattern")]
    NonBrailleCharacter {
        /// One-based line number.
        line: usize,
        /// One-based column within the line.
        column: usize,
        /// The offending character.
        character: char,
    },

    /// A line with more cells than the grid can hold
    #[error("line {line} has {count} cells but only {available} columns are available")]
    LineOverflow {
        /// One-based line number.
        line: usize,
        /// Number of cells in the line.
        count: usize,
        /// Number of text columns the grid provides.
        available: usize,
    },

    /// More lines than the grid has rows
    #[error("{count} lines exceed the grid's {rows} rows")]
    TooManyLines {
        /// Number of input lines.
        count: usize,
        /// Number of rows in the grid.
        rows: usize,
    },

    /// Settings that fail validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl PlateError {
    /// Creates an invalid settings error.
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings(message.into())
    }
}
