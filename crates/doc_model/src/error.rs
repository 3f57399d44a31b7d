//! Error types for document model operations

use thiserror::Error;

/// Reasons a structural request on a table is rejected.
///
/// A rejected request never mutates the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocModelError {
    #[error(
        "Merge range rows {first_row}..={last_row}, columns {first_col}..={last_col} \
         is outside a table of {row_count} rows"
    )]
    MergeOutOfBounds {
        first_row: usize,
        last_row: usize,
        first_col: usize,
        last_col: usize,
        row_count: usize,
    },

    #[error("Merge range at row {row}, column {col} covers a single cell")]
    EmptyMerge { row: usize, col: usize },

    #[error("Row {row} has no cell boundaries at columns {first_col} and {last_col}")]
    MisalignedMerge {
        row: usize,
        first_col: usize,
        last_col: usize,
    },

    #[error(
        "Merge range rows {first_row}..={last_row}, columns {first_col}..={last_col} \
         cuts into an existing vertical merge"
    )]
    OverlappingMerge {
        first_row: usize,
        last_row: usize,
        first_col: usize,
        last_col: usize,
    },

    #[error("Row {row} resolves to {columns} columns but the grid defines {grid_columns}")]
    SpanExceedsGrid {
        row: usize,
        columns: usize,
        grid_columns: usize,
    },
}

pub type Result<T> = std::result::Result<T, DocModelError>;
