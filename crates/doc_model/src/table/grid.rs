//! Column grid of a table

use serde::{Deserialize, Serialize};

/// A single grid column (`w:gridCol`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridColumn {
    /// Width in twips
    pub w: i64,
}

impl GridColumn {
    pub fn new(w: i64) -> Self {
        Self { w }
    }
}

/// Ordered column widths; its length is the table's logical column count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    pub columns: Vec<GridColumn>,
}

impl TableGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// One column per width, as given
    pub fn from_widths(widths: &[i64]) -> Self {
        Self {
            columns: widths.iter().copied().map(GridColumn::new).collect(),
        }
    }

    /// One column per positive width; non-positive entries are dropped
    pub fn from_positive_widths(widths: &[i64]) -> Self {
        Self {
            columns: widths
                .iter()
                .copied()
                .filter(|w| *w > 0)
                .map(GridColumn::new)
                .collect(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn total_width(&self) -> i64 {
        self.columns.iter().map(|c| c.w).sum()
    }

    pub fn widths(&self) -> Vec<i64> {
        self.columns.iter().map(|c| c.w).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn push(&mut self, column: GridColumn) {
        self.columns.push(column);
    }
}
