//! Emission-time conditional-format tagging
//!
//! Rows, cells and paragraphs of a styled table are stamped with the
//! conditional tag of the region they fall in: banded rows, banded columns and
//! the first/last row and column. The plan is recomputed from the table every
//! time it is needed and never written back into the tree.

use crate::{ConditionalStyles, ConfStyle, Table};

/// Tags for one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellTags {
    /// Tag for the cell's own properties
    pub cell: Option<ConfStyle>,
    /// Tag pushed down onto every paragraph of the cell
    pub paragraphs: Option<ConfStyle>,
}

/// Tags for one row and its cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTags {
    pub row: Option<ConfStyle>,
    pub cells: Vec<CellTags>,
}

impl RowTags {
    pub fn cell(&self, index: usize) -> CellTags {
        self.cells.get(index).copied().unwrap_or_default()
    }
}

/// The full tagging plan of a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalTags {
    pub rows: Vec<RowTags>,
}

impl ConditionalTags {
    /// Compute the plan for `table` from its look
    pub fn for_table(table: &Table) -> Self {
        let styles = table.conditional_styles();
        let h_parity = styles.h_band_parity();
        let v_parity = styles.v_band_parity();

        let mut rows: Vec<RowTags> = table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let banded = i % 2 == h_parity;
                let mut visual_column = 0;
                let last = row.cell_count().saturating_sub(1);
                let cells = row
                    .cells()
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| {
                        let mut tags = CellTags {
                            cell: styles
                                .odd_v_band
                                .filter(|_| visual_column % 2 == v_parity),
                            paragraphs: None,
                        };
                        visual_column += cell.grid_span();

                        if j == 0 && styles.first_column.is_some() {
                            tags.cell = styles.first_column;
                        } else if j == last && styles.last_column.is_some() {
                            tags.cell = styles.last_column;
                        } else if styles.has_edge_columns() {
                            tags.paragraphs = paragraph_band(&styles, banded);
                        }
                        tags
                    })
                    .collect();

                RowTags {
                    row: styles.odd_h_band.filter(|_| banded),
                    cells,
                }
            })
            .collect();

        // Header and footer rows win over banding; first row wins over last.
        if let (Some(tag), Some(row)) = (styles.last_row, rows.last_mut()) {
            row.row = Some(tag);
        }
        if let (Some(tag), Some(row)) = (styles.first_row, rows.first_mut()) {
            row.row = Some(tag);
        }

        Self { rows }
    }

    pub fn row(&self, index: usize) -> Option<&RowTags> {
        self.rows.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|r| r.row.is_none() && r.cells.iter().all(|c| *c == CellTags::default()))
    }
}

fn paragraph_band(styles: &ConditionalStyles, banded: bool) -> Option<ConfStyle> {
    if banded {
        styles.odd_h_band
    } else {
        Some(styles.none)
    }
}
