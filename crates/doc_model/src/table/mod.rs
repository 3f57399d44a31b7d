//! Table model - Tables, rows, cells and grid definitions
//!
//! A [`Table`] exclusively owns its grid, its properties and its rows; rows own
//! their cells and cells own their block content (paragraphs and nested
//! tables). Back-references are parent [`NodeId`]s only.
//!
//! Structural operations:
//! - Construction (uniform, explicit twips grid, empty)
//! - Column grid assignment with width redistribution across spans
//! - Rectangular merge with all-or-nothing validation
//! - Conditional-format derivation from the look options

mod cell;
mod grid;
mod look;
mod row;
mod tags;
mod values;

pub use cell::*;
pub use grid::*;
pub use look::*;
pub use row::*;
pub use tags::*;
pub use values::*;

use crate::{DocModelError, Node, NodeId, NodeType, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Maximum depth of tables nested inside table cells
pub const MAX_TABLE_NESTING_DEPTH: usize = 10;

/// Style applied by the table constructors
pub const DEFAULT_TABLE_STYLE: &str = "TableGrid";

// =============================================================================
// Table Properties
// =============================================================================

/// Table-level properties (`w:tblPr`); every group is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProperties {
    pub position: Option<TablePosition>,
    pub style: Option<TableStyle>,
    pub width: Option<TableWidth>,
    pub justification: Option<Justification>,
    pub borders: Option<TableBorders>,
    pub look: Option<TableLook>,
}

impl TableProperties {
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.style.is_none()
            && self.width.is_none()
            && self.justification.is_none()
            && self.borders.is_none()
            && self.look.is_none()
    }
}

// =============================================================================
// Table
// =============================================================================

/// A table node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    id: NodeId,
    parent: Option<NodeId>,
    pub properties: TableProperties,
    pub grid: TableGrid,
    rows: Vec<TableRow>,
}

impl Table {
    /// Create a `rows` x `cols` table of auto-width cells.
    ///
    /// A positive `width` (twips) fixes the table width; otherwise the table
    /// is auto width. No columns are declared until [`Table::set_col_grid`].
    pub fn new(rows: usize, cols: usize, width: i64) -> Self {
        let mut table = Self::empty();
        for _ in 0..rows {
            let row = table.add_row(None);
            for _ in 0..cols {
                row.add_cell(None).set_width_spec(TableWidth::auto());
            }
        }
        table.set_width(width);
        table
    }

    /// Create a table from explicit row heights and column widths (twips).
    ///
    /// Non-positive column widths are left out of the grid; a non-positive
    /// `width` falls back to the sum of the remaining ones. Non-positive
    /// heights leave the row auto-sized.
    pub fn with_twips(heights: &[i64], widths: &[i64], width: i64) -> Self {
        let mut table = Self::empty();
        table.grid = TableGrid::from_positive_widths(widths);
        for &height in heights {
            let row = table.add_row(None);
            row.set_height(height, None);
            for &w in widths {
                row.add_cell(None).set_width_spec(TableWidth::dxa(w));
            }
        }
        let width = if width > 0 { width } else { table.grid.total_width() };
        table.set_width(width);
        table
    }

    /// Create a table with no rows, styled with the default style
    pub fn empty() -> Self {
        let mut table = Self::with_properties(TableProperties::default(), TableGrid::new());
        table.set_style(DEFAULT_TABLE_STYLE, StyleOptions::empty());
        table
    }

    /// Create a bare table from already-built parts
    pub fn with_properties(properties: TableProperties, grid: TableGrid) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            properties,
            grid,
            rows: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    /// Set the table width in twips; non-positive means auto
    pub fn set_width(&mut self, w: i64) -> &mut Self {
        self.properties.width = Some(TableWidth::from_twips(w));
        self
    }

    /// Apply `border` to the selected sides, inside lines included
    pub fn set_borders(&mut self, sides: BorderSides, border: Border) -> &mut Self {
        self.properties
            .borders
            .get_or_insert_with(TableBorders::default)
            .set(sides, border);
        self
    }

    /// Set the style and the look options that select its conditional regions.
    /// Any previous look is replaced.
    pub fn set_style(&mut self, style: &str, options: StyleOptions) -> &mut Self {
        self.properties.style = Some(TableStyle::new(style));
        self.properties.look = Some(TableLook::from_options(options));
        self
    }

    pub fn set_justification(&mut self, justification: Justification) -> &mut Self {
        self.properties.justification = Some(justification);
        self
    }

    /// Make the table floating
    pub fn set_position(&mut self, position: TablePosition) -> &mut Self {
        self.properties.position = Some(position);
        self
    }

    /// Replace the grid and re-width every cell against it.
    ///
    /// Walking each row left to right, a cell consumes as many widths as it
    /// spans columns (clamped to the sequence). A spanning cell gets the sum,
    /// or auto if any consumed width is not positive. Cells past the end of the
    /// sequence are left alone. Merges must be applied first.
    pub fn set_col_grid(&mut self, widths: &[i64]) -> &mut Self {
        self.grid = TableGrid::from_widths(widths);
        self.set_width(widths.iter().sum());

        for row in &mut self.rows {
            let mut column = 0;
            for cell in row.cells_mut() {
                if column >= widths.len() {
                    break;
                }
                let end = (column + cell.grid_span()).min(widths.len());
                let members = &widths[column..end];
                let width = match members {
                    [w] => TableWidth::from_twips(*w),
                    _ if members.iter().any(|w| *w <= 0) => TableWidth::auto(),
                    _ => TableWidth::dxa(members.iter().sum()),
                };
                cell.set_width_spec(width);
                column = end;
            }
        }
        self
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Insert a new empty row at `position`, or append when it is `None` or out
    /// of range
    pub fn add_row(&mut self, position: Option<usize>) -> &mut TableRow {
        let mut row = TableRow::new();
        row.set_parent(Some(self.id));
        let index = match position {
            Some(index) if index < self.rows.len() => index,
            Some(index) => {
                debug!(index, len = self.rows.len(), "row position out of range, appending");
                self.rows.len()
            }
            None => self.rows.len(),
        };
        self.rows.insert(index, row);
        &mut self.rows[index]
    }

    /// Append an existing row, taking ownership of it
    pub fn push_row(&mut self, mut row: TableRow) {
        row.set_parent(Some(self.id));
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [TableRow] {
        &mut self.rows
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut TableRow> {
        self.rows.get_mut(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell by row index and cell index (not grid column)
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cell(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row).and_then(|r| r.cell_mut(col))
    }

    /// Logical column count: the grid's, or the widest row when no grid is declared
    pub fn column_count(&self) -> usize {
        if self.grid.is_empty() {
            self.rows
                .iter()
                .map(TableRow::resolved_column_count)
                .max()
                .unwrap_or(0)
        } else {
            self.grid.column_count()
        }
    }

    // -------------------------------------------------------------------------
    // Merging
    // -------------------------------------------------------------------------

    /// Merge the rectangle of grid columns `first_col..=last_col` over rows
    /// `first_row..=last_row`.
    ///
    /// Every row must have cell boundaries exactly at both column edges. All
    /// rows are checked before anything changes, so a rejected merge leaves
    /// the table untouched. Multi-row merges mark the surviving cells with
    /// `restart` on the first row and `continue` below it.
    pub fn merge(
        &mut self,
        first_row: usize,
        last_row: usize,
        first_col: usize,
        last_col: usize,
    ) -> Result<()> {
        let ranges = self
            .merge_ranges(first_row, last_row, first_col, last_col)
            .inspect_err(|err| debug!(%err, "merge rejected"))?;

        let span = last_col - first_col + 1;
        let vertical = first_row < last_row;
        for (offset, (start, end)) in ranges.into_iter().enumerate() {
            let row = &mut self.rows[first_row + offset];
            row.collapse_cells(start, end, span);
            if vertical {
                let merge = if offset == 0 {
                    VerticalMerge::Restart
                } else {
                    VerticalMerge::Continue
                };
                row.cells_mut()[start].set_v_merge(merge);
            }
        }
        Ok(())
    }

    fn merge_ranges(
        &self,
        first_row: usize,
        last_row: usize,
        first_col: usize,
        last_col: usize,
    ) -> Result<Vec<(usize, usize)>> {
        if first_row > last_row || first_col > last_col || last_row >= self.rows.len() {
            return Err(DocModelError::MergeOutOfBounds {
                first_row,
                last_row,
                first_col,
                last_col,
                row_count: self.rows.len(),
            });
        }
        if first_row == last_row && first_col == last_col {
            return Err(DocModelError::EmptyMerge {
                row: first_row,
                col: first_col,
            });
        }

        let ranges = (first_row..=last_row)
            .map(|row| {
                self.rows[row]
                    .cell_range(first_col, last_col)
                    .ok_or(DocModelError::MisalignedMerge {
                        row,
                        first_col,
                        last_col,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        self.check_merge_overlap(first_row, last_row, first_col, last_col, &ranges)?;
        Ok(ranges)
    }

    /// Reject a rectangle that cuts into an existing vertical merge group.
    ///
    /// Touching a group is allowed only when the rectangle is exactly that
    /// group: one cell per row, `restart` on the first row, `continue` below,
    /// and no `continue` in the row after the last one.
    fn check_merge_overlap(
        &self,
        first_row: usize,
        last_row: usize,
        first_col: usize,
        last_col: usize,
        ranges: &[(usize, usize)],
    ) -> Result<()> {
        let touches_group = ranges.iter().enumerate().any(|(offset, &(start, end))| {
            self.rows[first_row + offset].cells()[start..end]
                .iter()
                .any(|cell| cell.v_merge().is_some())
        });
        let continues_below = self
            .rows
            .get(last_row + 1)
            .and_then(|row| {
                row.cell_range(first_col, last_col)
                    .map(|(start, _)| row.cells()[start].v_merge())
            })
            .is_some_and(|merge| merge == Some(VerticalMerge::Continue));
        if !touches_group && !continues_below {
            return Ok(());
        }

        let same_group = first_row < last_row
            && !continues_below
            && ranges.iter().enumerate().all(|(offset, &(start, end))| {
                let expected = if offset == 0 {
                    VerticalMerge::Restart
                } else {
                    VerticalMerge::Continue
                };
                end - start == 1
                    && self.rows[first_row + offset].cells()[start].v_merge() == Some(expected)
            });
        if same_group {
            Ok(())
        } else {
            Err(DocModelError::OverlappingMerge {
                first_row,
                last_row,
                first_col,
                last_col,
            })
        }
    }

    // -------------------------------------------------------------------------
    // Conditional formatting
    // -------------------------------------------------------------------------

    /// Conditional styles selected by the look; no look means all off
    pub fn conditional_styles(&self) -> ConditionalStyles {
        match &self.properties.look {
            Some(look) => ConditionalStyles::derive(look),
            None => ConditionalStyles::derive(&TableLook::disabled()),
        }
    }

    /// Per-row, per-cell and per-paragraph tags for the current state
    pub fn conditional_tags(&self) -> ConditionalTags {
        ConditionalTags::for_table(self)
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Check that no row spans more columns than the grid declares.
    /// Tables without a declared grid always pass.
    pub fn check_grid(&self) -> Result<()> {
        if self.grid.is_empty() {
            return Ok(());
        }
        let grid_columns = self.grid.column_count();
        for (row, r) in self.rows.iter().enumerate() {
            let columns = r.resolved_column_count();
            if columns > grid_columns {
                return Err(DocModelError::SpanExceedsGrid {
                    row,
                    columns,
                    grid_columns,
                });
            }
        }
        Ok(())
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl Node for Table {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Table
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
}

/// Markdown preview: an alignment header sized by the first row, then one line
/// per row with the text of each cell's first paragraph.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_cells = match self.rows.first() {
            Some(row) if row.cell_count() > 0 => row.cell_count(),
            _ => return Ok(()),
        };
        f.write_str("| ")?;
        for _ in 0..header_cells {
            f.write_str(" :----: |")?;
        }
        for row in &self.rows {
            f.write_str("\n|")?;
            for cell in row.cells() {
                match cell.paragraphs().next() {
                    Some(p) if !p.is_empty() => write!(f, " {}", p.text())?,
                    _ => f.write_str("       ")?,
                }
                f.write_str(" |")?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
