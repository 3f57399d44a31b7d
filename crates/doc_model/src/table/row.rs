//! Table rows

use crate::{
    ConfStyle, HeightRule, Justification, Node, NodeId, NodeType, RowHeight, TableCell, TableWidth,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Properties for a table row (`w:trPr`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowProperties {
    pub height: Option<RowHeight>,
    pub justification: Option<Justification>,
    pub cnf_style: Option<ConfStyle>,
}

impl RowProperties {
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.justification.is_none() && self.cnf_style.is_none()
    }
}

/// A table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    id: NodeId,
    parent: Option<NodeId>,
    pub properties: RowProperties,
    cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new empty row
    pub fn new() -> Self {
        Self::with_properties(RowProperties::default())
    }

    pub fn with_properties(properties: RowProperties) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            properties,
            cells: Vec::new(),
        }
    }

    /// Insert a new empty cell at `position`, or append when it is `None` or
    /// out of range
    pub fn add_cell(&mut self, position: Option<usize>) -> &mut TableCell {
        let mut cell = TableCell::new();
        cell.set_parent(Some(self.id));
        let index = match position {
            Some(index) if index < self.cells.len() => index,
            Some(index) => {
                debug!(index, len = self.cells.len(), "cell position out of range, appending");
                self.cells.len()
            }
            None => self.cells.len(),
        };
        self.cells.insert(index, cell);
        &mut self.cells[index]
    }

    /// Append an existing cell, taking ownership of it
    pub fn push_cell(&mut self, mut cell: TableCell) {
        cell.set_parent(Some(self.id));
        self.cells.push(cell);
    }

    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [TableCell] {
        &mut self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&TableCell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut TableCell> {
        self.cells.get_mut(index)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of grid columns the cells cover once spans are resolved
    pub fn resolved_column_count(&self) -> usize {
        self.cells.iter().map(TableCell::grid_span).sum()
    }

    pub fn set_justification(&mut self, justification: Justification) -> &mut Self {
        self.properties.justification = Some(justification);
        self
    }

    /// Set an explicit height in twips. A non-positive value clears it.
    pub fn set_height(&mut self, val: i64, rule: Option<HeightRule>) -> &mut Self {
        self.properties.height = (val > 0).then_some(RowHeight { val, rule });
        self
    }

    /// Index range of the cells covering grid columns `first_col..=last_col`.
    ///
    /// Returns `None` when no cell starts exactly at `first_col` or no cell
    /// ends exactly at `last_col`.
    pub fn cell_range(&self, first_col: usize, last_col: usize) -> Option<(usize, usize)> {
        let mut column = 0;
        let mut start = None;
        let mut end = None;
        for (index, cell) in self.cells.iter().enumerate() {
            if column == first_col {
                start = Some(index);
            }
            column += cell.grid_span();
            if column == last_col + 1 {
                end = Some(index + 1);
            }
        }
        match (start, end) {
            (Some(start), Some(end)) if start < end => Some((start, end)),
            _ => None,
        }
    }

    /// Collapse `cells[start..end]` into the first one, which then spans
    /// `span` grid columns. Content of the absorbed cells is discarded.
    pub(crate) fn collapse_cells(&mut self, start: usize, end: usize, span: usize) {
        let width = TableWidth::merged(self.cells[start..end].iter().map(TableCell::width));
        self.cells.drain(start + 1..end);
        let cell = &mut self.cells[start];
        if end - start > 1 {
            cell.set_width_spec(width);
        }
        if span > 1 {
            cell.set_grid_span(span as u32);
        }
    }
}

impl Default for TableRow {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for TableRow {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::TableRow
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
}
