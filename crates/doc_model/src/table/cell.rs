//! Table cells and the block content they own

use crate::{
    Border, BorderSides, CellBorders, ConfStyle, Node, NodeId, NodeType, Paragraph, Shade, Table,
    TableWidth, VerticalAlignment,
};
use serde::{Deserialize, Serialize};

/// Vertical merge marker (`w:vMerge`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalMerge {
    /// First cell of a vertically merged group
    Restart,
    /// Continues the group started in the row above
    Continue,
}

/// Properties for a table cell (`w:tcPr`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellProperties {
    pub cnf_style: Option<ConfStyle>,
    pub width: Option<TableWidth>,
    pub v_merge: Option<VerticalMerge>,
    /// Number of grid columns spanned; unset means one
    pub grid_span: Option<u32>,
    pub borders: Option<CellBorders>,
    pub shade: Option<Shade>,
    pub vertical_alignment: Option<VerticalAlignment>,
}

impl CellProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cnf_style.is_none()
            && self.width.is_none()
            && self.v_merge.is_none()
            && self.grid_span.is_none()
            && self.borders.is_none()
            && self.shade.is_none()
            && self.vertical_alignment.is_none()
    }
}

/// Block-level item inside a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockContent {
    Paragraph(Paragraph),
    Table(Table),
}

impl BlockContent {
    fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            BlockContent::Paragraph(p) => p.set_parent(parent),
            BlockContent::Table(t) => t.set_parent(parent),
        }
    }
}

/// A table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    id: NodeId,
    parent: Option<NodeId>,
    properties: CellProperties,
    content: Vec<BlockContent>,
}

impl TableCell {
    /// Create an empty cell with no properties
    pub fn new() -> Self {
        Self::with_properties(CellProperties::default())
    }

    /// Create a cell with the given properties
    pub fn with_properties(properties: CellProperties) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            properties,
            content: Vec::new(),
        }
    }

    pub fn properties(&self) -> &CellProperties {
        &self.properties
    }

    /// Append an empty paragraph owned by this cell
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.push_content(BlockContent::Paragraph(Paragraph::new()));
        match self.content.last_mut() {
            Some(BlockContent::Paragraph(p)) => p,
            _ => unreachable!("a paragraph was just appended"),
        }
    }

    /// Append a nested table
    pub fn add_table(&mut self, table: Table) -> &mut Table {
        self.push_content(BlockContent::Table(table));
        match self.content.last_mut() {
            Some(BlockContent::Table(t)) => t,
            _ => unreachable!("a table was just appended"),
        }
    }

    /// Append block content, taking ownership of it
    pub fn push_content(&mut self, mut item: BlockContent) {
        item.set_parent(Some(self.id));
        self.content.push(item);
    }

    pub fn content(&self) -> &[BlockContent] {
        &self.content
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|item| match item {
            BlockContent::Paragraph(p) => Some(p),
            BlockContent::Table(_) => None,
        })
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.content.iter_mut().filter_map(|item| match item {
            BlockContent::Paragraph(p) => Some(p),
            BlockContent::Table(_) => None,
        })
    }

    /// Nested tables
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|item| match item {
            BlockContent::Table(t) => Some(t),
            BlockContent::Paragraph(_) => None,
        })
    }

    pub fn has_paragraph(&self) -> bool {
        self.paragraphs().next().is_some()
    }

    /// Text of the paragraphs, one line each
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Set the cell width in twips; non-positive means auto
    pub fn set_width(&mut self, w: i64) -> &mut Self {
        self.properties.width = Some(TableWidth::from_twips(w));
        self
    }

    pub fn set_shade(&mut self, val: &str, color: &str, fill: &str) -> &mut Self {
        self.properties.shade = Some(Shade::new(val, color, fill));
        self
    }

    /// Apply `border` to the selected outer sides
    pub fn set_borders(&mut self, sides: BorderSides, border: Border) -> &mut Self {
        self.properties
            .borders
            .get_or_insert_with(CellBorders::default)
            .set(sides, border);
        self
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) -> &mut Self {
        self.properties.vertical_alignment = Some(alignment);
        self
    }

    /// Effective number of grid columns covered (at least one)
    pub fn grid_span(&self) -> usize {
        self.properties.grid_span.map_or(1, |span| span.max(1) as usize)
    }

    pub fn v_merge(&self) -> Option<VerticalMerge> {
        self.properties.v_merge
    }

    pub fn width(&self) -> Option<TableWidth> {
        self.properties.width
    }

    pub fn cnf_style(&self) -> Option<ConfStyle> {
        self.properties.cnf_style
    }

    /// Replace the stored conditional-format tag
    pub fn set_cnf_style(&mut self, style: Option<ConfStyle>) -> &mut Self {
        self.properties.cnf_style = style;
        self
    }

    pub(crate) fn set_width_spec(&mut self, width: TableWidth) {
        self.properties.width = Some(width);
    }

    pub(crate) fn set_grid_span(&mut self, span: u32) {
        self.properties.grid_span = Some(span);
    }

    pub(crate) fn set_v_merge(&mut self, merge: VerticalMerge) {
        self.properties.v_merge = Some(merge);
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for TableCell {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::TableCell
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
}
