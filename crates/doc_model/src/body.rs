//! Document body - the ordered block items a table attaches to

use crate::{Node, NodeId, NodeType, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// Top-level block item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyItem {
    Paragraph(Paragraph),
    Table(Table),
}

/// Document body (`w:body`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    id: NodeId,
    items: Vec<BodyItem>,
}

impl Body {
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            items: Vec::new(),
        }
    }

    /// Append a `rows` x `cols` table. See [`Table::new`].
    pub fn add_table(&mut self, rows: usize, cols: usize, width: i64) -> &mut Table {
        self.push_table(Table::new(rows, cols, width))
    }

    /// Append a table built from row heights and column widths. See
    /// [`Table::with_twips`].
    pub fn add_table_twips(&mut self, heights: &[i64], widths: &[i64], width: i64) -> &mut Table {
        self.push_table(Table::with_twips(heights, widths, width))
    }

    /// Append a table with no rows
    pub fn add_table_empty(&mut self) -> &mut Table {
        self.push_table(Table::empty())
    }

    /// Append an existing table, taking ownership of it
    pub fn push_table(&mut self, mut table: Table) -> &mut Table {
        table.set_parent(Some(self.id));
        self.items.push(BodyItem::Table(table));
        match self.items.last_mut() {
            Some(BodyItem::Table(t)) => t,
            _ => unreachable!("a table was just appended"),
        }
    }

    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        let mut para = Paragraph::new();
        para.set_parent(Some(self.id));
        self.items.push(BodyItem::Paragraph(para));
        match self.items.last_mut() {
            Some(BodyItem::Paragraph(p)) => p,
            _ => unreachable!("a paragraph was just appended"),
        }
    }

    pub fn items(&self) -> &[BodyItem] {
        &self.items
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.items.iter().filter_map(|item| match item {
            BodyItem::Table(t) => Some(t),
            BodyItem::Paragraph(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Body {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Body
    }

    fn parent(&self) -> Option<NodeId> {
        None
    }

    fn set_parent(&mut self, _parent: Option<NodeId>) {
        // The body is always the root
    }
}
