//! Core node trait and types

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// Kinds of node in the table tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Body,
    Paragraph,
    Table,
    TableRow,
    TableCell,
}

/// Common interface for all tree nodes
pub trait Node: std::fmt::Debug {
    /// Get the unique ID of this node
    fn id(&self) -> NodeId;

    /// Get the type of this node
    fn node_type(&self) -> NodeType;

    /// Get the ID of the owning node (None when detached)
    fn parent(&self) -> Option<NodeId>;

    /// Set the owning node ID
    fn set_parent(&mut self, parent: Option<NodeId>);
}
