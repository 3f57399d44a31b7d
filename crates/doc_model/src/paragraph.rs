//! Paragraph node - the block content a table cell owns
//!
//! Only what the table tree needs is modelled here: text runs, a style
//! reference, justification and the conditional-format tag stamped by table
//! banding. Run-level formatting lives elsewhere.

use crate::{ConfStyle, Justification, Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// Paragraph-level properties (`w:pPr`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    /// Paragraph style id
    pub style: Option<String>,
    pub justification: Option<Justification>,
    /// Conditional-format tag inherited from table banding
    pub cnf_style: Option<ConfStyle>,
}

impl ParagraphProperties {
    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.justification.is_none() && self.cnf_style.is_none()
    }
}

/// A run of plain text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A paragraph containing text runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    id: NodeId,
    parent: Option<NodeId>,
    pub properties: ParagraphProperties,
    runs: Vec<Run>,
}

impl Paragraph {
    /// Create a new empty paragraph
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            properties: ParagraphProperties::default(),
            runs: Vec::new(),
        }
    }

    /// Append a text run
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.runs.push(Run::new(text));
        self
    }

    pub fn push_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn set_style(&mut self, style: impl Into<String>) -> &mut Self {
        self.properties.style = Some(style.into());
        self
    }

    pub fn set_justification(&mut self, justification: Justification) -> &mut Self {
        self.properties.justification = Some(justification);
        self
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Paragraph {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Paragraph
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
}
