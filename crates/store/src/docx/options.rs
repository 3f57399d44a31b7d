//! Import and export options for the table codec

use doc_model::MAX_TABLE_NESTING_DEPTH;
use serde::{Deserialize, Serialize};

/// Options for decoding tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Deepest table-in-cell nesting accepted; 1 means no nested tables
    pub max_nesting_depth: usize,
    /// Treat conditional-format tags as derived state: tags that the table's
    /// look would produce anyway are dropped on import and re-derived on
    /// export. When false every decoded tag is kept as authored data.
    pub derive_conditional_styles: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: MAX_TABLE_NESTING_DEPTH,
            derive_conditional_styles: true,
        }
    }
}

/// Options for encoding tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Declare the `w` namespace on the outermost `w:tbl`, for standalone
    /// fragments
    pub declare_namespace: bool,
    /// Stamp the conditional-format tags derived from each table's look
    pub apply_conditional_styles: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            declare_namespace: false,
            apply_conditional_styles: true,
        }
    }
}
