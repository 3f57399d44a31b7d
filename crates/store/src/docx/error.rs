//! Error types for DOCX table encoding and decoding

use thiserror::Error;

/// Errors that can occur while decoding or encoding tables
#[derive(Debug, Error)]
pub enum DocxError {
    /// Malformed XML or attribute syntax
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// An integer-valued attribute held non-numeric text
    #[error("Invalid integer {value:?} in {element}/@{attribute}")]
    InvalidInteger {
        element: String,
        attribute: String,
        value: String,
    },

    /// Tables nested inside cells deeper than the configured limit
    #[error("Table nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    /// A required element was not found in the input
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// Input bytes were not valid UTF-8
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl From<quick_xml::Error> for DocxError {
    fn from(err: quick_xml::Error) -> Self {
        DocxError::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        DocxError::XmlParse(format!("Attribute error: {}", err))
    }
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;
