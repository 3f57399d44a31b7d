//! DOCX Table Import/Export Module
//!
//! Reads and writes the WordprocessingML table fragment (`w:tbl`) defined in
//! ECMA-376 Part 1, section 17.4:
//! - `w:tblPr` - table properties (style, position, width, borders, look)
//! - `w:tblGrid` - column widths
//! - `w:tr` / `w:trPr` - rows and their properties
//! - `w:tc` / `w:tcPr` - cells, merges and their properties
//! - `w:p` - cell paragraphs, reduced to text and table-relevant properties
//!
//! Nested tables inside cells are supported up to a configurable depth.

mod error;
mod options;
mod reader;
mod attributes;
mod tables_writer;
mod tables_io;
mod api;

pub use error::{DocxError, DocxResult};
pub use options::{ExportOptions, ImportOptions};
pub use reader::XmlParser;
pub use tables_writer::TableWriter;
pub use tables_io::TableParser;
pub use api::{
    table_from_xml, table_from_xml_bytes, table_from_xml_with, table_to_xml, table_to_xml_with,
    tables_from_xml,
};

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
}
