//! Public API for table import/export
//!
//! Entry points for converting between doc_model tables and `w:tbl` markup.

use crate::docx::error::DocxResult;
use crate::docx::options::{ExportOptions, ImportOptions};
use crate::docx::tables_io::TableParser;
use crate::docx::tables_writer::TableWriter;
use doc_model::Table;
use tracing::debug;

/// Encode a table as a `w:tbl` element with the default options
///
/// A table without rows encodes to an empty string.
///
/// # Example
///
/// ```ignore
/// use doc_model::Table;
/// use store::docx::table_to_xml;
///
/// let table = Table::new(2, 3, 9000);
/// let xml = table_to_xml(&table)?;
/// ```
pub fn table_to_xml(table: &Table) -> DocxResult<String> {
    table_to_xml_with(table, &ExportOptions::default())
}

/// Encode a table with explicit export options
pub fn table_to_xml_with(table: &Table, options: &ExportOptions) -> DocxResult<String> {
    let mut out = String::new();
    TableWriter::new(options.clone()).write_table(&mut out, table)?;
    debug!(rows = table.row_count(), bytes = out.len(), "encoded table");
    Ok(out)
}

/// Decode the first `w:tbl` element found in `xml` with the default options
///
/// # Returns
///
/// * `Ok(Table)` - The decoded table
/// * `Err(DocxError)` - If the markup is malformed, an integer attribute is
///   not numeric, nesting is too deep, or no table is present
pub fn table_from_xml(xml: &str) -> DocxResult<Table> {
    table_from_xml_with(xml, &ImportOptions::default())
}

/// Decode the first `w:tbl` element with explicit import options
pub fn table_from_xml_with(xml: &str, options: &ImportOptions) -> DocxResult<Table> {
    let table = TableParser::new(options.clone()).parse(xml)?;
    debug!(rows = table.row_count(), "decoded table");
    Ok(table)
}

/// Decode the first `w:tbl` element from UTF-8 bytes
pub fn table_from_xml_bytes(bytes: &[u8]) -> DocxResult<Table> {
    table_from_xml(std::str::from_utf8(bytes)?)
}

/// Decode every top-level `w:tbl` element in `xml`, such as the tables of a
/// `w:body`
pub fn tables_from_xml(xml: &str) -> DocxResult<Vec<Table>> {
    TableParser::default().parse_all(xml)
}
