//! Store - WordprocessingML serialization for doc_model tables
//!
//! This crate encodes the table tree into `w:tbl` markup and decodes it back,
//! tolerating unknown elements so that tables produced by other writers load.

pub mod docx;

pub use docx::{
    table_from_xml, table_from_xml_bytes, table_from_xml_with, table_to_xml, table_to_xml_with,
    tables_from_xml, DocxError, DocxResult, ExportOptions, ImportOptions, TableParser,
    TableWriter,
};
