//! Table import for DOCX markup
//!
//! Decodes `w:tbl` elements into doc_model tables:
//! - Table, row and cell properties through the declarative attribute schema
//! - Cell merging (`w:gridSpan` for horizontal, `w:vMerge` for vertical)
//! - Nested tables, bounded by the configured nesting depth
//! - Paragraph text and the properties tables care about
//!
//! Unknown elements are skipped with their whole subtree at every level, and
//! empty attribute values read as absent. Only malformed XML and non-numeric
//! integer attributes fail a decode.

use crate::docx::attributes::{
    apply_attributes, read_cnf_style, BORDER_ATTRIBUTES, GRID_COLUMN_ATTRIBUTES, LOOK_ATTRIBUTES,
    POSITION_ATTRIBUTES, ROW_HEIGHT_ATTRIBUTES, SHADE_ATTRIBUTES, WIDTH_ATTRIBUTES,
};
use crate::docx::error::{DocxError, DocxResult};
use crate::docx::options::ImportOptions;
use crate::docx::reader::XmlParser;
use doc_model::{
    BlockContent, Border, BorderSides, CellBorders, CellProperties, GridColumn, Justification,
    Paragraph, ParagraphProperties, RowHeight, RowProperties, Run, Shade, Table, TableBorders,
    TableCell, TableGrid, TableLook, TablePosition, TableProperties, TableRow, TableStyle,
    TableWidth, VerticalAlignment, VerticalMerge,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

type XmlReader<'a> = Reader<&'a [u8]>;

// =============================================================================
// Table Parser
// =============================================================================

/// Parser for tables in DOCX markup
pub struct TableParser {
    options: ImportOptions,
}

impl TableParser {
    /// Create a new table parser
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Decode the first `w:tbl` found in `xml`
    pub fn parse(&self, xml: &str) -> DocxResult<Table> {
        let mut reader = XmlParser::from_string(xml);
        loop {
            match reader.read_event()? {
                Event::Start(e) if XmlParser::is(&e, "tbl") => {
                    return self.read_table(&mut reader, false, 1)
                }
                Event::Empty(e) if XmlParser::is(&e, "tbl") => {
                    return self.read_table(&mut reader, true, 1)
                }
                Event::Eof => return Err(DocxError::MissingElement("w:tbl".to_string())),
                _ => {}
            }
        }
    }

    /// Decode every outermost `w:tbl` in `xml`, in document order. Everything
    /// outside the tables is ignored.
    pub fn parse_all(&self, xml: &str) -> DocxResult<Vec<Table>> {
        let mut reader = XmlParser::from_string(xml);
        let mut tables = Vec::new();
        loop {
            match reader.read_event()? {
                Event::Start(e) if XmlParser::is(&e, "tbl") => {
                    tables.push(self.read_table(&mut reader, false, 1)?)
                }
                Event::Empty(e) if XmlParser::is(&e, "tbl") => {
                    tables.push(self.read_table(&mut reader, true, 1)?)
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(tables)
    }

    /// Read a table whose start tag was just consumed
    fn read_table(&self, reader: &mut XmlReader, empty: bool, depth: usize) -> DocxResult<Table> {
        if depth > self.options.max_nesting_depth {
            return Err(DocxError::NestingTooDeep {
                depth,
                limit: self.options.max_nesting_depth,
            });
        }

        let mut table = Table::with_properties(TableProperties::default(), TableGrid::new());
        if !empty {
            XmlParser::for_each_child(reader, |reader, e, empty| {
                match e.local_name().as_ref() {
                    b"tblPr" if !empty => table.properties = read_table_properties(reader)?,
                    b"tblGrid" if !empty => table.grid = read_grid(reader)?,
                    b"tr" => table.push_row(self.read_row(reader, empty, depth)?),
                    _ => XmlParser::skip(reader, e, empty)?,
                }
                Ok(())
            })?;
        }

        if self.options.derive_conditional_styles {
            strip_derived_tags(&mut table);
        }
        Ok(table)
    }

    /// Read a row (`w:tr`)
    fn read_row(&self, reader: &mut XmlReader, empty: bool, depth: usize) -> DocxResult<TableRow> {
        let mut row = TableRow::new();
        if empty {
            return Ok(row);
        }
        XmlParser::for_each_child(reader, |reader, e, empty| {
            match e.local_name().as_ref() {
                b"trPr" if !empty => row.properties = read_row_properties(reader)?,
                b"tc" => row.push_cell(self.read_cell(reader, empty, depth)?),
                _ => XmlParser::skip(reader, e, empty)?,
            }
            Ok(())
        })?;
        Ok(row)
    }

    /// Read a cell (`w:tc`) with its paragraphs and nested tables
    fn read_cell(
        &self,
        reader: &mut XmlReader,
        empty: bool,
        depth: usize,
    ) -> DocxResult<TableCell> {
        let mut properties = CellProperties::default();
        let mut content = Vec::new();
        if !empty {
            XmlParser::for_each_child(reader, |reader, e, empty| {
                match e.local_name().as_ref() {
                    b"tcPr" if !empty => properties = read_cell_properties(reader)?,
                    b"p" => content.push(BlockContent::Paragraph(read_paragraph(reader, empty)?)),
                    b"tbl" => content.push(BlockContent::Table(
                        self.read_table(reader, empty, depth + 1)?,
                    )),
                    _ => XmlParser::skip(reader, e, empty)?,
                }
                Ok(())
            })?;
        }

        let mut cell = TableCell::with_properties(properties);
        for item in content {
            cell.push_content(item);
        }
        Ok(cell)
    }
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new(ImportOptions::default())
    }
}

// =============================================================================
// Property groups
// =============================================================================

fn read_table_properties(reader: &mut XmlReader) -> DocxResult<TableProperties> {
    let mut props = TableProperties::default();
    XmlParser::for_each_child(reader, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"tblStyle" => props.style = XmlParser::get_val(e)?.map(TableStyle::new),
            b"tblpPr" => {
                let mut position = TablePosition::default();
                apply_attributes(e, &mut position, POSITION_ATTRIBUTES)?;
                props.position = Some(position);
            }
            b"tblW" => props.width = Some(read_width(e)?),
            b"jc" => props.justification = XmlParser::get_val(e)?.map(|v| Justification::parse(&v)),
            b"tblBorders" if !empty => {
                let mut borders = TableBorders::default();
                for (side, border) in read_border_sides(reader)? {
                    borders.set(side, border);
                }
                props.borders = Some(borders);
                return Ok(());
            }
            b"tblLook" => {
                let mut look = TableLook::default();
                apply_attributes(e, &mut look, LOOK_ATTRIBUTES)?;
                props.look = Some(look);
            }
            _ => return XmlParser::skip(reader, e, empty),
        }
        XmlParser::finish(reader, e, empty)
    })?;
    Ok(props)
}

fn read_grid(reader: &mut XmlReader) -> DocxResult<TableGrid> {
    let mut grid = TableGrid::new();
    XmlParser::for_each_child(reader, |reader, e, empty| {
        if XmlParser::is(e, "gridCol") {
            let mut column = GridColumn::default();
            apply_attributes(e, &mut column, GRID_COLUMN_ATTRIBUTES)?;
            grid.push(column);
            XmlParser::finish(reader, e, empty)
        } else {
            XmlParser::skip(reader, e, empty)
        }
    })?;
    Ok(grid)
}

fn read_row_properties(reader: &mut XmlReader) -> DocxResult<RowProperties> {
    let mut props = RowProperties::default();
    XmlParser::for_each_child(reader, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"cnfStyle" => props.cnf_style = Some(read_cnf_style(e)?),
            b"trHeight" => {
                let mut height = RowHeight::default();
                apply_attributes(e, &mut height, ROW_HEIGHT_ATTRIBUTES)?;
                props.height = Some(height);
            }
            b"jc" => props.justification = XmlParser::get_val(e)?.map(|v| Justification::parse(&v)),
            _ => return XmlParser::skip(reader, e, empty),
        }
        XmlParser::finish(reader, e, empty)
    })?;
    Ok(props)
}

fn read_cell_properties(reader: &mut XmlReader) -> DocxResult<CellProperties> {
    let mut props = CellProperties::default();
    XmlParser::for_each_child(reader, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"cnfStyle" => props.cnf_style = Some(read_cnf_style(e)?),
            b"tcW" => props.width = Some(read_width(e)?),
            b"gridSpan" => props.grid_span = read_grid_span(e)?,
            b"vMerge" => {
                props.v_merge = Some(match XmlParser::get_val(e)?.as_deref() {
                    Some("restart") => VerticalMerge::Restart,
                    _ => VerticalMerge::Continue,
                })
            }
            b"tcBorders" if !empty => {
                let mut borders = CellBorders::default();
                for (side, border) in read_border_sides(reader)? {
                    borders.set(side, border);
                }
                props.borders = Some(borders);
                return Ok(());
            }
            b"shd" => {
                let mut shade = Shade::default();
                apply_attributes(e, &mut shade, SHADE_ATTRIBUTES)?;
                props.shade = Some(shade);
            }
            b"vAlign" => {
                props.vertical_alignment =
                    XmlParser::get_val(e)?.map(|v| VerticalAlignment::parse(&v))
            }
            _ => return XmlParser::skip(reader, e, empty),
        }
        XmlParser::finish(reader, e, empty)
    })?;
    Ok(props)
}

/// Width elements default to twips when the type is omitted
fn read_width(e: &BytesStart) -> DocxResult<TableWidth> {
    let mut width = TableWidth::dxa(0);
    apply_attributes(e, &mut width, WIDTH_ATTRIBUTES)?;
    Ok(width)
}

fn read_grid_span(e: &BytesStart) -> DocxResult<Option<u32>> {
    let Some(val) = XmlParser::get_val(e)? else {
        return Ok(None);
    };
    let span = XmlParser::parse_int("gridSpan", "val", &val)?;
    match u32::try_from(span) {
        Ok(span) if span > 0 => Ok(Some(span)),
        _ => {
            debug!(span, "ignoring non-positive grid span");
            Ok(None)
        }
    }
}

/// Border children of `w:tblBorders` / `w:tcBorders`. `start` and `end` are
/// read as left and right.
fn read_border_sides(reader: &mut XmlReader) -> DocxResult<Vec<(BorderSides, Border)>> {
    let mut sides = Vec::new();
    XmlParser::for_each_child(reader, |reader, e, empty| {
        let side = match e.local_name().as_ref() {
            b"top" => BorderSides::TOP,
            b"left" | b"start" => BorderSides::LEFT,
            b"bottom" => BorderSides::BOTTOM,
            b"right" | b"end" => BorderSides::RIGHT,
            b"insideH" => BorderSides::INSIDE_H,
            b"insideV" => BorderSides::INSIDE_V,
            _ => return XmlParser::skip(reader, e, empty),
        };
        let mut border = Border::default();
        apply_attributes(e, &mut border, BORDER_ATTRIBUTES)?;
        sides.push((side, border));
        XmlParser::finish(reader, e, empty)
    })?;
    Ok(sides)
}

// =============================================================================
// Paragraphs
// =============================================================================

fn read_paragraph(reader: &mut XmlReader, empty: bool) -> DocxResult<Paragraph> {
    let mut para = Paragraph::new();
    if empty {
        return Ok(para);
    }
    XmlParser::for_each_child(reader, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"pPr" if !empty => para.properties = read_paragraph_properties(reader)?,
            b"r" if !empty => para.push_run(read_run(reader)?),
            _ => XmlParser::skip(reader, e, empty)?,
        }
        Ok(())
    })?;
    Ok(para)
}

fn read_paragraph_properties(reader: &mut XmlReader) -> DocxResult<ParagraphProperties> {
    let mut props = ParagraphProperties::default();
    XmlParser::for_each_child(reader, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"pStyle" => props.style = XmlParser::get_val(e)?,
            b"jc" => props.justification = XmlParser::get_val(e)?.map(|v| Justification::parse(&v)),
            b"cnfStyle" => props.cnf_style = Some(read_cnf_style(e)?),
            _ => return XmlParser::skip(reader, e, empty),
        }
        XmlParser::finish(reader, e, empty)
    })?;
    Ok(props)
}

/// Text of a run (`w:r`); formatting is not modelled
fn read_run(reader: &mut XmlReader) -> DocxResult<Run> {
    let mut run = Run::default();
    XmlParser::for_each_child(reader, |reader, e, empty| {
        if XmlParser::is(e, "t") && !empty {
            run.text.push_str(&XmlParser::read_text(reader)?);
            Ok(())
        } else {
            XmlParser::skip(reader, e, empty)
        }
    })?;
    Ok(run)
}

// =============================================================================
// Conditional tags
// =============================================================================

/// Drop stored tags that the table's look derives at the same place; they are
/// recreated on export.
fn strip_derived_tags(table: &mut Table) {
    let tags = table.conditional_tags();
    for (i, row) in table.rows_mut().iter_mut().enumerate() {
        let Some(row_tags) = tags.row(i) else {
            continue;
        };
        if row_tags.row.is_some() && row.properties.cnf_style == row_tags.row {
            row.properties.cnf_style = None;
        }
        for (j, cell) in row.cells_mut().iter_mut().enumerate() {
            let cell_tags = row_tags.cell(j);
            if cell_tags.cell.is_some() && cell.cnf_style() == cell_tags.cell {
                cell.set_cnf_style(None);
            }
            if cell_tags.paragraphs.is_some() {
                for para in cell.paragraphs_mut() {
                    if para.properties.cnf_style == cell_tags.paragraphs {
                        para.properties.cnf_style = None;
                    }
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{BorderStyle, CnfFlags, ConfStyle, HeightRule, Node, WidthType};

    fn parse(xml: &str) -> Table {
        TableParser::default().parse(xml).expect("valid table")
    }

    #[test]
    fn test_table_properties() {
        let table = parse(concat!(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="LightGrid"/>"#,
            r#"<w:tblpPr w:leftFromText="180" w:horzAnchor="margin" w:tblpY="100"/>"#,
            r#"<w:tblW w:w="5000" w:type="pct"/><w:jc w:val="center"/>"#,
            r#"<w:tblBorders><w:top w:val="double" w:sz="6"/><w:start w:val="single"/></w:tblBorders>"#,
            r#"<w:tblLook w:val="04A0" w:firstRow="1" w:noVBand="1"/>"#,
            r#"</w:tblPr><w:tblGrid><w:gridCol w:w="1200"/><w:gridCol w:w="800"/></w:tblGrid></w:tbl>"#
        ));
        let props = &table.properties;
        assert_eq!(props.style, Some(TableStyle::new("LightGrid")));
        let position = props.position.as_ref().expect("position");
        assert_eq!(position.left_from_text, 180);
        assert_eq!(position.horz_anchor.as_deref(), Some("margin"));
        assert_eq!(position.y, 100);
        assert_eq!(props.width, Some(TableWidth { w: 5000, width_type: WidthType::Pct }));
        assert_eq!(props.justification, Some(Justification::Center));
        let borders = props.borders.as_ref().expect("borders");
        assert_eq!(
            borders.top.as_ref().map(|b| (&b.style, b.size)),
            Some((&BorderStyle::Double, 6))
        );
        assert!(borders.left.is_some());
        let look = props.look.as_ref().expect("look");
        assert!(look.first_row && look.no_v_band && !look.no_h_band);
        assert_eq!(table.grid.widths(), vec![1200, 800]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_rows_cells_and_merges() {
        let table = parse(concat!(
            "<w:tbl><w:tr>",
            r#"<w:trPr><w:trHeight w:val="300" w:hRule="atLeast"/><w:jc w:val="end"/></w:trPr>"#,
            r#"<w:tc><w:tcPr><w:tcW w:w="2000" w:type="dxa"/><w:gridSpan w:val="2"/><w:vMerge w:val="restart"/></w:tcPr>"#,
            r#"<w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p></w:tc>"#,
            "</w:tr><w:tr>",
            r#"<w:tc><w:tcPr><w:gridSpan w:val="2"/><w:vMerge/><w:shd w:fill="EEEEEE"/><w:vAlign w:val="center"/></w:tcPr><w:p/></w:tc>"#,
            "</w:tr></w:tbl>"
        ));
        assert_eq!(table.row_count(), 2);
        let row = &table.rows()[0];
        assert_eq!(
            row.properties.height,
            Some(RowHeight { val: 300, rule: Some(HeightRule::AtLeast) })
        );
        assert_eq!(row.properties.justification, Some(Justification::End));

        let first = table.cell(0, 0).expect("cell");
        assert_eq!(first.grid_span(), 2);
        assert_eq!(first.v_merge(), Some(VerticalMerge::Restart));
        assert_eq!(first.width(), Some(TableWidth::dxa(2000)));
        assert_eq!(first.text(), "Hello world");

        let below = table.cell(1, 0).expect("cell");
        assert_eq!(below.v_merge(), Some(VerticalMerge::Continue));
        assert_eq!(below.properties().shade.as_ref().map(|s| s.fill.as_str()), Some("EEEEEE"));
        assert_eq!(below.properties().vertical_alignment, Some(VerticalAlignment::Center));
        assert_eq!(below.paragraphs().count(), 1);
    }

    #[test]
    fn test_parent_ids_are_wired() {
        let table = parse("<w:tbl><w:tr><w:tc><w:p/><w:tbl><w:tr><w:tc/></w:tr></w:tbl></w:tc></w:tr></w:tbl>");
        let row = &table.rows()[0];
        assert_eq!(row.parent(), Some(table.id()));
        let cell = &row.cells()[0];
        assert_eq!(cell.parent(), Some(row.id()));
        assert!(cell.paragraphs().all(|p| p.parent() == Some(cell.id())));
        let nested = cell.tables().next().expect("nested table");
        assert_eq!(nested.parent(), Some(cell.id()));
        assert_eq!(nested.rows()[0].cell_count(), 1);
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let table = parse(concat!(
            r#"<w:body><w:p/><w:tbl><w:tblPr><w:tblLayout w:type="fixed"/><w:tblCellMar><w:top w:w="0"/></w:tblCellMar></w:tblPr>"#,
            r#"<w:tr><w:tblPrEx><w:x/></w:tblPrEx><w:tc><w:tcPr><w:noWrap/><w:tcW w:w="10"/></w:tcPr>"#,
            r#"<w:sdt><w:sdtContent><w:p/></w:sdtContent></w:sdt><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>x</w:t><w:tab/></w:r></w:p>"#,
            r#"</w:tc></w:tr></w:tbl></w:body>"#
        ));
        assert!(table.properties.is_empty());
        let cell = table.cell(0, 0).expect("cell");
        assert_eq!(cell.width(), Some(TableWidth::dxa(10)));
        assert_eq!(cell.paragraphs().count(), 1);
        assert_eq!(cell.text(), "x");
    }

    #[test]
    fn test_empty_attributes_are_absent() {
        let table = parse(r#"<w:tbl><w:tblGrid><w:gridCol w:w=""/></w:tblGrid><w:tr><w:tc><w:tcPr><w:gridSpan w:val=""/></w:tcPr></w:tc></w:tr></w:tbl>"#);
        assert_eq!(table.grid.widths(), vec![0]);
        assert_eq!(table.cell(0, 0).and_then(|c| c.properties().grid_span), None);
    }

    #[test]
    fn test_invalid_integer_fails() {
        let err = TableParser::default()
            .parse(r#"<w:tbl><w:tr><w:trPr><w:trHeight w:val="tall"/></w:trPr></w:tr></w:tbl>"#)
            .unwrap_err();
        assert!(
            matches!(err, DocxError::InvalidInteger { ref element, .. } if element == "trHeight")
        );
    }

    #[test]
    fn test_missing_table() {
        let err = TableParser::default().parse("<w:body><w:p/></w:body>").unwrap_err();
        assert!(matches!(err, DocxError::MissingElement(_)));
    }

    #[test]
    fn test_nesting_limit() {
        let xml = "<w:tbl><w:tr><w:tc><w:tbl><w:tr><w:tc><w:tbl/></w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl>";
        let options = ImportOptions {
            max_nesting_depth: 2,
            ..Default::default()
        };
        let err = TableParser::new(options).parse(xml).unwrap_err();
        assert!(matches!(err, DocxError::NestingTooDeep { depth: 3, limit: 2 }));
        assert!(TableParser::default().parse(xml).is_ok());
    }

    #[test]
    fn test_parse_all() {
        let xml = "<w:body><w:tbl><w:tr><w:tc><w:tbl/></w:tc></w:tr></w:tbl><w:p/><w:tbl/></w:body>";
        let tables = TableParser::default().parse_all(xml).expect("valid body");
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].row_count(), 1);
    }

    #[test]
    fn test_derived_tags_are_stripped() {
        let xml = concat!(
            "<w:tbl><w:tblPr>",
            r#"<w:tblLook w:val="0420" w:firstRow="1" w:lastRow="0" w:firstColumn="0" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#,
            "</w:tblPr>",
            r#"<w:tr><w:trPr><w:cnfStyle w:val="100000000000" w:firstRow="1"/></w:trPr><w:tc><w:p/></w:tc></w:tr>"#,
            r#"<w:tr><w:trPr><w:cnfStyle w:val="000000100000" w:oddHBand="1"/></w:trPr><w:tc><w:p/></w:tc></w:tr>"#,
            r#"<w:tr><w:trPr><w:cnfStyle w:val="000100000000"/></w:trPr><w:tc><w:p/></w:tc></w:tr>"#,
            "</w:tbl>"
        );
        let table = parse(xml);
        assert_eq!(table.rows()[0].properties.cnf_style, None);
        assert_eq!(table.rows()[1].properties.cnf_style, None);
        // Not derivable from the look, so it is authored data.
        assert_eq!(
            table.rows()[2].properties.cnf_style,
            Some(ConfStyle::new(CnfFlags::LAST_COLUMN))
        );

        let options = ImportOptions {
            derive_conditional_styles: false,
            ..Default::default()
        };
        let table = TableParser::new(options).parse(xml).expect("valid table");
        assert_eq!(
            table.rows()[0].properties.cnf_style,
            Some(ConfStyle::new(CnfFlags::FIRST_ROW))
        );
    }

    #[test]
    fn test_malformed_xml_fails() {
        let result = TableParser::default().parse("<w:tbl><w:tr></w:tc></w:tbl>");
        assert!(matches!(result, Err(DocxError::XmlParse(_))));
    }
}
