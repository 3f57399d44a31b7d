//! Table writer for DOCX markup
//!
//! Generates `w:tbl` elements from doc_model tables. Optional property groups
//! are emitted only when set, and conditional-format tags derived from the
//! table look are stamped on the way out without touching the model.

use crate::docx::attributes::CNF_ATTRIBUTES;
use crate::docx::error::DocxResult;
use crate::docx::namespaces;
use crate::docx::options::ExportOptions;
use doc_model::{
    BlockContent, Border, CellBorders, CellProperties, CellTags, ConfStyle, Paragraph,
    RowProperties, RowTags, Shade, Table, TableBorders, TableCell, TableLook, TablePosition,
    TableProperties, TableRow, TableWidth, VerticalMerge,
};
use quick_xml::escape::escape;
use tracing::{debug, warn};

/// Writer for table elements
pub struct TableWriter {
    options: ExportOptions,
}

impl TableWriter {
    /// Create a new table writer
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Write a table element. Tables without rows produce no output.
    pub fn write_table(&self, xml: &mut String, table: &Table) -> DocxResult<()> {
        self.write_table_element(xml, table, true)
    }

    fn write_table_element(&self, xml: &mut String, table: &Table, root: bool) -> DocxResult<()> {
        if table.rows().is_empty() {
            debug!("skipping table without rows");
            return Ok(());
        }
        if let Err(err) = table.check_grid() {
            warn!(%err, "table rows do not fit the declared grid");
        }

        if root && self.options.declare_namespace {
            xml.push_str(&format!(r#"<w:tbl xmlns:w="{}">"#, namespaces::W));
        } else {
            xml.push_str("<w:tbl>");
        }

        self.write_table_properties(xml, &table.properties);
        self.write_table_grid(xml, table);

        let tags = self
            .options
            .apply_conditional_styles
            .then(|| table.conditional_tags());
        for (i, row) in table.rows().iter().enumerate() {
            let row_tags = tags.as_ref().and_then(|t| t.row(i));
            self.write_table_row(xml, row, row_tags)?;
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }

    /// Write table properties
    fn write_table_properties(&self, xml: &mut String, props: &TableProperties) {
        if props.is_empty() {
            return;
        }
        xml.push_str("<w:tblPr>");

        if let Some(ref style) = props.style {
            write_val_element(xml, "tblStyle", &style.val);
        }
        if let Some(ref position) = props.position {
            write_position(xml, position);
        }
        if let Some(ref width) = props.width {
            write_width(xml, "tblW", width);
        }
        if let Some(ref justification) = props.justification {
            write_val_element(xml, "jc", justification.as_str());
        }
        if let Some(ref borders) = props.borders {
            write_table_borders(xml, borders);
        }
        if let Some(ref look) = props.look {
            write_look(xml, look);
        }

        xml.push_str("</w:tblPr>");
    }

    /// Write table grid
    fn write_table_grid(&self, xml: &mut String, table: &Table) {
        if table.grid.is_empty() {
            xml.push_str("<w:tblGrid/>");
            return;
        }
        xml.push_str("<w:tblGrid>");
        for col in &table.grid.columns {
            xml.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, col.w));
        }
        xml.push_str("</w:tblGrid>");
    }

    /// Write a table row
    fn write_table_row(
        &self,
        xml: &mut String,
        row: &TableRow,
        tags: Option<&RowTags>,
    ) -> DocxResult<()> {
        xml.push_str("<w:tr>");

        let cnf_style = tags.and_then(|t| t.row).or(row.properties.cnf_style);
        write_row_properties(xml, &row.properties, cnf_style);

        for (j, cell) in row.cells().iter().enumerate() {
            let cell_tags = tags.map(|t| t.cell(j)).unwrap_or_default();
            self.write_table_cell(xml, cell, cell_tags)?;
        }

        xml.push_str("</w:tr>");
        Ok(())
    }

    /// Write a table cell and its block content
    fn write_table_cell(
        &self,
        xml: &mut String,
        cell: &TableCell,
        tags: CellTags,
    ) -> DocxResult<()> {
        xml.push_str("<w:tc>");

        let cnf_style = tags.cell.or(cell.cnf_style());
        write_cell_properties(xml, cell.properties(), cnf_style);

        for item in cell.content() {
            match item {
                BlockContent::Paragraph(para) => write_paragraph(xml, para, tags.paragraphs),
                BlockContent::Table(nested) => self.write_table_element(xml, nested, false)?,
            }
        }

        // A cell must hold at least one paragraph
        if !cell.has_paragraph() {
            write_paragraph(xml, &Paragraph::new(), tags.paragraphs);
        }

        xml.push_str("</w:tc>");
        Ok(())
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

// =============================================================================
// Property groups
// =============================================================================

fn write_row_properties(xml: &mut String, props: &RowProperties, cnf_style: Option<ConfStyle>) {
    if cnf_style.is_none() && props.height.is_none() && props.justification.is_none() {
        return;
    }
    xml.push_str("<w:trPr>");
    if let Some(style) = cnf_style {
        write_cnf_style(xml, style);
    }
    if let Some(height) = props.height {
        xml.push_str(&format!(r#"<w:trHeight w:val="{}""#, height.val));
        if let Some(rule) = height.rule {
            push_attr(xml, "hRule", rule.as_str());
        }
        xml.push_str("/>");
    }
    if let Some(ref justification) = props.justification {
        write_val_element(xml, "jc", justification.as_str());
    }
    xml.push_str("</w:trPr>");
}

fn write_cell_properties(xml: &mut String, props: &CellProperties, cnf_style: Option<ConfStyle>) {
    let has_borders = props.borders.as_ref().is_some_and(|b| !b.is_empty());
    if cnf_style.is_none()
        && props.width.is_none()
        && props.grid_span.is_none()
        && props.v_merge.is_none()
        && !has_borders
        && props.shade.is_none()
        && props.vertical_alignment.is_none()
    {
        return;
    }

    xml.push_str("<w:tcPr>");
    if let Some(style) = cnf_style {
        write_cnf_style(xml, style);
    }
    if let Some(ref width) = props.width {
        write_width(xml, "tcW", width);
    }
    if let Some(span) = props.grid_span {
        xml.push_str(&format!(r#"<w:gridSpan w:val="{}"/>"#, span));
    }
    match props.v_merge {
        Some(VerticalMerge::Restart) => xml.push_str(r#"<w:vMerge w:val="restart"/>"#),
        Some(VerticalMerge::Continue) => xml.push_str("<w:vMerge/>"),
        None => {}
    }
    if let Some(ref borders) = props.borders {
        write_cell_borders(xml, borders);
    }
    if let Some(ref shade) = props.shade {
        write_shade(xml, shade);
    }
    if let Some(alignment) = props.vertical_alignment {
        write_val_element(xml, "vAlign", alignment.as_str());
    }
    xml.push_str("</w:tcPr>");
}

fn write_paragraph(xml: &mut String, para: &Paragraph, tag: Option<ConfStyle>) {
    let props = &para.properties;
    let cnf_style = tag.or(props.cnf_style);
    let has_properties =
        cnf_style.is_some() || props.style.is_some() || props.justification.is_some();

    if !has_properties && para.is_empty() {
        xml.push_str("<w:p/>");
        return;
    }

    xml.push_str("<w:p>");
    if has_properties {
        xml.push_str("<w:pPr>");
        if let Some(ref style) = props.style {
            write_val_element(xml, "pStyle", style);
        }
        if let Some(ref justification) = props.justification {
            write_val_element(xml, "jc", justification.as_str());
        }
        if let Some(style) = cnf_style {
            write_cnf_style(xml, style);
        }
        xml.push_str("</w:pPr>");
    }
    for run in para.runs() {
        xml.push_str(r#"<w:r><w:t xml:space="preserve">"#);
        xml.push_str(&escape(run.text.as_str()));
        xml.push_str("</w:t></w:r>");
    }
    xml.push_str("</w:p>");
}

// =============================================================================
// Leaf elements
// =============================================================================

fn push_attr(xml: &mut String, name: &str, value: &str) {
    xml.push_str(&format!(r#" w:{}="{}""#, name, escape(value)));
}

fn write_val_element(xml: &mut String, element: &str, val: &str) {
    xml.push_str(&format!("<w:{}", element));
    push_attr(xml, "val", val);
    xml.push_str("/>");
}

fn write_width(xml: &mut String, element: &str, width: &TableWidth) {
    xml.push_str(&format!(
        r#"<w:{} w:w="{}" w:type="{}"/>"#,
        element,
        width.w,
        width.width_type.as_str()
    ));
}

fn write_position(xml: &mut String, position: &TablePosition) {
    xml.push_str("<w:tblpPr");
    let ints = [
        ("leftFromText", position.left_from_text),
        ("rightFromText", position.right_from_text),
    ];
    for (name, value) in ints {
        if value != 0 {
            push_attr(xml, name, &value.to_string());
        }
    }
    let texts = [
        ("vertAnchor", &position.vert_anchor),
        ("horzAnchor", &position.horz_anchor),
        ("tblpXSpec", &position.x_spec),
        ("tblpYSpec", &position.y_spec),
    ];
    for (name, value) in texts {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            push_attr(xml, name, value);
        }
    }
    for (name, value) in [("tblpX", position.x), ("tblpY", position.y)] {
        if value != 0 {
            push_attr(xml, name, &value.to_string());
        }
    }
    xml.push_str("/>");
}

fn write_look(xml: &mut String, look: &TableLook) {
    xml.push_str("<w:tblLook");
    push_attr(xml, "val", &look.val);
    let flags = [
        ("firstRow", look.first_row),
        ("lastRow", look.last_row),
        ("firstColumn", look.first_column),
        ("lastColumn", look.last_column),
        ("noHBand", look.no_h_band),
        ("noVBand", look.no_v_band),
    ];
    for (name, on) in flags {
        xml.push_str(&format!(r#" w:{}="{}""#, name, u8::from(on)));
    }
    xml.push_str("/>");
}

fn write_cnf_style(xml: &mut String, style: ConfStyle) {
    xml.push_str(&format!(r#"<w:cnfStyle w:val="{}""#, style.val()));
    for (name, flag) in &CNF_ATTRIBUTES {
        xml.push_str(&format!(r#" w:{}="{}""#, name, u8::from(style.flags.contains(*flag))));
    }
    xml.push_str("/>");
}

fn write_border(xml: &mut String, side: &str, border: &Border) {
    xml.push_str(&format!("<w:{}", side));
    push_attr(xml, "val", border.style.as_str());
    if border.size != 0 {
        push_attr(xml, "sz", &border.size.to_string());
    }
    if border.space != 0 {
        push_attr(xml, "space", &border.space.to_string());
    }
    if !border.color.is_empty() {
        push_attr(xml, "color", &border.color);
    }
    xml.push_str("/>");
}

fn write_sides(xml: &mut String, element: &str, sides: &[(&str, &Option<Border>)]) {
    xml.push_str(&format!("<w:{}>", element));
    for (side, border) in sides {
        if let Some(border) = border {
            write_border(xml, side, border);
        }
    }
    xml.push_str(&format!("</w:{}>", element));
}

fn write_table_borders(xml: &mut String, borders: &TableBorders) {
    if borders.is_empty() {
        return;
    }
    write_sides(
        xml,
        "tblBorders",
        &[
            ("top", &borders.top),
            ("left", &borders.left),
            ("bottom", &borders.bottom),
            ("right", &borders.right),
            ("insideH", &borders.inside_h),
            ("insideV", &borders.inside_v),
        ],
    );
}

fn write_cell_borders(xml: &mut String, borders: &CellBorders) {
    if borders.is_empty() {
        return;
    }
    write_sides(
        xml,
        "tcBorders",
        &[
            ("top", &borders.top),
            ("left", &borders.left),
            ("bottom", &borders.bottom),
            ("right", &borders.right),
        ],
    );
}

fn write_shade(xml: &mut String, shade: &Shade) {
    xml.push_str("<w:shd");
    for (name, value) in [("val", &shade.val), ("color", &shade.color), ("fill", &shade.fill)] {
        if !value.is_empty() {
            push_attr(xml, name, value);
        }
    }
    xml.push_str("/>");
}

// =============================================================================
// Tests
// =============================================================================
