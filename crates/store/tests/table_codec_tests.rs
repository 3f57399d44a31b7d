//! Integration tests for table import/export
//!
//! Tables are built through the doc_model API, encoded to `w:tbl` markup and
//! decoded back. Covers grid assignment, merging, conditional-style tagging,
//! tolerant decoding of markup written by other producers, and round trips.

use doc_model::{
    Border, BorderSides, DocModelError, HeightRule, Justification, StyleOptions, Table,
    TableWidth, VerticalAlignment, VerticalMerge,
};
use proptest::prelude::*;
use store::{
    table_from_xml, table_from_xml_with, table_to_xml, table_to_xml_with, tables_from_xml,
    DocxError, ExportOptions, ImportOptions,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn encode(table: &Table) -> String {
    table_to_xml(table).expect("encode")
}

fn decode(xml: &str) -> Table {
    table_from_xml(xml).expect("decode")
}

/// Split encoded markup into the per-row fragments (`<w:tr>` ... )
fn rows_of(xml: &str) -> Vec<&str> {
    xml.split("<w:tr>").skip(1).collect()
}

// =============================================================================
// Grid assignment
// =============================================================================

#[test]
fn test_col_grid_widths_reach_every_cell() {
    init_tracing();
    let mut table = Table::new(2, 3, 0);
    assert!(table
        .rows()
        .iter()
        .flat_map(|r| r.cells())
        .all(|c| c.width() == Some(TableWidth::auto())));

    table.set_col_grid(&[100, 200, 300]);
    let decoded = decode(&encode(&table));

    assert_eq!(decoded.properties.width, Some(TableWidth::dxa(600)));
    assert_eq!(decoded.grid.widths(), vec![100, 200, 300]);
    for row in decoded.rows() {
        let widths: Vec<_> = row.cells().iter().filter_map(|c| c.width()).collect();
        assert_eq!(
            widths,
            vec![TableWidth::dxa(100), TableWidth::dxa(200), TableWidth::dxa(300)]
        );
    }
}

#[test]
fn test_merge_then_col_grid_sums_members() {
    let mut table = Table::new(3, 3, 0);
    table.merge(0, 1, 0, 1).expect("aligned merge");
    table.set_col_grid(&[100, 200, 300]);

    let xml = encode(&table);
    let rows = rows_of(&xml);
    assert!(rows[0].contains(
        r#"<w:tcW w:w="300" w:type="dxa"/><w:gridSpan w:val="2"/><w:vMerge w:val="restart"/>"#
    ));
    assert!(rows[1]
        .contains(r#"<w:tcW w:w="300" w:type="dxa"/><w:gridSpan w:val="2"/><w:vMerge/>"#));
    assert!(!rows[2].contains("gridSpan"));

    // A spanned column without a fixed width leaves the merged width unknown.
    table.set_col_grid(&[0, 200, 300]);
    let decoded = decode(&encode(&table));
    assert_eq!(decoded.cell(0, 0).and_then(|c| c.width()), Some(TableWidth::auto()));
    assert_eq!(decoded.cell(0, 1).and_then(|c| c.width()), Some(TableWidth::dxa(300)));
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn test_merge_block_survives_round_trip() {
    let mut table = Table::new(3, 3, 0);
    table.merge(0, 1, 0, 1).expect("aligned merge");

    let decoded = decode(&encode(&table));
    assert_eq!(decoded.rows()[0].cell_count(), 2);
    assert_eq!(decoded.rows()[1].cell_count(), 2);
    assert_eq!(decoded.rows()[2].cell_count(), 3);

    let top = decoded.cell(0, 0).expect("merged cell");
    assert_eq!(top.grid_span(), 2);
    assert_eq!(top.v_merge(), Some(VerticalMerge::Restart));
    let below = decoded.cell(1, 0).expect("merged cell");
    assert_eq!(below.grid_span(), 2);
    assert_eq!(below.v_merge(), Some(VerticalMerge::Continue));
    assert_eq!(decoded.cell(0, 1).and_then(|c| c.v_merge()), None);
}

#[test]
fn test_rejected_merge_leaves_markup_unchanged() {
    let mut table = Table::new(3, 3, 0);
    table.merge(0, 1, 0, 1).expect("aligned merge");
    let before = encode(&table);

    let err = table.merge(1, 2, 1, 2).unwrap_err();
    assert!(matches!(err, DocModelError::MisalignedMerge { row: 1, .. }));
    assert!(table.merge(0, 5, 0, 1).is_err());
    assert_eq!(encode(&table), before);
}

#[test]
fn test_overlapping_vertical_merge_leaves_markup_unchanged() {
    let mut table = Table::new(3, 3, 0);
    table.merge(0, 1, 0, 1).expect("aligned merge");
    let before = encode(&table);

    assert!(matches!(
        table.merge(1, 2, 0, 1),
        Err(DocModelError::OverlappingMerge { .. })
    ));
    assert!(matches!(
        table.merge(0, 0, 0, 2),
        Err(DocModelError::OverlappingMerge { .. })
    ));
    let xml = encode(&table);
    assert_eq!(xml, before);
    assert_eq!(xml.matches(r#"<w:vMerge w:val="restart"/>"#).count(), 1);
    assert_eq!(xml.matches("<w:vMerge/>").count(), 1);

    // The same merge decoded from markup is still guarded.
    let mut decoded = decode(&xml);
    assert!(decoded.merge(1, 2, 0, 1).is_err());
    assert_eq!(encode(&decoded), before);
}

#[test]
fn test_merge_on_decoded_table() {
    let mut table = Table::new(2, 4, 0);
    table.merge(0, 0, 1, 2).expect("aligned merge");
    let mut decoded = decode(&encode(&table));

    // Column 1..=2 is already one cell in row 0, so only exact matches align.
    assert!(decoded.merge(0, 1, 1, 1).is_err());
    decoded.merge(0, 1, 1, 2).expect("aligned merge");
    assert_eq!(decoded.rows()[1].cell_count(), 3);
    assert_eq!(decoded.cell(1, 1).and_then(|c| c.v_merge()), Some(VerticalMerge::Continue));
}

// =============================================================================
// Conditional styles
// =============================================================================

#[test]
fn test_first_row_and_banding_tags() {
    let mut table = Table::new(4, 2, 0);
    table.set_style("GridTable4", StyleOptions::FIRST_ROW | StyleOptions::HORIZONTAL_BAND);

    let xml = encode(&table);
    assert!(xml.contains(r#"<w:tblLook w:val="0420""#));
    let rows = rows_of(&xml);
    assert!(rows[0].contains(r#"<w:trPr><w:cnfStyle w:val="100000000000""#));
    assert!(rows[1].contains(r#"<w:trPr><w:cnfStyle w:val="000000100000""#));
    assert!(!rows[2].contains("<w:trPr>"));
    assert!(rows[3].contains(r#"<w:trPr><w:cnfStyle w:val="000000100000""#));
}

#[test]
fn test_edge_columns_tag_cells_and_paragraphs() {
    let mut table = Table::new(2, 3, 0);
    table.set_style(
        "GridTable4",
        StyleOptions::FIRST_COLUMN | StyleOptions::LAST_COLUMN | StyleOptions::HORIZONTAL_BAND,
    );

    let xml = encode(&table);
    let first_row = rows_of(&xml)[0];
    let cells: Vec<_> = first_row.split("<w:tc>").skip(1).collect();
    assert!(cells[0].starts_with(r#"<w:tcPr><w:cnfStyle w:val="001000000000""#));
    assert!(cells[1].contains(r#"<w:p><w:pPr><w:cnfStyle w:val="000000100000""#));
    assert!(cells[2].starts_with(r#"<w:tcPr><w:cnfStyle w:val="000100000000""#));

    let second_row = rows_of(&xml)[1];
    let middle = second_row.split("<w:tc>").nth(2).expect("middle cell");
    assert!(middle.contains(r#"<w:p><w:pPr><w:cnfStyle w:val="000000000000""#));
}

#[test]
fn test_restyling_replaces_derived_tags() {
    let mut table = Table::new(3, 1, 0);
    table.set_style("GridTable4", StyleOptions::LAST_ROW);
    let xml = encode(&table);
    assert!(rows_of(&xml)[2].contains(r#"w:val="010000000000""#));

    table.set_style("GridTable4", StyleOptions::empty());
    assert!(!encode(&table).contains("<w:cnfStyle"));
}

#[test]
fn test_derived_tags_are_not_persisted() {
    let mut table = Table::new(2, 2, 0);
    table.set_style("GridTable4", StyleOptions::FIRST_ROW | StyleOptions::FIRST_COLUMN);
    let xml = encode(&table);

    let decoded = decode(&xml);
    assert_eq!(decoded.rows()[0].properties.cnf_style, None);
    assert!(decoded
        .rows()
        .iter()
        .flat_map(|r| r.cells())
        .all(|c| c.cnf_style().is_none()));

    let kept = table_from_xml_with(
        &xml,
        &ImportOptions {
            derive_conditional_styles: false,
            ..Default::default()
        },
    )
    .expect("decode");
    assert!(kept.rows()[0].properties.cnf_style.is_some());

    let plain = table_to_xml_with(
        &table,
        &ExportOptions {
            apply_conditional_styles: false,
            ..Default::default()
        },
    )
    .expect("encode");
    assert!(!plain.contains("<w:cnfStyle"));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_explicit_grid_round_trip() {
    let mut table = Table::with_twips(&[400, 0], &[1440, 2880], 0);
    table
        .set_justification(Justification::Center)
        .set_borders(BorderSides::all(), Border::single(4, "auto"));
    {
        let row = table.row_mut(1).expect("row");
        row.set_height(600, Some(HeightRule::Exact));
        let cell = row.cell_mut(1).expect("cell");
        cell.set_shade("clear", "auto", "D9D9D9")
            .set_vertical_alignment(VerticalAlignment::Bottom)
            .add_paragraph()
            .add_text("a < b & c");
    }

    let xml = encode(&table);
    assert!(xml.contains(r#"<w:tblW w:w="4320" w:type="dxa"/>"#));
    assert!(xml.contains("<w:t xml:space=\"preserve\">a &lt; b &amp; c</w:t>"));

    let decoded = decode(&xml);
    assert_eq!(decoded.grid.widths(), vec![1440, 2880]);
    assert_eq!(decoded.rows()[0].properties.height.map(|h| h.val), Some(400));
    assert_eq!(
        decoded.rows()[1].properties.height.and_then(|h| h.rule),
        Some(HeightRule::Exact)
    );
    let cell = decoded.cell(1, 1).expect("cell");
    assert_eq!(cell.text(), "a < b & c");
    assert_eq!(cell.properties().vertical_alignment, Some(VerticalAlignment::Bottom));
    assert_eq!(encode(&decoded), xml);
}

#[test]
fn test_namespace_declaration() {
    let table = Table::new(1, 1, 0);
    let xml = table_to_xml_with(
        &table,
        &ExportOptions {
            declare_namespace: true,
            ..Default::default()
        },
    )
    .expect("encode");
    assert!(xml.starts_with(&format!(r#"<w:tbl xmlns:w="{}">"#, store::docx::namespaces::W)));
    assert_eq!(decode(&xml).row_count(), 1);
}

// =============================================================================
// Decoding markup from other producers
// =============================================================================

const WORD_TABLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
            xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml">
  <w:body>
    <w:p><w:r><w:t>Before</w:t></w:r></w:p>
    <w:tbl>
      <w:tblPr>
        <w:tblStyle w:val="TableGrid"/>
        <w:tblW w:w="0" w:type="auto"/>
        <w:tblLayout w:type="fixed"/>
        <w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>
      </w:tblPr>
      <w:tblGrid>
        <w:gridCol w:w="4675"/>
        <w:gridCol w:w="4675"/>
      </w:tblGrid>
      <w:tr w:rsidR="00A1B2C3" w14:paraId="1A2B3C4D">
        <w:trPr><w:cantSplit/></w:trPr>
        <w:tc>
          <w:tcPr><w:tcW w:w="4675" w:type="dxa"/><w:tcMar><w:left w:w="0"/></w:tcMar></w:tcPr>
          <w:p w14:paraId="11111111">
            <w:pPr><w:spacing w:after="0"/></w:pPr>
            <w:r><w:rPr><w:b/></w:rPr><w:t>Name</w:t></w:r>
            <w:proofErr w:type="spellStart"/>
          </w:p>
        </w:tc>
        <w:tc>
          <w:tcPr><w:tcW w:w="4675" w:type="dxa"/></w:tcPr>
          <w:p><w:r><w:t xml:space="preserve">Value </w:t></w:r><w:bookmarkStart w:id="0" w:name="x"/></w:p>
        </w:tc>
      </w:tr>
    </w:tbl>
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#;

#[test]
fn test_decodes_word_document_body() {
    init_tracing();
    let table = decode(WORD_TABLE);
    assert_eq!(table.properties.width, Some(TableWidth::auto()));
    let look = table.properties.look.as_ref().expect("look");
    assert!(look.first_row && look.first_column && look.no_v_band);
    assert_eq!(table.grid.widths(), vec![4675, 4675]);
    assert_eq!(table.row_count(), 1);
    assert!(table.rows()[0].properties.is_empty());
    assert_eq!(table.cell(0, 0).map(|c| c.text()), Some("Name".to_string()));
    assert_eq!(table.cell(0, 1).map(|c| c.text()), Some("Value ".to_string()));

    let all = tables_from_xml(WORD_TABLE).expect("decode");
    assert_eq!(all.len(), 1);
}

#[test]
fn test_non_numeric_integer_is_an_error() {
    let xml = r#"<w:tbl><w:tblGrid><w:gridCol w:w="wide"/></w:tblGrid></w:tbl>"#;
    match table_from_xml(xml) {
        Err(DocxError::InvalidInteger {
            element,
            attribute,
            value,
        }) => {
            assert_eq!(element, "gridCol");
            assert_eq!(attribute, "w");
            assert_eq!(value, "wide");
        }
        other => panic!(
            "expected an invalid integer error, got {:?}",
            other.map(|t| t.row_count())
        ),
    }
}

#[test]
fn test_nested_tables() {
    let mut inner = Table::new(1, 2, 0);
    inner
        .cell_mut(0, 1)
        .expect("cell")
        .add_paragraph()
        .add_text("inner");
    let mut outer = Table::new(1, 1, 0);
    outer.cell_mut(0, 0).expect("cell").add_table(inner);

    let xml = encode(&outer);
    let decoded = decode(&xml);
    let nested = decoded
        .cell(0, 0)
        .and_then(|c| c.tables().next())
        .expect("nested table");
    assert_eq!(nested.rows()[0].cell_count(), 2);
    assert_eq!(nested.cell(0, 1).map(|c| c.text()), Some("inner".to_string()));
    assert_eq!(encode(&decoded), xml);

    let shallow = ImportOptions {
        max_nesting_depth: 1,
        ..Default::default()
    };
    assert!(matches!(
        table_from_xml_with(&xml, &shallow),
        Err(DocxError::NestingTooDeep { depth: 2, limit: 1 })
    ));
}

// =============================================================================
// Round trip
// =============================================================================

#[derive(Debug, Clone)]
struct Recipe {
    rows: usize,
    cols: usize,
    width: i64,
    options: u16,
    merge: Option<(usize, usize, usize, usize)>,
    grid: Option<Vec<i64>>,
    texts: Vec<(usize, usize, String)>,
    heights: Vec<(usize, i64)>,
}

fn recipe() -> impl Strategy<Value = Recipe> {
    (1usize..5, 1usize..5).prop_flat_map(|(rows, cols)| {
        (
            Just(rows),
            Just(cols),
            -100i64..10_000,
            0u16..64,
            proptest::option::of((0..rows, 0..rows, 0..cols, 0..cols)),
            proptest::option::of(proptest::collection::vec(0i64..3000, cols)),
            proptest::collection::vec((0..rows, 0..cols, "[a-zA-Z &<>\"']{0,12}"), 0..4),
            proptest::collection::vec((0..rows, -10i64..800), 0..3),
        )
            .prop_map(
                |(rows, cols, width, options, merge, grid, texts, heights)| Recipe {
                    rows,
                    cols,
                    width,
                    options,
                    merge,
                    grid,
                    texts,
                    heights,
                },
            )
    })
}

fn build(recipe: &Recipe) -> Table {
    let mut table = Table::new(recipe.rows, recipe.cols, recipe.width);
    let options = StyleOptions::from_bits_truncate(recipe.options << 5);
    table.set_style("GridTable4", options);
    if let Some((r0, r1, c0, c1)) = recipe.merge {
        let _ = table.merge(r0.min(r1), r0.max(r1), c0.min(c1), c0.max(c1));
    }
    if let Some(ref grid) = recipe.grid {
        table.set_col_grid(grid);
    }
    for &(row, height) in &recipe.heights {
        if let Some(row) = table.row_mut(row) {
            row.set_height(height, Some(HeightRule::AtLeast));
        }
    }
    for (row, col, text) in &recipe.texts {
        if let Some(cell) = table.cell_mut(*row, *col) {
            cell.add_paragraph().add_text(text.as_str());
        }
    }
    table
}

proptest! {
    #[test]
    fn prop_encode_decode_encode_is_stable(recipe in recipe()) {
        let table = build(&recipe);
        let xml = encode(&table);
        let decoded = decode(&xml);
        prop_assert_eq!(encode(&decoded), xml);
        prop_assert_eq!(decoded.row_count(), table.row_count());
        for (row, original) in decoded.rows().iter().zip(table.rows()) {
            prop_assert_eq!(row.cell_count(), original.cell_count());
        }
    }

    #[test]
    fn prop_uniform_table_shape(rows in 1usize..6, cols in 1usize..6, width in 1i64..20_000) {
        let decoded = decode(&encode(&Table::new(rows, cols, width)));
        prop_assert_eq!(decoded.row_count(), rows);
        prop_assert!(decoded.rows().iter().all(|r| r.cell_count() == cols));
        prop_assert_eq!(decoded.properties.width, Some(TableWidth::dxa(width)));
        prop_assert!(decoded.grid.is_empty());
    }
}
