//! Declarative attribute schema for table elements
//!
//! Each element with more than one attribute gets a static table mapping local
//! attribute names to typed setters. Decoding walks the element's attributes
//! once and dispatches through the table; unknown attributes are ignored and
//! empty values leave the target untouched.

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::reader::XmlParser;
use doc_model::{
    Border, BorderStyle, CnfFlags, ConfStyle, GridColumn, HeightRule, RowHeight, Shade,
    TableLook, TablePosition, TableWidth, WidthType,
};
use quick_xml::events::BytesStart;

/// How an attribute value is converted before it is stored
pub enum AttrKind<T> {
    /// Integer; non-numeric text is a hard error
    Int(fn(&mut T, i64)),
    /// Free text
    Text(fn(&mut T, &str)),
    /// On/off switch
    Flag(fn(&mut T, bool)),
}

/// One attribute of an element's schema
pub struct AttrSpec<T> {
    pub name: &'static str,
    pub kind: AttrKind<T>,
}

/// Apply the attributes of `event` to `target` according to `specs`
pub fn apply_attributes<T>(
    event: &BytesStart,
    target: &mut T,
    specs: &[AttrSpec<T>],
) -> DocxResult<()> {
    for attr in event.attributes() {
        let attr = attr?;
        let key = attr.key.local_name();
        let Some(spec) = specs.iter().find(|s| s.name.as_bytes() == key.as_ref()) else {
            continue;
        };
        let value = attr
            .unescape_value()
            .map_err(|e| DocxError::XmlParse(e.to_string()))?;
        if value.is_empty() {
            continue;
        }
        match &spec.kind {
            AttrKind::Int(set) => {
                let element = XmlParser::local_name(event);
                set(target, XmlParser::parse_int(&element, spec.name, &value)?)
            }
            AttrKind::Text(set) => set(target, &value),
            AttrKind::Flag(set) => set(target, XmlParser::parse_flag(&value)),
        }
    }
    Ok(())
}

/// `w:tblpPr`
pub static POSITION_ATTRIBUTES: &[AttrSpec<TablePosition>] = &[
    AttrSpec { name: "leftFromText", kind: AttrKind::Int(|p, v| p.left_from_text = v) },
    AttrSpec { name: "rightFromText", kind: AttrKind::Int(|p, v| p.right_from_text = v) },
    AttrSpec {
        name: "vertAnchor",
        kind: AttrKind::Text(|p, v| p.vert_anchor = Some(v.to_string())),
    },
    AttrSpec {
        name: "horzAnchor",
        kind: AttrKind::Text(|p, v| p.horz_anchor = Some(v.to_string())),
    },
    AttrSpec { name: "tblpXSpec", kind: AttrKind::Text(|p, v| p.x_spec = Some(v.to_string())) },
    AttrSpec { name: "tblpYSpec", kind: AttrKind::Text(|p, v| p.y_spec = Some(v.to_string())) },
    AttrSpec { name: "tblpX", kind: AttrKind::Int(|p, v| p.x = v) },
    AttrSpec { name: "tblpY", kind: AttrKind::Int(|p, v| p.y = v) },
];

/// `w:tblW` and `w:tcW`
pub static WIDTH_ATTRIBUTES: &[AttrSpec<TableWidth>] = &[
    AttrSpec { name: "w", kind: AttrKind::Int(|w, v| w.w = v) },
    AttrSpec { name: "type", kind: AttrKind::Text(|w, v| w.width_type = WidthType::parse(v)) },
];

/// `w:tblLook`
pub static LOOK_ATTRIBUTES: &[AttrSpec<TableLook>] = &[
    AttrSpec { name: "val", kind: AttrKind::Text(|l, v| l.val = v.to_string()) },
    AttrSpec { name: "firstRow", kind: AttrKind::Flag(|l, v| l.first_row = v) },
    AttrSpec { name: "lastRow", kind: AttrKind::Flag(|l, v| l.last_row = v) },
    AttrSpec { name: "firstColumn", kind: AttrKind::Flag(|l, v| l.first_column = v) },
    AttrSpec { name: "lastColumn", kind: AttrKind::Flag(|l, v| l.last_column = v) },
    AttrSpec { name: "noHBand", kind: AttrKind::Flag(|l, v| l.no_h_band = v) },
    AttrSpec { name: "noVBand", kind: AttrKind::Flag(|l, v| l.no_v_band = v) },
];

/// Every border side (`w:top`, `w:insideH`, ...)
pub static BORDER_ATTRIBUTES: &[AttrSpec<Border>] = &[
    AttrSpec { name: "val", kind: AttrKind::Text(|b, v| b.style = BorderStyle::parse(v)) },
    AttrSpec { name: "sz", kind: AttrKind::Int(|b, v| b.size = v) },
    AttrSpec { name: "space", kind: AttrKind::Int(|b, v| b.space = v) },
    AttrSpec { name: "color", kind: AttrKind::Text(|b, v| b.color = v.to_string()) },
];

/// `w:shd`
pub static SHADE_ATTRIBUTES: &[AttrSpec<Shade>] = &[
    AttrSpec { name: "val", kind: AttrKind::Text(|s, v| s.val = v.to_string()) },
    AttrSpec { name: "color", kind: AttrKind::Text(|s, v| s.color = v.to_string()) },
    AttrSpec { name: "fill", kind: AttrKind::Text(|s, v| s.fill = v.to_string()) },
];

/// `w:trHeight`
pub static ROW_HEIGHT_ATTRIBUTES: &[AttrSpec<RowHeight>] = &[
    AttrSpec { name: "val", kind: AttrKind::Int(|h, v| h.val = v) },
    AttrSpec { name: "hRule", kind: AttrKind::Text(|h, v| h.rule = HeightRule::parse(v)) },
];

/// `w:gridCol`
pub static GRID_COLUMN_ATTRIBUTES: &[AttrSpec<GridColumn>] = &[
    AttrSpec { name: "w", kind: AttrKind::Int(|c, v| c.w = v) },
];

/// `w:cnfStyle` switch attributes, in output order after `w:val`
pub static CNF_ATTRIBUTES: [(&str, CnfFlags); 12] = [
    ("firstRow", CnfFlags::FIRST_ROW),
    ("lastRow", CnfFlags::LAST_ROW),
    ("firstColumn", CnfFlags::FIRST_COLUMN),
    ("lastColumn", CnfFlags::LAST_COLUMN),
    ("oddVBand", CnfFlags::ODD_V_BAND),
    ("evenVBand", CnfFlags::EVEN_V_BAND),
    ("oddHBand", CnfFlags::ODD_H_BAND),
    ("evenHBand", CnfFlags::EVEN_H_BAND),
    ("firstRowFirstColumn", CnfFlags::FIRST_ROW_FIRST_COLUMN),
    ("firstRowLastColumn", CnfFlags::FIRST_ROW_LAST_COLUMN),
    ("lastRowFirstColumn", CnfFlags::LAST_ROW_FIRST_COLUMN),
    ("lastRowLastColumn", CnfFlags::LAST_ROW_LAST_COLUMN),
];

/// Decode a `w:cnfStyle`. The slot string and the individual switches are
/// combined; a switch can set a slot but never clear one.
pub fn read_cnf_style(event: &BytesStart) -> DocxResult<ConfStyle> {
    let mut style = ConfStyle::none();
    if let Some(val) = XmlParser::get_val(event)? {
        style = ConfStyle::from_val(&val);
    }
    for (name, flag) in &CNF_ATTRIBUTES {
        if XmlParser::get_w_attribute(event, name)?.is_some_and(|v| XmlParser::parse_flag(&v)) {
            style.flags.insert(*flag);
        }
    }
    Ok(style)
}
