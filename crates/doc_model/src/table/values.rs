//! Small value records attached to tables, rows and cells
//!
//! Lengths are integers in twentieths of a point (twips), the unit used by
//! WordprocessingML for widths, heights and offsets.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// =============================================================================
// Widths
// =============================================================================

/// How a width value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WidthType {
    /// Sized by content; the value is ignored
    #[default]
    Auto,
    /// Fixed width in twips
    Dxa,
    /// Fiftieths of a percent
    Pct,
    /// Zero width
    Nil,
}

impl WidthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidthType::Auto => "auto",
            WidthType::Dxa => "dxa",
            WidthType::Pct => "pct",
            WidthType::Nil => "nil",
        }
    }

    /// Parse a wire value. Unknown values are read as fixed widths.
    pub fn parse(s: &str) -> Self {
        match s {
            "auto" => WidthType::Auto,
            "pct" => WidthType::Pct,
            "nil" => WidthType::Nil,
            _ => WidthType::Dxa,
        }
    }
}

/// Width of a table or cell (`w:tblW`, `w:tcW`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableWidth {
    pub w: i64,
    pub width_type: WidthType,
}

impl TableWidth {
    /// Fixed width when positive, otherwise content-driven (the value is kept).
    pub fn from_twips(w: i64) -> Self {
        let width_type = if w > 0 { WidthType::Dxa } else { WidthType::Auto };
        Self { w, width_type }
    }

    pub fn auto() -> Self {
        Self {
            w: 0,
            width_type: WidthType::Auto,
        }
    }

    pub fn dxa(w: i64) -> Self {
        Self {
            w,
            width_type: WidthType::Dxa,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.width_type == WidthType::Auto
    }

    /// Combined width of horizontally merged members.
    ///
    /// Members must all be fixed (or all percentage) widths for the sum to be
    /// known; a single auto or missing width makes the result auto.
    pub fn merged<I>(members: I) -> Self
    where
        I: IntoIterator<Item = Option<TableWidth>>,
    {
        let mut total = 0;
        let mut width_type = None;
        for member in members {
            match member {
                Some(width) if matches!(width.width_type, WidthType::Dxa | WidthType::Pct) => {
                    if width_type.is_some_and(|t| t != width.width_type) {
                        return Self::auto();
                    }
                    width_type = Some(width.width_type);
                    total += width.w;
                }
                _ => return Self::auto(),
            }
        }
        match width_type {
            Some(width_type) => Self { w: total, width_type },
            None => Self::auto(),
        }
    }
}

// =============================================================================
// Borders
// =============================================================================

/// Line style of a border (`ST_Border`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    Nil,
    None,
    #[default]
    Single,
    Thick,
    Double,
    Dotted,
    Dashed,
    DotDash,
    DotDotDash,
    Triple,
    Wave,
    /// Any other named style, kept verbatim
    Other(String),
}

impl BorderStyle {
    pub fn as_str(&self) -> &str {
        match self {
            BorderStyle::Nil => "nil",
            BorderStyle::None => "none",
            BorderStyle::Single => "single",
            BorderStyle::Thick => "thick",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::DotDash => "dotDash",
            BorderStyle::DotDotDash => "dotDotDash",
            BorderStyle::Triple => "triple",
            BorderStyle::Wave => "wave",
            BorderStyle::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "nil" => BorderStyle::Nil,
            "none" => BorderStyle::None,
            "single" => BorderStyle::Single,
            "thick" => BorderStyle::Thick,
            "double" => BorderStyle::Double,
            "dotted" => BorderStyle::Dotted,
            "dashed" => BorderStyle::Dashed,
            "dotDash" => BorderStyle::DotDash,
            "dotDotDash" => BorderStyle::DotDotDash,
            "triple" => BorderStyle::Triple,
            "wave" => BorderStyle::Wave,
            other => BorderStyle::Other(other.to_string()),
        }
    }
}

/// A single border line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Border {
    pub style: BorderStyle,
    /// Width in eighths of a point
    pub size: i64,
    /// Spacing from the content in points
    pub space: i64,
    /// Hex RGB color, `auto`, or empty
    pub color: String,
}

impl Border {
    pub fn new(style: BorderStyle, size: i64, space: i64, color: &str) -> Self {
        Self {
            style,
            size,
            space,
            color: color.to_string(),
        }
    }

    /// A single line of the given size and color
    pub fn single(size: i64, color: &str) -> Self {
        Self::new(BorderStyle::Single, size, 0, color)
    }
}

bitflags! {
    /// Selects which borders a border setter applies to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BorderSides: u8 {
        const TOP = 1;
        const LEFT = 2;
        const BOTTOM = 4;
        const RIGHT = 8;
        /// Horizontal borders between rows
        const INSIDE_H = 16;
        /// Vertical borders between cells
        const INSIDE_V = 32;
        const EXTERNAL =
            Self::TOP.bits() | Self::LEFT.bits() | Self::BOTTOM.bits() | Self::RIGHT.bits();
        const INSIDE = Self::INSIDE_H.bits() | Self::INSIDE_V.bits();
        const ALL = Self::EXTERNAL.bits() | Self::INSIDE.bits();
    }
}

/// Borders of a whole table, including the inside grid lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBorders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
}

impl TableBorders {
    /// Assign `border` to every selected side
    pub fn set(&mut self, sides: BorderSides, border: Border) {
        let slots = [
            (BorderSides::TOP, &mut self.top),
            (BorderSides::LEFT, &mut self.left),
            (BorderSides::BOTTOM, &mut self.bottom),
            (BorderSides::RIGHT, &mut self.right),
            (BorderSides::INSIDE_H, &mut self.inside_h),
            (BorderSides::INSIDE_V, &mut self.inside_v),
        ];
        for (side, slot) in slots {
            if sides.contains(side) {
                *slot = Some(border.clone());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
            && self.left.is_none()
            && self.bottom.is_none()
            && self.right.is_none()
            && self.inside_h.is_none()
            && self.inside_v.is_none()
    }
}

/// Borders of a single cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBorders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
}

impl CellBorders {
    /// Assign `border` to every selected outer side; inside bits are ignored
    pub fn set(&mut self, sides: BorderSides, border: Border) {
        let slots = [
            (BorderSides::TOP, &mut self.top),
            (BorderSides::LEFT, &mut self.left),
            (BorderSides::BOTTOM, &mut self.bottom),
            (BorderSides::RIGHT, &mut self.right),
        ];
        for (side, slot) in slots {
            if sides.contains(side) {
                *slot = Some(border.clone());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }
}

// =============================================================================
// Shading, alignment, heights, positioning
// =============================================================================

/// Background shading pattern
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shade {
    /// Pattern (`clear`, `solid`, `pct10`, ...)
    pub val: String,
    /// Pattern color
    pub color: String,
    /// Background fill color
    pub fill: String,
}

impl Shade {
    pub fn new(val: &str, color: &str, fill: &str) -> Self {
        Self {
            val: val.to_string(),
            color: color.to_string(),
            fill: fill.to_string(),
        }
    }
}

/// Horizontal alignment (`w:jc`) of a table, row or paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justification {
    Start,
    Center,
    End,
    /// Justified
    Both,
    Distribute,
    Left,
    Right,
    Other(String),
}

impl Justification {
    pub fn as_str(&self) -> &str {
        match self {
            Justification::Start => "start",
            Justification::Center => "center",
            Justification::End => "end",
            Justification::Both => "both",
            Justification::Distribute => "distribute",
            Justification::Left => "left",
            Justification::Right => "right",
            Justification::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "start" => Justification::Start,
            "center" => Justification::Center,
            "end" => Justification::End,
            "both" => Justification::Both,
            "distribute" => Justification::Distribute,
            "left" => Justification::Left,
            "right" => Justification::Right,
            other => Justification::Other(other.to_string()),
        }
    }
}

/// Vertical alignment of cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
    Both,
}

impl VerticalAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
            VerticalAlignment::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "center" => VerticalAlignment::Center,
            "bottom" => VerticalAlignment::Bottom,
            "both" => VerticalAlignment::Both,
            _ => VerticalAlignment::Top,
        }
    }
}

/// How a row height is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightRule {
    Auto,
    AtLeast,
    Exact,
}

impl HeightRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightRule::Auto => "auto",
            HeightRule::AtLeast => "atLeast",
            HeightRule::Exact => "exact",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(HeightRule::Auto),
            "atLeast" => Some(HeightRule::AtLeast),
            "exact" => Some(HeightRule::Exact),
            _ => None,
        }
    }
}

/// Explicit row height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowHeight {
    pub val: i64,
    /// Unset means "at least"
    pub rule: Option<HeightRule>,
}

/// Floating table placement (`w:tblpPr`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePosition {
    pub left_from_text: i64,
    pub right_from_text: i64,
    pub vert_anchor: Option<String>,
    pub horz_anchor: Option<String>,
    pub x_spec: Option<String>,
    pub y_spec: Option<String>,
    pub x: i64,
    pub y: i64,
}

/// Reference to a table style by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    pub val: String,
}

impl TableStyle {
    pub fn new(val: impl Into<String>) -> Self {
        Self { val: val.into() }
    }
}
