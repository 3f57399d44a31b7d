//! Table look options and the conditional-format styles derived from them
//!
//! A table style can define up to twelve conditional variants (first row,
//! banded rows, corner cells, ...). The table's look bitmask selects which of
//! them are active; rows, cells and paragraphs then carry a `cnfStyle` tag
//! naming the variant that applies to them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Look options requested through [`Table::set_style`](crate::Table::set_style)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StyleOptions: u16 {
        const FIRST_ROW = 0x0020;
        const LAST_ROW = 0x0040;
        const FIRST_COLUMN = 0x0080;
        const LAST_COLUMN = 0x0100;
        const HORIZONTAL_BAND = 0x0200;
        const VERTICAL_BAND = 0x0400;
    }
}

/// Table-level look switches (`w:tblLook`)
///
/// The band switches are stored inverted, as on the wire: `no_h_band` is set
/// unless horizontal banding was requested.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableLook {
    /// Four hex digits encoding the look bitmask
    pub val: String,
    pub first_row: bool,
    pub last_row: bool,
    pub first_column: bool,
    pub last_column: bool,
    pub no_h_band: bool,
    pub no_v_band: bool,
}

impl TableLook {
    pub fn from_options(options: StyleOptions) -> Self {
        let bands = StyleOptions::HORIZONTAL_BAND | StyleOptions::VERTICAL_BAND;
        Self {
            val: format!("{:04X}", (options ^ bands).bits()),
            first_row: options.contains(StyleOptions::FIRST_ROW),
            last_row: options.contains(StyleOptions::LAST_ROW),
            first_column: options.contains(StyleOptions::FIRST_COLUMN),
            last_column: options.contains(StyleOptions::LAST_COLUMN),
            no_h_band: !options.contains(StyleOptions::HORIZONTAL_BAND),
            no_v_band: !options.contains(StyleOptions::VERTICAL_BAND),
        }
    }

    /// Every option off, banding included
    pub fn disabled() -> Self {
        Self::from_options(StyleOptions::empty())
    }

    /// The options these switches represent
    pub fn options(&self) -> StyleOptions {
        let mut options = StyleOptions::empty();
        options.set(StyleOptions::FIRST_ROW, self.first_row);
        options.set(StyleOptions::LAST_ROW, self.last_row);
        options.set(StyleOptions::FIRST_COLUMN, self.first_column);
        options.set(StyleOptions::LAST_COLUMN, self.last_column);
        options.set(StyleOptions::HORIZONTAL_BAND, !self.no_h_band);
        options.set(StyleOptions::VERTICAL_BAND, !self.no_v_band);
        options
    }
}

bitflags! {
    /// The twelve conditional-format slots of a `w:cnfStyle`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CnfFlags: u16 {
        const FIRST_ROW = 1 << 0;
        const LAST_ROW = 1 << 1;
        const FIRST_COLUMN = 1 << 2;
        const LAST_COLUMN = 1 << 3;
        const ODD_V_BAND = 1 << 4;
        const EVEN_V_BAND = 1 << 5;
        const ODD_H_BAND = 1 << 6;
        const EVEN_H_BAND = 1 << 7;
        const FIRST_ROW_FIRST_COLUMN = 1 << 8;
        const FIRST_ROW_LAST_COLUMN = 1 << 9;
        const LAST_ROW_FIRST_COLUMN = 1 << 10;
        const LAST_ROW_LAST_COLUMN = 1 << 11;
    }
}

impl CnfFlags {
    /// Slot order of the 12-character `w:val` string, left to right
    pub const SLOTS: [CnfFlags; 12] = [
        CnfFlags::FIRST_ROW,
        CnfFlags::LAST_ROW,
        CnfFlags::FIRST_COLUMN,
        CnfFlags::LAST_COLUMN,
        CnfFlags::ODD_V_BAND,
        CnfFlags::EVEN_V_BAND,
        CnfFlags::ODD_H_BAND,
        CnfFlags::EVEN_H_BAND,
        CnfFlags::FIRST_ROW_FIRST_COLUMN,
        CnfFlags::FIRST_ROW_LAST_COLUMN,
        CnfFlags::LAST_ROW_FIRST_COLUMN,
        CnfFlags::LAST_ROW_LAST_COLUMN,
    ];
}

/// A conditional-format tag (`w:cnfStyle`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfStyle {
    pub flags: CnfFlags,
}

impl ConfStyle {
    pub const fn new(flags: CnfFlags) -> Self {
        Self { flags }
    }

    /// The tag selecting no conditional variant
    pub const fn none() -> Self {
        Self::new(CnfFlags::empty())
    }

    /// Render the 12-character slot string, e.g. `100000000000` for first row
    pub fn val(&self) -> String {
        CnfFlags::SLOTS
            .iter()
            .map(|slot| if self.flags.contains(*slot) { '1' } else { '0' })
            .collect()
    }

    /// Parse a slot string. Characters other than `1` leave the slot clear and
    /// anything past the twelfth character is ignored.
    pub fn from_val(val: &str) -> Self {
        let mut flags = CnfFlags::empty();
        for (slot, c) in CnfFlags::SLOTS.iter().zip(val.chars()) {
            if c == '1' {
                flags |= *slot;
            }
        }
        Self { flags }
    }
}

/// Conditional tags a table's look makes available.
///
/// This is a pure function of the look; nothing here is stored on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConditionalStyles {
    pub first_row: Option<ConfStyle>,
    pub last_row: Option<ConfStyle>,
    pub first_column: Option<ConfStyle>,
    pub last_column: Option<ConfStyle>,
    pub odd_h_band: Option<ConfStyle>,
    pub odd_v_band: Option<ConfStyle>,
    pub none: ConfStyle,
}

impl ConditionalStyles {
    pub fn derive(look: &TableLook) -> Self {
        let when = |on: bool, flags: CnfFlags| on.then_some(ConfStyle::new(flags));
        Self {
            first_row: when(look.first_row, CnfFlags::FIRST_ROW),
            last_row: when(look.last_row, CnfFlags::LAST_ROW),
            first_column: when(look.first_column, CnfFlags::FIRST_COLUMN),
            last_column: when(look.last_column, CnfFlags::LAST_COLUMN),
            odd_h_band: when(!look.no_h_band, CnfFlags::ODD_H_BAND),
            odd_v_band: when(!look.no_v_band, CnfFlags::ODD_V_BAND),
            none: ConfStyle::none(),
        }
    }

    pub fn from_options(options: StyleOptions) -> Self {
        Self::derive(&TableLook::from_options(options))
    }

    /// Row parity that receives the odd-band tag. A first-row header shifts
    /// banding down by one row.
    pub fn h_band_parity(&self) -> usize {
        usize::from(self.first_row.is_some())
    }

    /// Visual column parity that receives the odd vertical-band tag
    pub fn v_band_parity(&self) -> usize {
        usize::from(self.first_column.is_some())
    }

    /// Whether first- or last-column styling is active
    pub fn has_edge_columns(&self) -> bool {
        self.first_column.is_some() || self.last_column.is_some()
    }
}
