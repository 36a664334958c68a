//! Glyph class lookups against an optional `GDEF` table.

use crate::layout::GDEFTable;

pub fn glyph_class(opt_gdef_table: Option<&GDEFTable>, glyph: u16) -> u16 {
    match opt_gdef_table {
        Some(gdef_table) => match gdef_table.opt_glyph_classdef {
            Some(ref glyph_classdef) => glyph_classdef.glyph_class_value(glyph),
            None => 0,
        },
        None => 0,
    }
}

pub fn mark_attach_class(opt_gdef_table: Option<&GDEFTable>, glyph: u16) -> u16 {
    match opt_gdef_table {
        Some(gdef_table) => match gdef_table.opt_mark_attach_classdef {
            Some(ref mark_attach_classdef) => mark_attach_classdef.glyph_class_value(glyph),
            None => 0,
        },
        None => 0,
    }
}
