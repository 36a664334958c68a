//! Contextual matching for substitution lookups.
//!
//! A lookup's flag word can exclude whole glyph classes from a match (bases,
//! ligatures, marks, or marks outside a given attachment class). Matching is
//! performed over the glyph stream with those exclusions applied; excluded
//! slots are stepped over, never consumed.

use crate::gdef;
use crate::layout::{ClassDef, Coverage, GDEFTable};
use crate::stream::GlyphStream;

use bitflags::bitflags;
use std::rc::Rc;

bitflags! {
    /// The `lookupFlag` word of a lookup table.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct LookupFlags: u16 {
        const RIGHT_TO_LEFT = 0x0001;
        const IGNORE_BASE_GLYPHS = 0x0002;
        const IGNORE_LIGATURES = 0x0004;
        const IGNORE_MARKS = 0x0008;
        const USE_MARK_FILTERING_SET = 0x0010;
        const MARK_ATTACHMENT_TYPE_MASK = 0xFF00;
    }
}

impl LookupFlags {
    /// The mark attachment class filter, zero when unset.
    pub fn mark_attachment_type(self) -> u8 {
        (self.bits() >> 8) as u8
    }
}

#[derive(Copy, Clone, PartialEq)]
pub enum IgnoreMarks {
    NoIgnoreMarks,
    IgnoreAllMarks,
    IgnoreMarksExcept(u8),
}

/// The glyph classes a lookup skips, derived from its flag word.
#[derive(Copy, Clone)]
pub struct MatchType {
    ignore_bases: bool,
    ignore_ligatures: bool,
    ignore_marks: IgnoreMarks,
}

/// One leg of a context pattern: glyph ids, glyph classes, or coverage sets.
pub enum GlyphTable<'a> {
    Empty,
    ById(&'a [u16]),
    ByClassDef(Rc<ClassDef>, &'a [u16]),
    ByCoverage(&'a [Rc<Coverage>]),
}

impl<'a> GlyphTable<'a> {
    pub fn len(&self) -> usize {
        match self {
            GlyphTable::Empty => 0,
            GlyphTable::ById(arr) => arr.len(),
            GlyphTable::ByClassDef(_, arr) => arr.len(),
            GlyphTable::ByCoverage(vec) => vec.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct MatchContext<'a> {
    pub backtrack_table: GlyphTable<'a>,
    pub input_table: GlyphTable<'a>,
    pub lookahead_table: GlyphTable<'a>,
}

/// A matched context rule together with its nested lookup records.
pub struct ContextLookupHelper<'a> {
    pub match_context: MatchContext<'a>,
    pub lookup_array: &'a [(u16, u16)],
}

impl<'a> ContextLookupHelper<'a> {
    pub fn new(
        match_context: MatchContext<'a>,
        lookup_array: &'a [(u16, u16)],
    ) -> ContextLookupHelper<'a> {
        ContextLookupHelper {
            match_context,
            lookup_array,
        }
    }
}

impl MatchType {
    pub fn from_lookup_flags(lookup_flags: LookupFlags) -> MatchType {
        let ignore_marks = if lookup_flags.contains(LookupFlags::IGNORE_MARKS) {
            IgnoreMarks::IgnoreAllMarks
        } else if lookup_flags.mark_attachment_type() != 0 {
            IgnoreMarks::IgnoreMarksExcept(lookup_flags.mark_attachment_type())
        } else {
            IgnoreMarks::NoIgnoreMarks
        };
        MatchType {
            ignore_bases: lookup_flags.contains(LookupFlags::IGNORE_BASE_GLYPHS),
            ignore_ligatures: lookup_flags.contains(LookupFlags::IGNORE_LIGATURES),
            ignore_marks,
        }
    }

    /// Whether a slot holding `glyph` participates in matching for this
    /// lookup. Coverage and class tests read only the first glyph of a slot.
    pub fn match_glyph(self, opt_gdef_table: Option<&GDEFTable>, glyph: u16) -> bool {
        if !self.ignore_bases
            && !self.ignore_ligatures
            && self.ignore_marks == IgnoreMarks::NoIgnoreMarks
        {
            // fast path that doesn't require checking glyph_class
            return true;
        }
        let glyph_class = gdef::glyph_class(opt_gdef_table, glyph);
        if self.ignore_bases && glyph_class == 1 {
            return false;
        }
        if self.ignore_ligatures && glyph_class == 2 {
            return false;
        }
        match self.ignore_marks {
            IgnoreMarks::NoIgnoreMarks => true,
            IgnoreMarks::IgnoreAllMarks => glyph_class != 3,
            IgnoreMarks::IgnoreMarksExcept(keep_class) => {
                let mark_attach_class = gdef::mark_attach_class(opt_gdef_table, glyph);
                (glyph_class != 3) || (mark_attach_class == u16::from(keep_class))
            }
        }
    }

    // searches backwards from glyphs[index-1]
    pub fn find_prev(
        self,
        opt_gdef_table: Option<&GDEFTable>,
        glyphs: &GlyphStream,
        mut index: usize,
    ) -> Option<usize> {
        while index > 0 {
            index -= 1;
            if self.match_glyph(opt_gdef_table, glyphs.first_gid(index)) {
                return Some(index);
            }
        }
        None
    }

    // searches forwards from glyphs[index+1]
    pub fn find_next(
        self,
        opt_gdef_table: Option<&GDEFTable>,
        glyphs: &GlyphStream,
        mut index: usize,
    ) -> Option<usize> {
        while index + 1 < glyphs.len() {
            index += 1;
            if self.match_glyph(opt_gdef_table, glyphs.first_gid(index)) {
                return Some(index);
            }
        }
        None
    }

    /// The position of the `count`th unskipped slot after `index`.
    /// `count == 0` returns `index` itself.
    pub fn find_nth(
        self,
        opt_gdef_table: Option<&GDEFTable>,
        glyphs: &GlyphStream,
        mut index: usize,
        count: usize,
    ) -> Option<usize> {
        for _ in 0..count {
            match self.find_next(opt_gdef_table, glyphs, index) {
                Some(next_index) => index = next_index,
                None => return None,
            }
        }
        Some(index)
    }

    // searches backwards from glyphs[index-1]
    pub fn match_back(
        self,
        opt_gdef_table: Option<&GDEFTable>,
        glyph_table: &GlyphTable<'_>,
        glyphs: &GlyphStream,
        mut index: usize,
    ) -> bool {
        for i in 0..glyph_table.len() {
            match self.find_prev(opt_gdef_table, glyphs, index) {
                Some(prev_index) => {
                    index = prev_index;
                    if !check_glyph_table(glyph_table, i, glyphs.first_gid(index)) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    // searches forwards from glyphs[index+1]
    pub fn match_front(
        self,
        opt_gdef_table: Option<&GDEFTable>,
        glyph_table: &GlyphTable<'_>,
        glyphs: &GlyphStream,
        mut index: usize,
        last_index: &mut usize,
    ) -> bool {
        for i in 0..glyph_table.len() {
            match self.find_next(opt_gdef_table, glyphs, index) {
                Some(next_index) => {
                    index = next_index;
                    if !check_glyph_table(glyph_table, i, glyphs.first_gid(index)) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        *last_index = index;
        true
    }
}

impl<'a> MatchContext<'a> {
    pub fn matches(
        &self,
        opt_gdef_table: Option<&GDEFTable>,
        match_type: MatchType,
        glyphs: &GlyphStream,
        index: usize,
    ) -> bool {
        let mut front_index = index;
        match_type.match_back(opt_gdef_table, &self.backtrack_table, glyphs, index)
            && match_type.match_front(
                opt_gdef_table,
                &self.input_table,
                glyphs,
                index,
                &mut front_index,
            )
            && match_type.match_front(
                opt_gdef_table,
                &self.lookahead_table,
                glyphs,
                front_index,
                &mut front_index,
            )
    }
}

fn check_glyph_table(glyph_table: &GlyphTable<'_>, i: usize, glyph_index: u16) -> bool {
    match *glyph_table {
        GlyphTable::Empty => false,
        GlyphTable::ById(table) => table[i] == glyph_index,
        GlyphTable::ByClassDef(ref classdef, table) => {
            classdef.glyph_class_value(glyph_index) == table[i]
        }
        GlyphTable::ByCoverage(vec) => vec[i].glyph_coverage_value(glyph_index).is_some(),
    }
}
