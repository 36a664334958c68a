//! Glyph substitution (`gsub`) implementation.
//!
//! > The Glyph Substitution (GSUB) table provides data for substition of glyphs for appropriate
//! > rendering of scripts, such as cursively-connecting forms in Arabic script, or for advanced
//! > typographic effects, such as ligatures.
//!
//! — <https://docs.microsoft.com/en-us/typography/opentype/spec/gsub>
//!
//! [run_gsub] walks the enabled features of the applicable script/language
//! system in the order the font lists them and applies each feature's lookups
//! to the glyph stream in place. Later features see the stream as rewritten by
//! earlier ones.

use crate::context::{ContextLookupHelper, MatchType};
use crate::error::{ParseError, ShapingError};
use crate::layout::{
    chain_context_lookup_info, context_lookup_info, AlternateSet, AlternateSubst, ChainContextLookup,
    ContextLookup, GDEFTable, LangSys, LayoutCache, LayoutTable, Ligature, LigatureSubst,
    LookupCacheItem, LookupList, MultipleSubst, ReverseChainSingleSubst, SequenceTable,
    SingleSubst, SubstLookup,
};
use crate::stream::GlyphStream;

use std::cmp;

/// Maximum depth of nested contextual lookups.
///
/// Deeper nesting than this indicates a malformed (or malicious) font and is
/// reported as [ParseError::LimitExceeded].
pub const SUBST_NESTING_LIMIT: usize = 64;

/// A feature requested for a shaping run.
pub struct FeatureInfo {
    pub feature_tag: u32,
    /// Alternate index for `salt`-style alternate substitutions. Index 0 is
    /// used when absent.
    pub alternate: Option<usize>,
}

type SubstContext<'a> = ContextLookupHelper<'a>;

/// Apply the enabled features of `script_tag`/`opt_lang_tag` to the stream.
///
/// Features are resolved against the font's script and language system,
/// falling back to the default script and language system as usual. A feature
/// applies run-wide when named in `features`; a feature requested by
/// individual slots applies at those slots only. Returns `true` if any
/// substitution rewrote the stream.
pub fn run_gsub(
    gsub_cache: &LayoutCache,
    opt_gdef_table: Option<&GDEFTable>,
    script_tag: u32,
    opt_lang_tag: Option<u32>,
    features: &[FeatureInfo],
    glyphs: &mut GlyphStream,
) -> Result<bool, ShapingError> {
    let gsub_table = &gsub_cache.layout_table;
    let script = match gsub_table.find_script_or_default(script_tag)? {
        Some(script) => script,
        None => return Ok(false),
    };
    let langsys = match script.find_langsys_or_default(opt_lang_tag)? {
        Some(langsys) => langsys,
        None => return Ok(false),
    };

    let slot_requested = slot_requested_features(glyphs);
    let mut changed = false;

    let feature_list = match gsub_table.opt_feature_list {
        Some(ref feature_list) => feature_list,
        None => return Ok(false),
    };
    let lookup_list = match gsub_table.opt_lookup_list {
        Some(ref lookup_list) => lookup_list,
        None => return Ok(false),
    };

    for feature_index in langsys.feature_indices() {
        let feature_record = feature_list.nth_feature_record(usize::from(*feature_index))?;
        let feature_tag = feature_record.feature_tag;
        let global = features.iter().find(|info| info.feature_tag == feature_tag);
        if global.is_none() && !slot_requested.contains(&feature_tag) {
            continue;
        }
        let opt_alternate = global.and_then(|info| info.alternate);
        for lookup_index in &feature_record.feature_table().lookup_indices {
            changed |= gsub_apply_lookup(
                gsub_cache,
                lookup_list,
                opt_gdef_table,
                usize::from(*lookup_index),
                feature_tag,
                opt_alternate,
                global.is_some(),
                glyphs,
            )?;
        }
    }

    Ok(changed)
}

/// Non-mutating probe: would `feature_tag` substitute anything at position
/// `i` of the stream?
pub fn gsub_feature_would_apply(
    gsub_cache: &LayoutCache,
    gsub_table: &LayoutTable,
    opt_gdef_table: Option<&GDEFTable>,
    langsys: &LangSys,
    feature_tag: u32,
    glyphs: &GlyphStream,
    i: usize,
) -> Result<bool, ParseError> {
    if let Some(feature_table) = gsub_table.find_langsys_feature(langsys, feature_tag)? {
        if let Some(ref lookup_list) = gsub_table.opt_lookup_list {
            for lookup_index in &feature_table.lookup_indices {
                let lookup_index = usize::from(*lookup_index);
                let lookup = lookup_list.lookup_cache(gsub_cache, lookup_index)?;
                if gsub_lookup_would_apply(opt_gdef_table, &lookup, glyphs, i)? {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

/// Non-mutating probe: would `lookup` substitute anything at position `i`?
pub fn gsub_lookup_would_apply(
    opt_gdef_table: Option<&GDEFTable>,
    lookup: &LookupCacheItem,
    glyphs: &GlyphStream,
    i: usize,
) -> Result<bool, ParseError> {
    let match_type = MatchType::from_lookup_flags(lookup.lookup_flag);
    if i >= glyphs.len() || !match_type.match_glyph(opt_gdef_table, glyphs.first_gid(i)) {
        return Ok(false);
    }
    let glyph = glyphs.first_gid(i);
    let would_apply = match lookup.lookup_subtables {
        SubstLookup::SingleSubst(ref subtables) => {
            singlesubst_would_apply(subtables, glyph)?.is_some()
        }
        SubstLookup::MultipleSubst(ref subtables) => {
            multiplesubst_would_apply(subtables, glyph)?.is_some()
        }
        SubstLookup::AlternateSubst(ref subtables) => {
            alternatesubst_would_apply(subtables, glyph)?.is_some()
        }
        SubstLookup::LigatureSubst(ref subtables) => {
            ligaturesubst_would_apply(opt_gdef_table, subtables, match_type, i, glyphs)?.is_some()
        }
        SubstLookup::ContextSubst(ref subtables) => {
            contextsubst_would_apply(opt_gdef_table, subtables, match_type, i, glyphs)?.is_some()
        }
        SubstLookup::ChainContextSubst(ref subtables) => {
            chaincontextsubst_would_apply(opt_gdef_table, subtables, match_type, i, glyphs)?
                .is_some()
        }
        SubstLookup::ReverseChainSingleSubst(ref subtables) => {
            reversechainsubst_would_apply(opt_gdef_table, subtables, match_type, i, glyphs)?
                .is_some()
        }
    };
    Ok(would_apply)
}

fn slot_requested_features(glyphs: &GlyphStream) -> Vec<u32> {
    let mut tags = Vec::new();
    for i in 0..glyphs.len() {
        for &tag in glyphs.features(i) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}

fn feature_applies(
    feature_enabled_globally: bool,
    feature_tag: u32,
    glyphs: &GlyphStream,
    i: usize,
) -> bool {
    feature_enabled_globally || glyphs.features(i).contains(&feature_tag)
}

#[allow(clippy::too_many_arguments)]
fn gsub_apply_lookup(
    gsub_cache: &LayoutCache,
    lookup_list: &LookupList,
    opt_gdef_table: Option<&GDEFTable>,
    lookup_index: usize,
    feature_tag: u32,
    opt_alternate: Option<usize>,
    feature_enabled_globally: bool,
    glyphs: &mut GlyphStream,
) -> Result<bool, ParseError> {
    let lookup = lookup_list.lookup_cache(gsub_cache, lookup_index)?;
    let match_type = MatchType::from_lookup_flags(lookup.lookup_flag);
    let mut changed = false;

    if let SubstLookup::ReverseChainSingleSubst(ref subtables) = lookup.lookup_subtables {
        // Type 8 walks the stream right to left and applies no nested
        // lookups. Substitutions are single, so positions are stable.
        let mut i = glyphs.len();
        while i > 0 {
            i -= 1;
            if match_type.match_glyph(opt_gdef_table, glyphs.first_gid(i))
                && feature_applies(feature_enabled_globally, feature_tag, glyphs, i)
            {
                changed |= reversechainsubst(opt_gdef_table, subtables, match_type, i, glyphs)?;
            }
        }
        return Ok(changed);
    }

    // The cursor is monotonic: a matching subtable consumes the length of its
    // matched input, otherwise the cursor advances by one. Skipped slots are
    // stepped over without attempting a match.
    let mut i = 0;
    while i < glyphs.len() {
        if match_type.match_glyph(opt_gdef_table, glyphs.first_gid(i))
            && feature_applies(feature_enabled_globally, feature_tag, glyphs, i)
        {
            match apply_subtables_at(
                SUBST_NESTING_LIMIT,
                gsub_cache,
                lookup_list,
                opt_gdef_table,
                &lookup.lookup_subtables,
                opt_alternate,
                match_type,
                i,
                glyphs,
            )? {
                Some((advance, subst_changed)) => {
                    changed |= subst_changed;
                    i += cmp::max(advance, 1);
                }
                None => i += 1,
            }
        } else {
            i += 1;
        }
    }
    Ok(changed)
}

/// Try a lookup's subtables in declaration order at position `i`.
///
/// Returns the cursor advance (the length of the matched input as it stands
/// after substitution) and whether anything was rewritten, or `None` if no
/// subtable matched.
#[allow(clippy::too_many_arguments)]
fn apply_subtables_at(
    recursion_limit: usize,
    gsub_cache: &LayoutCache,
    lookup_list: &LookupList,
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &SubstLookup,
    opt_alternate: Option<usize>,
    match_type: MatchType,
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<(usize, bool)>, ParseError> {
    match subtables {
        SubstLookup::SingleSubst(subtables) => match singlesubst(subtables, i, glyphs)? {
            Some(()) => Ok(Some((1, true))),
            None => Ok(None),
        },
        SubstLookup::MultipleSubst(subtables) => match multiplesubst(subtables, i, glyphs)? {
            Some(()) => Ok(Some((1, true))),
            None => Ok(None),
        },
        SubstLookup::AlternateSubst(subtables) => {
            let alternate = opt_alternate.unwrap_or(0);
            match alternatesubst(subtables, alternate, i, glyphs)? {
                Some(replaced) => Ok(Some((1, replaced))),
                None => Ok(None),
            }
        }
        SubstLookup::LigatureSubst(subtables) => {
            match ligaturesubst(opt_gdef_table, subtables, match_type, i, glyphs)? {
                Some(advance) => Ok(Some((advance, true))),
                None => Ok(None),
            }
        }
        SubstLookup::ContextSubst(subtables) => contextsubst(
            recursion_limit,
            gsub_cache,
            lookup_list,
            opt_gdef_table,
            subtables,
            match_type,
            i,
            glyphs,
        ),
        SubstLookup::ChainContextSubst(subtables) => chaincontextsubst(
            recursion_limit,
            gsub_cache,
            lookup_list,
            opt_gdef_table,
            subtables,
            match_type,
            i,
            glyphs,
        ),
        // Type 8 never matches in a left-to-right pass and must not be nested
        SubstLookup::ReverseChainSingleSubst(_) => Ok(None),
    }
}

fn singlesubst_would_apply(
    subtables: &[SingleSubst],
    glyph: u16,
) -> Result<Option<u16>, ParseError> {
    for single_subst in subtables {
        if let Some(output) = single_subst.apply_glyph(glyph)? {
            return Ok(Some(output));
        }
    }
    Ok(None)
}

fn singlesubst(
    subtables: &[SingleSubst],
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<()>, ParseError> {
    match singlesubst_would_apply(subtables, glyphs.first_gid(i))? {
        Some(output_glyph) => {
            glyphs.replace(i, output_glyph);
            Ok(Some(()))
        }
        None => Ok(None),
    }
}

fn multiplesubst_would_apply<'a>(
    subtables: &'a [MultipleSubst],
    glyph: u16,
) -> Result<Option<&'a SequenceTable>, ParseError> {
    for multiple_subst in subtables {
        if let Some(sequence_table) = multiple_subst.apply_glyph(glyph)? {
            return Ok(Some(sequence_table));
        }
    }
    Ok(None)
}

fn multiplesubst(
    subtables: &[MultipleSubst],
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<()>, ParseError> {
    match multiplesubst_would_apply(subtables, glyphs.first_gid(i))? {
        Some(sequence_table) => {
            // The expansion is carried by the slot, so the position count is
            // unchanged.
            glyphs.replace_many(i, &sequence_table.substitute_glyphs);
            Ok(Some(()))
        }
        None => Ok(None),
    }
}

fn alternatesubst_would_apply<'a>(
    subtables: &'a [AlternateSubst],
    glyph: u16,
) -> Result<Option<&'a AlternateSet>, ParseError> {
    for alternate_subst in subtables {
        if let Some(alternate_set) = alternate_subst.apply_glyph(glyph)? {
            return Ok(Some(alternate_set));
        }
    }
    Ok(None)
}

fn alternatesubst(
    subtables: &[AlternateSubst],
    alternate: usize,
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<bool>, ParseError> {
    match alternatesubst_would_apply(subtables, glyphs.first_gid(i))? {
        Some(alternateset) => {
            if alternate < alternateset.alternate_glyphs.len() {
                glyphs.replace(i, alternateset.alternate_glyphs[alternate]);
                Ok(Some(true))
            } else {
                // Covered but the requested alternate doesn't exist: the
                // position is consumed without a rewrite.
                Ok(Some(false))
            }
        }
        None => Ok(None),
    }
}

/// The stream positions of a ligature's trailing components when they match
/// starting after `i`, skipping excluded slots.
fn ligature_component_positions(
    match_type: MatchType,
    opt_gdef_table: Option<&GDEFTable>,
    ligature: &Ligature,
    glyphs: &GlyphStream,
    i: usize,
) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(ligature.component_glyphs.len());
    let mut index = i;
    for &component in &ligature.component_glyphs {
        index = match_type.find_next(opt_gdef_table, glyphs, index)?;
        if glyphs.first_gid(index) != component {
            return None;
        }
        positions.push(index);
    }
    Some(positions)
}

fn ligaturesubst_would_apply<'a>(
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &'a [LigatureSubst],
    match_type: MatchType,
    i: usize,
    glyphs: &GlyphStream,
) -> Result<Option<&'a Ligature>, ParseError> {
    for ligature_subst in subtables {
        if let Some(ligatureset) = ligature_subst.apply_glyph(glyphs.first_gid(i))? {
            for ligature in &ligatureset.ligatures {
                if ligature_component_positions(match_type, opt_gdef_table, ligature, glyphs, i)
                    .is_some()
                {
                    return Ok(Some(ligature));
                }
            }
        }
    }
    Ok(None)
}

/// Returns the cursor advance when a ligature was formed: one for the
/// surviving slot plus any skipped slots left inside the matched span.
fn ligaturesubst(
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &[LigatureSubst],
    match_type: MatchType,
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<usize>, ParseError> {
    for ligature_subst in subtables {
        if let Some(ligatureset) = ligature_subst.apply_glyph(glyphs.first_gid(i))? {
            for ligature in &ligatureset.ligatures {
                let positions = match ligature_component_positions(
                    match_type,
                    opt_gdef_table,
                    ligature,
                    glyphs,
                    i,
                ) {
                    Some(positions) => positions,
                    None => continue,
                };
                match positions.last() {
                    Some(&last) => {
                        let skipped = (last - i) - positions.len();
                        if skipped == 0 {
                            glyphs.replace_range(
                                i,
                                positions.len() + 1,
                                ligature.ligature_glyph,
                            );
                        } else {
                            // Skipped slots sit between the components; remove
                            // the matched components individually so the
                            // skipped slots survive in place.
                            for &position in positions.iter().rev() {
                                glyphs.remove_into(position, i);
                            }
                            glyphs.replace(i, ligature.ligature_glyph);
                        }
                        return Ok(Some(skipped + 1));
                    }
                    None => {
                        // A one-component ligature rewrites the covered glyph
                        glyphs.replace(i, ligature.ligature_glyph);
                        return Ok(Some(1));
                    }
                }
            }
        }
    }
    Ok(None)
}

fn contextsubst_would_apply<'a>(
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &'a [ContextLookup],
    match_type: MatchType,
    i: usize,
    glyphs: &GlyphStream,
) -> Result<Option<Box<SubstContext<'a>>>, ParseError> {
    for context_lookup in subtables {
        if let Some(context) = context_lookup_info(context_lookup, glyphs.first_gid(i), |context| {
            context.matches(opt_gdef_table, match_type, glyphs, i)
        })? {
            return Ok(Some(context));
        }
    }
    Ok(None)
}

#[allow(clippy::too_many_arguments)]
fn contextsubst(
    recursion_limit: usize,
    gsub_cache: &LayoutCache,
    lookup_list: &LookupList,
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &[ContextLookup],
    match_type: MatchType,
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<(usize, bool)>, ParseError> {
    match contextsubst_would_apply(opt_gdef_table, subtables, match_type, i, glyphs)? {
        Some(subst) => apply_subst_context(
            recursion_limit,
            gsub_cache,
            lookup_list,
            opt_gdef_table,
            match_type,
            &subst,
            i,
            glyphs,
        ),
        None => Ok(None),
    }
}

fn chaincontextsubst_would_apply<'a>(
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &'a [ChainContextLookup],
    match_type: MatchType,
    i: usize,
    glyphs: &GlyphStream,
) -> Result<Option<Box<SubstContext<'a>>>, ParseError> {
    for chain_context_lookup in subtables {
        if let Some(context) =
            chain_context_lookup_info(chain_context_lookup, glyphs.first_gid(i), |context| {
                context.matches(opt_gdef_table, match_type, glyphs, i)
            })?
        {
            return Ok(Some(context));
        }
    }
    Ok(None)
}

#[allow(clippy::too_many_arguments)]
fn chaincontextsubst(
    recursion_limit: usize,
    gsub_cache: &LayoutCache,
    lookup_list: &LookupList,
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &[ChainContextLookup],
    match_type: MatchType,
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<(usize, bool)>, ParseError> {
    match chaincontextsubst_would_apply(opt_gdef_table, subtables, match_type, i, glyphs)? {
        Some(subst) => apply_subst_context(
            recursion_limit,
            gsub_cache,
            lookup_list,
            opt_gdef_table,
            match_type,
            &subst,
            i,
            glyphs,
        ),
        None => Ok(None),
    }
}

/// Run the nested lookups of a matched context rule, then report the adjusted
/// length of the matched input and whether any nested lookup rewrote the
/// stream. The outer match is not restarted.
#[allow(clippy::too_many_arguments)]
fn apply_subst_context(
    recursion_limit: usize,
    gsub_cache: &LayoutCache,
    lookup_list: &LookupList,
    opt_gdef_table: Option<&GDEFTable>,
    match_type: MatchType,
    subst: &SubstContext<'_>,
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<Option<(usize, bool)>, ParseError> {
    let mut changes: isize = 0;
    let mut changed = false;
    let len = match match_type.find_nth(
        opt_gdef_table,
        glyphs,
        i,
        subst.match_context.input_table.len(),
    ) {
        Some(last) => last - i + 1,
        None => return Ok(None),
    };
    for (subst_index, subst_lookup_index) in subst.lookup_array {
        if let Some((delta, nested_changed)) = apply_subst(
            recursion_limit,
            gsub_cache,
            lookup_list,
            opt_gdef_table,
            match_type,
            usize::from(*subst_index),
            usize::from(*subst_lookup_index),
            glyphs,
            i,
        )? {
            changes += delta;
            changed |= nested_changed;
        }
    }
    let new_len = (len as isize) + changes;
    if new_len < 0 {
        return Err(ParseError::BadValue);
    }
    Ok(Some((new_len as usize, changed)))
}

/// Apply nested lookup `lookup_index` at the `subst_index`th unskipped slot
/// of the matched input, returning the change to the stream's length and
/// whether anything was rewritten.
#[allow(clippy::too_many_arguments)]
fn apply_subst(
    recursion_limit: usize,
    gsub_cache: &LayoutCache,
    lookup_list: &LookupList,
    opt_gdef_table: Option<&GDEFTable>,
    parent_match_type: MatchType,
    subst_index: usize,
    lookup_index: usize,
    glyphs: &mut GlyphStream,
    index: usize,
) -> Result<Option<(isize, bool)>, ParseError> {
    let lookup = lookup_list.lookup_cache(gsub_cache, lookup_index)?;
    let match_type = MatchType::from_lookup_flags(lookup.lookup_flag);
    // The sequence index counts unskipped slots from the start of the match
    let i = match parent_match_type.find_nth(opt_gdef_table, glyphs, index, subst_index) {
        Some(index1) => index1,
        None => return Ok(None),
    };
    match lookup.lookup_subtables {
        SubstLookup::SingleSubst(ref subtables) => match singlesubst(subtables, i, glyphs)? {
            Some(()) => Ok(Some((0, true))),
            None => Ok(None),
        },
        SubstLookup::MultipleSubst(ref subtables) => match multiplesubst(subtables, i, glyphs)? {
            // The expansion stays within one slot, so the length is unchanged
            Some(()) => Ok(Some((0, true))),
            None => Ok(None),
        },
        SubstLookup::AlternateSubst(ref subtables) => {
            match alternatesubst(subtables, 0, i, glyphs)? {
                Some(replaced) => Ok(Some((0, replaced))),
                None => Ok(None),
            }
        }
        SubstLookup::LigatureSubst(ref subtables) => {
            let len_before = glyphs.len();
            match ligaturesubst(opt_gdef_table, subtables, match_type, i, glyphs)? {
                Some(_advance) => {
                    let removed = len_before - glyphs.len();
                    Ok(Some((-(removed as isize), true)))
                }
                None => Ok(None),
            }
        }
        SubstLookup::ContextSubst(ref subtables) => {
            if recursion_limit > 0 {
                let len_before = glyphs.len() as isize;
                match contextsubst(
                    recursion_limit - 1,
                    gsub_cache,
                    lookup_list,
                    opt_gdef_table,
                    subtables,
                    match_type,
                    i,
                    glyphs,
                )? {
                    Some((_length, nested_changed)) => {
                        let delta = glyphs.len() as isize - len_before;
                        Ok(Some((delta, nested_changed)))
                    }
                    None => Ok(None),
                }
            } else {
                Err(ParseError::LimitExceeded)
            }
        }
        SubstLookup::ChainContextSubst(ref subtables) => {
            if recursion_limit > 0 {
                let len_before = glyphs.len() as isize;
                match chaincontextsubst(
                    recursion_limit - 1,
                    gsub_cache,
                    lookup_list,
                    opt_gdef_table,
                    subtables,
                    match_type,
                    i,
                    glyphs,
                )? {
                    Some((_length, nested_changed)) => {
                        let delta = glyphs.len() as isize - len_before;
                        Ok(Some((delta, nested_changed)))
                    }
                    None => Ok(None),
                }
            } else {
                Err(ParseError::LimitExceeded)
            }
        }
        // Reverse chaining substitutions must not be applied as nested lookups
        SubstLookup::ReverseChainSingleSubst(_) => Ok(None),
    }
}

fn reversechainsubst_would_apply(
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &[ReverseChainSingleSubst],
    match_type: MatchType,
    i: usize,
    glyphs: &GlyphStream,
) -> Result<Option<u16>, ParseError> {
    let glyph = glyphs.first_gid(i);
    for subtable in subtables {
        if let Some(output) = subtable.apply_glyph(glyph, |context| {
            context.matches(opt_gdef_table, match_type, glyphs, i)
        })? {
            return Ok(Some(output));
        }
    }
    Ok(None)
}

fn reversechainsubst(
    opt_gdef_table: Option<&GDEFTable>,
    subtables: &[ReverseChainSingleSubst],
    match_type: MatchType,
    i: usize,
    glyphs: &mut GlyphStream,
) -> Result<bool, ParseError> {
    match reversechainsubst_would_apply(opt_gdef_table, subtables, match_type, i, glyphs)? {
        Some(output) => {
            glyphs.replace(i, output);
            Ok(true)
        }
        None => Ok(false),
    }
}
