//! End-to-end substitution tests over in-memory GSUB fixtures.
//!
//! Each test assembles the binary layout of a GSUB table (and, where needed,
//! a GDEF table), parses it, and runs the engine against a seeded glyph
//! stream.

use typeline::binary::read::ReadScope;
use typeline::binary::write::{WriteBinary, WriteBuffer, WriteContext};
use typeline::binary::{U16Be, U32Be};
use typeline::error::{ParseError, ShapingError};
use typeline::gsub::{self, FeatureInfo};
use typeline::layout::{new_layout_cache, GDEFTable, LayoutTable};
use typeline::stream::GlyphStream;
use typeline::tag;

const LIGA: u32 = tag::LIGA;

fn u16s(w: &mut WriteBuffer, values: &[u16]) {
    for &value in values {
        U16Be::write(w, value).unwrap();
    }
}

/// Coverage table, format 1.
fn coverage(glyphs: &[u16]) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    u16s(&mut w, &[1, glyphs.len() as u16]);
    u16s(&mut w, glyphs);
    w.into_inner()
}

/// SingleSubst format 1: covered glyphs are shifted by `delta`.
fn single_subst_delta(covered: &[u16], delta: i16) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    u16s(&mut w, &[1, 6]); // format, coverage offset
    U16Be::write(&mut w, delta as u16).unwrap();
    w.write_bytes(&coverage(covered)).unwrap();
    w.into_inner()
}

/// SingleSubst format 2: covered glyphs map to `outputs` by coverage rank.
fn single_subst_list(covered: &[u16], outputs: &[u16]) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    let coverage_offset = 6 + 2 * outputs.len() as u16;
    u16s(&mut w, &[2, coverage_offset, outputs.len() as u16]);
    u16s(&mut w, outputs);
    w.write_bytes(&coverage(covered)).unwrap();
    w.into_inner()
}

/// MultipleSubst format 1 with a single covered glyph.
fn multiple_subst(covered: u16, sequence: &[u16]) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    // format, coverage offset, sequence count, sequence offset
    let sequence_offset = 8u16;
    let coverage_offset = sequence_offset + 2 + 2 * sequence.len() as u16;
    u16s(&mut w, &[1, coverage_offset, 1, sequence_offset]);
    u16s(&mut w, &[sequence.len() as u16]);
    u16s(&mut w, sequence);
    w.write_bytes(&coverage(&[covered])).unwrap();
    w.into_inner()
}

/// AlternateSubst format 1 with a single covered glyph.
fn alternate_subst(covered: u16, alternates: &[u16]) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    let set_offset = 8u16;
    let coverage_offset = set_offset + 2 + 2 * alternates.len() as u16;
    u16s(&mut w, &[1, coverage_offset, 1, set_offset]);
    u16s(&mut w, &[alternates.len() as u16]);
    u16s(&mut w, alternates);
    w.write_bytes(&coverage(&[covered])).unwrap();
    w.into_inner()
}

/// LigatureSubst format 1: `first` followed by `rest` becomes `ligature`.
fn ligature_subst(first: u16, rest: &[u16], ligature: u16) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    let set_offset = 8u16;
    // LigatureSet: count + one offset; Ligature: glyph + compCount + rest
    let ligature_offset = 4u16;
    let ligature_size = 4 + 2 * rest.len() as u16;
    let coverage_offset = set_offset + ligature_offset + ligature_size;
    u16s(&mut w, &[1, coverage_offset, 1, set_offset]);
    u16s(&mut w, &[1, ligature_offset]);
    u16s(&mut w, &[ligature, rest.len() as u16 + 1]);
    u16s(&mut w, rest);
    w.write_bytes(&coverage(&[first])).unwrap();
    w.into_inner()
}

/// ContextSubst format 3: each input position is a coverage set.
fn context_f3(input: &[&[u16]], records: &[(u16, u16)]) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    u16s(&mut w, &[3, input.len() as u16, records.len() as u16]);
    let header = 6 + 2 * input.len() + 4 * records.len();
    let mut offset = header as u16;
    for glyphs in input {
        U16Be::write(&mut w, offset).unwrap();
        offset += coverage(glyphs).len() as u16;
    }
    for &(sequence_index, lookup_index) in records {
        u16s(&mut w, &[sequence_index, lookup_index]);
    }
    for glyphs in input {
        w.write_bytes(&coverage(glyphs)).unwrap();
    }
    w.into_inner()
}

/// ChainContextSubst format 3.
fn chain_context_f3(
    backtrack: &[&[u16]],
    input: &[&[u16]],
    lookahead: &[&[u16]],
    records: &[(u16, u16)],
) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    let header = 10 + 2 * (backtrack.len() + input.len() + lookahead.len()) + 4 * records.len();
    let mut offset = header as u16;
    let mut offsets: Vec<Vec<u16>> = Vec::new();
    for group in [backtrack, input, lookahead] {
        let mut group_offsets = Vec::new();
        for glyphs in group {
            group_offsets.push(offset);
            offset += coverage(glyphs).len() as u16;
        }
        offsets.push(group_offsets);
    }
    U16Be::write(&mut w, 3u16).unwrap();
    U16Be::write(&mut w, backtrack.len() as u16).unwrap();
    u16s(&mut w, &offsets[0]);
    U16Be::write(&mut w, input.len() as u16).unwrap();
    u16s(&mut w, &offsets[1]);
    U16Be::write(&mut w, lookahead.len() as u16).unwrap();
    u16s(&mut w, &offsets[2]);
    U16Be::write(&mut w, records.len() as u16).unwrap();
    for &(sequence_index, lookup_index) in records {
        u16s(&mut w, &[sequence_index, lookup_index]);
    }
    for group in [backtrack, input, lookahead] {
        for glyphs in group {
            w.write_bytes(&coverage(glyphs)).unwrap();
        }
    }
    w.into_inner()
}

/// Extension subtable (lookup type 7) wrapping `inner` of `lookup_type`.
fn extension(lookup_type: u16, inner: &[u8]) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    u16s(&mut w, &[1, lookup_type]);
    U32Be::write(&mut w, 8u32).unwrap();
    w.write_bytes(inner).unwrap();
    w.into_inner()
}

/// ReverseChainSingleSubst format 1.
fn reverse_chain(
    covered: &[u16],
    backtrack: &[&[u16]],
    lookahead: &[&[u16]],
    outputs: &[u16],
) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    let header = 10 + 2 * (backtrack.len() + lookahead.len()) + 2 * outputs.len();
    let mut offset = header as u16;
    let coverage_offset = offset;
    offset += coverage(covered).len() as u16;
    let mut backtrack_offsets = Vec::new();
    for glyphs in backtrack {
        backtrack_offsets.push(offset);
        offset += coverage(glyphs).len() as u16;
    }
    let mut lookahead_offsets = Vec::new();
    for glyphs in lookahead {
        lookahead_offsets.push(offset);
        offset += coverage(glyphs).len() as u16;
    }
    U16Be::write(&mut w, 1u16).unwrap();
    U16Be::write(&mut w, coverage_offset).unwrap();
    U16Be::write(&mut w, backtrack.len() as u16).unwrap();
    u16s(&mut w, &backtrack_offsets);
    U16Be::write(&mut w, lookahead.len() as u16).unwrap();
    u16s(&mut w, &lookahead_offsets);
    U16Be::write(&mut w, outputs.len() as u16).unwrap();
    u16s(&mut w, outputs);
    w.write_bytes(&coverage(covered)).unwrap();
    for glyphs in backtrack {
        w.write_bytes(&coverage(glyphs)).unwrap();
    }
    for glyphs in lookahead {
        w.write_bytes(&coverage(glyphs)).unwrap();
    }
    w.into_inner()
}

struct LookupDef {
    lookup_type: u16,
    lookup_flag: u16,
    subtables: Vec<Vec<u8>>,
}

fn lookup(lookup_type: u16, subtable: Vec<u8>) -> LookupDef {
    LookupDef {
        lookup_type,
        lookup_flag: 0,
        subtables: vec![subtable],
    }
}

fn lookup_flagged(lookup_type: u16, lookup_flag: u16, subtable: Vec<u8>) -> LookupDef {
    LookupDef {
        lookup_type,
        lookup_flag,
        subtables: vec![subtable],
    }
}

/// Assemble a whole GSUB table with a `DFLT` script whose default language
/// system lists every feature.
fn build_gsub(features: &[(u32, &[u16])], lookups: &[LookupDef]) -> Vec<u8> {
    let feature_count = features.len();

    // Script list: one DFLT script, default langsys referencing all features
    let mut script_list = WriteBuffer::new();
    U16Be::write(&mut script_list, 1u16).unwrap(); // script count
    U32Be::write(&mut script_list, tag::DFLT).unwrap();
    U16Be::write(&mut script_list, 8u16).unwrap(); // script table offset
    u16s(&mut script_list, &[4, 0]); // default langsys offset, langsys count
    u16s(&mut script_list, &[0, 0xFFFF, feature_count as u16]);
    for index in 0..feature_count {
        U16Be::write(&mut script_list, index as u16).unwrap();
    }
    let script_list = script_list.into_inner();

    // Feature list
    let mut feature_list = WriteBuffer::new();
    U16Be::write(&mut feature_list, feature_count as u16).unwrap();
    let mut table_offset = 2 + 6 * feature_count as u16;
    for (feature_tag, lookup_indices) in features {
        U32Be::write(&mut feature_list, *feature_tag).unwrap();
        U16Be::write(&mut feature_list, table_offset).unwrap();
        table_offset += 4 + 2 * lookup_indices.len() as u16;
    }
    for (_, lookup_indices) in features {
        u16s(&mut feature_list, &[0, lookup_indices.len() as u16]);
        u16s(&mut feature_list, lookup_indices);
    }
    let feature_list = feature_list.into_inner();

    // Lookup list
    let mut lookup_list = WriteBuffer::new();
    U16Be::write(&mut lookup_list, lookups.len() as u16).unwrap();
    let mut lookup_offset = 2 + 2 * lookups.len() as u16;
    for def in lookups {
        U16Be::write(&mut lookup_list, lookup_offset).unwrap();
        let subtable_bytes: usize = def.subtables.iter().map(Vec::len).sum();
        lookup_offset += 6 + 2 * def.subtables.len() as u16 + subtable_bytes as u16;
    }
    for def in lookups {
        u16s(
            &mut lookup_list,
            &[def.lookup_type, def.lookup_flag, def.subtables.len() as u16],
        );
        let mut subtable_offset = 6 + 2 * def.subtables.len() as u16;
        for subtable in &def.subtables {
            U16Be::write(&mut lookup_list, subtable_offset).unwrap();
            subtable_offset += subtable.len() as u16;
        }
        for subtable in &def.subtables {
            lookup_list.write_bytes(subtable).unwrap();
        }
    }
    let lookup_list = lookup_list.into_inner();

    let mut gsub = WriteBuffer::new();
    let script_list_offset = 10u16;
    let feature_list_offset = script_list_offset + script_list.len() as u16;
    let lookup_list_offset = feature_list_offset + feature_list.len() as u16;
    u16s(
        &mut gsub,
        &[1, 0, script_list_offset, feature_list_offset, lookup_list_offset],
    );
    gsub.write_bytes(&script_list).unwrap();
    gsub.write_bytes(&feature_list).unwrap();
    gsub.write_bytes(&lookup_list).unwrap();
    gsub.into_inner()
}

/// GDEF with a format 1 glyph class definition.
fn build_gdef(start_glyph: u16, classes: &[u16]) -> Vec<u8> {
    let mut w = WriteBuffer::new();
    u16s(&mut w, &[1, 0, 12, 0, 0, 0]);
    u16s(&mut w, &[1, start_glyph, classes.len() as u16]);
    u16s(&mut w, classes);
    w.into_inner()
}

fn run(
    gsub_data: &[u8],
    gdef_data: Option<&[u8]>,
    features: &[FeatureInfo],
    stream: &mut GlyphStream,
) -> Result<bool, ShapingError> {
    let table = ReadScope::new(gsub_data).read::<LayoutTable>().unwrap();
    let cache = new_layout_cache(table);
    let gdef = gdef_data.map(|data| ReadScope::new(data).read::<GDEFTable>().unwrap());
    gsub::run_gsub(
        &cache,
        gdef.as_ref(),
        tag::LATN,
        None,
        features,
        stream,
    )
}

fn liga() -> Vec<FeatureInfo> {
    vec![FeatureInfo {
        feature_tag: LIGA,
        alternate: None,
    }]
}

fn stream_of(entries: &[(u16, char, usize)]) -> GlyphStream {
    let mut stream = GlyphStream::new();
    for &(gid, cp, offset) in entries {
        stream.add(gid, cp, offset);
    }
    stream
}

#[test]
fn ligature_collapses_slots() {
    // "fi" with an fi-ligature in liga
    let gsub = build_gsub(
        &[(LIGA, &[0])],
        &[lookup(4, ligature_subst(1, &[2], 10))],
    );
    let mut stream = stream_of(&[(1, 'f', 0), (2, 'i', 1)]);
    let changed = run(&gsub, None, &liga(), &mut stream).unwrap();
    assert!(changed);
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.get(0), &[10]);
    // The surviving slot keeps the offset of 'f'
    assert_eq!(stream.get_cp_and_gids(0), ('f', 0, &[10][..]));
    assert_eq!(stream.try_get_at_offset(1), None);
}

#[test]
fn three_component_ligature() {
    let gsub = build_gsub(
        &[(LIGA, &[0])],
        &[lookup(4, ligature_subst(1, &[1, 2], 11))],
    );
    let mut stream = stream_of(&[(3, 'a', 0), (1, 'f', 1), (1, 'f', 2), (2, 'i', 3), (3, 'a', 4)]);
    assert!(run(&gsub, None, &liga(), &mut stream).unwrap());
    // Count decreases by exactly inputLength - 1
    assert_eq!(stream.len(), 3);
    assert_eq!(stream.get(1), &[11]);
    assert_eq!(stream.get_cp_and_gids(1).1, 1);
    assert_eq!(stream.get_cp_and_gids(2), ('a', 4, &[3][..]));
}

#[test]
fn multiple_substitution_expands_in_place() {
    // An ffi ligature glyph decomposed into three glyphs
    let gsub = build_gsub(&[(LIGA, &[0])], &[lookup(2, multiple_subst(30, &[1, 1, 2]))]);
    let mut stream = stream_of(&[(30, 'ﬃ', 0)]);
    assert!(run(&gsub, None, &liga(), &mut stream).unwrap());
    // Count unchanged, the slot's glyph list grew
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.get(0), &[1, 1, 2]);
}

#[test]
fn single_substitution_both_formats() {
    let gsub = build_gsub(
        &[(LIGA, &[0, 1])],
        &[
            lookup(1, single_subst_delta(&[5], 100)),
            lookup(1, single_subst_list(&[40], &[77])),
        ],
    );
    let mut stream = stream_of(&[(5, 'a', 0), (40, 'b', 1), (6, 'c', 2)]);
    assert!(run(&gsub, None, &liga(), &mut stream).unwrap());
    assert_eq!(stream.get(0), &[105]);
    assert_eq!(stream.get(1), &[77]);
    assert_eq!(stream.get(2), &[6]);
}

#[test]
fn alternate_substitution_picks_index() {
    let gsub = build_gsub(&[(tag::SALT, &[0])], &[lookup(3, alternate_subst(5, &[50, 51, 52]))]);

    let mut stream = stream_of(&[(5, 'a', 0)]);
    let default_features = vec![FeatureInfo {
        feature_tag: tag::SALT,
        alternate: None,
    }];
    assert!(run(&gsub, None, &default_features, &mut stream).unwrap());
    assert_eq!(stream.get(0), &[50]);

    let mut stream = stream_of(&[(5, 'a', 0)]);
    let features = vec![FeatureInfo {
        feature_tag: tag::SALT,
        alternate: Some(2),
    }];
    assert!(run(&gsub, None, &features, &mut stream).unwrap());
    assert_eq!(stream.get(0), &[52]);
}

#[test]
fn chained_context_applies_nested_lookup() {
    // 'b' between 'a' and 'c' becomes 'B': chain context dispatches a nested
    // single substitution at the matched position.
    let gsub = build_gsub(
        &[(tag::CALT, &[0])],
        &[
            lookup(6, chain_context_f3(&[&[1]], &[&[2]], &[&[3]], &[(0, 1)])),
            lookup(1, single_subst_list(&[2], &[20])),
        ],
    );
    let features = vec![FeatureInfo {
        feature_tag: tag::CALT,
        alternate: None,
    }];
    let mut stream = stream_of(&[(1, 'a', 0), (2, 'b', 1), (3, 'c', 2)]);
    assert!(run(&gsub, None, &features, &mut stream).unwrap());
    assert_eq!(stream.get(0), &[1]);
    assert_eq!(stream.get(1), &[20]);
    assert_eq!(stream.get(2), &[3]);

    // Without the lookahead 'c' the context must not fire
    let mut stream = stream_of(&[(1, 'a', 0), (2, 'b', 1), (4, 'd', 2)]);
    assert!(!run(&gsub, None, &features, &mut stream).unwrap());
    assert_eq!(stream.get(1), &[2]);
}

#[test]
fn context_format3_applies_nested_lookup() {
    // Pattern "1 2" rewrites its second position
    let gsub = build_gsub(
        &[(tag::CALT, &[0])],
        &[
            lookup(5, context_f3(&[&[1], &[2]], &[(1, 1)])),
            lookup(1, single_subst_delta(&[2], 5)),
        ],
    );
    let features = vec![FeatureInfo {
        feature_tag: tag::CALT,
        alternate: None,
    }];
    let mut stream = stream_of(&[(1, 'a', 0), (2, 'b', 1)]);
    assert!(run(&gsub, None, &features, &mut stream).unwrap());
    assert_eq!(stream.get(0), &[1]);
    assert_eq!(stream.get(1), &[7]);
}

#[test]
fn extension_lookup_dissolves_to_inner_type() {
    let gsub = build_gsub(
        &[(LIGA, &[0])],
        &[lookup(7, extension(4, &ligature_subst(1, &[2], 10)))],
    );
    let mut stream = stream_of(&[(1, 'f', 0), (2, 'i', 1)]);
    assert!(run(&gsub, None, &liga(), &mut stream).unwrap());
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.get(0), &[10]);
}

#[test]
fn reverse_chain_walks_right_to_left() {
    // Glyph 1 followed by glyph 2 becomes glyph 9; the rewrite of a later
    // position must not stop an earlier one from seeing its original
    // lookahead, which is what right-to-left application guarantees for
    // cascading final forms. Here both 1s sit before a 2.
    let gsub = build_gsub(
        &[(tag::RLIG, &[0])],
        &[lookup(8, reverse_chain(&[1], &[], &[&[1, 2]], &[9]))],
    );
    let features = vec![FeatureInfo {
        feature_tag: tag::RLIG,
        alternate: None,
    }];
    let mut stream = stream_of(&[(1, 'a', 0), (1, 'b', 1), (2, 'c', 2)]);
    assert!(run(&gsub, None, &features, &mut stream).unwrap());
    // Rightmost 1 sees lookahead 2 and becomes 9; after that rewrite the
    // leftmost 1's lookahead is 9, which is not in the lookahead class, so a
    // left-to-right pass would have produced [9, 9, 2].
    assert_eq!(stream.get(0), &[1]);
    assert_eq!(stream.get(1), &[9]);
    assert_eq!(stream.get(2), &[2]);
}

#[test]
fn lookup_flag_skips_marks_in_ligature() {
    // Glyph 5 is class 3 (mark); the liga lookup ignores marks, so f + mark
    // + i still forms the ligature and the mark survives in place.
    let gsub = build_gsub(
        &[(LIGA, &[0])],
        &[lookup_flagged(4, 0x0008, ligature_subst(1, &[2], 10))],
    );
    let gdef = build_gdef(1, &[1, 1, 0, 0, 3]);
    let mut stream = stream_of(&[(1, 'f', 0), (5, '\u{0301}', 1), (2, 'i', 2)]);
    assert!(run(&gsub, Some(&gdef), &liga(), &mut stream).unwrap());
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.get(0), &[10]);
    assert_eq!(stream.get(1), &[5]);
    // Offsets of the survivor and the mark are retained
    assert_eq!(stream.get_cp_and_gids(0).1, 0);
    assert_eq!(stream.get_cp_and_gids(1).1, 1);
}

#[test]
fn unknown_feature_is_a_no_op() {
    let gsub = build_gsub(&[(LIGA, &[0])], &[lookup(1, single_subst_delta(&[1], 1))]);
    let features = vec![FeatureInfo {
        feature_tag: tag::SMCP,
        alternate: None,
    }];
    let mut stream = stream_of(&[(1, 'a', 0)]);
    assert!(!run(&gsub, None, &features, &mut stream).unwrap());
    assert_eq!(stream.get(0), &[1]);
}

#[test]
fn slot_requested_feature_applies_locally() {
    // smcp is not enabled run-wide; only the slot that requests it rewrites.
    let gsub = build_gsub(&[(tag::SMCP, &[0])], &[lookup(1, single_subst_delta(&[1], 100))]);
    let mut stream = stream_of(&[(1, 'a', 0), (1, 'b', 1)]);
    stream.add_feature(1, tag::SMCP);
    assert!(run(&gsub, None, &[], &mut stream).unwrap());
    assert_eq!(stream.get(0), &[1]);
    assert_eq!(stream.get(1), &[101]);
}

#[test]
fn features_apply_in_font_order() {
    // The font lists liga before salt in the langsys; liga forms the
    // ligature first and salt then rewrites the ligature glyph, proving
    // later features see the stream rewritten by earlier ones.
    let gsub = build_gsub(
        &[(LIGA, &[0]), (tag::SALT, &[1])],
        &[
            lookup(4, ligature_subst(1, &[2], 10)),
            lookup(1, single_subst_delta(&[10], 1)),
        ],
    );
    let features = vec![
        FeatureInfo {
            feature_tag: tag::SALT,
            alternate: None,
        },
        FeatureInfo {
            feature_tag: LIGA,
            alternate: None,
        },
    ];
    let mut stream = stream_of(&[(1, 'f', 0), (2, 'i', 1)]);
    assert!(run(&gsub, None, &features, &mut stream).unwrap());
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.get(0), &[11]);
}

#[test]
fn nesting_limit_is_a_malformed_font() {
    // A context lookup that dispatches itself recurses until the cap.
    let gsub = build_gsub(
        &[(tag::CALT, &[0])],
        &[lookup(5, context_f3(&[&[1]], &[(0, 0)]))],
    );
    let features = vec![FeatureInfo {
        feature_tag: tag::CALT,
        alternate: None,
    }];
    let mut stream = stream_of(&[(1, 'a', 0)]);
    match run(&gsub, None, &features, &mut stream) {
        Err(ShapingError::Parse(ParseError::LimitExceeded)) => {}
        other => panic!("expected nesting limit error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn would_apply_probe_is_non_mutating() {
    let gsub_data = build_gsub(&[(LIGA, &[0])], &[lookup(4, ligature_subst(1, &[2], 10))]);
    let table = ReadScope::new(&gsub_data).read::<LayoutTable>().unwrap();
    let cache = new_layout_cache(table);
    let stream = stream_of(&[(1, 'f', 0), (2, 'i', 1)]);

    let gsub_table = &cache.layout_table;
    let script = gsub_table.find_script_or_default(tag::LATN).unwrap().unwrap();
    let langsys = script.find_langsys_or_default(None).unwrap().unwrap();
    assert!(gsub::gsub_feature_would_apply(
        &cache, gsub_table, None, langsys, LIGA, &stream, 0
    )
    .unwrap());
    assert!(!gsub::gsub_feature_would_apply(
        &cache, gsub_table, None, langsys, LIGA, &stream, 1
    )
    .unwrap());
    // Probing left the stream untouched
    assert_eq!(stream.len(), 2);
    assert_eq!(stream.get(0), &[1]);
}
