//! The glyph substitution stream.
//!
//! A [GlyphStream] holds, for each code point of a text run, the glyphs that
//! currently represent it. The shaper seeds the stream with one glyph per
//! code point; substitution then rewrites it in place. Slots are addressed two
//! ways: by dense position (0-based, shifting as ligatures collapse slots) and
//! by the code point's original offset into the run, which is stable for the
//! life of the stream. Ligatures leave holes in the offset sequence, so
//! offset-addressed state lives in maps keyed on offset rather than in the
//! dense vector.
//!
//! Violating a stream precondition (non-monotonic offset, index out of range)
//! is a programming error and panics.

use rustc_hash::FxHashMap;
use tinyvec::{tiny_vec, TinyVec};

/// One stream position: a code point and the glyphs that currently represent
/// it. The glyph list is never empty while the slot exists; it grows beyond
/// one entry only through one-to-many substitution.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub codepoint: char,
    pub glyph_ids: TinyVec<[u16; 1]>,
}

/// Mutable, position-indexed glyph stream for one text run.
#[derive(Clone, Debug, Default)]
pub struct GlyphStream {
    /// Dense position → original code point offset. Strictly increasing.
    offsets: Vec<usize>,
    /// Original offset → slot.
    slots: FxHashMap<usize, Slot>,
    /// Original offset → feature tags requested for the slot.
    features: FxHashMap<usize, Vec<u32>>,
}

const NO_FEATURES: &[u32] = &[];

impl GlyphStream {
    pub fn new() -> Self {
        GlyphStream::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        GlyphStream {
            offsets: Vec::with_capacity(capacity),
            slots: FxHashMap::default(),
            features: FxHashMap::default(),
        }
    }

    /// The number of slots in the stream.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Append a slot for `codepoint` at `offset`.
    ///
    /// `offset` must be strictly greater than every offset already in the
    /// stream.
    pub fn add(&mut self, glyph_id: u16, codepoint: char, offset: usize) {
        if let Some(&last) = self.offsets.last() {
            assert!(
                offset > last,
                "GlyphStream::add: offset {} not greater than last offset {}",
                offset,
                last
            );
        }
        self.offsets.push(offset);
        self.slots.insert(
            offset,
            Slot {
                codepoint,
                glyph_ids: tiny_vec![[u16; 1] => glyph_id],
            },
        );
    }

    fn offset_at(&self, index: usize) -> usize {
        assert!(
            index < self.offsets.len(),
            "GlyphStream: index {} out of range (len {})",
            index,
            self.offsets.len()
        );
        self.offsets[index]
    }

    fn slot(&self, index: usize) -> &Slot {
        let offset = self.offset_at(index);
        &self.slots[&offset]
    }

    /// The glyphs of the slot at dense position `index`.
    pub fn get(&self, index: usize) -> &[u16] {
        &self.slot(index).glyph_ids
    }

    /// The code point, original offset, and glyphs of the slot at `index`.
    pub fn get_cp_and_gids(&self, index: usize) -> (char, usize, &[u16]) {
        let offset = self.offset_at(index);
        let slot = &self.slots[&offset];
        (slot.codepoint, offset, &slot.glyph_ids)
    }

    /// Look a slot up by its original code point offset. Offsets consumed by
    /// ligature collapses no longer resolve.
    pub fn try_get_at_offset(&self, offset: usize) -> Option<(char, &[u16])> {
        self.slots
            .get(&offset)
            .map(|slot| (slot.codepoint, slot.glyph_ids.as_slice()))
    }

    /// The first glyph of the slot at `index`. Coverage and class tests read
    /// only this glyph.
    pub fn first_gid(&self, index: usize) -> u16 {
        self.slot(index).glyph_ids[0]
    }

    pub fn codepoint(&self, index: usize) -> char {
        self.slot(index).codepoint
    }

    /// Rewrite the slot at `index` to hold the single glyph `glyph_id`.
    /// Offsets are unchanged.
    pub fn replace(&mut self, index: usize, glyph_id: u16) {
        let offset = self.offset_at(index);
        let slot = self.slots.get_mut(&offset).unwrap();
        slot.glyph_ids.clear();
        slot.glyph_ids.push(glyph_id);
    }

    /// Collapse `count` consecutive slots starting at `index` into one slot
    /// holding `glyph_id`. The surviving slot keeps the offset (and code
    /// point) of slot `index`; the offsets of the following `count - 1` slots
    /// are discarded, never renumbered. Feature tags of the collapsed slots
    /// are folded into the survivor.
    pub fn replace_range(&mut self, index: usize, count: usize, glyph_id: u16) {
        assert!(count >= 1, "GlyphStream::replace_range: empty range");
        assert!(
            index + count <= self.offsets.len(),
            "GlyphStream::replace_range: range {}..{} out of range (len {})",
            index,
            index + count,
            self.offsets.len()
        );
        for removed in self.offsets.drain(index + 1..index + count).collect::<Vec<_>>() {
            self.slots.remove(&removed);
            if let Some(tags) = self.features.remove(&removed) {
                let offset = self.offsets[index];
                let survivor = self.features.entry(offset).or_default();
                for tag in tags {
                    if !survivor.contains(&tag) {
                        survivor.push(tag);
                    }
                }
            }
        }
        self.replace(index, glyph_id);
    }

    /// One-to-many substitution: the slot at `index` now carries `glyph_ids`.
    /// The position count is unchanged.
    pub fn replace_many(&mut self, index: usize, glyph_ids: &[u16]) {
        assert!(
            !glyph_ids.is_empty(),
            "GlyphStream::replace_many: a slot's glyph list must not be empty"
        );
        let offset = self.offset_at(index);
        let slot = self.slots.get_mut(&offset).unwrap();
        slot.glyph_ids.clear();
        slot.glyph_ids.extend_from_slice(glyph_ids);
    }

    /// Remove the slot at `index` entirely, folding its feature tags into the
    /// slot at `survivor_index`. Used when a ligature's components are not
    /// contiguous because skipped slots sit between them.
    pub(crate) fn remove_into(&mut self, index: usize, survivor_index: usize) {
        let survivor_offset = self.offset_at(survivor_index);
        let offset = self.offset_at(index);
        self.offsets.remove(index);
        self.slots.remove(&offset);
        if let Some(tags) = self.features.remove(&offset) {
            let survivor = self.features.entry(survivor_offset).or_default();
            for tag in tags {
                if !survivor.contains(&tag) {
                    survivor.push(tag);
                }
            }
        }
    }

    /// Request feature `tag` for the slot at `index`.
    pub fn add_feature(&mut self, index: usize, tag: u32) {
        let offset = self.offset_at(index);
        let tags = self.features.entry(offset).or_default();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    /// The feature tags requested for the slot at `index`.
    pub fn features(&self, index: usize) -> &[u32] {
        let offset = self.offset_at(index);
        self.features
            .get(&offset)
            .map_or(NO_FEATURES, |tags| tags.as_slice())
    }

    /// Empty the stream for reuse.
    pub fn clear(&mut self) {
        self.offsets.clear();
        self.slots.clear();
        self.features.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(entries: &[(u16, char, usize)]) -> GlyphStream {
        let mut stream = GlyphStream::new();
        for &(gid, cp, offset) in entries {
            stream.add(gid, cp, offset);
        }
        stream
    }

    #[test]
    fn test_add_and_get() {
        let stream = stream_of(&[(10, 'a', 0), (11, 'b', 1), (12, 'c', 2)]);
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.get(1), &[11]);
        assert_eq!(stream.get_cp_and_gids(2), ('c', 2, &[12][..]));
        assert_eq!(stream.try_get_at_offset(1), Some(('b', &[11][..])));
        assert_eq!(stream.try_get_at_offset(7), None);
    }

    #[test]
    #[should_panic(expected = "not greater than last offset")]
    fn test_add_duplicate_offset_panics() {
        let mut stream = stream_of(&[(10, 'a', 3)]);
        stream.add(11, 'b', 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let stream = stream_of(&[(10, 'a', 0)]);
        stream.get(1);
    }

    #[test]
    fn test_replace_keeps_offsets() {
        let mut stream = stream_of(&[(10, 'a', 0), (11, 'b', 1)]);
        stream.replace(1, 99);
        assert_eq!(stream.get(1), &[99]);
        assert_eq!(stream.try_get_at_offset(1), Some(('b', &[99][..])));
    }

    #[test]
    fn test_replace_range_discards_offsets() {
        // Collapse "ffi" spread over offsets 4, 5, 6
        let mut stream = stream_of(&[(1, 'x', 3), (20, 'f', 4), (20, 'f', 5), (21, 'i', 6)]);
        stream.replace_range(1, 3, 77);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.get(1), &[77]);
        // Survivor keeps the offset of the first consumed slot
        assert_eq!(stream.try_get_at_offset(4), Some(('f', &[77][..])));
        assert_eq!(stream.try_get_at_offset(5), None);
        assert_eq!(stream.try_get_at_offset(6), None);
    }

    #[test]
    fn test_replace_range_merges_features() {
        let mut stream = stream_of(&[(20, 'f', 0), (21, 'i', 1)]);
        stream.add_feature(0, crate::tag::LIGA);
        stream.add_feature(1, crate::tag::SMCP);
        stream.replace_range(0, 2, 77);
        assert_eq!(stream.features(0), &[crate::tag::LIGA, crate::tag::SMCP]);
    }

    #[test]
    fn test_replace_many_keeps_count() {
        let mut stream = stream_of(&[(30, 'ﬃ', 0), (31, 'x', 1)]);
        stream.replace_many(0, &[20, 20, 21]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.get(0), &[20, 20, 21]);
        assert_eq!(stream.first_gid(0), 20);
    }

    #[test]
    fn test_offsets_stay_monotonic_through_mutation() {
        let mut stream = stream_of(&[(1, 'a', 0), (2, 'b', 2), (3, 'c', 5), (4, 'd', 9)]);
        stream.replace_range(1, 2, 50);
        stream.replace_many(0, &[7, 8]);
        let offsets: Vec<usize> = (0..stream.len())
            .map(|i| stream.get_cp_and_gids(i).1)
            .collect();
        assert_eq!(offsets, vec![0, 2, 9]);
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_add_feature_deduplicates() {
        let mut stream = stream_of(&[(1, 'a', 0)]);
        stream.add_feature(0, crate::tag::LIGA);
        stream.add_feature(0, crate::tag::LIGA);
        assert_eq!(stream.features(0), &[crate::tag::LIGA]);
        assert!(stream.features(0).len() == 1);
    }

    #[test]
    fn test_clear() {
        let mut stream = stream_of(&[(1, 'a', 0), (2, 'b', 1)]);
        stream.add_feature(0, crate::tag::LIGA);
        stream.clear();
        assert!(stream.is_empty());
        assert_eq!(stream.try_get_at_offset(0), None);
    }
}
