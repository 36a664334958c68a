//! Line layout: turning a text run into positioned glyph records.
//!
//! [generate_layout] walks the text one grapheme cluster at a time, emitting a
//! [GlyphLayout] record per glyph with baseline-relative positions, and
//! handles hard line breaks, soft wrapping at UAX #14 break opportunities,
//! tab stops, and horizontal/vertical alignment. Positions are computed in
//! user-space units scaled from font design units by the style's point size.
//!
//! Layout itself cannot fail: code points the style cannot resolve a glyph
//! for are skipped.

use crate::metrics::StyleProvider;
use crate::unicode::{is_cjk, is_newline, LineBreaks};

use icu_segmenter::GraphemeClusterSegmenter;

/// Horizontal placement of each line within the wrapping box (or about the
/// origin when wrapping is disabled).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of the whole block relative to the origin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Word-breaking mode for soft wrapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WordBreak {
    /// Break at UAX #14 opportunities.
    #[default]
    Normal,
    /// Any glyph boundary is a break opportunity.
    BreakAll,
    /// Do not break inside runs of CJK text.
    KeepAll,
}

/// Options controlling a layout run. There are no ambient defaults; layout is
/// a pure function of the text and this record.
pub struct TextOptions<'a> {
    pub dpi: (f32, f32),
    pub origin: (f32, f32),
    /// Wrapping box width in DPI-scaled units; `0.0` disables wrapping.
    pub wrapping_width: f32,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Multiplier applied to the font's line height.
    pub line_spacing: f32,
    /// Tab stops are this multiple of the tab glyph's advance.
    pub tab_width: f32,
    pub word_break: WordBreak,
    pub styles: &'a dyn StyleProvider,
}

/// One positioned glyph. Records are produced in logical reading order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphLayout {
    pub grapheme_index: usize,
    pub codepoint: char,
    pub glyph_id: u16,
    /// Pen position of the glyph in user-space units, relative to the origin.
    pub location: (f32, f32),
    /// Advance width. Glyphs sharing a slot share the widest advance.
    pub width: f32,
    /// Advance height.
    pub height: f32,
    /// The running height of the line this glyph was emitted on.
    pub line_height: f32,
    /// Marks the first record of a line. Glyphs of a multi-glyph grapheme at
    /// a line head all carry the flag.
    pub start_of_line: bool,
}

/// Lay out `text`, producing one record per resolved glyph.
pub fn generate_layout(text: &str, options: &TextOptions<'_>) -> Vec<GlyphLayout> {
    let origin = (
        options.origin.0 / options.dpi.0,
        options.origin.1 / options.dpi.1,
    );
    let wrapping = options.wrapping_width > 0.0;
    let text = if wrapping {
        text.trim_end_matches(char::is_whitespace)
    } else {
        text
    };
    if text.is_empty() {
        return Vec::new();
    }
    let max_width = if wrapping {
        options.wrapping_width / options.dpi.0
    } else {
        f32::INFINITY
    };
    // The alignment anchor each line is placed against in the final sweep
    let align_x = if wrapping {
        match options.horizontal_align {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => max_width / 2.0,
            HorizontalAlign::Right => max_width,
        }
    } else {
        0.0
    };

    let total_cps = text.chars().count();
    let mut breaks = LineBreaks::new(text);
    let mut next_event = breaks.next();
    let mut pending_required = false;

    let mut layout: Vec<GlyphLayout> = Vec::with_capacity(total_cps);
    let mut pen = (0.0f32, 0.0f32);
    let mut line_height = 0.0f32;
    let mut line_ascender = 0.0f32;
    let mut line_descender = 0.0f32; // magnitude below the baseline
    let mut top = 0.0f32;
    let mut first_line = true;
    let mut start_of_line = true;
    let mut last_wrappable: isize = -1;

    let mut cp_index = 0usize;
    let mut style = options.styles.style(0, total_cps);

    let segmenter = GraphemeClusterSegmenter::new();
    let boundaries: Vec<usize> = segmenter.segment_str(text).collect();

    for (grapheme_index, bounds) in boundaries.windows(2).enumerate() {
        // Never break between code points of the same grapheme: break
        // bookkeeping below only ever records positions at cluster heads.
        for ch in text[bounds[0]..bounds[1]].chars() {
            if !style.covers(cp_index) {
                style = options.styles.style(cp_index, total_cps);
            }

            // The end-of-text mandatory break (UAX #14 LB3) is not a position
            // a new line can start at, so it never becomes a wrap opportunity.
            let at_wrappable = match next_event {
                Some((position_wrap, _)) if position_wrap < total_cps => {
                    cp_index + 1 == position_wrap
                }
                _ => false,
            };
            // Advance to the next break event once the current one is consumed
            if let Some((position_wrap, required)) = next_event {
                if cp_index + 1 >= position_wrap {
                    if required && position_wrap < total_cps {
                        pending_required = true;
                    }
                    next_event = breaks.next();
                }
            }

            let resolved = style.font.resolve(ch, cp_index);
            let gids = match resolved {
                Some(gids) => gids,
                None => {
                    // Missing glyph: not an error, the slot is skipped
                    cp_index += 1;
                    continue;
                }
            };

            let font_metrics = style.font.font_metrics();
            let em = style.point_size / font_metrics.units_per_em;
            line_height =
                line_height.max(font_metrics.line_height * options.line_spacing * em);
            line_ascender = line_ascender.max(font_metrics.ascender * em);
            line_descender = line_descender.max((font_metrics.descender * em).abs());
            if first_line {
                top = match options.vertical_align {
                    VerticalAlign::Top => line_ascender,
                    VerticalAlign::Center => (line_ascender + line_descender) / 2.0,
                    VerticalAlign::Bottom => -line_descender,
                };
            }

            // Record where a wrap could fall back to before emitting
            let must_update = at_wrappable
                || options.word_break == WordBreak::BreakAll
                || pending_required;
            if must_update && !(options.word_break == WordBreak::KeepAll && is_cjk(ch)) {
                last_wrappable = layout
                    .iter()
                    .rposition(|record| !record.codepoint.is_whitespace())
                    .map_or(0, |index| index as isize + 1);
            }

            let glyph_metrics = style.font.glyph_metrics(gids[0]);
            let height = glyph_metrics.advance_height * em;

            if ch == '\r' {
                // Carriage return resets the pen; the line itself only
                // advances on the line feed that usually follows.
                pen.0 = 0.0;
                layout.push(GlyphLayout {
                    grapheme_index,
                    codepoint: ch,
                    glyph_id: gids[0],
                    location: pen,
                    width: 0.0,
                    height,
                    line_height,
                    start_of_line: true,
                });
                start_of_line = false;
            } else if is_newline(ch) {
                layout.push(GlyphLayout {
                    grapheme_index,
                    codepoint: ch,
                    glyph_id: gids[0],
                    location: pen,
                    width: 0.0,
                    height,
                    line_height,
                    start_of_line,
                });
                pen.0 = 0.0;
                pen.1 += line_height;
                line_height = 0.0;
                line_ascender = 0.0;
                line_descender = 0.0;
                first_line = false;
                last_wrappable = -1;
                start_of_line = true;
                pending_required = false;
            } else if ch == '\t' {
                let glyph_advance = glyph_metrics.advance_width * em;
                let tab_stop = glyph_advance * options.tab_width;
                let mut final_width = tab_stop - (pen.0 % tab_stop);
                if final_width < glyph_advance {
                    // A tab never renders narrower than the underlying glyph
                    final_width += tab_stop;
                }
                let flag = start_of_line;
                start_of_line = false;
                layout.push(GlyphLayout {
                    grapheme_index,
                    codepoint: ch,
                    glyph_id: gids[0],
                    location: pen,
                    width: final_width,
                    height,
                    line_height,
                    start_of_line: flag,
                });
                pen.0 += final_width;
            } else if ch.is_whitespace() {
                let advance = glyph_metrics.advance_width * em;
                let flag = start_of_line;
                start_of_line = false;
                layout.push(GlyphLayout {
                    grapheme_index,
                    codepoint: ch,
                    glyph_id: gids[0],
                    location: pen,
                    width: advance,
                    height,
                    line_height,
                    start_of_line: flag,
                });
                pen.0 += advance;
            } else {
                // Renderable: one record per glyph in the slot, all sharing
                // the same position and the widest advance.
                let widest = gids
                    .iter()
                    .map(|&gid| style.font.glyph_metrics(gid).advance_width * em)
                    .fold(0.0f32, f32::max);
                let flag = start_of_line;
                start_of_line = false;
                for &gid in gids.iter() {
                    let gm = style.font.glyph_metrics(gid);
                    layout.push(GlyphLayout {
                        grapheme_index,
                        codepoint: ch,
                        glyph_id: gid,
                        location: pen,
                        width: widest,
                        height: gm.advance_height * em,
                        line_height,
                        start_of_line: flag,
                    });
                }
                pen.0 += widest;

                if pen.0 >= max_width
                    && last_wrappable > 0
                    && (last_wrappable as usize) < layout.len()
                {
                    let wrap_at = last_wrappable as usize;
                    let mut wrapping_offset = layout[wrap_at].location.0;
                    let mut drop_end = wrap_at;
                    while drop_end < layout.len()
                        && layout[drop_end].codepoint.is_whitespace()
                    {
                        wrapping_offset += layout[drop_end].width;
                        drop_end += 1;
                    }
                    layout.drain(wrap_at..drop_end);
                    for record in &mut layout[wrap_at..] {
                        record.location.0 -= wrapping_offset;
                        record.location.1 += line_height;
                    }
                    layout[wrap_at].start_of_line = true;
                    let last = layout[layout.len() - 1];
                    pen.0 = last.location.0 + last.width;
                    pen.1 += line_height;
                    first_line = false;
                    last_wrappable = -1;
                }
            }

            cp_index += 1;
        }
    }

    let total_height = pen.1 + line_height;
    let offset_y = match options.vertical_align {
        VerticalAlign::Top => top,
        VerticalAlign::Center => top - total_height / 2.0,
        VerticalAlign::Bottom => top - total_height,
    };

    // Per-line horizontal placement. A line runs from a start-of-line record
    // to the next start-of-line record of a different grapheme: glyphs of a
    // multi-glyph grapheme at a line head all carry the flag and must not
    // terminate the scan.
    let mut i = 0;
    while i < layout.len() {
        if !layout[i].start_of_line {
            i += 1;
            continue;
        }
        let line_grapheme = layout[i].grapheme_index;
        let mut j = i + 1;
        while j < layout.len()
            && !(layout[j].start_of_line && layout[j].grapheme_index != line_grapheme)
        {
            j += 1;
        }
        let line_width = layout[i..j]
            .iter()
            .map(|record| record.location.0 + record.width)
            .fold(0.0f32, f32::max);
        let offset_x = align_x
            - match options.horizontal_align {
                HorizontalAlign::Left => 0.0,
                HorizontalAlign::Center => line_width / 2.0,
                HorizontalAlign::Right => line_width,
            };
        for record in &mut layout[i..j] {
            record.location.0 += offset_x + origin.0;
            record.location.1 += offset_y + origin.1;
        }
        i = j;
    }

    layout
}
