//! Layout scenarios driven through a fixture font with transparent metrics.
//!
//! The fixture uses 10 design units per em, so at 10 pt one design unit is
//! one user-space unit and the arithmetic in the assertions stays readable.

use typeline::metrics::{AppliedStyle, FontMetrics, FontSource, GlyphMetrics, StyleProvider};
use typeline::tinyvec::{tiny_vec, TinyVec};
use typeline::typeset::{
    generate_layout, GlyphLayout, HorizontalAlign, TextOptions, VerticalAlign, WordBreak,
};
use typeline::unicode::is_newline;

/// A code point the fixture font has no glyph for.
const UNMAPPED: char = '\u{E000}';

const SPACE_GID: u16 = 1;
const TAB_GID: u16 = 2;
const CONTROL_GID: u16 = 0;

#[derive(Clone)]
struct TestFont {
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    line_height: f32,
    letter_advance: f32,
    space_advance: f32,
    tab_advance: f32,
}

impl Default for TestFont {
    fn default() -> Self {
        TestFont {
            units_per_em: 10.0,
            ascender: 0.0,
            descender: 0.0,
            line_height: 12.0,
            letter_advance: 1.0,
            space_advance: 1.0,
            tab_advance: 1.0,
        }
    }
}

impl FontSource for TestFont {
    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            units_per_em: self.units_per_em,
            ascender: self.ascender,
            descender: self.descender,
            line_height: self.line_height,
            font_id: 0,
        }
    }

    fn resolve(&self, codepoint: char, _cp_index: usize) -> Option<TinyVec<[u16; 1]>> {
        match codepoint {
            UNMAPPED => None,
            ' ' => Some(tiny_vec![[u16; 1] => SPACE_GID]),
            '\t' => Some(tiny_vec![[u16; 1] => TAB_GID]),
            '\r' => Some(tiny_vec![[u16; 1] => CONTROL_GID]),
            // One code point carried by two glyphs, as after a one-to-many
            // substitution
            'Ω' => {
                let mut gids = tiny_vec![[u16; 1] => 7];
                gids.push(8);
                Some(gids)
            }
            ch if is_newline(ch) => Some(tiny_vec![[u16; 1] => CONTROL_GID]),
            ch => Some(tiny_vec![[u16; 1] => ch as u16]),
        }
    }

    fn glyph_metrics(&self, glyph_id: u16) -> GlyphMetrics {
        let advance_width = match glyph_id {
            CONTROL_GID => 0.0,
            SPACE_GID => self.space_advance,
            TAB_GID => self.tab_advance,
            7 => 2.0 * self.letter_advance,
            8 => self.letter_advance,
            _ => self.letter_advance,
        };
        GlyphMetrics {
            advance_width,
            advance_height: self.line_height,
            bearing_x: 0.0,
            bearing_y: 0.0,
        }
    }
}

struct SingleStyle {
    font: TestFont,
    point_size: f32,
}

impl SingleStyle {
    fn new(font: TestFont, point_size: f32) -> Self {
        SingleStyle { font, point_size }
    }
}

impl StyleProvider for SingleStyle {
    fn style(&self, _cp_index: usize, total_cp_count: usize) -> AppliedStyle<'_> {
        AppliedStyle {
            point_size: self.point_size,
            start: 0,
            end: total_cp_count,
            font: &self.font,
        }
    }
}

/// Two styles split at a code point index.
struct SplitStyle {
    split: usize,
    first: SingleStyle,
    second: SingleStyle,
}

impl StyleProvider for SplitStyle {
    fn style(&self, cp_index: usize, total_cp_count: usize) -> AppliedStyle<'_> {
        if cp_index < self.split {
            AppliedStyle {
                point_size: self.first.point_size,
                start: 0,
                end: self.split,
                font: &self.first.font,
            }
        } else {
            AppliedStyle {
                point_size: self.second.point_size,
                start: self.split,
                end: total_cp_count,
                font: &self.second.font,
            }
        }
    }
}

fn options(styles: &dyn StyleProvider) -> TextOptions<'_> {
    TextOptions {
        dpi: (1.0, 1.0),
        origin: (0.0, 0.0),
        wrapping_width: 0.0,
        horizontal_align: HorizontalAlign::Left,
        vertical_align: VerticalAlign::Top,
        line_spacing: 1.0,
        tab_width: 4.0,
        word_break: WordBreak::Normal,
        styles,
    }
}

fn layout_width(layout: &[GlyphLayout]) -> f32 {
    layout
        .iter()
        .map(|record| record.location.0 + record.width)
        .fold(0.0, f32::max)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "{} != {}",
        actual,
        expected
    );
}

#[test]
fn whitespace_run_width_and_height() {
    // Ten spaces at 30 pt / 72 dpi; the space advance is 2 design units in a
    // 10-unit em, so each space is 6 user units wide.
    let font = TestFont {
        ascender: 10.0,
        descender: -2.37,
        line_height: 12.37,
        space_advance: 2.0,
        ..TestFont::default()
    };
    let styles = SingleStyle::new(font, 30.0);
    let mut opts = options(&styles);
    opts.dpi = (72.0, 72.0);
    let layout = generate_layout("          ", &opts);
    assert_eq!(layout.len(), 10);
    assert_close(layout_width(&layout), 60.0);
    // The line height is the font's ascender + |descender| scaled to 30 pt
    assert_close(layout[0].line_height, 37.11);
}

#[test]
fn hard_newline_starts_second_line() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let opts = options(&styles);
    let layout = generate_layout("abc\ndef", &opts);
    assert_eq!(layout.len(), 7);

    let newline = &layout[3];
    assert_eq!(newline.codepoint, '\n');
    assert_eq!(newline.width, 0.0);

    let d = &layout[4];
    assert!(d.start_of_line);
    assert_close(d.location.0, 0.0);
    assert_close(d.location.1, 12.0);
    for record in &layout[4..] {
        assert!(record.location.0 >= 0.0);
        assert_close(record.location.1, 12.0);
    }
    for record in &layout[..3] {
        assert_close(record.location.1, 0.0);
        assert!(!record.start_of_line || record.grapheme_index == 0);
    }
}

#[test]
fn soft_wrap_drops_trailing_space() {
    // At 10 pt every glyph is one unit wide; 13 units fit "hello world" and
    // the first glyph of "foo" overflows.
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let mut opts = options(&styles);
    opts.wrapping_width = 13.0;
    let layout = generate_layout("hello world foo", &opts);

    // The space between "world" and "foo" was dropped
    assert_eq!(layout.len(), 14);
    let f = &layout[11];
    assert_eq!(f.codepoint, 'f');
    assert!(f.start_of_line);
    assert_close(f.location.0, 0.0);
    assert_close(f.location.1, 12.0);
    assert_close(layout[12].location.0, 1.0);
    assert_close(layout[13].location.0, 2.0);
    // Line 1 is untouched
    for record in &layout[..11] {
        assert_close(record.location.1, 0.0);
    }
    // Logical order (and grapheme monotonicity) survives wrapping
    for pair in layout.windows(2) {
        assert!(pair[0].grapheme_index <= pair[1].grapheme_index);
    }
}

#[test]
fn tab_advances_to_next_stop() {
    // Letter advance 10, tab glyph advance 7.5, multiplier 4: the tab stop
    // grid is every 30 units. After "a" the pen is at 10.
    let font = TestFont {
        letter_advance: 10.0,
        tab_advance: 7.5,
        ..TestFont::default()
    };
    let styles = SingleStyle::new(font, 10.0);
    let opts = options(&styles);
    let layout = generate_layout("a\t", &opts);
    let tab = &layout[1];
    assert_eq!(tab.codepoint, '\t');
    assert_close(tab.location.0, 10.0);
    assert_close(tab.width, 20.0);
}

#[test]
fn tab_never_narrower_than_its_glyph() {
    // Pen at 25: the distance to the stop at 30 is 5, less than the tab
    // glyph's advance of 7.5, so the tab runs to the following stop.
    let font = TestFont {
        letter_advance: 12.5,
        tab_advance: 7.5,
        ..TestFont::default()
    };
    let styles = SingleStyle::new(font, 10.0);
    let opts = options(&styles);
    let layout = generate_layout("aa\t", &opts);
    let tab = &layout[2];
    assert_close(tab.location.0, 25.0);
    assert_close(tab.width, 35.0);
}

#[test]
fn center_and_right_alignment() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);

    let mut opts = options(&styles);
    opts.horizontal_align = HorizontalAlign::Center;
    let layout = generate_layout("ab\ncd", &opts);
    assert_close(layout[0].location.0, -1.0);
    assert_close(layout[1].location.0, 0.0);
    assert_close(layout[3].location.0, -1.0);

    let mut opts = options(&styles);
    opts.horizontal_align = HorizontalAlign::Right;
    let layout = generate_layout("ab\ncd", &opts);
    assert_close(layout[0].location.0, -2.0);
    assert_close(layout[1].location.0, -1.0);
}

#[test]
fn right_alignment_in_wrapping_box() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let mut opts = options(&styles);
    opts.wrapping_width = 10.0;
    opts.horizontal_align = HorizontalAlign::Right;
    let layout = generate_layout("ab", &opts);
    assert_close(layout[0].location.0, 8.0);
    assert_close(layout[1].location.0, 9.0);
}

#[test]
fn vertical_alignment() {
    let font = TestFont {
        ascender: 10.0,
        descender: -2.0,
        ..TestFont::default()
    };
    let styles = SingleStyle::new(font, 10.0);

    // Top: the first baseline sits one ascender below the block top
    let layout = generate_layout("a", &options(&styles));
    assert_close(layout[0].location.1, 10.0);

    let mut opts = options(&styles);
    opts.vertical_align = VerticalAlign::Center;
    let layout = generate_layout("a", &opts);
    // top = (ascender + |descender|) / 2 = 6, minus half the total height
    assert_close(layout[0].location.1, 0.0);

    let mut opts = options(&styles);
    opts.vertical_align = VerticalAlign::Bottom;
    let layout = generate_layout("a", &opts);
    assert_close(layout[0].location.1, -14.0);
}

#[test]
fn layout_is_idempotent() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let mut opts = options(&styles);
    opts.wrapping_width = 13.0;
    opts.horizontal_align = HorizontalAlign::Center;
    opts.vertical_align = VerticalAlign::Center;
    let first = generate_layout("hello world foo\tbar", &opts);
    let second = generate_layout("hello world foo\tbar", &opts);
    assert_eq!(first, second);
}

#[test]
fn empty_inputs_produce_empty_layout() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    assert!(generate_layout("", &options(&styles)).is_empty());

    // All-trailing-whitespace under wrapping trims to nothing
    let mut opts = options(&styles);
    opts.wrapping_width = 5.0;
    assert!(generate_layout("    ", &opts).is_empty());

    // Without wrapping the whitespace is laid out
    assert_eq!(generate_layout("    ", &options(&styles)).len(), 4);
}

#[test]
fn missing_glyphs_are_skipped() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let layout = generate_layout(&format!("a{}b", UNMAPPED), &options(&styles));
    assert_eq!(layout.len(), 2);
    assert_eq!(layout[0].codepoint, 'a');
    assert_eq!(layout[1].codepoint, 'b');
    // The pen does not advance over a skipped slot
    assert_close(layout[1].location.0, 1.0);
    assert_eq!(layout[1].grapheme_index, 2);
}

#[test]
fn multi_glyph_grapheme_shares_position_and_flag() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let mut opts = options(&styles);
    opts.horizontal_align = HorizontalAlign::Center;
    let layout = generate_layout("a\nΩb", &opts);
    assert_eq!(layout.len(), 5);

    let (first, second, b) = (&layout[2], &layout[3], &layout[4]);
    assert_eq!(first.glyph_id, 7);
    assert_eq!(second.glyph_id, 8);
    // Both glyphs of the grapheme carry the start-of-line flag and share the
    // widest advance
    assert!(first.start_of_line && second.start_of_line);
    assert_eq!(first.location, second.location);
    assert_close(first.width, 2.0);
    assert_close(second.width, 2.0);
    // The alignment sweep does not end at the second flagged glyph: 'b' is
    // centered as part of the same line (line width 3)
    assert_close(first.location.0, -1.5);
    assert_close(b.location.0, 0.5);
}

#[test]
fn keep_all_does_not_break_cjk() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);

    let mut opts = options(&styles);
    opts.wrapping_width = 2.0;
    opts.word_break = WordBreak::KeepAll;
    let layout = generate_layout("漢漢漢漢", &opts);
    assert!(layout.iter().all(|record| record.location.1 == 0.0));

    let mut opts = options(&styles);
    opts.wrapping_width = 2.0;
    let layout = generate_layout("漢漢漢漢", &opts);
    assert!(layout.iter().any(|record| record.location.1 > 0.0));
}

#[test]
fn break_all_wraps_anywhere() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let mut opts = options(&styles);
    opts.wrapping_width = 3.0;
    opts.word_break = WordBreak::BreakAll;
    let layout = generate_layout("abcdef", &opts);
    assert_eq!(layout.len(), 6);
    let rows: Vec<f32> = layout.iter().map(|record| record.location.1).collect();
    assert_eq!(rows, vec![0.0, 0.0, 12.0, 12.0, 24.0, 24.0]);
    assert!(layout[2].start_of_line);
    assert!(layout[4].start_of_line);
}

#[test]
fn carriage_return_resets_pen() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let layout = generate_layout("ab\r\ncd", &options(&styles));
    let cr = &layout[2];
    assert_eq!(cr.codepoint, '\r');
    assert!(cr.start_of_line);
    assert_eq!(cr.width, 0.0);
    assert_close(cr.location.0, 0.0);
    assert_close(cr.location.1, 0.0);
    // CR and LF belong to the same grapheme cluster
    assert_eq!(layout[2].grapheme_index, layout[3].grapheme_index);

    let c = &layout[4];
    assert!(c.start_of_line);
    assert_close(c.location.0, 0.0);
    assert_close(c.location.1, 12.0);
}

#[test]
fn style_change_mid_run() {
    let split = SplitStyle {
        split: 2,
        first: SingleStyle::new(TestFont::default(), 10.0),
        second: SingleStyle::new(TestFont::default(), 30.0),
    };
    let opts = options(&split);
    let layout = generate_layout("abcd", &opts);
    // 10 pt glyphs are 1 unit wide, 30 pt glyphs 3 units
    assert_close(layout[0].width, 1.0);
    assert_close(layout[1].width, 1.0);
    assert_close(layout[2].width, 3.0);
    assert_close(layout[3].width, 3.0);
    assert_close(layout[3].location.0, 5.0);
    // The running line height takes the larger style
    assert_close(layout[3].line_height, 36.0);
}

#[test]
fn origin_offsets_every_record() {
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let mut opts = options(&styles);
    opts.dpi = (72.0, 72.0);
    opts.origin = (72.0, 144.0);
    let layout = generate_layout("ab", &opts);
    // origin is converted to design units by dividing by dpi
    assert_close(layout[0].location.0, 1.0);
    assert_close(layout[0].location.1, 2.0);
}

#[test]
fn line_heights_cover_total_height() {
    // Sum of per-line heights bounds the block: with two lines of 12 units
    // the deepest record sits at y = 12 under top alignment with no ascent.
    let styles = SingleStyle::new(TestFont::default(), 10.0);
    let layout = generate_layout("a\nb", &options(&styles));
    let max_y = layout
        .iter()
        .map(|record| record.location.1)
        .fold(f32::MIN, f32::max);
    let height_sum: f32 = 24.0; // two lines of 12
    assert!(max_y <= height_sum);
    // Alignment never produces a negative line width
    assert!(layout_width(&layout) >= 0.0);
}
