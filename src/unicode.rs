//! Unicode predicates and the line-break oracle used by layout.

use std::iter::Peekable;
use std::str::CharIndices;

use unicode_script::{Script, UnicodeScript};
use xi_unicode::LineBreakIterator;

/// Line terminators other than CARRIAGE RETURN, which resets the pen without
/// advancing a line and is handled on its own.
///
/// Covers LINE FEED, VERTICAL TAB, FORM FEED, NEXT LINE, LINE SEPARATOR, and
/// PARAGRAPH SEPARATOR.
pub fn is_newline(ch: char) -> bool {
    matches!(
        ch,
        '\u{000A}' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Whether `ch` belongs to a CJK script, for the `keep-all` word-breaking
/// rule.
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch.script(),
        Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul | Script::Bopomofo
    )
}

/// UAX #14 line-break opportunities as `(code point position, required)`
/// events.
///
/// Wraps [xi_unicode::LineBreakIterator], converting its byte offsets to code
/// point positions. A break at position `n` means a line may (or, when
/// required, must) start at the code point with index `n`.
pub struct LineBreaks<'a> {
    breaks: LineBreakIterator<'a>,
    chars: Peekable<CharIndices<'a>>,
    cp_index: usize,
}

impl<'a> LineBreaks<'a> {
    pub fn new(text: &'a str) -> Self {
        LineBreaks {
            breaks: LineBreakIterator::new(text),
            chars: text.char_indices().peekable(),
            cp_index: 0,
        }
    }
}

impl<'a> Iterator for LineBreaks<'a> {
    type Item = (usize, bool);

    fn next(&mut self) -> Option<(usize, bool)> {
        let (byte_pos, required) = self.breaks.next()?;
        while let Some(&(byte, _)) = self.chars.peek() {
            if byte < byte_pos {
                self.chars.next();
                self.cp_index += 1;
            } else {
                break;
            }
        }
        Some((self.cp_index, required))
    }
}
