#![warn(rust_2018_idioms)]

//! # OpenType glyph substitution and line layout
//!
//! Typeline is the shaping-and-layout core of a font engine: it applies the
//! advanced typographic substitutions a font carries in its `GSUB` table to a
//! run of code points, and lays the resulting glyphs out into positioned
//! lines with wrapping, tabs, and alignment.
//!
//! The crate deliberately stops at its two seams. Upstream, a font-file
//! reader hands it the raw bytes of the `GSUB` (and optionally `GDEF`)
//! tables; parsing those bit-for-bit is this crate's job, locating them in a
//! font file is not. Downstream, a rasterizer consumes the positioned glyph
//! records it emits.
//!
//! ## Substitution
//!
//! A text run is seeded into a [stream::GlyphStream] — one slot per code
//! point, each holding the glyphs that currently represent it. Parse a `GSUB`
//! table with [binary::read::ReadScope] into a [layout::LayoutTable], wrap it
//! in a [layout::LayoutCache], and call [gsub::run_gsub] to rewrite the
//! stream in place: ligatures collapse slots, multiple substitutions expand a
//! slot's glyph list, contextual lookups apply nested rewrites. All eight
//! GSUB lookup types are honoured, including Extension indirection and
//! reverse chaining substitution.
//!
//! ## Layout
//!
//! [typeset::generate_layout] walks text one grapheme cluster at a time
//! (UAX #29), consults a [metrics::StyleProvider] for point sizes and glyph
//! metrics, breaks lines at UAX #14 opportunities, and emits
//! [typeset::GlyphLayout] records in logical order, positioned and aligned
//! per [typeset::TextOptions].
//!
//! Parsed tables are immutable after construction and may be shared across
//! runs; each run's mutable state (the stream, the cursor, the output) is
//! owned by that run alone.

pub mod binary;
pub mod context;
pub mod error;
pub mod gdef;
pub mod gsub;
pub mod layout;
pub mod metrics;
pub mod size;
pub mod stream;
pub mod tag;
pub mod typeset;
pub mod unicode;

pub use gsub::run_gsub;
pub use stream::GlyphStream;
pub use tinyvec;
pub use typeset::generate_layout;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
