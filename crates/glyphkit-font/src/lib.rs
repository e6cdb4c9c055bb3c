//! # GlyphKit Font
//!
//! Glyph outline extraction: given a font resource and a piece of text,
//! produce one [`glyphkit_core::GlyphPath`] per character, in font
//! units. Characters the font does not map are omitted; a mapped glyph
//! that fails to produce an outline yields an empty path and a warning,
//! never an error.
//!
//! Font parsing itself is `rusttype`'s job; face discovery goes through
//! the system `fontdb`. This crate only walks outlines into the closed
//! command model, promoting quadratic segments to exact cubics on the
//! way so downstream consumers see a single curve kind.

mod extract;
mod library;
mod pen;

pub use extract::extract_paths;
pub use library::{find_system_font, list_font_families, load_font_file};
pub use pen::OutlinePen;
