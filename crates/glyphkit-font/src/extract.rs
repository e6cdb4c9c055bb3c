//! Per-character outline extraction

use std::collections::BTreeMap;

use glyphkit_core::GlyphPath;
use rusttype::{Font, Scale};

use crate::pen::OutlinePen;

/// Extract one path per character of `text`, in font units.
///
/// Characters without a glyph mapping are omitted from the result
/// entirely. A mapped glyph that fails to produce an outline (bitmap
/// faces, empty glyphs like space) contributes an empty path and a
/// warning log; extraction continues for the remaining characters.
/// Repeated characters collapse to a single entry.
pub fn extract_paths(font: &Font<'_>, text: &str) -> BTreeMap<char, GlyphPath> {
    let scale = Scale::uniform(font.units_per_em() as f32);
    let mut paths = BTreeMap::new();

    for ch in text.chars() {
        let glyph = font.glyph(ch);
        if glyph.id().0 == 0 {
            // Not in the font's character map.
            continue;
        }
        let mut pen = OutlinePen::new();
        let drew = glyph.scaled(scale).build_outline(&mut pen);
        let path = pen.into_path();
        if !drew || path.is_empty() {
            tracing::warn!(character = %ch, "glyph produced no outline");
        }
        paths.insert(ch, path);
    }
    paths
}
