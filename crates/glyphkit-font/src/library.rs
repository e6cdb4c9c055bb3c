//! Font resolution: explicit files and system faces

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use glyphkit_core::FontError;
use rusttype::Font;
use std::{
    collections::HashSet,
    fs,
    path::Path,
    sync::OnceLock,
};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// All installed font family names, sorted.
pub fn list_font_families() -> Vec<String> {
    let mut set = HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// Load a font from an explicit file path.
///
/// Collections are opened at their first face, matching what a caller
/// pointing at a `.ttc` almost always wants.
pub fn load_font_file(path: &Path) -> Result<Font<'static>, FontError> {
    let bytes = fs::read(path).map_err(|source| FontError::FileUnreadable {
        path: path.display().to_string(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| FontError::InvalidFontData {
        path: path.display().to_string(),
    })
}

/// Resolve a family name through the system font database.
///
/// `"Sans"`, `"Serif"`, and `"Monospace"` (and the empty string, as
/// sans) select the generic families; anything else is matched by name.
pub fn find_system_font(family: &str) -> Result<Font<'static>, FontError> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other)],
    };

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let not_found = || FontError::FaceNotFound {
        family: family.to_string(),
    };
    let id = db().query(&query).ok_or_else(not_found)?;
    let face = db().face(id).ok_or_else(not_found)?;

    let bytes = match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => {
            fs::read(path).map_err(|source| FontError::FileUnreadable {
                path: path.display().to_string(),
                source,
            })?
        }
        Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
    };
    Font::try_from_vec(bytes).ok_or_else(|| FontError::InvalidFontData {
        path: family.to_string(),
    })
}
