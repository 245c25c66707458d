use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::foundation::error::{ArtError, ArtResult};

/// Env var naming the face used for titles.
pub const FONT_BOLD_ENV: &str = "ALBUMART_FONT_BOLD";
/// Env var naming the face used for artist names.
pub const FONT_REGULAR_ENV: &str = "ALBUMART_FONT_REGULAR";

/// Families tried in order when discovering system fonts. `Inter` first, then common
/// sans-serif families so the lookup does not depend on fontdb's generic family mapping.
const PREFERRED_FAMILIES: &[&str] = &[
    "Inter",
    "Helvetica Neue",
    "Helvetica",
    "Arial",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
];

#[derive(Clone)]
/// Raw font file bytes plus the face index inside the file.
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
    /// Where the face came from (path or discovered family), for diagnostics.
    pub label: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("label", &self.label)
            .finish()
    }
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>, index: u32, label: impl Into<String>) -> ArtResult<Self> {
        if bytes.is_empty() {
            return Err(ArtError::validation("font data is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            label: label.into(),
        })
    }

    pub fn from_path(path: &Path) -> ArtResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes, 0, path.display().to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Weight {
    Regular,
    Bold,
}

impl Weight {
    fn fontdb(self) -> usvg::fontdb::Weight {
        match self {
            Self::Regular => usvg::fontdb::Weight::NORMAL,
            Self::Bold => usvg::fontdb::Weight::BOLD,
        }
    }
}

#[derive(Clone, Debug)]
/// The two faces the compositor draws with: bold for titles, regular for artists.
pub struct FontSet {
    pub bold: FontFace,
    pub regular: FontFace,
}

impl FontSet {
    pub fn new(bold: FontFace, regular: FontFace) -> Self {
        Self { bold, regular }
    }

    pub fn from_files(bold: &Path, regular: &Path) -> ArtResult<Self> {
        Ok(Self::new(FontFace::from_path(bold)?, FontFace::from_path(regular)?))
    }

    /// Look both faces up among the installed system fonts.
    #[tracing::instrument]
    pub fn discover() -> ArtResult<Self> {
        Self::resolve(None, None)
    }

    /// Use explicit files where given and discover the rest.
    pub fn resolve(bold: Option<&Path>, regular: Option<&Path>) -> ArtResult<Self> {
        let mut db: Option<usvg::fontdb::Database> = None;
        let mut face_for = |path: Option<&Path>, weight: Weight| -> ArtResult<FontFace> {
            if let Some(path) = path {
                return FontFace::from_path(path);
            }
            let db = db.get_or_insert_with(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                db
            });
            discover_face(db, weight)
        };

        let bold = face_for(bold, Weight::Bold)?;
        let regular = face_for(regular, Weight::Regular)?;
        tracing::debug!(bold = %bold.label, regular = %regular.label, "resolved fonts");
        Ok(Self { bold, regular })
    }

    /// Explicit paths first, then `ALBUMART_FONT_BOLD` / `ALBUMART_FONT_REGULAR`, then
    /// system discovery.
    pub fn resolve_with_env(bold: Option<&Path>, regular: Option<&Path>) -> ArtResult<Self> {
        let bold = bold.map(Path::to_path_buf).or_else(|| env_path(FONT_BOLD_ENV));
        let regular = regular
            .map(Path::to_path_buf)
            .or_else(|| env_path(FONT_REGULAR_ENV));
        Self::resolve(bold.as_deref(), regular.as_deref())
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn discover_face(db: &usvg::fontdb::Database, weight: Weight) -> ArtResult<FontFace> {
    let mut families: Vec<usvg::fontdb::Family<'_>> = PREFERRED_FAMILIES
        .iter()
        .map(|&name| usvg::fontdb::Family::Name(name))
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        weight: weight.fontdb(),
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| {
            db.faces()
                .find(|f| f.weight == weight.fontdb() && f.style == usvg::fontdb::Style::Normal)
                .map(|f| f.id)
        })
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| {
            ArtError::validation("no system fonts available; pass font files explicitly")
        })?;

    let label = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_string());

    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| ArtError::validation(format!("font data for '{label}' is unreadable")))?;

    FontFace::from_bytes(bytes, index, label)
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
