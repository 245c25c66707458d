//! A small JSON-file track library, the default home for saved album art.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    export::ArtworkSink,
    foundation::{
        error::{ArtError, ArtResult},
        math::Fnv1a64,
    },
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub suno_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subgenres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// PNG data URI of the cover, once one has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }
}

/// Tracks stored newest-first in a single JSON array on disk.
///
/// Every mutation is written through immediately.
#[derive(Debug)]
pub struct TrackLibrary {
    path: PathBuf,
    tracks: Vec<Track>,
    /// Title and artist given to tracks created from artwork alone.
    pending_title: String,
    pending_artist: String,
}

impl TrackLibrary {
    /// Load `path`, or start empty when it does not exist yet.
    #[tracing::instrument(level = "debug", skip(path), fields(library = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> ArtResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tracks = match std::fs::read_to_string(&path) {
            Ok(s) if s.trim().is_empty() => Vec::new(),
            Ok(s) => serde_json::from_str(&s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read track library '{}'", path.display()))
                    .into());
            }
        };
        Ok(Self {
            path,
            tracks,
            pending_title: String::new(),
            pending_artist: String::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Title and artist recorded on tracks created by an id-less save.
    pub fn set_pending_credits(&mut self, title: impl Into<String>, artist: impl Into<String>) {
        self.pending_title = title.into();
        self.pending_artist = artist.into();
    }

    /// Insert at the front. Duplicate ids are rejected.
    pub fn add(&mut self, track: Track) -> ArtResult<()> {
        if self.get(&track.id).is_some() {
            return Err(ArtError::validation(format!(
                "track '{}' already exists",
                track.id
            )));
        }
        self.tracks.insert(0, track);
        self.persist()
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Replace the track with the same id.
    pub fn update(&mut self, track: Track) -> ArtResult<()> {
        let slot = self
            .tracks
            .iter_mut()
            .find(|t| t.id == track.id)
            .ok_or_else(|| ArtError::validation(format!("unknown track '{}'", track.id)))?;
        *slot = track;
        self.persist()
    }

    pub fn clear(&mut self) -> ArtResult<()> {
        self.tracks.clear();
        self.persist()
    }

    pub fn persist(&self) -> ArtResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create library dir '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.tracks)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write track library '{}'", self.path.display()))?;
        Ok(())
    }
}

impl ArtworkSink for TrackLibrary {
    fn save(&mut self, track_id: Option<&str>, image_data_uri: &str) -> ArtResult<()> {
        match track_id {
            Some(id) => {
                let mut track = self
                    .get(id)
                    .cloned()
                    .ok_or_else(|| ArtError::validation(format!("unknown track '{id}'")))?;
                track.album_art = Some(image_data_uri.to_string());
                self.update(track)?;
                tracing::debug!(track = id, "album art attached");
            }
            None => {
                let id =
                    artwork_track_id(&self.pending_title, &self.pending_artist, image_data_uri);
                let mut track = Track::new(id, &self.pending_title, &self.pending_artist);
                track.album_art = Some(image_data_uri.to_string());
                if self.get(&track.id).is_some() {
                    self.update(track)?;
                } else {
                    self.add(track)?;
                }
            }
        }
        Ok(())
    }
}

/// Stable id for a track created from artwork: FNV-1a over title, artist and image.
pub fn artwork_track_id(title: &str, artist: &str, image_data_uri: &str) -> String {
    let mut h = Fnv1a64::new_default();
    for part in [title, artist, image_data_uri] {
        h.write_bytes(part.as_bytes());
        h.write_u8(0);
    }
    format!("art-{:016x}", h.finish())
}

#[cfg(test)]
#[path = "../tests/unit/library.rs"]
mod tests;
