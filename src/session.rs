//! An editing session: the surface plus the inputs that drive it.
//!
//! Text and style edits redraw synchronously. Image changes decode on the rayon pool; each
//! request carries a generation number and only the newest generation may draw, so a slow
//! decode that finishes after a newer request is dropped instead of overwriting it.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    time::{Duration, Instant},
};

use crate::{
    assets::{decode::PreparedImage, decode::decode_image, source::ImageSource},
    export::{ArtworkSink, to_data_uri, write_download},
    foundation::error::ArtResult,
    render::{compositor::Compositor, surface::Surface},
    style::model::StyleConfig,
    text::fonts::FontSet,
};

struct DecodeOutcome {
    generation: u64,
    source: String,
    result: ArtResult<PreparedImage>,
}

pub struct ArtSession {
    compositor: Compositor,
    surface: Surface,
    style: StyleConfig,
    title: String,
    artist: String,
    image: Option<PreparedImage>,
    generation: u64,
    resolved: u64,
    tx: Sender<DecodeOutcome>,
    rx: Receiver<DecodeOutcome>,
}

impl std::fmt::Debug for ArtSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtSession")
            .field("surface", &self.surface)
            .field("style", &self.style)
            .field("title", &self.title)
            .field("artist", &self.artist)
            .field("has_image", &self.image.is_some())
            .field("generation", &self.generation)
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl ArtSession {
    pub fn new(fonts: &FontSet) -> ArtResult<Self> {
        Self::with_compositor(Compositor::new(fonts)?, Surface::album()?)
    }

    pub fn with_compositor(compositor: Compositor, surface: Surface) -> ArtResult<Self> {
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            compositor,
            surface,
            style: StyleConfig::default(),
            title: String::new(),
            artist: String::new(),
            image: None,
            generation: 0,
            resolved: 0,
            tx,
            rx,
        })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Generation of the most recent image request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the newest image request has not reported back.
    pub fn is_loading(&self) -> bool {
        self.resolved < self.generation
    }

    /// Start loading a new background. Returns the generation assigned to the request.
    pub fn set_image_source(&mut self, source: ImageSource) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        tracing::debug!(generation, source = %source, "image decode requested");
        rayon::spawn(move || {
            let result = source.load_bytes().and_then(|bytes| decode_image(&bytes));
            // The session may be gone by now; nobody is left to draw.
            let _ = tx.send(DecodeOutcome {
                generation,
                source: source.to_string(),
                result,
            });
        });
        generation
    }

    /// Use an already decoded background. Supersedes any pending request. When the image
    /// cannot be drawn the previous background and surface are kept.
    pub fn set_image(&mut self, image: PreparedImage) -> ArtResult<()> {
        self.generation += 1;
        self.resolved = self.generation;
        self.adopt_image(image)
    }

    pub fn set_style(&mut self, style: StyleConfig) -> ArtResult<()> {
        style.validate()?;
        self.style = style;
        self.redraw()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> ArtResult<()> {
        self.title = title.into();
        self.redraw()
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) -> ArtResult<()> {
        self.artist = artist.into();
        self.redraw()
    }

    /// Apply every decode result that has arrived. Returns true when the surface was redrawn.
    pub fn poll(&mut self) -> ArtResult<bool> {
        let mut redrawn = false;
        while let Ok(outcome) = self.rx.try_recv() {
            redrawn |= self.apply(outcome)?;
        }
        Ok(redrawn)
    }

    /// Block until the newest image request resolves or `timeout` elapses.
    /// Returns false on timeout.
    pub fn wait(&mut self, timeout: Duration) -> ArtResult<bool> {
        let deadline = Instant::now() + timeout;
        while self.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    self.apply(outcome)?;
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn apply(&mut self, outcome: DecodeOutcome) -> ArtResult<bool> {
        if outcome.generation != self.generation {
            tracing::debug!(
                generation = outcome.generation,
                current = self.generation,
                source = %outcome.source,
                "stale image decode dropped"
            );
            return Ok(false);
        }
        self.resolved = outcome.generation;
        match outcome.result {
            Ok(image) => match self.adopt_image(image) {
                Ok(()) => Ok(true),
                Err(err) => {
                    tracing::warn!(source = %outcome.source, error = %err, "image failed to draw");
                    Ok(false)
                }
            },
            Err(err) => {
                tracing::warn!(source = %outcome.source, error = %err, "image failed to load");
                Ok(false)
            }
        }
    }

    /// Render with `image` and keep it only once it has drawn.
    fn adopt_image(&mut self, image: PreparedImage) -> ArtResult<()> {
        self.compositor.render(
            &mut self.surface,
            &image,
            &self.title,
            &self.artist,
            &self.style,
        )?;
        self.image = Some(image);
        Ok(())
    }

    fn redraw(&mut self) -> ArtResult<()> {
        let Some(image) = &self.image else {
            return Ok(());
        };
        self.compositor.render(
            &mut self.surface,
            image,
            &self.title,
            &self.artist,
            &self.style,
        )
    }

    /// Write `<artist> - <title>.png` into `dir`.
    pub fn to_download(&self, dir: &Path) -> ArtResult<PathBuf> {
        write_download(&self.surface, dir, &self.artist, &self.title)
    }

    /// PNG data URI of the current surface.
    pub fn to_saved_artifact(&self) -> ArtResult<String> {
        to_data_uri(&self.surface)
    }

    /// Hand the current artwork to `sink`.
    pub fn save(&self, sink: &mut dyn ArtworkSink, track_id: Option<&str>) -> ArtResult<()> {
        let uri = self.to_saved_artifact()?;
        sink.save(track_id, &uri)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
