//! Turning a rendered surface into the two artifacts users take away: a PNG file named after
//! the track, or a PNG data URI handed to a persistence collaborator.

use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::source::encode_data_uri,
    foundation::error::{ArtError, ArtResult},
    render::surface::Surface,
};

pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Lossless PNG of the surface, straight alpha.
#[tracing::instrument(level = "debug", skip(surface))]
pub fn encode_png(surface: &Surface) -> ArtResult<Vec<u8>> {
    let img = surface.to_rgba_image()?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| ArtError::export(format!("png encode failed: {e}")))?;
    Ok(out)
}

/// `data:image/png;base64,...` of the surface.
pub fn to_data_uri(surface: &Surface) -> ArtResult<String> {
    Ok(encode_data_uri(PNG_MEDIA_TYPE, &encode_png(surface)?))
}

/// Suggested file name for a download. Titles and artists are used verbatim.
pub fn download_file_name(artist: &str, title: &str) -> String {
    format!("{artist} - {title}.png")
}

/// Write the surface as `<artist> - <title>.png` inside `dir` and return the path written.
pub fn write_download(
    surface: &Surface,
    dir: &Path,
    artist: &str,
    title: &str,
) -> ArtResult<PathBuf> {
    let name = download_file_name(artist, title);
    if name.contains(['/', '\\']) {
        return Err(ArtError::export(format!(
            "download name '{name}' would leave the target directory"
        )));
    }
    let png = encode_png(surface)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create download dir '{}'", dir.display()))?;
    let path = dir.join(name);
    std::fs::write(&path, png).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "album art written");
    Ok(path)
}

/// Receives a finished artwork; how it is stored is up to the implementor.
pub trait ArtworkSink {
    /// Store `image_data_uri` for the track `track_id`, or as a new record when `None`.
    fn save(&mut self, track_id: Option<&str>, image_data_uri: &str) -> ArtResult<()>;
}

impl<F> ArtworkSink for F
where
    F: FnMut(Option<&str>, &str) -> ArtResult<()>,
{
    fn save(&mut self, track_id: Option<&str>, image_data_uri: &str) -> ArtResult<()> {
        self(track_id, image_data_uri)
    }
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
