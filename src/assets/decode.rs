use std::sync::Arc;

use crate::foundation::{
    core::Canvas,
    error::{ArtError, ArtResult},
};

/// Largest side the rasterizer can sample from; bigger images are scaled down to fit.
pub const MAX_IMAGE_SIDE: u32 = u16::MAX as u32;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded bitmap in premultiplied RGBA8 form.
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major premultiplied RGBA8, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes (any format `image` understands, or SVG) into premultiplied
/// RGBA8. SVG documents are rasterized at the album canvas size.
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> ArtResult<PreparedImage> {
    if bytes.is_empty() {
        return Err(ArtError::decode("image data is empty"));
    }
    if looks_like_svg(bytes) {
        return rasterize_svg(bytes, Canvas::ALBUM);
    }

    let mut dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ArtError::decode(format!("decode image from memory: {e}")))?;
    if let Some((w, h)) = fit_within(dyn_img.width(), dyn_img.height(), MAX_IMAGE_SIDE) {
        tracing::debug!(
            from_width = dyn_img.width(),
            from_height = dyn_img.height(),
            width = w,
            height = h,
            "oversized image scaled down"
        );
        dyn_img = dyn_img.resize_exact(w, h, image::imageops::FilterType::Triangle);
    }
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Dimensions scaled to keep both sides within `max`, or `None` when they already fit.
fn fit_within(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max {
        return None;
    }
    let scale = |side: u32| {
        let scaled = u64::from(side) * u64::from(max) / u64::from(longest);
        (scaled as u32).max(1)
    };
    Some((scale(width), scale(height)))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    // The cut at 512 bytes may split a multi-byte character.
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let text = head.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

fn rasterize_svg(bytes: &[u8], canvas: Canvas) -> ArtResult<PreparedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| ArtError::decode(format!("parse svg tree: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| ArtError::decode("failed to allocate svg pixmap"))?;
    let sx = canvas.width as f32 / tree.size().width();
    let sy = canvas.height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedImage {
        width: canvas.width,
        height: canvas.height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
