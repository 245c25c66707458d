use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::{
        core::Canvas,
        error::{ArtError, ArtResult},
    },
};

/// The raster target a composition is drawn onto. Premultiplied RGBA8.
///
/// Owned exclusively by one compositor/session; every render fully replaces its contents.
pub struct Surface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    frames_drawn: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .field("frames_drawn", &self.frames_drawn)
            .finish()
    }
}

impl Surface {
    pub fn new(canvas: Canvas) -> ArtResult<Self> {
        let (w, h) = canvas_dims_u16(canvas)?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
            frames_drawn: 0,
        })
    }

    /// A blank 1024×1024 album surface.
    pub fn album() -> ArtResult<Self> {
        Self::new(Canvas::ALBUM)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of completed renders.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.frames_drawn += 1;
    }

    pub fn clear(&mut self) {
        self.data_mut().fill(0);
    }

    /// True while nothing has been drawn (or after a clear).
    pub fn is_blank(&self) -> bool {
        self.data().iter().all(|&b| b == 0)
    }

    /// Straight-alpha RGBA8 copy of the pixels.
    pub fn to_rgba8_unpremultiplied(&self) -> Vec<u8> {
        let mut bytes = self.data().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        bytes
    }

    /// Straight-alpha image suitable for encoding.
    pub fn to_rgba_image(&self) -> ArtResult<image::RgbaImage> {
        image::RgbaImage::from_raw(
            self.canvas.width,
            self.canvas.height,
            self.to_rgba8_unpremultiplied(),
        )
        .ok_or_else(|| ArtError::export("surface byte length does not match its canvas"))
    }
}

pub(crate) fn canvas_dims_u16(canvas: Canvas) -> ArtResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| ArtError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| ArtError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(ArtError::render("surface must be at least 1x1"));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
