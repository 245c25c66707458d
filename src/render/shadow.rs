//! Drop-shadow support: separable Gaussian blur and source-over compositing on premultiplied
//! RGBA8 buffers.

use crate::foundation::{
    core::Rgba8,
    error::{ArtError, ArtResult},
    math::mul_div255_u8,
};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Shadow cast under both text lines.
pub struct ShadowStyle {
    pub color: Rgba8,
    /// Canvas-style blur amount; the Gaussian sigma is half of it.
    pub blur: f32,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        // rgba(0, 0, 0, 0.7), blur 10
        Self {
            color: Rgba8::new(0, 0, 0, 179),
            blur: 10.0,
        }
    }
}

impl ShadowStyle {
    pub fn sigma(&self) -> f32 {
        self.blur / 2.0
    }

    /// Kernel radius covering three sigmas.
    pub fn radius(&self) -> u32 {
        if !self.blur.is_finite() || self.blur <= 0.0 {
            return 0;
        }
        (self.sigma() * 3.0).ceil() as u32
    }

    /// Shadow color as painted under text of the given color: the text alpha scales the
    /// shadow alpha.
    pub fn paint_for(&self, text: Rgba8) -> Rgba8 {
        Rgba8::new(
            self.color.r,
            self.color.g,
            self.color.b,
            mul_div255_u8(u16::from(self.color.a), u16::from(text.a)),
        )
    }

    pub fn is_visible(&self) -> bool {
        self.color.a > 0
    }
}

pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ArtResult<Vec<u8>> {
    let expected_len = checked_len(width, height)?;
    if src.len() != expected_len {
        return Err(ArtError::render("blur_rgba8_premul expects src matching width*height*4"));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Blur only the part of `buf` that holds ink, grown by the kernel radius.
///
/// Produces the same pixels as blurring the whole buffer; text covers a small share of the
/// canvas so this keeps per-keystroke redraws cheap.
pub fn blur_inked_region_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ArtResult<()> {
    if buf.len() != checked_len(width, height)? {
        return Err(ArtError::render(
            "blur_inked_region_in_place expects buf matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(());
    }
    let Some((x0, y0, x1, y1)) = inked_bounds(buf, width, height) else {
        return Ok(());
    };

    let x0 = x0.saturating_sub(radius);
    let y0 = y0.saturating_sub(radius);
    let x1 = (x1 + radius).min(width - 1);
    let y1 = (y1 + radius).min(height - 1);
    let (cw, ch) = (x1 - x0 + 1, y1 - y0 + 1);

    let row_bytes = cw as usize * 4;
    let mut crop = Vec::with_capacity(row_bytes * ch as usize);
    for y in y0..=y1 {
        let start = (y as usize * width as usize + x0 as usize) * 4;
        crop.extend_from_slice(&buf[start..start + row_bytes]);
    }

    let blurred = blur_rgba8_premul(&crop, cw, ch, radius, sigma)?;
    for (row, y) in (y0..=y1).enumerate() {
        let start = (y as usize * width as usize + x0 as usize) * 4;
        buf[start..start + row_bytes]
            .copy_from_slice(&blurred[row * row_bytes..(row + 1) * row_bytes]);
    }
    Ok(())
}

fn inked_bounds(buf: &[u8], width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        for x in 0..width {
            let a = buf[(y as usize * width as usize + x as usize) * 4 + 3];
            if a == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

fn checked_len(width: u32, height: u32) -> ArtResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ArtError::render("blur buffer size overflow"))
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ArtResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ArtError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ArtError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding drift into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

/// Premultiplied source-over for one pixel.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ArtResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ArtError::render("over_in_place expects equal-length rgba8 buffers"));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/shadow.rs"]
mod tests;
