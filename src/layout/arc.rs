//! Character placement along a circular arc.
//!
//! Angles follow the raster convention: 0 points right, positive angles turn clockwise
//! (toward +Y, which is down), so `-π/2` is the top of the circle and `+π/2` the bottom.

use std::f64::consts::FRAC_PI_2;

use crate::foundation::core::{Affine, Point};

#[derive(Clone, Copy, Debug, PartialEq)]
/// One character positioned on an arc.
pub struct ArcGlyph {
    /// The character drawn at this slot.
    pub ch: char,
    /// Polar angle of the slot, in radians.
    pub angle: f64,
    /// Point on the circle where the character is centered.
    pub position: Point,
    /// Rotation applied to the character so its baseline is tangent to the circle.
    pub rotation: f64,
}

impl ArcGlyph {
    /// Maps glyph-local space (origin at the character center) onto the canvas.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2()) * Affine::rotate(self.rotation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Arc parameters shared by every character of one string.
pub struct ArcText {
    pub center: Point,
    pub radius: f64,
    pub is_top: bool,
    pub letter_spacing: f64,
}

impl ArcText {
    pub fn new(center: Point, radius: f64, is_top: bool, letter_spacing: f64) -> Self {
        Self {
            center,
            radius,
            is_top,
            letter_spacing,
        }
    }

    /// Angular distance between neighbouring characters.
    ///
    /// Spacing is measured as arc length, so the visual gap is the same on every radius.
    pub fn angle_step(&self) -> f64 {
        self.letter_spacing / self.radius
    }

    /// Angle covered from the first to the last character of an `n`-character string.
    pub fn total_span(&self, char_count: usize) -> f64 {
        char_count.saturating_sub(1) as f64 * self.angle_step()
    }

    /// Angle of the first character; the string is centered on the vertical axis.
    pub fn start_angle(&self, char_count: usize) -> f64 {
        let anchor = if self.is_top { -FRAC_PI_2 } else { FRAC_PI_2 };
        anchor - self.total_span(char_count) / 2.0
    }

    fn tangent_offset(&self) -> f64 {
        if self.is_top { FRAC_PI_2 } else { -FRAC_PI_2 }
    }

    /// Lay `text` out one character per slot. Empty text, or a degenerate zero radius,
    /// yields no glyphs.
    pub fn place(&self, text: &str) -> Vec<ArcGlyph> {
        let step = self.angle_step();
        if !step.is_finite() {
            return Vec::new();
        }
        let count = text.chars().count();
        let start = self.start_angle(count);
        let offset = self.tangent_offset();

        text.chars()
            .enumerate()
            .map(|(i, ch)| {
                let angle = start + i as f64 * step;
                let position = Point::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                );
                ArcGlyph {
                    ch,
                    angle,
                    position,
                    rotation: angle + offset,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/arc.rs"]
mod tests;
