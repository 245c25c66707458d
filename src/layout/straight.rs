use crate::{
    foundation::core::{Affine, Canvas, Point},
    foundation::math::deg_to_rad,
    style::model::{HAnchor, StyleConfig, VAnchor},
};

/// Outer margin as a fraction of the canvas side.
pub const MARGIN_FRACTION: f64 = 0.05;
/// Fixed spacing between the title and artist lines, in pixels.
pub const LINE_GAP_PX: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Horizontal alignment of a text line relative to its anchor X.
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl From<HAnchor> for TextAlign {
    fn from(h: HAnchor) -> Self {
        match h {
            HAnchor::Left => Self::Left,
            HAnchor::Center => Self::Center,
            HAnchor::Right => Self::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Resolved geometry of the straight layout.
///
/// Y coordinates are the vertical middle of each line.
pub struct StraightLayout {
    pub title: Point,
    pub artist: Point,
    pub align: TextAlign,
    pub pivot: Point,
    pub rotation_rad: f64,
}

impl StraightLayout {
    pub fn compute(canvas: Canvas, style: &StyleConfig) -> Self {
        let size = canvas.size();
        let margin = size * MARGIN_FRACTION;
        let title_h = f64::from(style.title_font_size);
        let artist_h = f64::from(style.artist_font_size);
        let line_offset = title_h / 2.0 + LINE_GAP_PX + artist_h / 2.0;

        let h = style.text_position.horizontal();
        let v = style.text_position.vertical();

        // Title and artist always share one X.
        let x = match h {
            HAnchor::Left => margin,
            HAnchor::Center => size / 2.0,
            HAnchor::Right => size - margin,
        };

        let (title_y, artist_y) = match v {
            VAnchor::Top => {
                let title_y = margin + title_h / 2.0;
                (title_y, title_y + line_offset)
            }
            VAnchor::Middle => {
                let block_h = title_h + artist_h + LINE_GAP_PX;
                let title_y = size / 2.0 - block_h / 2.0 + title_h / 2.0;
                (title_y, title_y + line_offset)
            }
            VAnchor::Bottom => {
                let artist_y = size - margin - artist_h / 2.0;
                (artist_y - line_offset, artist_y)
            }
        };

        let pivot_y = match v {
            VAnchor::Top => title_y,
            VAnchor::Middle => size / 2.0,
            VAnchor::Bottom => artist_y,
        };

        Self {
            title: Point::new(x, title_y),
            artist: Point::new(x, artist_y),
            align: h.into(),
            pivot: Point::new(x, pivot_y),
            rotation_rad: deg_to_rad(style.effective_rotation_deg()),
        }
    }

    /// Rigid rotation of the whole text block about the pivot.
    pub fn transform(&self) -> Affine {
        let pivot = self.pivot.to_vec2();
        if self.rotation_rad == 0.0 {
            return Affine::IDENTITY;
        }
        Affine::translate(pivot) * Affine::rotate(self.rotation_rad) * Affine::translate(-pivot)
    }

    /// Vertical distance between the two line centers.
    pub fn line_spacing(&self) -> f64 {
        self.artist.y - self.title.y
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/straight.rs"]
mod tests;
