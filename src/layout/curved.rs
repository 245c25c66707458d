use crate::{
    foundation::core::{Canvas, Point},
    layout::arc::ArcText,
    style::model::{StyleConfig, TextLayout},
};

/// Title arc radius as a fraction of the canvas side.
pub const TITLE_RADIUS_FRACTION: f64 = 0.35;
/// Extra clearance between the title and artist arcs, in pixels.
pub const ARC_CLEARANCE_PX: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Resolved geometry of the curved layouts.
pub struct CurvedLayout {
    pub center: Point,
    pub title_radius: f64,
    pub artist_radius: f64,
    pub is_top: bool,
}

impl CurvedLayout {
    /// `None` for the straight layout.
    pub fn compute(canvas: Canvas, style: &StyleConfig) -> Option<Self> {
        let is_top = match style.text_layout {
            TextLayout::Straight => return None,
            TextLayout::CurvedTop => true,
            TextLayout::CurvedBottom => false,
        };

        let size = canvas.size();
        let center = Point::new(size / 2.0, if is_top { size * 0.45 } else { size * 0.55 });
        let title_radius = size * TITLE_RADIUS_FRACTION;
        // The artist arc sits outside the title on top and inside it on the bottom, so it
        // never collides with the title and stays visually subordinate.
        let artist_radius = if is_top {
            title_radius + f64::from(style.title_font_size) + ARC_CLEARANCE_PX
        } else {
            title_radius - f64::from(style.artist_font_size) - ARC_CLEARANCE_PX
        };

        Some(Self {
            center,
            title_radius,
            artist_radius,
            is_top,
        })
    }

    pub fn title_arc(&self, letter_spacing: f64) -> ArcText {
        ArcText::new(self.center, self.title_radius, self.is_top, letter_spacing)
    }

    pub fn artist_arc(&self, letter_spacing: f64) -> ArcText {
        ArcText::new(self.center, self.artist_radius, self.is_top, letter_spacing)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/curved.rs"]
mod tests;
