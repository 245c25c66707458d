use crate::{
    foundation::core::{Affine, Canvas, Point},
    layout::{
        curved::CurvedLayout,
        straight::{StraightLayout, TextAlign},
    },
    style::model::StyleConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Which line a draw belongs to; selects the face (bold title, regular artist).
pub enum FontRole {
    Title,
    Artist,
}

#[derive(Clone, Debug, PartialEq)]
/// A single text draw: `text` is aligned horizontally on `origin` and vertically centered on
/// it, in the local space mapped to the canvas by `transform`.
pub struct TextDraw {
    pub role: FontRole,
    pub text: String,
    pub font_size: f32,
    pub align: TextAlign,
    pub origin: Point,
    pub transform: Affine,
}

#[derive(Clone, Debug, PartialEq)]
/// Every text draw of one composition, in paint order (title before artist).
pub struct TextPlan {
    pub canvas: Canvas,
    pub draws: Vec<TextDraw>,
}

impl TextPlan {
    pub fn build(canvas: Canvas, title: &str, artist: &str, style: &StyleConfig) -> Self {
        let title_size = style.title_font_size as f32;
        let artist_size = style.artist_font_size as f32;

        let mut draws = Vec::new();
        match CurvedLayout::compute(canvas, style) {
            None => {
                let layout = StraightLayout::compute(canvas, style);
                let transform = layout.transform();
                let lines = [
                    (FontRole::Title, title, title_size, layout.title),
                    (FontRole::Artist, artist, artist_size, layout.artist),
                ];
                for (role, text, font_size, origin) in lines {
                    if text.is_empty() {
                        continue;
                    }
                    draws.push(TextDraw {
                        role,
                        text: text.to_string(),
                        font_size,
                        align: layout.align,
                        origin,
                        transform,
                    });
                }
            }
            Some(curved) => {
                let arcs = [
                    (FontRole::Title, title, title_size, curved.title_arc(style.letter_spacing)),
                    (
                        FontRole::Artist,
                        artist,
                        artist_size,
                        curved.artist_arc(style.letter_spacing),
                    ),
                ];
                for (role, text, font_size, arc) in arcs {
                    draws.extend(arc.place(text).into_iter().map(|g| TextDraw {
                        role,
                        text: g.ch.to_string(),
                        font_size,
                        align: TextAlign::Center,
                        origin: Point::ORIGIN,
                        transform: g.transform(),
                    }));
                }
            }
        }

        Self { canvas, draws }
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn draws_for(&self, role: FontRole) -> impl Iterator<Item = &TextDraw> {
        self.draws.iter().filter(move |d| d.role == role)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/plan.rs"]
mod tests;
