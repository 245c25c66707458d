use std::{borrow::Cow, collections::HashMap, ops::Range, sync::Arc};

use parley::style::FontWeight;

use crate::{
    foundation::error::{ArtError, ArtResult},
    layout::plan::FontRole,
    text::fonts::{FontFace, FontSet},
};

/// Shaped lines kept per shaper before the cache is dropped and rebuilt.
const SHAPE_CACHE_CAPACITY: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Glyph position relative to the line origin (left edge, on the baseline).
pub struct PlacedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
/// A span of glyphs that Parley shaped with one font instance.
pub struct FontRun {
    /// The face the glyph ids index into.
    pub font: vello_cpu::peniko::FontData,
    /// Variation coordinates of the instance; empty for static fonts.
    pub coords: Vec<i16>,
    pub glyphs: Range<usize>,
}

#[derive(Clone, Debug, PartialEq)]
/// A single shaped line, positioned relative to its left edge and baseline.
pub struct ShapedLine {
    pub glyphs: Vec<PlacedGlyph>,
    pub runs: Vec<FontRun>,
    pub font_size: f32,
    /// Advance width of the whole line.
    pub advance: f32,
    /// Distance from the baseline up to the top of the em box.
    pub ascent: f32,
    /// Distance from the baseline down to the bottom of the em box.
    pub descent: f32,
}

impl ShapedLine {
    /// Offset from a vertically centered anchor down to the baseline.
    pub fn middle_to_baseline(&self) -> f32 {
        (self.ascent - self.descent) / 2.0
    }
}

/// Shapes single lines of text with one font family and weight through Parley.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    weight: FontWeight,
    cache: HashMap<(String, u32), Arc<ShapedLine>>,
}

impl TextShaper {
    /// Shaper for one line role: the bold face at weight 700 for titles, the regular face at
    /// 400 for artists. Both faces are registered, so when they share a family the weight
    /// picks the face.
    pub fn for_role(fonts: &FontSet, role: FontRole) -> ArtResult<Self> {
        let (face, other, weight) = match role {
            FontRole::Title => (&fonts.bold, &fonts.regular, FontWeight::BOLD),
            FontRole::Artist => (&fonts.regular, &fonts.bold, FontWeight::NORMAL),
        };
        let mut shaper = Self::new(face, weight)?;
        if !(Arc::ptr_eq(&face.bytes, &other.bytes) && face.index == other.index) {
            shaper.register(other);
        }
        Ok(shaper)
    }

    pub fn new(face: &FontFace, weight: FontWeight) -> ArtResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        // A collection file registers every face; the family of `face.index` comes first
        // only when it is face 0, so look it up by index.
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                ArtError::validation(format!("no font families registered from '{}'", face.label))
            })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ArtError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            weight,
            cache: HashMap::new(),
        })
    }

    fn register(&mut self, face: &FontFace) {
        self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        self.cache.clear();
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Shape `text` as one line. Line breaks are drawn as spaces, like a canvas `fillText`.
    pub fn shape(&mut self, text: &str, size_px: f32) -> ArtResult<Arc<ShapedLine>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ArtError::validation("font size must be finite and > 0"));
        }

        let key = (text.to_string(), size_px.to_bits());
        if let Some(line) = self.cache.get(&key) {
            return Ok(line.clone());
        }

        let line = Arc::new(self.shape_uncached(text, size_px));
        if self.cache.len() >= SHAPE_CACHE_CAPACITY {
            self.cache.clear();
        }
        self.cache.insert(key, line.clone());
        Ok(line)
    }

    fn shape_uncached(&mut self, text: &str, size_px: f32) -> ShapedLine {
        let flat: Cow<'_, str> = if text.contains(['\n', '\r']) {
            Cow::Owned(text.replace(['\n', '\r'], " "))
        } else {
            Cow::Borrowed(text)
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &flat, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(self.weight));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(&flat);
        layout.break_all_lines(None);

        let mut out = ShapedLine {
            glyphs: Vec::new(),
            runs: Vec::new(),
            font_size: size_px,
            advance: layout.width(),
            ascent: 0.0,
            descent: 0.0,
        };

        let Some(line) = layout.lines().next() else {
            return out;
        };
        let metrics = line.metrics();
        out.ascent = metrics.ascent;
        out.descent = metrics.descent;
        let baseline = metrics.baseline;

        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let start = out.glyphs.len();
            out.glyphs
                .extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            let font_run = run.run();
            out.runs.push(FontRun {
                font: font_run.font().clone(),
                coords: font_run.normalized_coords().to_vec(),
                glyphs: start..out.glyphs.len(),
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
