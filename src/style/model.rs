use std::{fmt, ops::RangeInclusive, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::{
    assets::source::ImageSource,
    foundation::error::{ArtError, ArtResult},
    style::color::TextColor,
};

/// Slider range of the title size control, in pixels.
pub const TITLE_FONT_SIZE_RANGE: RangeInclusive<u32> = 40..=150;
/// Slider range of the artist size control, in pixels.
pub const ARTIST_FONT_SIZE_RANGE: RangeInclusive<u32> = 20..=80;
/// Slider range of the rotation control, in degrees.
pub const ROTATION_RANGE_DEG: RangeInclusive<i32> = -45..=45;
/// Slider range of the letter spacing control, in pixels of arc length.
pub const LETTER_SPACING_RANGE: RangeInclusive<f64> = 5.0..=50.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Selects which layout algorithm draws the text.
pub enum TextLayout {
    /// Horizontal baselines, optionally rotated as a rigid block.
    #[default]
    Straight,
    /// Character-by-character along an arc bulging toward the top edge.
    CurvedTop,
    /// Character-by-character along an arc bulging toward the bottom edge.
    CurvedBottom,
}

impl TextLayout {
    pub fn is_curved(self) -> bool {
        !matches!(self, Self::Straight)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::CurvedTop => "curved-top",
            Self::CurvedBottom => "curved-bottom",
        }
    }
}

impl fmt::Display for TextLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextLayout {
    type Err = ArtError;

    fn from_str(s: &str) -> ArtResult<Self> {
        match s.trim() {
            "straight" => Ok(Self::Straight),
            "curved-top" => Ok(Self::CurvedTop),
            "curved-bottom" => Ok(Self::CurvedBottom),
            other => Err(ArtError::validation(format!(
                "unknown text layout \"{other}\" (expected straight, curved-top or curved-bottom)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HAnchor {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VAnchor {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Nine-way anchor for the straight layout.
pub enum TextPosition {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    #[default]
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl TextPosition {
    pub const ALL: [TextPosition; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    pub fn new(v: VAnchor, h: HAnchor) -> Self {
        match (v, h) {
            (VAnchor::Top, HAnchor::Left) => Self::TopLeft,
            (VAnchor::Top, HAnchor::Center) => Self::TopCenter,
            (VAnchor::Top, HAnchor::Right) => Self::TopRight,
            (VAnchor::Middle, HAnchor::Left) => Self::MiddleLeft,
            (VAnchor::Middle, HAnchor::Center) => Self::MiddleCenter,
            (VAnchor::Middle, HAnchor::Right) => Self::MiddleRight,
            (VAnchor::Bottom, HAnchor::Left) => Self::BottomLeft,
            (VAnchor::Bottom, HAnchor::Center) => Self::BottomCenter,
            (VAnchor::Bottom, HAnchor::Right) => Self::BottomRight,
        }
    }

    pub fn horizontal(self) -> HAnchor {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => HAnchor::Left,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => HAnchor::Center,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => HAnchor::Right,
        }
    }

    pub fn vertical(self) -> VAnchor {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VAnchor::Top,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => VAnchor::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VAnchor::Bottom,
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical() {
            VAnchor::Top => "top",
            VAnchor::Middle => "middle",
            VAnchor::Bottom => "bottom",
        };
        let h = match self.horizontal() {
            HAnchor::Left => "left",
            HAnchor::Center => "center",
            HAnchor::Right => "right",
        };
        write!(f, "{v}-{h}")
    }
}

impl FromStr for TextPosition {
    type Err = ArtError;

    fn from_str(s: &str) -> ArtResult<Self> {
        let bad = || ArtError::validation(format!("unknown text position \"{s}\""));
        let (v, h) = s.trim().split_once('-').ok_or_else(bad)?;
        let v = match v {
            "top" => VAnchor::Top,
            "middle" => VAnchor::Middle,
            "bottom" => VAnchor::Bottom,
            _ => return Err(bad()),
        };
        let h = match h {
            "left" => HAnchor::Left,
            "center" => HAnchor::Center,
            "right" => HAnchor::Right,
            _ => return Err(bad()),
        };
        Ok(Self::new(v, h))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
/// User-adjusted style that drives every redraw.
///
/// A plain value: callers mutate their own copy and hand it to the compositor, which never
/// keeps state between renders.
pub struct StyleConfig {
    /// Title size in pixels.
    pub title_font_size: u32,
    /// Artist size in pixels.
    pub artist_font_size: u32,
    /// Fill color for both lines.
    pub text_color: TextColor,
    /// Layout algorithm.
    pub text_layout: TextLayout,
    /// Anchor; only read by the straight layout.
    pub text_position: TextPosition,
    /// Block rotation in degrees; only read by the straight layout.
    pub text_rotation: i32,
    /// Arc-length distance between character centers; only read by curved layouts.
    pub letter_spacing: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_font_size: 80,
            artist_font_size: 40,
            text_color: TextColor::WHITE,
            text_layout: TextLayout::Straight,
            text_position: TextPosition::BottomLeft,
            text_rotation: 0,
            letter_spacing: 12.0,
        }
    }
}

impl StyleConfig {
    pub fn from_json_str(s: &str) -> ArtResult<Self> {
        let style: Self = serde_json::from_str(s)?;
        style.validate()?;
        Ok(style)
    }

    pub fn from_path(path: &Path) -> ArtResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read style json '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> ArtResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the geometry cannot work with. Sizes outside the UI slider ranges are
    /// accepted on purpose: text may clip or overlap but nothing panics.
    pub fn validate(&self) -> ArtResult<()> {
        if self.title_font_size == 0 {
            return Err(ArtError::validation("titleFontSize must be > 0"));
        }
        if self.artist_font_size == 0 {
            return Err(ArtError::validation("artistFontSize must be > 0"));
        }
        if !self.letter_spacing.is_finite() || self.letter_spacing <= 0.0 {
            return Err(ArtError::validation("letterSpacing must be finite and > 0"));
        }
        Ok(())
    }

    /// Copy with every numeric field pulled into the editor control ranges.
    pub fn clamped_to_ui_ranges(&self) -> Self {
        let letter_spacing = if self.letter_spacing.is_finite() {
            self.letter_spacing
                .clamp(*LETTER_SPACING_RANGE.start(), *LETTER_SPACING_RANGE.end())
        } else {
            *LETTER_SPACING_RANGE.start()
        };
        Self {
            title_font_size: self
                .title_font_size
                .clamp(*TITLE_FONT_SIZE_RANGE.start(), *TITLE_FONT_SIZE_RANGE.end()),
            artist_font_size: self
                .artist_font_size
                .clamp(*ARTIST_FONT_SIZE_RANGE.start(), *ARTIST_FONT_SIZE_RANGE.end()),
            text_rotation: self
                .text_rotation
                .clamp(*ROTATION_RANGE_DEG.start(), *ROTATION_RANGE_DEG.end()),
            letter_spacing,
            ..self.clone()
        }
    }

    /// Rotation that actually applies: curved layouts ignore the rotation control.
    pub fn effective_rotation_deg(&self) -> f64 {
        match self.text_layout {
            TextLayout::Straight => f64::from(self.text_rotation),
            TextLayout::CurvedTop | TextLayout::CurvedBottom => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Per-render input: the background reference plus the two text lines.
pub struct CompositionInput {
    pub image: ImageSource,
    pub title: String,
    pub artist: String,
}

impl CompositionInput {
    pub fn new(image: ImageSource, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            image,
            title: title.into(),
            artist: artist.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;
