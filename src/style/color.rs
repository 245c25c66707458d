use std::{fmt, str::FromStr};

use crate::foundation::{
    core::Rgba8,
    error::{ArtError, ArtResult},
};

/// Text fill color shared by the title and artist lines.
///
/// Accepts `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` and `rgba(r, g, b, a)` (alpha in
/// `0..=1`). Serializes back to lowercase hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextColor(pub Rgba8);

impl TextColor {
    pub const WHITE: TextColor = TextColor(Rgba8::WHITE);

    pub fn rgba8(self) -> Rgba8 {
        self.0
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgba8 { r, g, b, a } = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for TextColor {
    type Err = ArtError;

    fn from_str(s: &str) -> ArtResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map(Self);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body).map(Self);
        }
        Err(ArtError::validation(format!(
            "unsupported color \"{s}\" (expected #hex, rgb() or rgba())"
        )))
    }
}

impl TryFrom<String> for TextColor {
    type Error = ArtError;

    fn try_from(value: String) -> ArtResult<Self> {
        value.parse()
    }
}

impl From<TextColor> for String {
    fn from(value: TextColor) -> Self {
        value.to_string()
    }
}

fn parse_hex(hex: &str) -> ArtResult<Rgba8> {
    fn hex_byte(pair: &str) -> ArtResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| ArtError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    // `from_str_radix` alone would also take a sign.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ArtError::validation(format!("invalid hex color \"#{hex}\"")));
    }

    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = hex_byte(&c.to_string())?;
                out[i] = v * 17;
            }
            Ok(Rgba8::new(out[0], out[1], out[2], 255))
        }
        6 => Ok(Rgba8::new(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        )),
        _ => Err(ArtError::validation("hex color must be #RGB, #RRGGBB or #RRGGBBAA")),
    }
}

fn parse_functional(body: &str) -> ArtResult<Rgba8> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ArtError::validation("rgb()/rgba() takes 3 or 4 comma-separated components"));
    }

    let channel = |s: &str| -> ArtResult<u8> {
        let v: f64 = s
            .parse()
            .map_err(|_| ArtError::validation(format!("invalid color channel \"{s}\"")))?;
        if !v.is_finite() {
            return Err(ArtError::validation("color channel must be finite"));
        }
        Ok(v.round().clamp(0.0, 255.0) as u8)
    };

    let a = match parts.get(3) {
        Some(s) => {
            let v: f64 = s
                .parse()
                .map_err(|_| ArtError::validation(format!("invalid alpha \"{s}\"")))?;
            if !v.is_finite() {
                return Err(ArtError::validation("alpha must be finite"));
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };

    Ok(Rgba8::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
