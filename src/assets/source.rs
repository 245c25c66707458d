use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::error::{ArtError, ArtResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Reference to a background image: a file, an inline `data:` URI or a remote URL.
pub enum ImageSource {
    Path(PathBuf),
    DataUri(String),
    Url(String),
}

impl ImageSource {
    pub fn path(p: impl Into<PathBuf>) -> Self {
        Self::Path(p.into())
    }

    /// Fetch the encoded bytes behind this reference.
    #[tracing::instrument(level = "debug", skip(self), fields(source = %self))]
    pub fn load_bytes(&self) -> ArtResult<Vec<u8>> {
        match self {
            Self::Path(p) => read_file(p),
            Self::DataUri(uri) => Ok(decode_data_uri(uri)?.data),
            Self::Url(url) => fetch_url(url),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::DataUri(uri) => {
                // Payloads can be megabytes; print the header only.
                let head = uri.split_once(',').map(|(h, _)| h).unwrap_or(uri);
                write!(f, "{head},...")
            }
            Self::Url(u) => f.write_str(u),
        }
    }
}

impl FromStr for ImageSource {
    type Err = ArtError;

    fn from_str(s: &str) -> ArtResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ArtError::validation("image source must be non-empty"));
        }
        if s.starts_with("data:") {
            return Ok(Self::DataUri(s.to_string()));
        }
        if let Some(rest) = s.strip_prefix("file://") {
            return Ok(Self::Path(PathBuf::from(rest)));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Self::Url(s.to_string()));
        }
        Ok(Self::Path(PathBuf::from(s)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Parse `data:[<media type>][;base64],<payload>`.
pub fn decode_data_uri(uri: &str) -> ArtResult<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ArtError::validation("data URI must start with 'data:'"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ArtError::validation("data URI is missing ','"))?;

    let (media_type, is_base64) = match header.strip_suffix(";base64") {
        Some(mt) => (mt, true),
        None => (header, false),
    };
    let media_type = if media_type.is_empty() {
        "text/plain".to_string()
    } else {
        media_type.to_string()
    };

    let data = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| ArtError::decode(format!("invalid base64 payload: {e}")))?
    } else {
        percent_decode(payload)?
    };

    Ok(DataUri { media_type, data })
}

/// Build a base64 `data:` URI.
pub fn encode_data_uri(media_type: &str, data: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:{media_type};base64,{payload}")
}

fn percent_decode(s: &str) -> ArtResult<Vec<u8>> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| ArtError::decode("invalid percent escape in data URI"))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

fn read_file(path: &Path) -> ArtResult<Vec<u8>> {
    Ok(std::fs::read(path).with_context(|| format!("read image from '{}'", path.display()))?)
}

#[cfg(feature = "http")]
fn fetch_url(url: &str) -> ArtResult<Vec<u8>> {
    let resp = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("fetch image from '{url}'"))?;
    let bytes = resp
        .bytes()
        .with_context(|| format!("read image body from '{url}'"))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "http"))]
fn fetch_url(url: &str) -> ArtResult<Vec<u8>> {
    Err(ArtError::validation(format!(
        "cannot fetch '{url}': remote image sources need the `http` feature"
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
