//! Album-art compositor: title and artist text drawn over a square cover image.
//!
//! The pipeline is a pure function of its inputs. Every change to the image, the text or the
//! style produces a full redraw onto a 1024×1024 surface:
//!
//! - [`StyleConfig`] describes sizes, color, layout, anchor, rotation and letter spacing
//! - [`TextPlan`] turns that into positioned text draws (straight lines or per-character arcs)
//! - [`Compositor`] paints background, blurred drop shadow and text onto a [`Surface`]
//! - [`export`] turns the surface into a PNG download or a data URI for an [`ArtworkSink`]
//!
//! [`ArtSession`] wraps all of it for interactive use, decoding new backgrounds off-thread and
//! discarding results that a newer request has superseded.
#![forbid(unsafe_code)]

pub mod assets;
pub mod export;
pub mod foundation;
pub mod layout;
pub mod library;
pub mod render;
pub mod session;
pub mod style;
pub mod text;

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::source::ImageSource;
pub use crate::export::{ArtworkSink, download_file_name, encode_png, to_data_uri, write_download};
pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ArtError, ArtResult};
pub use crate::layout::plan::{FontRole, TextDraw, TextPlan};
pub use crate::library::{Track, TrackLibrary};
pub use crate::render::compositor::Compositor;
pub use crate::render::shadow::ShadowStyle;
pub use crate::render::surface::Surface;
pub use crate::session::ArtSession;
pub use crate::style::color::TextColor;
pub use crate::style::model::{CompositionInput, StyleConfig, TextLayout, TextPosition};
pub use crate::text::fonts::{FontFace, FontSet};
