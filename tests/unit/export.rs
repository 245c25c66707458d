use super::*;
use crate::{assets::source::decode_data_uri, foundation::core::Canvas};

fn tiny_surface() -> Surface {
    let mut s = Surface::new(Canvas {
        width: 2,
        height: 1,
    })
    .unwrap();
    s.data_mut()
        .copy_from_slice(&[255, 0, 0, 255, 0, 0, 64, 128]);
    s
}

#[test]
fn file_name_uses_artist_then_title() {
    assert_eq!(download_file_name("Aurora", "Night Drive"), "Aurora - Night Drive.png");
    assert_eq!(download_file_name("", ""), " - .png");
}

#[test]
fn png_round_trips_straight_alpha() {
    let png = encode_png(&tiny_surface()).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    let px = img.get_pixel(1, 0).0;
    assert_eq!(px[3], 128);
    assert!(px[2].abs_diff(128) <= 1);
}

#[test]
fn data_uri_carries_the_png() {
    let surface = tiny_surface();
    let uri = to_data_uri(&surface).unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    let decoded = decode_data_uri(&uri).unwrap();
    assert_eq!(decoded.media_type, PNG_MEDIA_TYPE);
    assert_eq!(decoded.data, encode_png(&surface).unwrap());
}

#[test]
fn blank_surface_still_exports() {
    let surface = Surface::album().unwrap();
    let png = encode_png(&surface).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (1024, 1024));
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn write_download_creates_named_file() {
    let dir = std::env::temp_dir().join(format!("albumart-export-{}", std::process::id()));
    let path = write_download(&tiny_surface(), &dir, "Aurora", "Night Drive").unwrap();
    assert_eq!(path.file_name().unwrap(), "Aurora - Night Drive.png");
    assert!(std::fs::metadata(&path).unwrap().len() > 8);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_download_refuses_path_separators() {
    let dir = std::env::temp_dir();
    let err = write_download(&tiny_surface(), &dir, "AC/DC", "Back").unwrap_err();
    assert!(matches!(err, ArtError::Export(_)));
}

#[test]
fn closures_are_sinks() {
    let mut seen = Vec::new();
    let mut sink = |id: Option<&str>, uri: &str| -> ArtResult<()> {
        seen.push((id.map(str::to_owned), uri.len()));
        Ok(())
    };
    sink.save(Some("t1"), "data:image/png;base64,AAAA").unwrap();
    sink.save(None, "data:").unwrap();
    drop(sink);
    assert_eq!(seen, vec![(Some("t1".to_string()), 26), (None, 5)]);
}
