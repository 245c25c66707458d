use std::path::Path;

use super::*;

const BOLD: &str = "tests/data/fonts/DejaVuSans-Bold.ttf";
const REGULAR: &str = "tests/data/fonts/DejaVuSans.ttf";

#[test]
fn loads_explicit_font_files() {
    let set = FontSet::from_files(Path::new(BOLD), Path::new(REGULAR)).unwrap();
    assert!(!set.bold.bytes.is_empty());
    assert!(!set.regular.bytes.is_empty());
    assert_ne!(set.bold.bytes, set.regular.bytes);
    assert_eq!(set.bold.index, 0);
    assert!(set.bold.label.ends_with("DejaVuSans-Bold.ttf"));
}

#[test]
fn resolve_prefers_explicit_paths() {
    let set = FontSet::resolve(Some(Path::new(BOLD)), Some(Path::new(REGULAR))).unwrap();
    assert!(set.regular.label.ends_with("DejaVuSans.ttf"));
}

#[test]
fn missing_font_file_is_an_error() {
    let err = FontFace::from_path(Path::new("tests/data/fonts/missing.ttf")).unwrap_err();
    assert!(err.to_string().contains("missing.ttf"));
}

#[test]
fn empty_font_bytes_are_rejected() {
    assert!(FontFace::from_bytes(Vec::new(), 0, "inline").is_err());
}

#[test]
fn debug_output_omits_raw_bytes() {
    let face = FontFace::from_bytes(vec![1, 2, 3], 0, "inline").unwrap();
    let dbg = format!("{face:?}");
    assert!(dbg.contains("bytes_len: 3"));
    assert!(dbg.contains("inline"));
}

#[test]
fn explicit_paths_take_precedence_over_environment() {
    let set = FontSet::resolve_with_env(Some(Path::new(BOLD)), Some(Path::new(REGULAR))).unwrap();
    assert!(set.bold.label.ends_with("DejaVuSans-Bold.ttf"));
    assert!(set.regular.label.ends_with("DejaVuSans.ttf"));
}
