use super::*;

#[test]
fn classifies_source_strings() {
    assert_eq!(
        "cover.png".parse::<ImageSource>().unwrap(),
        ImageSource::path("cover.png")
    );
    assert_eq!(
        "file:///tmp/cover.png".parse::<ImageSource>().unwrap(),
        ImageSource::path("/tmp/cover.png")
    );
    assert!(matches!(
        "data:image/png;base64,AAAA".parse::<ImageSource>().unwrap(),
        ImageSource::DataUri(_)
    ));
    assert!(matches!(
        "https://example.com/a.png".parse::<ImageSource>().unwrap(),
        ImageSource::Url(_)
    ));
    assert!("   ".parse::<ImageSource>().is_err());
}

#[test]
fn data_uri_base64_roundtrip() {
    let uri = encode_data_uri("image/png", b"\x89PNG");
    assert!(uri.starts_with("data:image/png;base64,"));
    let d = decode_data_uri(&uri).unwrap();
    assert_eq!(d.media_type, "image/png");
    assert_eq!(d.data, b"\x89PNG");
}

#[test]
fn data_uri_plain_payload_is_percent_decoded() {
    let d = decode_data_uri("data:image/svg+xml,%3Csvg%3E").unwrap();
    assert_eq!(d.media_type, "image/svg+xml");
    assert_eq!(d.data, b"<svg>");

    let d = decode_data_uri("data:,hello").unwrap();
    assert_eq!(d.media_type, "text/plain");
    assert_eq!(d.data, b"hello");
}

#[test]
fn malformed_data_uris_are_rejected() {
    assert!(decode_data_uri("image/png;base64,AAAA").is_err());
    assert!(decode_data_uri("data:image/png;base64").is_err());
    assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
    assert!(decode_data_uri("data:text/plain,%zz").is_err());
}

#[test]
fn display_truncates_inline_payloads() {
    let src = ImageSource::DataUri("data:image/png;base64,AAAAAAAA".to_string());
    assert_eq!(src.to_string(), "data:image/png;base64,...");
}

#[test]
fn load_bytes_reads_files_and_reports_missing_ones() {
    let src = ImageSource::path("tests/data/fonts/LICENSE-DejaVu.txt");
    assert!(!src.load_bytes().unwrap().is_empty());

    let err = ImageSource::path("tests/data/nope.png").load_bytes().unwrap_err();
    assert!(err.to_string().contains("nope.png"));
}

#[cfg(not(feature = "http"))]
#[test]
fn remote_sources_need_the_http_feature() {
    let err = ImageSource::Url("https://example.com/a.png".to_string())
        .load_bytes()
        .unwrap_err();
    assert!(err.to_string().contains("http"));
}
