use serde_json::json;

use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(
        "#FFFFFF".parse::<TextColor>().unwrap(),
        TextColor(Rgba8::new(255, 255, 255, 255))
    );
    assert_eq!(
        "#f80".parse::<TextColor>().unwrap(),
        TextColor(Rgba8::new(0xff, 0x88, 0x00, 255))
    );
    assert_eq!(
        "#0000ff80".parse::<TextColor>().unwrap(),
        TextColor(Rgba8::new(0, 0, 255, 128))
    );
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        "rgb(10, 20, 30)".parse::<TextColor>().unwrap(),
        TextColor(Rgba8::new(10, 20, 30, 255))
    );
    assert_eq!(
        "RGBA(0,0,0,0.5)".parse::<TextColor>().unwrap(),
        TextColor(Rgba8::new(0, 0, 0, 128))
    );
}

#[test]
fn rejects_malformed_colors() {
    for bad in ["", "#12", "#gggggg", "rgb(1,2)", "hsl(0,0,0)", "#ffffffffff"] {
        assert!(bad.parse::<TextColor>().is_err(), "{bad} should not parse");
    }
}

#[test]
fn hex_digits_may_not_carry_signs() {
    for bad in ["#+f+f+f", "#+fff", "#ff+fff", "#+f+f+f+f", "#-1f", "#é1"] {
        let err = bad.parse::<TextColor>().unwrap_err();
        assert!(matches!(err, ArtError::Validation(_)), "{bad}: {err}");
    }
}

#[test]
fn serde_uses_lowercase_hex_strings() {
    let c: TextColor = serde_json::from_value(json!("#AABBCC")).unwrap();
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#aabbcc"));

    let translucent = TextColor(Rgba8::new(1, 2, 3, 4));
    assert_eq!(translucent.to_string(), "#01020304");

    assert!(serde_json::from_value::<TextColor>(json!("nope")).is_err());
}
