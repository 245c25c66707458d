use serde_json::json;

use super::*;

#[test]
fn defaults_match_editor_initial_state() {
    let s = StyleConfig::default();
    assert_eq!(s.title_font_size, 80);
    assert_eq!(s.artist_font_size, 40);
    assert_eq!(s.text_color.to_string(), "#ffffff");
    assert_eq!(s.text_layout, TextLayout::Straight);
    assert_eq!(s.text_position, TextPosition::BottomLeft);
    assert_eq!(s.text_rotation, 0);
    assert_eq!(s.letter_spacing, 12.0);
    s.validate().unwrap();
}

#[test]
fn json_uses_camel_case_keys_and_kebab_enums() {
    let s = StyleConfig::from_json_str(
        r##"{
            "titleFontSize": 120,
            "textLayout": "curved-bottom",
            "textPosition": "middle-right",
            "textColor": "#FF0000",
            "textRotation": -30
        }"##,
    )
    .unwrap();
    assert_eq!(s.title_font_size, 120);
    assert_eq!(s.artist_font_size, 40);
    assert_eq!(s.text_layout, TextLayout::CurvedBottom);
    assert_eq!(s.text_position, TextPosition::MiddleRight);
    assert_eq!(s.text_rotation, -30);

    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["textLayout"], json!("curved-bottom"));
    assert_eq!(v["textPosition"], json!("middle-right"));
    assert_eq!(v["textColor"], json!("#ff0000"));
}

#[test]
fn unknown_keys_and_invalid_values_are_rejected() {
    assert!(StyleConfig::from_json_str(r#"{"fontSize": 3}"#).is_err());
    assert!(StyleConfig::from_json_str(r#"{"titleFontSize": 0}"#).is_err());
    assert!(StyleConfig::from_json_str(r#"{"letterSpacing": -1.0}"#).is_err());
    assert!(StyleConfig::from_json_str(r#"{"textLayout": "wavy"}"#).is_err());
}

#[test]
fn extreme_sizes_are_accepted() {
    let s = StyleConfig {
        title_font_size: 2000,
        artist_font_size: 1,
        ..StyleConfig::default()
    };
    s.validate().unwrap();
}

#[test]
fn clamping_pulls_values_into_control_ranges() {
    let s = StyleConfig {
        title_font_size: 10,
        artist_font_size: 500,
        text_rotation: 90,
        letter_spacing: 0.5,
        ..StyleConfig::default()
    }
    .clamped_to_ui_ranges();
    assert_eq!(s.title_font_size, 40);
    assert_eq!(s.artist_font_size, 80);
    assert_eq!(s.text_rotation, 45);
    assert_eq!(s.letter_spacing, 5.0);
}

#[test]
fn rotation_only_applies_to_straight_layout() {
    let mut s = StyleConfig {
        text_rotation: 45,
        ..StyleConfig::default()
    };
    assert_eq!(s.effective_rotation_deg(), 45.0);
    s.text_layout = TextLayout::CurvedTop;
    assert_eq!(s.effective_rotation_deg(), 0.0);
    s.text_layout = TextLayout::CurvedBottom;
    assert_eq!(s.effective_rotation_deg(), 0.0);
}

#[test]
fn positions_round_trip_through_strings() {
    for p in TextPosition::ALL {
        let parsed: TextPosition = p.to_string().parse().unwrap();
        assert_eq!(parsed, p);
        assert_eq!(TextPosition::new(p.vertical(), p.horizontal()), p);
    }
    assert!("center".parse::<TextPosition>().is_err());
    assert!("top-middle".parse::<TextPosition>().is_err());
}

#[test]
fn layouts_parse_from_cli_strings() {
    assert_eq!(
        "curved-top".parse::<TextLayout>().unwrap(),
        TextLayout::CurvedTop
    );
    assert!(TextLayout::CurvedTop.is_curved());
    assert!(!TextLayout::Straight.is_curved());
    assert!("arc".parse::<TextLayout>().is_err());
}
