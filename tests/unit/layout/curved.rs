use super::*;
use crate::style::model::{ARTIST_FONT_SIZE_RANGE, TITLE_FONT_SIZE_RANGE};

fn style(layout: TextLayout, title: u32, artist: u32) -> StyleConfig {
    StyleConfig {
        text_layout: layout,
        title_font_size: title,
        artist_font_size: artist,
        ..StyleConfig::default()
    }
}

#[test]
fn straight_layout_has_no_arc_geometry() {
    assert!(CurvedLayout::compute(Canvas::ALBUM, &StyleConfig::default()).is_none());
}

#[test]
fn centers_and_title_radius_follow_canvas_fractions() {
    let top = CurvedLayout::compute(Canvas::ALBUM, &style(TextLayout::CurvedTop, 80, 40)).unwrap();
    assert!(top.is_top);
    assert_eq!(top.center.x, 512.0);
    assert!((top.center.y - 460.8).abs() < 1e-9);
    assert!((top.title_radius - 358.4).abs() < 1e-9);

    let bottom =
        CurvedLayout::compute(Canvas::ALBUM, &style(TextLayout::CurvedBottom, 80, 40)).unwrap();
    assert!(!bottom.is_top);
    assert!((bottom.center.y - 563.2).abs() < 1e-9);
    assert!((bottom.title_radius - 358.4).abs() < 1e-9);
}

#[test]
fn artist_arc_is_offset_away_from_the_curved_edge() {
    for title in TITLE_FONT_SIZE_RANGE.step_by(10) {
        for artist in ARTIST_FONT_SIZE_RANGE.step_by(10) {
            let top =
                CurvedLayout::compute(Canvas::ALBUM, &style(TextLayout::CurvedTop, title, artist))
                    .unwrap();
            assert!(
                top.artist_radius - top.title_radius >= f64::from(title) + ARC_CLEARANCE_PX - 1e-9
            );

            let bottom = CurvedLayout::compute(
                Canvas::ALBUM,
                &style(TextLayout::CurvedBottom, title, artist),
            )
            .unwrap();
            assert!(
                bottom.title_radius - bottom.artist_radius
                    >= f64::from(artist) + ARC_CLEARANCE_PX - 1e-9
            );
        }
    }
}

#[test]
fn arcs_share_center_and_spacing() {
    let l = CurvedLayout::compute(Canvas::ALBUM, &style(TextLayout::CurvedTop, 80, 40)).unwrap();
    let t = l.title_arc(12.0);
    let a = l.artist_arc(12.0);
    assert_eq!(t.center, a.center);
    assert_eq!(t.radius, l.title_radius);
    assert_eq!(a.radius, l.artist_radius);
    assert!(a.angle_step() < t.angle_step());
}
