use std::f64::consts::FRAC_PI_2;

use super::*;

fn arc(is_top: bool) -> ArcText {
    ArcText::new(Point::new(512.0, 460.8), 358.4, is_top, 12.0)
}

#[test]
fn five_character_top_arc_matches_reference_numbers() {
    let a = arc(true);
    let step = 12.0 / 358.4;
    assert!((a.angle_step() - step).abs() < 1e-12);
    assert!((a.angle_step() - 0.0335).abs() < 1e-4);
    assert!((a.total_span(5) - 4.0 * step).abs() < 1e-12);
    assert!((a.total_span(5) - 0.134).abs() < 1e-3);

    let glyphs = a.place("Drive");
    assert_eq!(glyphs.len(), 5);
    assert!((glyphs[0].angle - (-FRAC_PI_2 - 2.0 * step)).abs() < 1e-12);
    assert!((glyphs[0].angle - (-FRAC_PI_2 - 0.067)).abs() < 1e-3);
    // Middle character sits straight up from the center.
    assert!((glyphs[2].angle + FRAC_PI_2).abs() < 1e-12);
    assert!((glyphs[2].position.x - 512.0).abs() < 1e-9);
    assert!((glyphs[2].position.y - (460.8 - 358.4)).abs() < 1e-9);
}

#[test]
fn every_glyph_lies_on_the_circle_with_tangent_baseline() {
    let a = arc(true);
    for g in a.place("Night Drive") {
        let d = (g.position - a.center).hypot();
        assert!((d - a.radius).abs() < 1e-9);
        assert!((g.rotation - (g.angle + FRAC_PI_2)).abs() < 1e-12);
    }
    let b = arc(false);
    for g in b.place("Night Drive") {
        assert!((g.rotation - (g.angle - FRAC_PI_2)).abs() < 1e-12);
    }
}

#[test]
fn top_and_bottom_arcs_are_vertical_mirrors() {
    let text = "Aurora";
    let top = arc(true).place(text);
    let bottom = arc(false).place(text);
    let cy = arc(true).center.y;
    let n = text.chars().count();

    for (i, t) in top.iter().enumerate() {
        // Mirroring across the horizontal axis reverses the reading direction.
        let b = &bottom[n - 1 - i];
        assert!((t.position.x - b.position.x).abs() < 1e-9);
        assert!(((t.position.y - cy) + (b.position.y - cy)).abs() < 1e-9);
        assert!((t.angle + b.angle).abs() < 1e-9);
    }
    assert!((arc(true).start_angle(n) + FRAC_PI_2 + arc(true).total_span(n) / 2.0).abs() < 1e-12);
    assert!((arc(false).start_angle(n) - FRAC_PI_2 + arc(false).total_span(n) / 2.0).abs() < 1e-12);
}

#[test]
fn single_character_sits_exactly_on_the_anchor_angle() {
    let top = arc(true).place("A");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].angle, -FRAC_PI_2);
    assert_eq!(top[0].rotation, 0.0);

    let bottom = arc(false).place("A");
    assert_eq!(bottom[0].angle, FRAC_PI_2);
    assert_eq!(bottom[0].rotation, 0.0);
    assert!((bottom[0].position.y - (460.8 + 358.4)).abs() < 1e-9);
}

#[test]
fn empty_text_places_nothing() {
    assert!(arc(true).place("").is_empty());
    assert_eq!(arc(true).total_span(0), 0.0);
}

#[test]
fn glyph_transform_maps_local_origin_to_slot() {
    let g = arc(false).place("xyz")[1];
    let origin = g.transform() * Point::ORIGIN;
    assert!((origin - g.position).hypot() < 1e-9);

    // Local +X follows the tangent direction.
    let ahead = g.transform() * Point::new(1.0, 0.0);
    let dir = ahead - g.position;
    assert!((dir.x - g.rotation.cos()).abs() < 1e-9);
    assert!((dir.y - g.rotation.sin()).abs() < 1e-9);
}

#[test]
fn characters_are_unicode_scalars() {
    let glyphs = arc(true).place("Café");
    assert_eq!(glyphs.len(), 4);
    assert_eq!(glyphs[3].ch, 'é');
}

#[test]
fn zero_radius_places_nothing() {
    let a = ArcText::new(Point::new(10.0, 10.0), 0.0, true, 12.0);
    assert!(a.place("abc").is_empty());
}
