use super::*;

#[test]
fn album_canvas_is_square_1024() {
    let c = Canvas::default();
    assert_eq!(c, Canvas::ALBUM);
    assert_eq!(c.size(), 1024.0);
}

#[test]
fn premultiply_matches_rounded_product() {
    let p = Rgba8::new(100, 50, 200, 128).premultiplied();
    assert_eq!(
        p.to_array(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(Rgba8::WHITE.premultiplied().to_array(), [255; 4]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0; 4]);
}
