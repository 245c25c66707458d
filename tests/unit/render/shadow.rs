use super::*;

fn single_dot(w: u32, h: u32, x: u32, y: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let idx = ((y * w + x) * 4) as usize;
    buf[idx..idx + 4].copy_from_slice(&[0, 0, 0, 255]);
    buf
}

#[test]
fn default_shadow_matches_canvas_settings() {
    let s = ShadowStyle::default();
    assert_eq!(s.color, Rgba8::new(0, 0, 0, 179));
    assert_eq!(s.sigma(), 5.0);
    assert_eq!(s.radius(), 15);
}

#[test]
fn shadow_alpha_follows_text_alpha() {
    let s = ShadowStyle::default();
    assert_eq!(s.paint_for(Rgba8::WHITE).a, 179);
    assert_eq!(s.paint_for(Rgba8::new(255, 0, 0, 0)).a, 0);
    let half = s.paint_for(Rgba8::new(255, 255, 255, 128)).a;
    assert!((88..=91).contains(&half), "{half}");
}

#[test]
fn kernel_sums_to_one_in_q16() {
    let k = gaussian_kernel_q16(15, 5.0).unwrap();
    assert_eq!(k.len(), 31);
    assert_eq!(k.iter().map(|&v| u64::from(v)).sum::<u64>(), 65536);
    assert!(k[15] >= k[14]);
    assert_eq!(k[0], k[30]);
}

#[test]
fn blur_spreads_a_dot_symmetrically() {
    let src = single_dot(9, 9, 4, 4);
    let out = blur_rgba8_premul(&src, 9, 9, 2, 1.0).unwrap();
    let a = |x: u32, y: u32| out[((y * 9 + x) * 4 + 3) as usize];
    assert!(a(4, 4) > 0);
    assert!(a(4, 4) < 255);
    assert_eq!(a(3, 4), a(5, 4));
    assert_eq!(a(4, 3), a(4, 5));
    assert_eq!(a(0, 0), 0);
}

#[test]
fn zero_radius_is_identity() {
    let src = single_dot(3, 3, 1, 1);
    assert_eq!(blur_rgba8_premul(&src, 3, 3, 0, 1.0).unwrap(), src);
}

#[test]
fn rejects_mismatched_buffers() {
    assert!(blur_rgba8_premul(&[0u8; 8], 3, 3, 1, 1.0).is_err());
    let mut buf = [0u8; 8];
    assert!(over_in_place(&mut buf, &[0u8; 4]).is_err());
}

#[test]
fn region_blur_matches_full_blur() {
    let (w, h) = (40, 30);
    let mut buf = single_dot(w, h, 20, 12);
    let idx = ((13 * w + 22) * 4) as usize;
    buf[idx..idx + 4].copy_from_slice(&[10, 20, 30, 128]);

    let full = blur_rgba8_premul(&buf, w, h, 4, 2.0).unwrap();
    blur_inked_region_in_place(&mut buf, w, h, 4, 2.0).unwrap();
    assert_eq!(buf, full);
}

#[test]
fn region_blur_of_empty_layer_is_noop() {
    let mut buf = vec![0u8; 16 * 16 * 4];
    blur_inked_region_in_place(&mut buf, 16, 16, 15, 5.0).unwrap();
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn over_blends_premultiplied_pixels() {
    assert_eq!(over([1, 2, 3, 255], [0, 0, 0, 0]), [1, 2, 3, 255]);
    assert_eq!(over([1, 2, 3, 255], [9, 9, 9, 255]), [9, 9, 9, 255]);
    // Half-transparent black over white darkens to mid gray.
    let out = over([255, 255, 255, 255], [0, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert!((126..=128).contains(&out[0]), "{out:?}");
}
