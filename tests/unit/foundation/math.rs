use super::*;

#[test]
fn fnv_hash_is_stable_across_split_writes() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"aurora");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b'a');
    b.write_bytes(b"urora");
    assert_eq!(a.finish(), b.finish());
    assert_ne!(a.finish(), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u8(255, 255), 255);
}

#[test]
fn degrees_convert_to_radians() {
    assert_eq!(deg_to_rad(0.0), 0.0);
    assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
    assert!((deg_to_rad(-45.0) + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
}
