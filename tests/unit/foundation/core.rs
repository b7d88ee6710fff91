use super::*;

#[test]
fn frame_from_raw_checks_length() {
    assert!(FrameRGBA::from_raw(2, 2, vec![0; 16]).is_ok());
    assert!(FrameRGBA::from_raw(2, 2, vec![0; 15]).is_err());
}

#[test]
fn transparent_frame_has_no_coverage() {
    let mut f = FrameRGBA::transparent(4, 3);
    assert_eq!(f.data.len(), 48);
    assert_eq!(f.covered_pixels(), 0);
    f.data[4 * 5 + 3] = 255;
    assert_eq!(f.covered_pixels(), 1);
    assert_eq!(f.pixel(1, 1).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn pixel_outside_the_frame_is_none() {
    let f = FrameRGBA::transparent(4, 3);
    assert_eq!(f.pixel(3, 2), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(4, 0), None);
    assert_eq!(f.pixel(0, 3), None);
    assert_eq!(f.pixel(u32::MAX, u32::MAX), None);
}

#[test]
fn frame_delay_validation() {
    assert!(FrameDelay::new(1, 0).is_err());
    let d = FrameDelay::one_tick();
    assert_eq!((d.num, d.den), (1, 20));
    assert!((d.as_secs_f64() - 0.05).abs() < 1e-12);
    assert_eq!(FrameDelay::default(), d);
}
