use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_interval_matches_rate() {
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-9);
    assert_eq!(fps.as_f64(), 30.0);
}

#[test]
fn canvas_from_viewport_floors_and_rejects_garbage() {
    let c = Canvas::from_viewport(Viewport::new(1280.7, 719.2));
    assert_eq!(c, Canvas::new(1280, 719));
    let z = Canvas::from_viewport(Viewport::new(f64::NAN, -3.0));
    assert_eq!(z, Canvas::new(0, 0));
}

#[test]
fn viewport_degenerate_detection() {
    assert!(Viewport::new(0.0, 10.0).is_degenerate());
    assert!(Viewport::new(10.0, f64::INFINITY).is_degenerate());
    assert!(!Viewport::new(10.0, 10.0).is_degenerate());
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::from_hex("#00bfff").unwrap(), Rgba8::opaque(0, 191, 255));
    assert_eq!(Rgba8::from_hex("#8a2be280").unwrap().a, 0x80);
    assert!(Rgba8::from_hex("00bfff").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
}

#[test]
fn with_alpha_scales_and_clamps() {
    let c = Rgba8::opaque(1, 2, 3);
    assert_eq!(c.with_alpha(0.5).a, 128);
    assert_eq!(c.with_alpha(4.0).a, 255);
    assert_eq!(c.with_alpha(-1.0).a, 0);
}
