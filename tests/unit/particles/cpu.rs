use kurbo::Shape as _;

use super::*;

fn square(x0: f64, y0: f64, side: f64) -> BezPath {
    kurbo::Rect::new(x0, y0, x0 + side, y0 + side).to_path(0.1)
}

fn pixel(s: &CpuSurface, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * s.canvas().width + x) * 4) as usize;
    let d = s.premultiplied_rgba8();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

#[test]
fn empty_or_oversized_canvas_is_rejected() {
    assert!(CpuSurface::new(Canvas::new(0, 10)).is_err());
    assert!(CpuSurface::new(Canvas::new(70_000, 10)).is_err());
}

#[test]
fn fill_path_paints_inside_only() {
    let mut s = CpuSurface::new(Canvas::new(32, 32)).unwrap();
    s.clear();
    s.fill_path(&square(8.0, 8.0, 16.0), Rgba8::opaque(0, 191, 255), 1.0);
    s.present();

    let inside = pixel(&s, 16, 16);
    assert_eq!(inside[3], 255);
    assert!(inside[2] > 200);
    assert_eq!(pixel(&s, 1, 1), [0, 0, 0, 0]);
}

#[test]
fn partial_alpha_is_premultiplied_and_recovered() {
    let mut s = CpuSurface::new(Canvas::new(16, 16)).unwrap();
    s.clear();
    s.fill_path(&square(0.0, 0.0, 16.0), Rgba8::opaque(255, 0, 0), 0.5);
    s.present();

    let premul = pixel(&s, 8, 8);
    assert!((120..=136).contains(&premul[3]));
    assert!(premul[0] <= premul[3]);

    let straight = s.rgba8();
    let i = (8 * 16 + 8) * 4;
    assert!(straight[i] >= 250);
}

#[test]
fn glow_extends_beyond_shape() {
    let mut s = CpuSurface::new(Canvas::new(64, 64)).unwrap();
    s.clear();
    s.glow_path(&square(28.0, 28.0, 8.0), Rgba8::opaque(138, 43, 226), 12.0);
    s.present();

    assert!(pixel(&s, 32, 22)[3] > 0);
    assert_eq!(pixel(&s, 2, 2)[3], 0);
}

#[test]
fn clear_resets_pixels() {
    let mut s = CpuSurface::new(Canvas::new(16, 16)).unwrap();
    s.clear();
    s.fill_path(&square(0.0, 0.0, 16.0), Rgba8::opaque(255, 255, 255), 1.0);
    s.present();
    s.clear();
    s.present();
    assert!(s.premultiplied_rgba8().iter().all(|&b| b == 0));
}

#[test]
fn stroke_line_draws_between_points() {
    let mut s = CpuSurface::new(Canvas::new(32, 32)).unwrap();
    s.clear();
    s.stroke_line(
        Point::new(0.0, 16.0),
        Point::new(32.0, 16.0),
        Rgba8::opaque(255, 255, 255),
        1.0,
        4.0,
    );
    s.present();
    assert!(pixel(&s, 16, 16)[3] > 0);
    assert_eq!(pixel(&s, 16, 2)[3], 0);
}

#[test]
fn png_round_trips_dimensions() {
    let mut s = CpuSurface::new(Canvas::new(20, 10)).unwrap();
    s.clear();
    s.present();
    let png = s.encode_png().unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (20, 10));
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/frame.png");
    let mut s = CpuSurface::new(Canvas::new(8, 8)).unwrap();
    s.clear();
    s.present();
    s.write_png(&out).unwrap();
    assert!(out.exists());
}

#[test]
fn resize_reallocates_pixmap() {
    let mut s = CpuSurface::new(Canvas::new(8, 8)).unwrap();
    s.resize(Canvas::new(12, 4)).unwrap();
    assert_eq!(s.canvas(), Canvas::new(12, 4));
    assert_eq!(s.premultiplied_rgba8().len(), 12 * 4 * 4);
    assert!(s.resize(Canvas::new(0, 4)).is_err());
    assert_eq!(s.canvas(), Canvas::new(12, 4));
}
