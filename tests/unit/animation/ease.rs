use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::REVEAL,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_and_nan_clamp() {
    assert_eq!(Ease::InQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::InQuad.apply(7.0), 1.0);
    assert_eq!(Ease::OutCubic.apply(f64::NAN), 0.0);
}

#[test]
fn linear_bezier_is_identity() {
    let ease = Ease::CubicBezier {
        x1: 0.25,
        y1: 0.25,
        x2: 0.75,
        y2: 0.75,
    };
    for t in [0.1, 0.3, 0.5, 0.9] {
        assert!((ease.apply(t) - t).abs() < 1e-5, "t={t}");
    }
}

#[test]
fn reveal_curve_front_loads_progress() {
    // Most of the motion happens early with this curve.
    assert!(Ease::REVEAL.apply(0.3) > 0.7);
}
