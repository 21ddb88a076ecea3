use super::*;

#[test]
fn spring_converges_to_target() {
    let mut s = SpringValue::new(Spring::new(100.0, 30.0), 0.0);
    for _ in 0..300 {
        s.step(10.0, 1.0 / 60.0);
    }
    assert_eq!(s.value, 10.0);
    assert!(s.is_settled(10.0));
}

#[test]
fn critically_damped_does_not_overshoot() {
    let mut s = SpringValue::new(Spring::critically_damped(50.0, 1.0), 0.0);
    let mut max = f64::MIN;
    for _ in 0..600 {
        max = max.max(s.step(1.0, 1.0 / 60.0));
    }
    assert!(max <= 1.0 + 1e-6, "overshoot to {max}");
    assert!((Spring::critically_damped(50.0, 1.0).damping_ratio() - 1.0).abs() < 1e-9);
}

#[test]
fn result_is_independent_of_frame_slicing() {
    let spring = Spring::new(300.0, 25.0);
    let mut a = SpringValue::new(spring, 0.0);
    let mut b = SpringValue::new(spring, 0.0);
    a.step(5.0, 0.1);
    for _ in 0..24 {
        b.step(5.0, 1.0 / 240.0);
    }
    assert!((a.value - b.value).abs() < 1e-9);
}

#[test]
fn invalid_dt_is_ignored_and_long_gaps_snap() {
    let mut s = SpringValue::new(Spring::new(100.0, 10.0), 2.0);
    assert_eq!(s.step(5.0, -1.0), 2.0);
    assert_eq!(s.step(5.0, f64::NAN), 2.0);
    assert_eq!(s.step(f64::INFINITY, 0.1), 2.0);
    assert_eq!(s.step(5.0, 30.0), 5.0);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn exp_smoothing_approaches_target() {
    let mut e = ExpSmoothing::new(0.1, 0.0);
    let v1 = e.step(1.0, 0.1);
    assert!((v1 - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    for _ in 0..100 {
        e.step(1.0, 0.1);
    }
    assert!((e.value - 1.0).abs() < 1e-9);

    let mut instant = ExpSmoothing::new(0.0, 0.0);
    assert_eq!(instant.step(3.0, 0.01), 3.0);
}
