use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn range_stays_inside_bounds() {
    let mut rng = Rng64::new(9);
    for _ in 0..1000 {
        let v = rng.range_f64(-2.0, 3.0);
        assert!((-2.0..3.0).contains(&v));
    }
    assert_eq!(rng.range_f64(5.0, 5.0), 5.0);
}

#[test]
fn pick_handles_empty_and_covers_items() {
    let mut rng = Rng64::new(1);
    let empty: [u8; 0] = [];
    assert!(rng.pick(&empty).is_none());

    let items = [1, 2, 3];
    let mut seen = [false; 3];
    for _ in 0..200 {
        let v = *rng.pick(&items).unwrap();
        seen[v - 1] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
}
