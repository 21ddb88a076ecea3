use super::*;

#[test]
fn readers_see_latest_values() {
    let signals = InputSignals::new(Viewport::new(800.0, 600.0));
    let reader = signals.reader();

    signals.publish_scroll(120.0);
    signals.publish_pointer(Some(Point::new(10.0, 20.0)));
    signals.publish_viewport(Viewport::new(1024.0, 768.0));

    assert_eq!(reader.scroll_y(), 120.0);
    assert_eq!(reader.pointer(), Some(Point::new(10.0, 20.0)));
    assert_eq!(reader.viewport(), Viewport::new(1024.0, 768.0));
    assert!(reader.is_visible());

    let snap = InputSnapshot::from(&reader);
    assert_eq!(snap.scroll_y, 120.0);
}

#[test]
fn invalid_scroll_is_dropped_and_negative_clamped() {
    let signals = InputSignals::new(Viewport::default());
    let reader = signals.reader();
    signals.publish_scroll(50.0);
    signals.publish_scroll(f64::NAN);
    assert_eq!(reader.scroll_y(), 50.0);
    signals.publish_scroll(-20.0);
    assert_eq!(reader.scroll_y(), 0.0);
}

#[test]
fn publishing_without_readers_is_fine() {
    let signals = InputSignals::new(Viewport::default());
    signals.publish_scroll(1.0);
    signals.publish_visibility(Visibility::Hidden);
    assert_eq!(signals.reader().visibility(), Visibility::Hidden);
}

#[tokio::test]
async fn visibility_changes_are_observable() {
    let signals = InputSignals::new(Viewport::default());
    let mut reader = signals.reader();

    signals.publish_visibility(Visibility::Hidden);
    assert_eq!(reader.visibility_changed().await, Some(Visibility::Hidden));

    drop(signals);
    assert_eq!(reader.visibility_changed().await, None);
}
