use crate::foundation::core::{Point, Vec2, Viewport};

/// Pointer position relative to the viewport center, each axis in `[-0.5, 0.5]`.
pub fn normalize_pointer(pointer: Point, viewport: Viewport) -> Vec2 {
    if viewport.is_degenerate() || !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return Vec2::ZERO;
    }
    let c = viewport.center();
    Vec2::new(
        ((pointer.x - c.x) / viewport.width).clamp(-0.5, 0.5),
        ((pointer.y - c.y) / viewport.height).clamp(-0.5, 0.5),
    )
}

/// Secondary offset for a layer moving `speed` pixels per unit of normalized pointer travel.
///
/// A missing pointer projects to zero.
pub fn project_mouse(pointer: Option<Point>, viewport: Viewport, speed: Vec2) -> Vec2 {
    let Some(p) = pointer else {
        return Vec2::ZERO;
    };
    let n = normalize_pointer(p, viewport);
    Vec2::new(n.x * speed.x, n.y * speed.y)
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/pointer.rs"]
mod tests;
