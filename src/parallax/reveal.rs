use crate::{animation::ease::Ease, foundation::core::Vec2, foundation::math::lerp};

pub const REVEAL_DISTANCE: f64 = 30.0;
pub const SCROLL_TWEEN_MS: f64 = 1000.0;

/// Direction content travels while revealing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl RevealDirection {
    /// Offset before the reveal starts.
    fn start_offset(self, distance: f64) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, distance),
            Self::Down => Vec2::new(0.0, -distance),
            Self::Left => Vec2::new(-distance, 0.0),
            Self::Right => Vec2::new(distance, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealFrame {
    pub offset: Vec2,
    pub opacity: f64,
}

/// Reveal-on-scroll transform at linear `progress` in `[0, 1]`.
pub fn reveal(direction: RevealDirection, progress: f64, distance: f64) -> RevealFrame {
    let e = Ease::REVEAL.apply(progress);
    RevealFrame {
        offset: direction.start_offset(distance) * (1.0 - e),
        opacity: e,
    }
}

/// Timed reveal that starts when the element first enters view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub direction: RevealDirection,
    pub distance: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    /// Keep the final state after leaving view.
    pub once: bool,
    started_ms: Option<f64>,
}

impl Default for Reveal {
    fn default() -> Self {
        Self {
            direction: RevealDirection::Up,
            distance: REVEAL_DISTANCE,
            duration_ms: 500.0,
            delay_ms: 0.0,
            once: true,
            started_ms: None,
        }
    }
}

impl Reveal {
    pub fn new(direction: RevealDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Report whether the element intersects the viewport at `now_ms`.
    pub fn set_in_view(&mut self, in_view: bool, now_ms: f64) {
        match (in_view, self.started_ms) {
            (true, None) => self.started_ms = Some(now_ms),
            (false, Some(_)) if !self.once => self.started_ms = None,
            _ => {}
        }
    }

    pub fn frame_at(&self, now_ms: f64) -> RevealFrame {
        let progress = match self.started_ms {
            None => 0.0,
            Some(_) if self.duration_ms <= 0.0 => 1.0,
            Some(t0) => ((now_ms - t0 - self.delay_ms) / self.duration_ms).clamp(0.0, 1.0),
        };
        reveal(self.direction, progress, self.distance)
    }
}

/// Eased scroll from one offset to another, as used by in-page navigation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: SCROLL_TWEEN_MS,
            ease: Ease::InOutQuad,
        }
    }

    pub fn position_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_done(elapsed_ms) {
            return self.to;
        }
        let t = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        lerp(self.from, self.to, self.ease.apply(t))
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/reveal.rs"]
mod tests;
