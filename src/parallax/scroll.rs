use crate::foundation::math::lerp;

/// Piecewise-linear map of `input` through `domain -> range`, clamped at both ends.
///
/// A decreasing domain is accepted. Returns the single range value for one-point tracks and `0`
/// for anything unusable (mismatched lengths, non-finite values, empty input).
pub fn interpolate(input: f64, domain: &[f64], range: &[f64]) -> f64 {
    if domain.len() != range.len() || domain.is_empty() {
        return 0.0;
    }
    if !input.is_finite() || domain.iter().chain(range).any(|v| !v.is_finite()) {
        return 0.0;
    }
    if domain.len() == 1 {
        return range[0];
    }

    let mut pts: Vec<(f64, f64)> = domain.iter().copied().zip(range.iter().copied()).collect();
    if pts[0].0 > pts[pts.len() - 1].0 {
        pts.reverse();
    }
    if pts.windows(2).any(|w| w[1].0 < w[0].0) {
        return 0.0;
    }

    let (first, last) = (pts[0], pts[pts.len() - 1]);
    if input <= first.0 {
        return first.1;
    }
    if input >= last.0 {
        return last.1;
    }
    for w in pts.windows(2) {
        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
        if input <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return y1;
            }
            return lerp(y0, y1, (input - x0) / span);
        }
    }
    last.1
}

/// Layout measurements of the element a track follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementMetrics {
    pub offset_top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

impl ElementMetrics {
    /// Scroll offsets where the element enters from below and leaves through the top.
    pub fn visibility_window(self) -> Option<[f64; 2]> {
        let start = self.offset_top - self.viewport_height;
        let end = self.offset_top + self.height;
        (start.is_finite() && end.is_finite() && end > start).then_some([start, end])
    }
}

/// Scroll-position projection bound to one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrack {
    window: Option<[f64; 2]>,
    range: [f64; 2],
}

impl ScrollTrack {
    pub fn new(metrics: Option<ElementMetrics>, range: [f64; 2]) -> Self {
        Self {
            window: metrics.and_then(ElementMetrics::visibility_window),
            range,
        }
    }

    /// Recompute the domain after mount or a (debounced) resize.
    pub fn remeasure(&mut self, metrics: Option<ElementMetrics>) {
        self.window = metrics.and_then(ElementMetrics::visibility_window);
    }

    pub fn domain(&self) -> Option<[f64; 2]> {
        self.window
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Output for `scroll_y`; unmeasured tracks project to zero.
    pub fn project(&self, scroll_y: f64) -> f64 {
        match self.window {
            Some(domain) => interpolate(scroll_y, &domain, &self.range),
            None => 0.0,
        }
    }
}

/// Coalesces bursts of resize events into one remeasure after `delay_ms` of quiet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeDebounce {
    pub delay_ms: f64,
    pending_since: Option<f64>,
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ResizeDebounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            pending_since: None,
        }
    }

    pub fn notify(&mut self, now_ms: f64) {
        self.pending_since = Some(now_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Return `true` exactly once when the last resize is at least `delay_ms` old.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.pending_since {
            Some(t) if now_ms - t >= self.delay_ms => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/scroll.rs"]
mod tests;
