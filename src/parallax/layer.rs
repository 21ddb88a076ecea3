//! Decorative layers driven by scroll position and pointer travel.
//!
//! A layer only produces a [`LayerOffset`]; applying it is up to the host and never feeds back
//! into layout.

use crate::{
    animation::signals::InputSnapshot,
    animation::spring::{Spring, SpringValue},
    foundation::core::Vec2,
    parallax::pointer::project_mouse,
    parallax::scroll::{ElementMetrics, ResizeDebounce, ScrollTrack},
};

/// Multipliers applied to the hero pointer spring for the two background glow orbs.
pub const GLOW_ORB_FACTORS: [f64; 2] = [-2.0, 3.0];

/// Tuning for the built-in layer presets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub section_speed: f64,
    pub section_spring: Spring,
    /// Pixels of travel per unit of normalized pointer offset, per axis.
    pub hero_speed: [f64; 2],
    pub hero_spring: Spring,
    pub glow_orb_factors: [f64; 2],
    pub resize_debounce_ms: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            section_speed: 0.5,
            section_spring: Spring::new(100.0, 30.0),
            hero_speed: [12.0, 8.0],
            hero_spring: Spring::new(50.0, 20.0),
            glow_orb_factors: GLOW_ORB_FACTORS,
            resize_debounce_ms: 100.0,
        }
    }
}

impl ParallaxConfig {
    pub fn section_layer(&self, axis: Axis, metrics: Option<ElementMetrics>) -> ParallaxLayer {
        let travel = self.section_speed * 100.0;
        ParallaxLayer::new(self.section_spring)
            .with_scroll(axis, ScrollTrack::new(metrics, [travel, -travel]))
            .with_resize_debounce(self.resize_debounce_ms)
    }

    pub fn hero_layer(&self) -> ParallaxLayer {
        ParallaxLayer::new(self.hero_spring)
            .with_mouse(Vec2::new(self.hero_speed[0], self.hero_speed[1]))
            .with_resize_debounce(self.resize_debounce_ms)
    }

    /// Offsets of the two glow orbs riding the hero layer's spring.
    pub fn glow_orbs(&self, hero: LayerOffset) -> [LayerOffset; 2] {
        self.glow_orb_factors.map(|f| hero.scaled(f))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Visual adjustment for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerOffset {
    pub translate: Vec2,
    pub opacity: f64,
    /// Blur radius in pixels.
    pub blur: f64,
}

impl Default for LayerOffset {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            opacity: 1.0,
            blur: 0.0,
        }
    }
}

impl LayerOffset {
    /// Same offset with the translation multiplied by `factor`, for elements riding a shared spring.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            translate: self.translate * factor,
            ..self
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    axis: Axis,
    scroll: Option<ScrollTrack>,
    mouse_speed: Vec2,
    spring_x: SpringValue,
    spring_y: SpringValue,
    opacity: Option<ScrollTrack>,
    blur: Option<ScrollTrack>,
    resize: ResizeDebounce,
}

impl ParallaxLayer {
    pub fn new(spring: Spring) -> Self {
        Self {
            axis: Axis::Vertical,
            scroll: None,
            mouse_speed: Vec2::ZERO,
            spring_x: SpringValue::new(spring, 0.0),
            spring_y: SpringValue::new(spring, 0.0),
            opacity: None,
            blur: None,
            resize: ResizeDebounce::default(),
        }
    }

    pub fn with_resize_debounce(mut self, delay_ms: f64) -> Self {
        self.resize = ResizeDebounce::new(delay_ms);
        self
    }

    /// Scroll parallax for a section: `speed * 100` px before the element, `-speed * 100` after.
    pub fn section(speed: f64, axis: Axis, metrics: Option<ElementMetrics>) -> Self {
        ParallaxConfig {
            section_speed: speed,
            ..ParallaxConfig::default()
        }
        .section_layer(axis, metrics)
    }

    /// Hero background following the pointer, 12 px horizontally and 8 px vertically.
    pub fn hero_mouse() -> Self {
        ParallaxConfig::default().hero_layer()
    }

    pub fn with_scroll(mut self, axis: Axis, track: ScrollTrack) -> Self {
        self.axis = axis;
        self.scroll = Some(track);
        self
    }

    pub fn with_mouse(mut self, speed: Vec2) -> Self {
        self.mouse_speed = speed;
        self
    }

    pub fn with_opacity(mut self, track: ScrollTrack) -> Self {
        self.opacity = Some(track);
        self
    }

    pub fn with_blur(mut self, track: ScrollTrack) -> Self {
        self.blur = Some(track);
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Refresh every scroll track for new layout measurements.
    pub fn remeasure(&mut self, metrics: Option<ElementMetrics>) {
        for track in [&mut self.scroll, &mut self.opacity, &mut self.blur]
            .into_iter()
            .flatten()
        {
            track.remeasure(metrics);
        }
    }

    /// Record a viewport resize; the tracks are remeasured once the burst settles.
    pub fn notify_resize(&mut self, now_ms: f64) {
        self.resize.notify(now_ms);
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Remeasure with `measure()` if a resize burst has settled. Returns whether it did.
    pub fn poll_resize<F>(&mut self, now_ms: f64, measure: F) -> bool
    where
        F: FnOnce() -> Option<ElementMetrics>,
    {
        if !self.resize.poll(now_ms) {
            return false;
        }
        self.remeasure(measure());
        true
    }

    /// Unsmoothed translation for the given inputs.
    pub fn target(&self, inputs: &InputSnapshot) -> Vec2 {
        let mut t = project_mouse(inputs.pointer, inputs.viewport, self.mouse_speed);
        if let Some(track) = &self.scroll {
            let v = track.project(inputs.scroll_y);
            match self.axis {
                Axis::Vertical => t.y += v,
                Axis::Horizontal => t.x += v,
            }
        }
        t
    }

    pub fn update(&mut self, inputs: &InputSnapshot, dt_secs: f64) -> LayerOffset {
        let target = self.target(inputs);
        let translate = Vec2::new(
            self.spring_x.step(target.x, dt_secs),
            self.spring_y.step(target.y, dt_secs),
        );
        let opacity = self
            .opacity
            .map_or(1.0, |t| t.project(inputs.scroll_y).clamp(0.0, 1.0));
        let blur = self
            .blur
            .map_or(0.0, |t| t.project(inputs.scroll_y).max(0.0));
        LayerOffset {
            translate,
            opacity,
            blur,
        }
    }

    /// Whether both springs have reached `target(inputs)`.
    pub fn is_settled(&self, inputs: &InputSnapshot) -> bool {
        let t = self.target(inputs);
        self.spring_x.is_settled(t.x) && self.spring_y.is_settled(t.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/layer.rs"]
mod tests;
