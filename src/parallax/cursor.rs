use crate::{
    animation::spring::{Spring, SpringValue},
    foundation::core::{Point, Viewport},
};

/// The cursor box is drawn from its top-left corner, so the target is shifted by half the default size.
pub const CURSOR_OFFSET: f64 = 16.0;
pub const INACTIVITY_HIDE_MS: f64 = 3000.0;
/// Narrower viewports are treated as touch devices and get no custom cursor.
pub const MIN_VIEWPORT_WIDTH: f64 = 768.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub spring: Spring,
    pub offset: f64,
    pub inactivity_hide_ms: f64,
    pub min_viewport_width: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            spring: Spring::new(300.0, 25.0),
            offset: CURSOR_OFFSET,
            inactivity_hide_ms: INACTIVITY_HIDE_MS,
            min_viewport_width: MIN_VIEWPORT_WIDTH,
        }
    }
}

/// What lies under the pointer, as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverKind {
    #[default]
    Other,
    Text,
    Interactive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorVariant {
    #[default]
    Default,
    Text,
    Button,
}

impl CursorVariant {
    pub fn for_hover(kind: HoverKind) -> Self {
        match kind {
            HoverKind::Other => Self::Default,
            HoverKind::Text => Self::Text,
            HoverKind::Interactive => Self::Button,
        }
    }

    /// Diameter in pixels.
    pub fn size(self) -> f64 {
        match self {
            Self::Default => 32.0,
            Self::Text => 80.0,
            Self::Button => 64.0,
        }
    }

    /// Fill opacity; the default variant is an outline only.
    pub fn fill_opacity(self) -> f64 {
        match self {
            Self::Default => 0.0,
            Self::Text => 0.1,
            Self::Button => 0.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CursorFrame {
    pub position: Point,
    pub variant: CursorVariant,
    pub size: f64,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct CursorFollower {
    cfg: CursorConfig,
    x: SpringValue,
    y: SpringValue,
    target: Point,
    variant: CursorVariant,
    visible: bool,
    last_move_ms: Option<f64>,
    enabled: bool,
}

impl CursorFollower {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_config(CursorConfig::default(), viewport)
    }

    pub fn with_config(cfg: CursorConfig, viewport: Viewport) -> Self {
        // Parked off-screen until the first pointer event.
        let park = -100.0;
        Self {
            x: SpringValue::new(cfg.spring, park),
            y: SpringValue::new(cfg.spring, park),
            target: Point::new(park, park),
            variant: CursorVariant::Default,
            visible: false,
            last_move_ms: None,
            enabled: viewport.width >= cfg.min_viewport_width,
            cfg,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.enabled = viewport.width >= self.cfg.min_viewport_width;
    }

    pub fn pointer_moved(&mut self, pointer: Point, now_ms: f64) {
        self.target = Point::new(pointer.x - self.cfg.offset, pointer.y - self.cfg.offset);
        self.visible = true;
        self.last_move_ms = Some(now_ms);
    }

    pub fn pointer_left(&mut self) {
        self.visible = false;
    }

    pub fn pointer_entered(&mut self, now_ms: f64) {
        self.visible = true;
        self.last_move_ms = Some(now_ms);
    }

    pub fn hover(&mut self, kind: HoverKind) {
        self.variant = CursorVariant::for_hover(kind);
    }

    pub fn variant(&self) -> CursorVariant {
        self.variant
    }

    /// Advance the follow springs. Returns `None` while disabled.
    pub fn update(&mut self, now_ms: f64, dt_secs: f64) -> Option<CursorFrame> {
        if !self.enabled {
            return None;
        }
        if let Some(t) = self.last_move_ms
            && now_ms - t >= self.cfg.inactivity_hide_ms
        {
            self.visible = false;
        }
        let position = Point::new(
            self.x.step(self.target.x, dt_secs),
            self.y.step(self.target.y, dt_secs),
        );
        Some(CursorFrame {
            position,
            variant: self.variant,
            size: self.variant.size(),
            visible: self.visible,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/cursor.rs"]
mod tests;
