use crate::{
    animation::frame::{AnimationLoop, FrameOutcome, FrameTask},
    animation::signals::InputReader,
    foundation::core::{Canvas, Point, Rect, Viewport},
    foundation::error::SiteResult,
    foundation::math::Rng64,
    particles::field::{ParticleConfig, ParticleField},
    particles::surface::{ParticleSurface, draw_field},
};

/// How the canvas is sized relative to the page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CanvasFit {
    /// Covers the viewport and follows its size.
    #[default]
    Viewport,
    /// Bounded by a container whose top-left corner sits at `origin` in viewport coordinates.
    /// Sized only through [`ParticleScene::place_in_container`].
    Container { origin: Point },
}

/// Particle field paired with the surface it draws into.
pub struct ParticleScene<S> {
    field: ParticleField,
    surface: S,
    pointer: Option<Point>,
    input: Option<InputReader>,
    fit: CanvasFit,
}

impl<S: ParticleSurface> ParticleScene<S> {
    pub fn new(surface: S, cfg: ParticleConfig, rng: Rng64) -> SiteResult<Self> {
        let field = ParticleField::new(surface.canvas(), cfg, rng)?;
        Ok(Self {
            field,
            surface,
            pointer: None,
            input: None,
            fit: CanvasFit::Viewport,
        })
    }

    pub fn with_fit(mut self, fit: CanvasFit) -> Self {
        self.fit = fit;
        self
    }

    pub fn fit(&self) -> CanvasFit {
        self.fit
    }

    /// Bind the canvas to a container laid out at `bounds`. Later calls follow container resizes;
    /// a zero-area container keeps the current field.
    pub fn place_in_container(&mut self, bounds: Rect) {
        self.fit = CanvasFit::Container {
            origin: bounds.origin(),
        };
        let canvas = Canvas::from_viewport(Viewport::new(bounds.width(), bounds.height()));
        if canvas.area() > 0.0 {
            self.resize(canvas);
        }
    }

    /// Follow pointer and viewport from shared signals instead of [`ParticleScene::set_pointer`].
    pub fn with_input(mut self, input: InputReader) -> Self {
        self.input = Some(input);
        self
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Pointer in canvas coordinates as of the last frame.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Resize both the surface and the field. A failed surface resize keeps the old size.
    pub fn resize(&mut self, canvas: Canvas) {
        if canvas == self.field.canvas() {
            return;
        }
        match self.surface.resize(canvas) {
            Ok(()) => self.field.resize(canvas),
            Err(err) => tracing::warn!(error = %err, "particle surface resize failed"),
        }
    }

    fn sync_input(&mut self) {
        let Some(input) = &self.input else {
            return;
        };
        let pointer = input.pointer();
        match self.fit {
            CanvasFit::Viewport => {
                let canvas = Canvas::from_viewport(input.viewport());
                self.pointer = pointer;
                if canvas.area() > 0.0 {
                    self.resize(canvas);
                }
            }
            CanvasFit::Container { origin } => {
                self.pointer = pointer.map(|p| p - origin.to_vec2());
            }
        }
    }
}

impl<S: ParticleSurface> FrameTask for ParticleScene<S> {
    fn frame(&mut self, dt_secs: f64) {
        self.sync_input();
        self.field.tick(dt_secs, self.pointer);
        draw_field(&self.field, &mut self.surface);
    }
}

pub type ParticleLoop<S> = AnimationLoop<ParticleScene<S>>;

impl<S: ParticleSurface> AnimationLoop<ParticleScene<S>> {
    /// Build a running loop, or `None` when the host has no drawing surface.
    #[tracing::instrument(skip_all)]
    pub fn start(surface: Option<S>, cfg: ParticleConfig, rng: Rng64) -> SiteResult<Option<Self>> {
        let Some(surface) = surface else {
            tracing::debug!("no drawing surface; particle loop not started");
            return Ok(None);
        };
        let fps = cfg.fps()?;
        let scene = ParticleScene::new(surface, cfg, rng)?;
        Ok(Some(AnimationLoop::new(scene, fps)))
    }

    /// Pull page visibility from the attached signals, then handle one display refresh.
    pub fn refresh(&mut self, now_ms: f64) -> FrameOutcome {
        if let Some(visible) = self.task().input.as_ref().map(InputReader::is_visible) {
            self.set_visible(visible);
        }
        self.on_refresh(now_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/driver.rs"]
mod tests;
