use kurbo::Shape as _;

use crate::{
    foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8},
    foundation::error::SiteResult,
    particles::field::{Particle, ParticleColor, ParticleField, Shape},
};

const LINK_WIDTH: f64 = 0.3;
const SHAPE_TOLERANCE: f64 = 0.1;

/// Drawing target for a particle frame.
///
/// Paths are in canvas pixels. Colors are straight alpha; `alpha` multiplies the whole draw.
pub trait ParticleSurface {
    fn canvas(&self) -> Canvas;

    /// Match a new canvas size. Called before drawing into a resized field.
    fn resize(&mut self, canvas: Canvas) -> SiteResult<()>;

    fn clear(&mut self);

    fn fill_path(&mut self, path: &BezPath, color: Rgba8, alpha: f32);

    /// Soft halo around `path`, extending roughly `blur` pixels outward.
    fn glow_path(&mut self, path: &BezPath, color: Rgba8, blur: f64);

    fn stroke_line(&mut self, a: Point, b: Point, color: Rgba8, alpha: f32, width: f64);

    /// Commit everything drawn since the last [`ParticleSurface::clear`].
    fn present(&mut self) {}
}

/// Outline for a single particle, rotated about its center.
pub fn shape_path(p: &Particle) -> BezPath {
    let c = p.position;
    let half = p.size / 2.0;
    match p.shape {
        Shape::Circle => kurbo::Circle::new(c, half).to_path(SHAPE_TOLERANCE),
        Shape::Square => {
            let mut path = Rect::from_center_size(c, (p.size, p.size)).to_path(SHAPE_TOLERANCE);
            path.apply_affine(Affine::rotate_about(p.rotation, c));
            path
        }
        Shape::Triangle => {
            let mut path = BezPath::new();
            path.move_to((c.x, c.y - half));
            path.line_to((c.x + half, c.y + half));
            path.line_to((c.x - half, c.y + half));
            path.close_path();
            path.apply_affine(Affine::rotate_about(p.rotation, c));
            path
        }
    }
}

/// Draw one frame: links under everything, then every glow, then every shape.
pub fn draw_field<S: ParticleSurface + ?Sized>(field: &ParticleField, surface: &mut S) {
    surface.clear();

    let link_color = ParticleColor::Violet.rgba();
    for link in field.links() {
        surface.stroke_line(link.a, link.b, link_color, link.alpha, LINK_WIDTH);
    }

    let paths: Vec<(BezPath, &Particle)> =
        field.particles().iter().map(|p| (shape_path(p), p)).collect();
    let blur = field.config().glow_blur;
    if blur > 0.0 {
        for (path, p) in &paths {
            surface.glow_path(path, p.color.rgba(), blur);
        }
    }
    for (path, p) in &paths {
        surface.fill_path(path, p.color.rgba(), p.alpha);
    }

    surface.present();
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill {
        path: BezPath,
        color: Rgba8,
        alpha: f32,
    },
    Glow {
        path: BezPath,
        color: Rgba8,
        blur: f64,
    },
    Line {
        a: Point,
        b: Point,
        color: Rgba8,
        alpha: f32,
        width: f64,
    },
    Present,
}

/// Surface that keeps the commands of the current frame instead of rasterizing.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    commands: Vec<DrawCommand>,
    presented: u64,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
            presented: 0,
        }
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }
}

impl ParticleSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn resize(&mut self, canvas: Canvas) -> SiteResult<()> {
        self.canvas = canvas;
        Ok(())
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8, alpha: f32) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
            alpha,
        });
    }

    fn glow_path(&mut self, path: &BezPath, color: Rgba8, blur: f64) {
        self.commands.push(DrawCommand::Glow {
            path: path.clone(),
            color,
            blur,
        });
    }

    fn stroke_line(&mut self, a: Point, b: Point, color: Rgba8, alpha: f32, width: f64) {
        self.commands.push(DrawCommand::Line {
            a,
            b,
            color,
            alpha,
            width,
        });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
        self.presented += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/surface.rs"]
mod tests;
