use crate::{
    foundation::core::{Canvas, Fps, Point, Rgba8, Vec2},
    foundation::error::{SiteError, SiteResult},
    foundation::math::Rng64,
};

/// Simulation time unit for per-frame factors such as damping.
const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Triangle];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleColor {
    Cyan,
    Violet,
}

impl ParticleColor {
    pub const ALL: [ParticleColor; 2] = [ParticleColor::Cyan, ParticleColor::Violet];

    pub fn rgba(self) -> Rgba8 {
        match self {
            Self::Cyan => Rgba8::opaque(0x00, 0xbf, 0xff),
            Self::Violet => Rgba8::opaque(0x8a, 0x2b, 0xe2),
        }
    }
}

/// Tuning for a particle field. Speeds are in pixels per second.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub area_divisor: f64,
    pub max_particles: usize,
    pub size_range: [f64; 2],
    pub max_initial_speed: f64,
    pub rotation_speed_range: [f64; 2],
    pub alpha_range: [f64; 2],
    pub fps_cap: u32,
    pub glow_blur: f64,
    pub pointer_radius: f64,
    pub pointer_force: f64,
    /// Velocity multiplier applied once per 1/60 s of simulated time.
    pub damping: f64,
    pub max_speed: f64,
    pub link_distance: f64,
    pub link_alpha: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            area_divisor: 120_000.0,
            max_particles: 7,
            size_range: [4.0, 12.0],
            max_initial_speed: 30.0,
            rotation_speed_range: [-0.6, 0.6],
            alpha_range: [0.6, 0.9],
            fps_cap: 30,
            glow_blur: 12.0,
            pointer_radius: 100.0,
            pointer_force: 12.0,
            damping: 0.99,
            max_speed: 60.0,
            link_distance: 150.0,
            link_alpha: 0.1,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> SiteResult<()> {
        if !(self.area_divisor.is_finite() && self.area_divisor > 0.0) {
            return Err(SiteError::validation("area_divisor must be > 0"));
        }
        if !(self.size_range[0] > 0.0 && self.size_range[0] <= self.size_range[1]) {
            return Err(SiteError::validation(
                "size_range must be positive and ordered",
            ));
        }
        if self.rotation_speed_range[0] > self.rotation_speed_range[1] {
            return Err(SiteError::validation("rotation_speed_range must be ordered"));
        }
        if !(0.0..=1.0).contains(&self.alpha_range[0])
            || !(0.0..=1.0).contains(&self.alpha_range[1])
            || self.alpha_range[0] > self.alpha_range[1]
        {
            return Err(SiteError::validation(
                "alpha_range must be ordered within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(SiteError::validation("damping must be within [0, 1]"));
        }
        if self.max_initial_speed < 0.0 || self.max_speed < 0.0 {
            return Err(SiteError::validation("speeds must be >= 0"));
        }
        if self.link_distance < 0.0 || self.pointer_radius < 0.0 {
            return Err(SiteError::validation("distances must be >= 0"));
        }
        Fps::new(self.fps_cap, 1)?;
        Ok(())
    }

    pub fn fps(&self) -> SiteResult<Fps> {
        Fps::new(self.fps_cap, 1)
    }

    /// `clamp(floor(area / divisor), 0, max)`.
    pub fn particle_count(&self, canvas: Canvas) -> usize {
        let raw = (canvas.area() / self.area_divisor).floor();
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        (raw as usize).min(self.max_particles)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vec2,
    pub size: f64,
    pub color: ParticleColor,
    pub shape: Shape,
    /// Radians.
    pub rotation: f64,
    /// Radians per second.
    pub rotation_speed: f64,
    pub alpha: f32,
}

/// Generate a fresh particle set for `canvas`.
///
/// Positions are drawn from the central half of each axis so shapes start away from edges.
pub fn initialize(canvas: Canvas, cfg: &ParticleConfig, rng: &mut Rng64) -> Vec<Particle> {
    let count = cfg.particle_count(canvas);
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    (0..count)
        .map(|_| {
            let x = rng.range_f64(0.25 * w, 0.75 * w);
            let y = rng.range_f64(0.25 * h, 0.75 * h);
            let heading = rng.range_f64(0.0, std::f64::consts::TAU);
            let speed = rng.range_f64(0.0, cfg.max_initial_speed);
            Particle {
                position: Point::new(x, y),
                velocity: Vec2::from_angle(heading) * speed,
                size: rng.range_f64(cfg.size_range[0], cfg.size_range[1]),
                color: *rng.pick(&ParticleColor::ALL).unwrap_or(&ParticleColor::Cyan),
                shape: *rng.pick(&Shape::ALL).unwrap_or(&Shape::Circle),
                rotation: rng.range_f64(0.0, std::f64::consts::TAU),
                rotation_speed: rng.range_f64(cfg.rotation_speed_range[0], cfg.rotation_speed_range[1]),
                alpha: rng.range_f64(cfg.alpha_range[0], cfg.alpha_range[1]) as f32,
            }
        })
        .collect()
}

/// A line between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: Point,
    pub b: Point,
    pub alpha: f32,
}

/// Particle set bound to a canvas, advanced by [`ParticleField::tick`].
#[derive(Clone, Debug)]
pub struct ParticleField {
    canvas: Canvas,
    particles: Vec<Particle>,
    cfg: ParticleConfig,
    rng: Rng64,
}

impl ParticleField {
    #[tracing::instrument(skip(cfg, rng))]
    pub fn new(canvas: Canvas, cfg: ParticleConfig, mut rng: Rng64) -> SiteResult<Self> {
        cfg.validate()?;
        let particles = initialize(canvas, &cfg, &mut rng);
        tracing::debug!(count = particles.len(), "particle field initialized");
        Ok(Self {
            canvas,
            particles,
            cfg,
            rng,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.cfg
    }

    /// Replace the whole set for a new canvas size; old particles are discarded.
    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.particles = initialize(canvas, &self.cfg, &mut self.rng);
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            count = self.particles.len(),
            "particle field regenerated"
        );
    }

    /// Advance the simulation by `dt_secs`, optionally pushing particles away from `pointer`.
    pub fn tick(&mut self, dt_secs: f64, pointer: Option<Point>) {
        if !dt_secs.is_finite() || dt_secs <= 0.0 {
            return;
        }
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let frames = dt_secs / REFERENCE_FRAME_SECS;
        let damping = self.cfg.damping.powf(frames);

        for p in &mut self.particles {
            p.position += p.velocity * dt_secs;
            p.rotation = (p.rotation + p.rotation_speed * dt_secs) % std::f64::consts::TAU;

            if let Some(cursor) = pointer {
                let away = p.position - cursor;
                let dist = away.hypot();
                if dist > 1e-9 && dist < self.cfg.pointer_radius {
                    let strength = (1.0 - dist / self.cfg.pointer_radius) * self.cfg.pointer_force;
                    p.velocity += away / dist * strength * frames;
                }
            }

            p.velocity *= damping;
            let speed = p.velocity.hypot();
            if speed > self.cfg.max_speed {
                p.velocity *= self.cfg.max_speed / speed;
            }

            reflect_axis(&mut p.position.x, &mut p.velocity.x, w);
            reflect_axis(&mut p.position.y, &mut p.velocity.y, h);
        }
    }

    /// Pairs closer than `link_distance`, faded by distance.
    pub fn links(&self) -> Vec<Link> {
        let max = self.cfg.link_distance;
        let mut out = Vec::new();
        if max <= 0.0 {
            return out;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let d = (a.position - b.position).hypot();
                if d < max {
                    out.push(Link {
                        a: a.position,
                        b: b.position,
                        alpha: self.cfg.link_alpha * (1.0 - (d / max) as f32),
                    });
                }
            }
        }
        out
    }
}

// Elastic bounce: mirror the overshoot back inside and flip the velocity component.
fn reflect_axis(pos: &mut f64, vel: &mut f64, max: f64) {
    if max <= 0.0 {
        *pos = 0.0;
        return;
    }
    if *pos < 0.0 {
        *pos = (-*pos).min(max);
        *vel = vel.abs();
    } else if *pos > max {
        *pos = (2.0 * max - *pos).max(0.0);
        *vel = -vel.abs();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/field.rs"]
mod tests;
