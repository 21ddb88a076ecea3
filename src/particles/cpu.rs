use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use kurbo::Shape as _;

use crate::{
    foundation::core::{Affine, BezPath, Canvas, Point, Rgba8},
    foundation::error::{SiteError, SiteResult},
    particles::surface::ParticleSurface,
};

/// Expanded copies drawn per glow.
const GLOW_RINGS: u32 = 4;
const GLOW_PEAK_ALPHA: f32 = 0.3;

/// Software rasterizer backed by `vello_cpu`.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> SiteResult<Self> {
        let (width, height) = surface_dims(canvas)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Premultiplied RGBA8 pixels of the last presented frame.
    pub fn premultiplied_rgba8(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight-alpha RGBA8 copy of the last presented frame.
    pub fn rgba8(&self) -> Vec<u8> {
        let mut out = self.pixmap.data_as_u8_slice().to_vec();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
            }
        }
        out
    }

    pub fn encode_png(&self) -> SiteResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.canvas.width, self.canvas.height, self.rgba8())
            .ok_or_else(|| SiteError::render("pixel buffer does not match canvas size"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    #[tracing::instrument(skip(self), fields(width = self.canvas.width, height = self.canvas.height))]
    pub fn write_png(&self, path: &Path) -> SiteResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.rgba8(),
            self.canvas.width,
            self.canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    fn fill_with_alpha(&mut self, path: &BezPath, transform: Affine, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(transform));
        let layered = alpha < 1.0;
        if layered {
            self.ctx.push_opacity_layer(alpha);
        }
        self.ctx.fill_path(&bezpath_to_cpu(path));
        if layered {
            self.ctx.pop_layer();
        }
    }
}

impl ParticleSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn resize(&mut self, canvas: Canvas) -> SiteResult<()> {
        if canvas == self.canvas {
            return Ok(());
        }
        *self = Self::new(canvas)?;
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx.reset();
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8, alpha: f32) {
        self.set_color(color);
        self.fill_with_alpha(path, Affine::IDENTITY, alpha.clamp(0.0, 1.0));
    }

    fn glow_path(&mut self, path: &BezPath, color: Rgba8, blur: f64) {
        if !(blur.is_finite() && blur > 0.0) {
            return;
        }
        let bounds = path.bounding_box();
        let radius = (bounds.width().max(bounds.height()) / 2.0).max(0.5);
        let center = bounds.center();
        self.set_color(color);

        // Largest and faintest ring first so inner rings stack on top.
        for ring in (1..=GLOW_RINGS).rev() {
            let grow = blur * f64::from(ring) / f64::from(GLOW_RINGS);
            let scale = (radius + grow) / radius;
            let t = Affine::translate(center.to_vec2())
                * Affine::scale(scale)
                * Affine::translate(-center.to_vec2());
            let alpha = GLOW_PEAK_ALPHA / (ring as f32 + 1.0);
            self.fill_with_alpha(path, t, alpha);
        }
    }

    fn stroke_line(&mut self, a: Point, b: Point, color: Rgba8, alpha: f32, width: f64) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 || width <= 0.0 {
            return;
        }
        let mut line = vello_cpu::kurbo::BezPath::new();
        line.move_to(point_to_cpu(a));
        line.line_to(point_to_cpu(b));

        self.set_color(color);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        let layered = alpha < 1.0;
        if layered {
            self.ctx.push_opacity_layer(alpha);
        }
        self.ctx.stroke_path(&line);
        if layered {
            self.ctx.pop_layer();
        }
    }

    fn present(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }
}

fn surface_dims(canvas: Canvas) -> SiteResult<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(SiteError::render(format!(
            "surface must be non-empty, got {}x{}",
            canvas.width, canvas.height
        )));
    }
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| SiteError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| SiteError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/particles/cpu.rs"]
mod tests;
