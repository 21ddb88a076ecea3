use crate::foundation::error::{SiteError, SiteResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Layout viewport in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return `true` when either dimension is zero, negative or non-finite.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Drawing surface dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel area as `f64` so callers can divide without overflow concerns.
    pub fn area(self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Canvas sized to cover a viewport, rounding each side down to whole pixels.
    pub fn from_viewport(vp: Viewport) -> Self {
        fn px(v: f64) -> u32 {
            if v.is_finite() && v > 0.0 {
                v.floor().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        Self {
            width: px(vp.width),
            height: px(vp.height),
        }
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SiteResult<Self> {
        if den == 0 {
            return Err(SiteError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SiteError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Minimum spacing between executed frames, in milliseconds.
    pub fn frame_interval_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> SiteResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| SiteError::validation(format!("color '{s}' must start with '#'")))?;
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| SiteError::validation(format!("invalid color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(SiteError::validation(format!("invalid color '{s}'"))),
        }
    }

    /// Scale alpha by `factor` (clamped to `[0, 1]`).
    pub fn with_alpha(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            a: (f32::from(self.a) * f).round() as u8,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
