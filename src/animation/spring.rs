//! Damped spring smoothing for pointer- and scroll-driven values.
//!
//! Integration uses semi-implicit Euler with a fixed substep, so the result depends only on the
//! total `dt` and stays stable at stiffness values used by UI springs (up to a few thousand).

const SUBSTEP_SECS: f64 = 1.0 / 240.0;
// One second of substeps; larger gaps snap to the target instead of replaying the backlog.
const MAX_SUBSTEPS: u32 = 240;

/// Physical spring parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Spring {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    /// Spring with the damping ratio fixed at 1 (fastest approach without overshoot).
    pub fn critically_damped(stiffness: f64, mass: f64) -> Self {
        let k = stiffness.max(0.0);
        let m = mass.max(1e-6);
        Self {
            stiffness: k,
            damping: 2.0 * (k * m).sqrt(),
            mass: m,
        }
    }

    pub fn damping_ratio(self) -> f64 {
        let denom = 2.0 * (self.stiffness.max(0.0) * self.mass.max(1e-6)).sqrt();
        if denom == 0.0 {
            return f64::INFINITY;
        }
        self.damping / denom
    }
}

/// A value chasing a target through a [`Spring`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringValue {
    pub spring: Spring,
    pub value: f64,
    pub velocity: f64,
    rest_delta: f64,
    rest_speed: f64,
}

impl SpringValue {
    pub fn new(spring: Spring, initial: f64) -> Self {
        Self {
            spring,
            value: initial,
            velocity: 0.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    /// Advance by `dt_secs` toward `target` and return the new value.
    pub fn step(&mut self, target: f64, dt_secs: f64) -> f64 {
        if !target.is_finite() || !dt_secs.is_finite() || dt_secs <= 0.0 {
            return self.value;
        }

        let steps = (dt_secs / SUBSTEP_SECS).ceil() as u64;
        if steps > u64::from(MAX_SUBSTEPS) {
            self.snap(target);
            return self.value;
        }

        let h = dt_secs / steps as f64;
        let Spring {
            stiffness,
            damping,
            mass,
        } = self.spring;
        let m = mass.max(1e-6);
        for _ in 0..steps {
            let accel = (-stiffness * (self.value - target) - damping * self.velocity) / m;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }

        if self.is_settled(target) {
            self.snap(target);
        }
        self.value
    }

    pub fn is_settled(&self, target: f64) -> bool {
        (self.value - target).abs() < self.rest_delta && self.velocity.abs() < self.rest_speed
    }

    pub fn snap(&mut self, target: f64) {
        self.value = target;
        self.velocity = 0.0;
    }
}

/// First-order exponential smoothing with time constant `tau_secs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpSmoothing {
    pub tau_secs: f64,
    pub value: f64,
}

impl ExpSmoothing {
    pub fn new(tau_secs: f64, initial: f64) -> Self {
        Self {
            tau_secs,
            value: initial,
        }
    }

    pub fn step(&mut self, target: f64, dt_secs: f64) -> f64 {
        if !target.is_finite() || !dt_secs.is_finite() || dt_secs <= 0.0 {
            return self.value;
        }
        if self.tau_secs <= 0.0 {
            self.value = target;
            return self.value;
        }
        let alpha = 1.0 - (-dt_secs / self.tau_secs).exp();
        self.value += (target - self.value) * alpha;
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
