//! Display-refresh driven frame loop with a rate ceiling.
//!
//! The host calls [`AnimationLoop::on_refresh`] on every display refresh. The payload only runs
//! when the throttle interval has elapsed and the page is visible; skipped refreshes are dropped,
//! never replayed.

use crate::foundation::core::Fps;

/// Executed frames never report more than this many intervals of elapsed time.
const MAX_DT_INTERVALS: f64 = 4.0;

/// Decides which display refreshes execute the frame payload.
#[derive(Clone, Copy, Debug)]
pub struct FrameThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl FrameThrottle {
    pub fn new(fps: Fps) -> Self {
        Self {
            interval_ms: fps.frame_interval_ms(),
            last_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Return the elapsed milliseconds to simulate if this refresh should run.
    ///
    /// The first call after construction or [`FrameThrottle::reset`] runs with one interval.
    pub fn ready(&mut self, now_ms: f64) -> Option<f64> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return Some(self.interval_ms);
        };

        let elapsed = now_ms - last;
        if elapsed < 0.0 {
            // Clock went backwards; resynchronize without running.
            self.last_ms = Some(now_ms);
            return None;
        }
        if elapsed < self.interval_ms {
            return None;
        }

        // Keep the cadence aligned to the interval grid instead of drifting with refresh jitter.
        self.last_ms = Some(now_ms - (elapsed % self.interval_ms));
        Some(elapsed.min(self.interval_ms * MAX_DT_INTERVALS))
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Work executed on each admitted frame.
pub trait FrameTask {
    /// Advance state by `dt_secs` and draw.
    fn frame(&mut self, dt_secs: f64);
}

/// Result of one display refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// The payload ran with this many seconds of simulated time.
    Ran { dt_secs: f64 },
    /// Too early since the last executed frame.
    Throttled,
    /// Page hidden; state untouched.
    Hidden,
    /// Loop stopped; the host should stop rescheduling.
    Stopped,
}

impl FrameOutcome {
    /// Whether the host should request another refresh callback.
    pub fn reschedule(self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

pub struct AnimationLoop<T> {
    task: T,
    throttle: FrameThrottle,
    visible: bool,
    stopped: bool,
    frames_run: u64,
}

impl<T: FrameTask> AnimationLoop<T> {
    pub fn new(task: T, fps: Fps) -> Self {
        Self {
            task,
            throttle: FrameThrottle::new(fps),
            visible: true,
            stopped: false,
            frames_run: 0,
        }
    }

    pub fn on_refresh(&mut self, now_ms: f64) -> FrameOutcome {
        if self.stopped {
            return FrameOutcome::Stopped;
        }
        if !self.visible {
            return FrameOutcome::Hidden;
        }
        match self.throttle.ready(now_ms) {
            Some(dt_ms) => {
                let dt_secs = dt_ms / 1000.0;
                self.task.frame(dt_secs);
                self.frames_run += 1;
                FrameOutcome::Ran { dt_secs }
            }
            None => FrameOutcome::Throttled,
        }
    }

    /// Update page visibility. Becoming visible restarts the throttle so no backlog is simulated.
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            self.throttle.reset();
        }
        if self.visible != visible {
            tracing::debug!(visible, "animation loop visibility changed");
        }
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    pub fn into_task(self) -> T {
        self.task
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/frame.rs"]
mod tests;
