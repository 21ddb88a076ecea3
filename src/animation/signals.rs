//! Process-wide input signals shared by the decorative components.
//!
//! A single [`InputSignals`] publisher owns the values; components hold an [`InputReader`] and
//! only ever read the latest value. Publishing never blocks and works with zero readers.

use tokio::sync::watch;

use crate::foundation::core::{Point, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

pub struct InputSignals {
    scroll: watch::Sender<f64>,
    pointer: watch::Sender<Option<Point>>,
    viewport: watch::Sender<Viewport>,
    visibility: watch::Sender<Visibility>,
}

impl InputSignals {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scroll: watch::Sender::new(0.0),
            pointer: watch::Sender::new(None),
            viewport: watch::Sender::new(viewport),
            visibility: watch::Sender::new(Visibility::Visible),
        }
    }

    pub fn publish_scroll(&self, scroll_y: f64) {
        if scroll_y.is_finite() {
            self.scroll.send_replace(scroll_y.max(0.0));
        }
    }

    pub fn publish_pointer(&self, pointer: Option<Point>) {
        self.pointer.send_replace(pointer);
    }

    pub fn publish_viewport(&self, viewport: Viewport) {
        self.viewport.send_replace(viewport);
    }

    pub fn publish_visibility(&self, visibility: Visibility) {
        self.visibility.send_if_modified(|cur| {
            let changed = *cur != visibility;
            *cur = visibility;
            changed
        });
    }

    pub fn reader(&self) -> InputReader {
        InputReader {
            scroll: self.scroll.subscribe(),
            pointer: self.pointer.subscribe(),
            viewport: self.viewport.subscribe(),
            visibility: self.visibility.subscribe(),
        }
    }
}

/// Read-only view of the shared input signals.
#[derive(Clone, Debug)]
pub struct InputReader {
    scroll: watch::Receiver<f64>,
    pointer: watch::Receiver<Option<Point>>,
    viewport: watch::Receiver<Viewport>,
    visibility: watch::Receiver<Visibility>,
}

impl InputReader {
    pub fn scroll_y(&self) -> f64 {
        *self.scroll.borrow()
    }

    pub fn pointer(&self) -> Option<Point> {
        *self.pointer.borrow()
    }

    pub fn viewport(&self) -> Viewport {
        *self.viewport.borrow()
    }

    pub fn visibility(&self) -> Visibility {
        *self.visibility.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    /// Wait for the next visibility change. Returns `None` once the publisher is gone.
    pub async fn visibility_changed(&mut self) -> Option<Visibility> {
        self.visibility.changed().await.ok()?;
        Some(*self.visibility.borrow_and_update())
    }
}

/// Snapshot of the signals for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub scroll_y: f64,
    pub pointer: Option<Point>,
    pub viewport: Viewport,
}

impl From<&InputReader> for InputSnapshot {
    fn from(r: &InputReader) -> Self {
        Self {
            scroll_y: r.scroll_y(),
            pointer: r.pointer(),
            viewport: r.viewport(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/signals.rs"]
mod tests;
