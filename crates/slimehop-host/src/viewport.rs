use slimehop_core::bounds::{BoundsProvider, WorldBounds};

/// The host's window. Resizes land here and are read once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: WorldBounds,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: WorldBounds::new(width, height),
        }
    }

    /// Apply a resize. Degenerate sizes (minimized window, NaN) keep the
    /// previous bounds. Returns whether the bounds changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let next = WorldBounds::new(width, height);
        if !next.is_valid() {
            tracing::warn!(width, height, "Ignoring degenerate viewport size");
            return false;
        }
        if next == self.bounds {
            return false;
        }
        tracing::debug!(width, height, "Viewport resized");
        self.bounds = next;
        true
    }
}

impl BoundsProvider for Viewport {
    fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}
