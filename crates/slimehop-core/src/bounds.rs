use serde::{Deserialize, Serialize};

/// Current size of the visible world. The floor is the bottom edge (`y = height`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn floor_y(&self) -> f32 {
        self.height
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Supplies the world size. Read once per tick by the host.
pub trait BoundsProvider {
    fn bounds(&self) -> WorldBounds;
}

impl BoundsProvider for WorldBounds {
    fn bounds(&self) -> WorldBounds {
        *self
    }
}
