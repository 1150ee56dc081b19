use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;

/// Horizontal facing of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// The single player body. `x`/`y` is the top-left of the render box.
///
/// Invariants: `can_double_jump` implies `is_jumping`; `is_jumping` is false
/// whenever the player rests on a platform or the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub scale: f32,
    /// Unscaled transparent padding at the top of the sprite.
    pub hitbox_offset_y: f32,
    /// Scaled render box size.
    pub width: f32,
    pub height: f32,
    pub is_jumping: bool,
    pub can_double_jump: bool,
    pub facing: Facing,
    pub moving: bool,
}

impl PlayerState {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            x: config.spawn_x,
            y: config.spawn_y,
            velocity_y: 0.0,
            scale: config.scale,
            hitbox_offset_y: config.hitbox_offset_y,
            width: config.frame_width * config.scale,
            height: config.frame_height * config.scale,
            is_jumping: false,
            can_double_jump: false,
            facing: Facing::Right,
            moving: false,
        }
    }

    /// Scaled top padding excluded from collision.
    pub fn scaled_offset(&self) -> f32 {
        self.hitbox_offset_y * self.scale
    }

    /// Sprite height minus the scaled top padding.
    pub fn effective_height(&self) -> f32 {
        self.height - self.scaled_offset()
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_jumping
    }

    /// Come to rest on a surface: zero velocity and clear both jump flags.
    pub fn settle(&mut self, y: f32) {
        self.y = y;
        self.velocity_y = 0.0;
        self.is_jumping = false;
        self.can_double_jump = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_matches_scaled_sprite() {
        let p = PlayerState::new(&PlayerConfig::default());
        assert_eq!(p.width, 192.0);
        assert_eq!(p.height, 192.0);
        assert_eq!(p.scaled_offset(), 69.0);
        assert_eq!(p.effective_height(), 123.0);
        assert_eq!(p.center_x(), 196.0);
    }

    #[test]
    fn spawns_grounded_facing_right() {
        let p = PlayerState::new(&PlayerConfig::default());
        assert!(p.is_grounded());
        assert!(!p.can_double_jump);
        assert_eq!(p.facing, Facing::Right);
    }

    #[test]
    fn settle_clears_jump_flags() {
        let mut p = PlayerState::new(&PlayerConfig::default());
        p.is_jumping = true;
        p.can_double_jump = true;
        p.velocity_y = 4.5;
        p.settle(377.0);
        assert_eq!(p.y, 377.0);
        assert_eq!(p.velocity_y, 0.0);
        assert!(p.is_grounded());
        assert!(!p.can_double_jump);
    }
}
