use crate::config::PhysicsConfig;
use crate::player::PlayerState;

/// Result of a single jump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Grounded jump: full `jump_force`.
    First,
    /// Airborne second jump: `jump_force * double_jump_factor`.
    Double,
    /// Airborne with the double jump already spent (or disabled).
    Ignored,
}

/// Vertical velocity owner: gravity integration and jump admission.
#[derive(Debug, Clone)]
pub struct JumpController {
    gravity: f32,
    jump_force: f32,
    double_jump_factor: f32,
    double_jump_enabled: bool,
}

impl JumpController {
    pub fn new(physics: &PhysicsConfig, double_jump_enabled: bool) -> Self {
        Self {
            gravity: physics.gravity,
            jump_force: physics.jump_force,
            double_jump_factor: physics.double_jump_factor,
            double_jump_enabled,
        }
    }

    /// Admit or ignore one jump-key transition.
    pub fn request(&self, player: &mut PlayerState) -> JumpOutcome {
        if !player.is_jumping {
            player.is_jumping = true;
            player.can_double_jump = self.double_jump_enabled;
            player.velocity_y = self.jump_force;
            JumpOutcome::First
        } else if player.can_double_jump {
            player.can_double_jump = false;
            player.velocity_y = self.jump_force * self.double_jump_factor;
            JumpOutcome::Double
        } else {
            JumpOutcome::Ignored
        }
    }

    /// Apply one tick of gravity and return the tentative y. Position is not committed.
    pub fn integrate(&self, player: &mut PlayerState) -> f32 {
        player.velocity_y += self.gravity;
        player.y + player.velocity_y
    }
}
