use slimehop_core::events::PlatformId;

use crate::platforms::Platform;
use crate::player::PlayerState;

/// Extra reach past a platform's right edge for the horizontal landing gate.
///
/// The gate is `(x - width, x + width + 25)` on the player's center, not an
/// AABB overlap. Jump feel is tuned around this exact band.
pub const GATE_RIGHT_SLACK: f32 = 25.0;

/// How a single platform relates to this tick's vertical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Falling player crosses the platform top: snap onto it.
    Land,
    /// Rising player inside the gate: platforms never block from below.
    PassThrough,
    /// Outside the gate, or the trajectory does not cross the top surface.
    Miss,
}

/// Outcome of resolving one tick's vertical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    pub landed_on: Option<PlatformId>,
    pub hit_floor: bool,
}

impl Resolution {
    pub fn on_platform(&self) -> bool {
        self.landed_on.is_some()
    }
}

/// Whether the player's center lies in the platform's landing band.
pub fn in_horizontal_gate(center_x: f32, platform: &Platform) -> bool {
    center_x > platform.x - platform.width
        && center_x < platform.x + platform.width + GATE_RIGHT_SLACK
}

/// Classify one platform against the current position and tentative y.
pub fn classify(player: &PlayerState, tentative_y: f32, platform: &Platform) -> Contact {
    if !in_horizontal_gate(player.center_x(), platform) {
        return Contact::Miss;
    }
    let effective_height = player.effective_height();
    let current_bottom = player.y + effective_height;
    let next_bottom = tentative_y + effective_height;

    if player.velocity_y > 0.0
        && current_bottom <= platform.y
        && next_bottom > platform.y
        && tentative_y + player.scaled_offset() < platform.y
    {
        Contact::Land
    } else if player.velocity_y < 0.0 {
        Contact::PassThrough
    } else {
        Contact::Miss
    }
}

/// Commit the tentative vertical move, landing on the first matching platform
/// in collection order, otherwise falling through to the floor check.
pub fn resolve(
    player: &mut PlayerState,
    tentative_y: f32,
    platforms: &[Platform],
    floor_y: f32,
) -> Resolution {
    let mut resolution = Resolution::default();

    for platform in platforms {
        if classify(player, tentative_y, platform) == Contact::Land {
            player.settle(platform.y - player.effective_height());
            resolution.landed_on = Some(platform.id);
            break;
        }
    }

    if resolution.on_platform() {
        return resolution;
    }

    player.y = tentative_y;
    // Floor uses the full sprite height, padding included
    if player.y + player.height > floor_y {
        player.settle(floor_y - player.height);
        resolution.hit_floor = true;
    }
    resolution
}
