use serde::{Deserialize, Serialize};

/// Identifier of a platform, unique for the lifetime of a scene.
pub type PlatformId = u32;

/// Events emitted by a single tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A queued jump request was admitted.
    Jumped { double: bool },
    /// The falling player settled on top of a platform.
    Landed { platform_id: PlatformId },
    /// The player was clamped to the world floor.
    HitFloor,
    /// Respawn mode: a landed-on platform was replaced.
    PlatformRespawned {
        removed: PlatformId,
        added: PlatformId,
    },
    /// Scroll mode: a platform left the screen and was moved back to the right edge.
    PlatformWrapped { platform_id: PlatformId },
    ScoreUpdate { score: u32 },
}
