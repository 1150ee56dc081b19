use serde::{Deserialize, Serialize};

use slimehop_core::texture::TextureRef;

use crate::animation::AnimationClip;
use crate::platforms::Platform;
use crate::player::Facing;

/// Player placement for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub airborne: bool,
}

/// Which sprite-sheet cell to draw for the player this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipFrame {
    pub clip: AnimationClip,
    pub sheet: TextureRef,
    pub row: u32,
    pub column: u32,
    pub playing: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub tick: u64,
    pub player: PlayerView,
    pub frame: ClipFrame,
    pub platforms: Vec<Platform>,
    pub score: u32,
}

impl SceneSnapshot {
    /// MessagePack encoding for the render bridge.
    pub fn encode(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(bytes)
    }
}
