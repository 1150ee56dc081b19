use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::player::Facing;

/// Clip family: each is parameterized by facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipKind {
    Walk,
    Jump,
}

/// The four concrete clips the renderer can be asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationClip {
    WalkLeft,
    WalkRight,
    JumpLeft,
    JumpRight,
}

impl AnimationClip {
    pub fn from_parts(kind: ClipKind, facing: Facing) -> Self {
        match (kind, facing) {
            (ClipKind::Walk, Facing::Left) => AnimationClip::WalkLeft,
            (ClipKind::Walk, Facing::Right) => AnimationClip::WalkRight,
            (ClipKind::Jump, Facing::Left) => AnimationClip::JumpLeft,
            (ClipKind::Jump, Facing::Right) => AnimationClip::JumpRight,
        }
    }

    pub fn kind(self) -> ClipKind {
        match self {
            AnimationClip::WalkLeft | AnimationClip::WalkRight => ClipKind::Walk,
            AnimationClip::JumpLeft | AnimationClip::JumpRight => ClipKind::Jump,
        }
    }
}

/// Selects between walk/jump clips by facing and owns the playback cursor.
///
/// State is exactly (kind, facing, playing) plus the cursor. The resting
/// sub-state is frame 0 with playback stopped.
#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    kind: ClipKind,
    facing: Facing,
    playing: bool,
    cursor: f32,
    config: AnimationConfig,
}

impl AnimationStateMachine {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            kind: ClipKind::Walk,
            facing: Facing::Right,
            playing: true,
            cursor: 0.0,
            config: config.clone(),
        }
    }

    /// Request a clip. Returns true when playback was restarted from frame 0.
    ///
    /// Re-selecting the active pair is a no-op, so a resting machine stays stopped.
    pub fn select(&mut self, kind: ClipKind, facing: Facing) -> bool {
        if self.kind == kind && self.facing == facing {
            return false;
        }
        self.kind = kind;
        self.facing = facing;
        self.cursor = 0.0;
        self.playing = true;
        true
    }

    /// Jump to frame 0 and stop.
    pub fn reset(&mut self) {
        self.cursor = 0.0;
        self.playing = false;
    }

    /// Move the cursor forward one tick's worth of frames, looping the clip.
    pub fn advance(&mut self) {
        if !self.playing {
            return;
        }
        let frames = self.config.frames_per_clip as f32;
        self.cursor = (self.cursor + self.config.speed).rem_euclid(frames);
    }

    pub fn clip(&self) -> AnimationClip {
        AnimationClip::from_parts(self.kind, self.facing)
    }

    pub fn kind(&self) -> ClipKind {
        self.kind
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_resting(&self) -> bool {
        !self.playing && self.frame() == 0
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Whole frame index within the active clip.
    pub fn frame(&self) -> u32 {
        (self.cursor.floor() as u32).min(self.config.frames_per_clip.saturating_sub(1))
    }

    /// Sprite-sheet row holding the active clip's frames.
    pub fn sheet_row(&self) -> u32 {
        match self.clip() {
            AnimationClip::WalkLeft | AnimationClip::WalkRight => self.config.walk_row,
            AnimationClip::JumpLeft => self.config.jump_left_row,
            AnimationClip::JumpRight => self.config.jump_right_row,
        }
    }
}
