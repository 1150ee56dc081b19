use serde::{Deserialize, Serialize};

use slimehop_core::bounds::WorldBounds;
use slimehop_core::error::SetupError;

/// Gravity added to vertical velocity every tick (px/tick^2, downward is positive).
pub const GRAVITY: f32 = 0.5;
/// Vertical velocity set by a grounded jump (negative is upward).
pub const JUMP_FORCE: f32 = -15.0;
/// Multiplier applied to `JUMP_FORCE` for the airborne second jump.
pub const DOUBLE_JUMP_FACTOR: f32 = 0.8;
/// Horizontal move speed while a direction key is held (px/tick).
pub const MOVE_SPEED: f32 = 5.0;
/// Platform scroll speed in scroll mode (px/tick).
pub const SCROLL_SPEED: f32 = 7.0;
/// Uniform sprite scale.
pub const PLAYER_SCALE: f32 = 3.0;
/// Unscaled sprite frame size.
pub const FRAME_SIZE: f32 = 64.0;
/// Transparent rows at the top of each frame, unscaled.
pub const HITBOX_OFFSET_Y: f32 = 23.0;
/// Platform tile size.
pub const PLATFORM_SIZE: f32 = 32.0;
/// Platforms alive at any time.
pub const PLATFORM_COUNT: usize = 15;

/// Tunable physics constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_force: f32,
    pub double_jump_factor: f32,
    pub move_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            double_jump_factor: DOUBLE_JUMP_FACTOR,
            move_speed: MOVE_SPEED,
        }
    }
}

/// Player spawn point and sprite geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub scale: f32,
    pub frame_width: f32,
    pub frame_height: f32,
    /// Transparent padding at the top of the sprite, in unscaled pixels.
    pub hitbox_offset_y: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_x: 100.0,
            spawn_y: 300.0,
            scale: PLAYER_SCALE,
            frame_width: FRAME_SIZE,
            frame_height: FRAME_SIZE,
            hitbox_offset_y: HITBOX_OFFSET_Y,
        }
    }
}

/// Platform geometry and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub scroll_speed: f32,
    /// Respawned/wrapped platforms never land closer than this to the top edge.
    pub spawn_margin_top: f32,
    /// Respawned/wrapped platforms never land closer than this to the bottom edge.
    pub spawn_margin_bottom: f32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            count: PLATFORM_COUNT,
            width: PLATFORM_SIZE,
            height: PLATFORM_SIZE,
            scroll_speed: SCROLL_SPEED,
            spawn_margin_top: 50.0,
            spawn_margin_bottom: 50.0,
        }
    }
}

/// Sprite-sheet layout and playback speed for the player clips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames advanced per tick while playing.
    pub speed: f32,
    pub frames_per_clip: u32,
    pub walk_row: u32,
    pub jump_right_row: u32,
    pub jump_left_row: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: 0.2,
            frames_per_clip: 8,
            walk_row: 0,
            jump_right_row: 3,
            jump_left_row: 2,
        }
    }
}

/// Asset names handed to the texture factory at setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub walk_sheet: String,
    pub jump_sheet: String,
    pub platform_palette: Vec<String>,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            walk_sheet: "assets/Slime1/Walk/Slime1_Walk_body.png".to_string(),
            jump_sheet: "assets/Slime1/Run/Slime1_Run_body.png".to_string(),
            platform_palette: vec!["assets/Tiles&Objects/1 Tiles/Tile_01.png".to_string()],
        }
    }
}

/// How platforms live and die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformMode {
    /// Platforms slide left and wrap to the right edge.
    Scroll,
    /// Platforms stay put; landing on one scores a point and replaces it.
    Respawn,
}

/// Top-level scene configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub platforms: PlatformConfig,
    pub animation: AnimationConfig,
    pub textures: TextureConfig,
    pub double_jump_enabled: bool,
    pub platform_mode: PlatformMode,
    /// Fixed RNG seed for reproducible platform placement. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub tick_rate_hz: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::scroll_variant()
    }
}

impl SceneConfig {
    /// Endless runner: platforms scroll past, no scoring.
    pub fn scroll_variant() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            platforms: PlatformConfig::default(),
            animation: AnimationConfig::default(),
            textures: TextureConfig::default(),
            double_jump_enabled: true,
            platform_mode: PlatformMode::Scroll,
            seed: None,
            tick_rate_hz: 60.0,
        }
    }

    /// Collectible platforms: each landing scores and respawns the platform.
    pub fn respawn_variant() -> Self {
        let mut config = Self::scroll_variant();
        config.platform_mode = PlatformMode::Respawn;
        config.textures.platform_palette = (1..=3)
            .map(|i| format!("assets/Tiles&Objects/2 Objects/Object_{i:02}.png"))
            .collect();
        config
    }

    /// Load config from the TOML file named by `SLIMEHOP_CONFIG`, falling back to
    /// `config/slimehop.toml`, then to defaults.
    pub fn load() -> Self {
        let path = std::env::var("SLIMEHOP_CONFIG")
            .unwrap_or_else(|_| "config/slimehop.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SetupError> {
        toml::from_str::<Self>(content).map_err(|e| SetupError::ConfigParse(e.to_string()))
    }

    /// Reject values no tick could make sense of.
    pub fn validate(&self) -> Result<(), SetupError> {
        let p = &self.physics;
        positive("physics.gravity", p.gravity)?;
        if !p.jump_force.is_finite() || p.jump_force >= 0.0 {
            return Err(SetupError::invalid(
                "physics.jump_force",
                "must be finite and negative (upward)",
            ));
        }
        positive("physics.double_jump_factor", p.double_jump_factor)?;
        non_negative("physics.move_speed", p.move_speed)?;

        let pl = &self.player;
        finite("player.spawn_x", pl.spawn_x)?;
        finite("player.spawn_y", pl.spawn_y)?;
        positive("player.scale", pl.scale)?;
        positive("player.frame_width", pl.frame_width)?;
        positive("player.frame_height", pl.frame_height)?;
        non_negative("player.hitbox_offset_y", pl.hitbox_offset_y)?;
        if pl.hitbox_offset_y >= pl.frame_height {
            return Err(SetupError::invalid(
                "player.hitbox_offset_y",
                "padding must leave part of the sprite collidable",
            ));
        }

        let pf = &self.platforms;
        positive("platforms.width", pf.width)?;
        positive("platforms.height", pf.height)?;
        non_negative("platforms.scroll_speed", pf.scroll_speed)?;
        non_negative("platforms.spawn_margin_top", pf.spawn_margin_top)?;
        non_negative("platforms.spawn_margin_bottom", pf.spawn_margin_bottom)?;

        non_negative("animation.speed", self.animation.speed)?;
        if self.animation.frames_per_clip == 0 {
            return Err(SetupError::invalid(
                "animation.frames_per_clip",
                "must be at least 1",
            ));
        }

        let t = &self.textures;
        if t.walk_sheet.is_empty() || t.jump_sheet.is_empty() {
            return Err(SetupError::invalid(
                "textures",
                "walk and jump sheets must be named",
            ));
        }
        if t.platform_palette.is_empty() {
            return Err(SetupError::invalid(
                "textures.platform_palette",
                "needs at least one texture",
            ));
        }

        positive("tick_rate_hz", self.tick_rate_hz)?;
        Ok(())
    }

    /// Checks that depend on the world size the scene starts in.
    pub fn validate_for_bounds(&self, bounds: WorldBounds) -> Result<(), SetupError> {
        if !bounds.is_valid() {
            return Err(SetupError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        let pf = &self.platforms;
        if pf.width > bounds.width || pf.height > bounds.height {
            return Err(SetupError::invalid(
                "platforms.width",
                format!(
                    "{}x{} platform does not fit a {}x{} world",
                    pf.width, pf.height, bounds.width, bounds.height
                ),
            ));
        }
        if pf.spawn_margin_top + pf.spawn_margin_bottom >= bounds.height {
            return Err(SetupError::invalid(
                "platforms.spawn_margin_top",
                format!(
                    "margins {} + {} leave no spawn band in a {}px tall world",
                    pf.spawn_margin_top, pf.spawn_margin_bottom, bounds.height
                ),
            ));
        }
        Ok(())
    }
}

fn finite(field: &'static str, v: f32) -> Result<(), SetupError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SetupError::invalid(field, format!("must be finite, got {v}")))
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), SetupError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SetupError::invalid(field, format!("must be > 0, got {v}")))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), SetupError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(SetupError::invalid(field, format!("must be >= 0, got {v}")))
    }
}
