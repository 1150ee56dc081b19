pub mod animation;
pub mod collision;
pub mod config;
pub mod input;
pub mod jump;
pub mod platforms;
pub mod player;
pub mod snapshot;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use slimehop_core::bounds::WorldBounds;
use slimehop_core::error::SetupError;
use slimehop_core::events::SimEvent;
use slimehop_core::key::Key;
use slimehop_core::simulation::Simulation;
use slimehop_core::texture::{TextureFactory, TextureRef};

use animation::{AnimationStateMachine, ClipKind};
use config::SceneConfig;
use input::{InputChange, InputState};
use jump::{JumpController, JumpOutcome};
use platforms::{Platform, PlatformManager};
use player::{Facing, PlayerState};
use snapshot::{ClipFrame, PlayerView, SceneSnapshot};

/// Scene-wide progress. Only the platform manager writes to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
}

/// Sprite sheets for the player's clip families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClips {
    pub walk: TextureRef,
    pub jump: TextureRef,
}

/// The single-scene game loop: owns every component and runs them in a fixed
/// order once per tick.
pub struct Scene {
    config: SceneConfig,
    player: PlayerState,
    input: InputState,
    animation: AnimationStateMachine,
    jump: JumpController,
    platforms: PlatformManager,
    state: GameState,
    clips: PlayerClips,
    tick: u64,
}

impl Scene {
    /// Validate the config, load textures, and lay out the initial platforms.
    pub fn new(
        config: SceneConfig,
        bounds: WorldBounds,
        textures: &mut dyn TextureFactory,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        config.validate_for_bounds(bounds)?;

        let clips = PlayerClips {
            walk: textures.load(&config.textures.walk_sheet)?,
            jump: textures.load(&config.textures.jump_sheet)?,
        };
        let palette = config
            .textures
            .platform_palette
            .iter()
            .map(|asset| textures.load(asset))
            .collect::<Result<Vec<_>, _>>()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut platforms =
            PlatformManager::new(&config.platforms, config.platform_mode, palette, rng);
        platforms.spawn_initial(bounds);

        tracing::info!(
            mode = ?config.platform_mode,
            platforms = platforms.len(),
            double_jump = config.double_jump_enabled,
            width = bounds.width,
            height = bounds.height,
            "Scene started"
        );

        Ok(Self {
            player: PlayerState::new(&config.player),
            input: InputState::new(),
            animation: AnimationStateMachine::new(&config.animation),
            jump: JumpController::new(&config.physics, config.double_jump_enabled),
            platforms,
            state: GameState::default(),
            clips,
            tick: 0,
            config,
        })
    }

    /// Key-down from the event source. Touches intent flags only.
    pub fn press(&mut self, key: Key) {
        if let InputChange::Steer(facing) = self.input.press(key) {
            self.player.moving = true;
            self.steer(facing);
        }
    }

    /// Key-up from the event source.
    pub fn release(&mut self, key: Key) {
        if self.input.release(key) == InputChange::Stopped {
            self.player.moving = false;
            if self.player.is_grounded() {
                self.animation.reset();
            }
        }
    }

    /// Advance one frame. Phase order is fixed: animation intent must be
    /// settled before vertical resolution so the right clip is drawn.
    pub fn tick(&mut self, bounds: WorldBounds) -> Vec<SimEvent> {
        self.tick += 1;
        let mut events = Vec::new();

        self.admit_jumps(&mut events);

        // 1. Horizontal movement and clip intent
        let speed = self.config.physics.move_speed;
        if self.input.is_held(Key::MoveLeft) {
            self.player.x -= speed;
            self.steer(Facing::Left);
        }
        if self.input.is_held(Key::MoveRight) {
            self.player.x += speed;
            self.steer(Facing::Right);
        }

        // 2. Gravity
        let tentative_y = self.jump.integrate(&mut self.player);

        // 3. Vertical resolution
        let resolution = collision::resolve(
            &mut self.player,
            tentative_y,
            self.platforms.platforms(),
            bounds.floor_y(),
        );
        if let Some(platform_id) = resolution.landed_on {
            tracing::trace!(platform_id, y = self.player.y, "Landed");
            events.push(SimEvent::Landed { platform_id });
            events.extend(
                self.platforms
                    .on_landing(platform_id, bounds, &mut self.state),
            );
        }
        if resolution.hit_floor {
            events.push(SimEvent::HitFloor);
        }

        // 4. Platform lifecycle
        events.extend(self.platforms.advance(bounds));

        // 5. Rest pose
        if self.player.is_grounded() && !self.player.moving {
            self.animation.reset();
        }
        self.animation.advance();

        events
    }

    fn admit_jumps(&mut self, events: &mut Vec<SimEvent>) {
        for _ in 0..self.input.take_jump_requests() {
            match self.jump.request(&mut self.player) {
                JumpOutcome::First => {
                    self.animation.select(ClipKind::Jump, self.player.facing);
                    tracing::debug!(tick = self.tick, "Jump");
                    events.push(SimEvent::Jumped { double: false });
                },
                JumpOutcome::Double => {
                    tracing::debug!(tick = self.tick, "Double jump");
                    events.push(SimEvent::Jumped { double: true });
                },
                JumpOutcome::Ignored => {},
            }
        }
    }

    fn steer(&mut self, facing: Facing) {
        self.player.facing = facing;
        let kind = if self.player.is_jumping {
            ClipKind::Jump
        } else {
            ClipKind::Walk
        };
        self.animation.select(kind, facing);
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        self.platforms.platforms()
    }

    pub fn animation(&self) -> &AnimationStateMachine {
        &self.animation
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let sheet = match self.animation.kind() {
            ClipKind::Walk => self.clips.walk,
            ClipKind::Jump => self.clips.jump,
        };
        SceneSnapshot {
            tick: self.tick,
            player: PlayerView {
                x: self.player.x,
                y: self.player.y,
                width: self.player.width,
                height: self.player.height,
                facing: self.player.facing,
                airborne: self.player.is_jumping,
            },
            frame: ClipFrame {
                clip: self.animation.clip(),
                sheet,
                row: self.animation.sheet_row(),
                column: self.animation.frame(),
                playing: self.animation.is_playing(),
            },
            platforms: self.platforms.platforms().to_vec(),
            score: self.state.score,
        }
    }
}

impl Simulation for Scene {
    fn press(&mut self, key: Key) {
        Scene::press(self, key);
    }

    fn release(&mut self, key: Key) {
        Scene::release(self, key);
    }

    fn tick(&mut self, bounds: WorldBounds) -> Vec<SimEvent> {
        Scene::tick(self, bounds)
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn encode_snapshot(&self) -> Vec<u8> {
        match self.snapshot().encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(tick = self.tick, error = %e, "Failed to encode snapshot");
                Vec::new()
            },
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }
}
