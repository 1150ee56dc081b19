use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use slimehop_core::bounds::WorldBounds;
use slimehop_core::events::{PlatformId, SimEvent};
use slimehop_core::texture::TextureRef;

use crate::GameState;
use crate::config::{PlatformConfig, PlatformMode};

/// A single platform. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub texture: TextureRef,
}

/// Owns the platform set and its lifecycle. The set is long-lived; members are not.
#[derive(Debug)]
pub struct PlatformManager {
    mode: PlatformMode,
    config: PlatformConfig,
    palette: Vec<TextureRef>,
    platforms: Vec<Platform>,
    rng: StdRng,
    next_id: PlatformId,
}

impl PlatformManager {
    pub fn new(
        config: &PlatformConfig,
        mode: PlatformMode,
        palette: Vec<TextureRef>,
        rng: StdRng,
    ) -> Self {
        Self {
            mode,
            config: config.clone(),
            palette,
            platforms: Vec::with_capacity(config.count),
            rng,
            next_id: 0,
        }
    }

    /// Replace the set with `count` platforms at random whole-pixel positions,
    /// each fully inside `bounds`.
    pub fn spawn_initial(&mut self, bounds: WorldBounds) {
        self.platforms.clear();
        for _ in 0..self.config.count {
            let x = self.random_floor(bounds.width - self.config.width);
            let y = self.random_floor(bounds.height - self.config.height);
            let platform = self.make_platform(x, y);
            self.platforms.push(platform);
        }
        tracing::debug!(
            count = self.platforms.len(),
            mode = ?self.mode,
            "Spawned initial platforms"
        );
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn platforms_mut(&mut self) -> &mut Vec<Platform> {
        &mut self.platforms
    }

    /// Per-tick movement. Scroll mode slides every platform left and wraps the
    /// ones that left the screen; respawn mode platforms never move.
    pub fn advance(&mut self, bounds: WorldBounds) -> Vec<SimEvent> {
        if self.mode != PlatformMode::Scroll {
            return Vec::new();
        }
        let mut events = Vec::new();
        for i in 0..self.platforms.len() {
            self.platforms[i].x -= self.config.scroll_speed;
            if self.platforms[i].x + self.platforms[i].width < 0.0 {
                let y = self.random_band_y(bounds);
                let platform = &mut self.platforms[i];
                platform.x = bounds.width;
                platform.y = y;
                tracing::trace!(platform_id = platform.id, y, "Platform wrapped");
                events.push(SimEvent::PlatformWrapped {
                    platform_id: platform.id,
                });
            }
        }
        events
    }

    /// React to a landing. Respawn mode removes the platform, scores, and
    /// appends a replacement at the right edge; scroll mode ignores landings.
    pub fn on_landing(
        &mut self,
        platform_id: PlatformId,
        bounds: WorldBounds,
        state: &mut GameState,
    ) -> Vec<SimEvent> {
        if self.mode != PlatformMode::Respawn {
            return Vec::new();
        }
        let Some(index) = self.platforms.iter().position(|p| p.id == platform_id) else {
            return Vec::new();
        };
        self.platforms.remove(index);
        state.score += 1;

        let x = (bounds.width - self.config.width).max(0.0);
        let y = self.random_band_y(bounds);
        let replacement = self.make_platform(x, y);
        let added = replacement.id;
        self.platforms.push(replacement);

        tracing::debug!(
            removed = platform_id,
            added,
            score = state.score,
            "Platform collected"
        );
        vec![
            SimEvent::PlatformRespawned {
                removed: platform_id,
                added,
            },
            SimEvent::ScoreUpdate { score: state.score },
        ]
    }

    fn make_platform(&mut self, x: f32, y: f32) -> Platform {
        let texture = self.random_texture();
        let id = self.next_id;
        self.next_id += 1;
        Platform {
            id,
            x,
            y,
            width: self.config.width,
            height: self.config.height,
            texture,
        }
    }

    fn random_texture(&mut self) -> TextureRef {
        match self.palette.len() {
            0 => TextureRef(0),
            1 => self.palette[0],
            n => self.palette[self.rng.random_range(0..n)],
        }
    }

    /// Whole-pixel y in `[margin_top, height - margin_bottom)`, pulled up so
    /// the platform's bottom never passes the floor. An empty band collapses
    /// to its top before the clamp.
    fn random_band_y(&mut self, bounds: WorldBounds) -> f32 {
        let span = bounds.height - self.config.spawn_margin_top - self.config.spawn_margin_bottom;
        let y = self.config.spawn_margin_top + self.random_floor(span);
        y.min(bounds.height - self.config.height).max(0.0)
    }

    /// Whole number in `[0, span)`, or 0 when the span is empty.
    fn random_floor(&mut self, span: f32) -> f32 {
        if span > 0.0 {
            self.rng.random_range(0.0..span).floor()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const BOUNDS: WorldBounds = WorldBounds {
        width: 1280.0,
        height: 720.0,
    };

    fn manager(mode: PlatformMode, palette: Vec<TextureRef>) -> PlatformManager {
        let mut m = PlatformManager::new(
            &PlatformConfig::default(),
            mode,
            palette,
            StdRng::seed_from_u64(42),
        );
        m.spawn_initial(BOUNDS);
        m
    }

    #[test]
    fn initial_spawn_fills_count_inside_bounds() {
        let m = manager(PlatformMode::Scroll, vec![TextureRef(5)]);
        assert_eq!(m.len(), 15);
        for p in m.platforms() {
            assert!(p.x >= 0.0 && p.x + p.width <= BOUNDS.width, "x={}", p.x);
            assert!(p.y >= 0.0 && p.y + p.height <= BOUNDS.height, "y={}", p.y);
            assert_eq!(p.x, p.x.floor());
            assert_eq!(p.y, p.y.floor());
            assert_eq!(p.texture, TextureRef(5));
        }
    }

    #[test]
    fn ids_are_unique() {
        let m = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        let mut ids: Vec<_> = m.platforms().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        let b = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        assert_eq!(a.platforms(), b.platforms());
    }

    #[test]
    fn scroll_moves_left_by_speed() {
        let mut m = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        // Keep everything far from the wrap line
        for p in &mut m.platforms {
            p.x = 600.0;
        }
        let events = m.advance(BOUNDS);
        assert!(events.is_empty());
        assert!(m.platforms().iter().all(|p| p.x == 593.0));
    }

    #[test]
    fn scroll_wraps_on_crossing_tick() {
        let mut m = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        let id = m.platforms[0].id;
        // Right edge at 2: after moving 7 it is at -5, past x=0
        m.platforms[0].x = -30.0;
        let events = m.advance(BOUNDS);

        assert_eq!(events, vec![SimEvent::PlatformWrapped { platform_id: id }]);
        let p = &m.platforms()[0];
        assert_eq!(p.x, BOUNDS.width);
        assert!(p.y >= 50.0 && p.y < BOUNDS.height - 50.0, "y={}", p.y);
        assert_eq!(m.len(), 15);
    }

    #[test]
    fn scroll_does_not_wrap_before_crossing() {
        let mut m = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        // Right edge ends exactly at 0, not past it
        m.platforms[0].x = -25.0;
        let events = m.advance(BOUNDS);
        assert!(events.is_empty());
        assert_eq!(m.platforms()[0].x, -32.0);
    }

    #[test]
    fn scroll_ignores_landings() {
        let mut m = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        let mut state = GameState::default();
        let id = m.platforms[3].id;
        let before = m.platforms().to_vec();
        assert!(m.on_landing(id, BOUNDS, &mut state).is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(m.platforms(), &before[..]);
    }

    #[test]
    fn respawn_platforms_are_stationary() {
        let mut m = manager(PlatformMode::Respawn, vec![TextureRef(0)]);
        let before = m.platforms().to_vec();
        assert!(m.advance(BOUNDS).is_empty());
        assert_eq!(m.platforms(), &before[..]);
    }

    #[test]
    fn respawn_replaces_exactly_once() {
        let palette = vec![TextureRef(10), TextureRef(11), TextureRef(12)];
        let mut m = manager(PlatformMode::Respawn, palette.clone());
        let mut state = GameState::default();
        let target = m.platforms[4].id;

        let events = m.on_landing(target, BOUNDS, &mut state);

        assert_eq!(m.len(), 15);
        assert_eq!(state.score, 1);
        assert!(m.platforms().iter().all(|p| p.id != target));
        let added = m.platforms().last().unwrap();
        assert_eq!(added.x, BOUNDS.width - 32.0);
        assert!(added.y >= 50.0 && added.y < BOUNDS.height - 50.0);
        assert!(palette.contains(&added.texture));
        assert_eq!(
            events,
            vec![
                SimEvent::PlatformRespawned {
                    removed: target,
                    added: added.id,
                },
                SimEvent::ScoreUpdate { score: 1 },
            ]
        );
    }

    #[test]
    fn respawn_preserves_order_of_survivors() {
        let mut m = manager(PlatformMode::Respawn, vec![TextureRef(0)]);
        let mut state = GameState::default();
        let ids_before: Vec<_> = m.platforms().iter().map(|p| p.id).collect();
        m.on_landing(ids_before[2], BOUNDS, &mut state);
        let ids_after: Vec<_> = m.platforms().iter().map(|p| p.id).collect();
        let mut expected: Vec<_> = ids_before.iter().copied().filter(|&id| id != ids_before[2]).collect();
        expected.push(15);
        assert_eq!(ids_after, expected);
    }

    #[test]
    fn unknown_platform_landing_is_noop() {
        let mut m = manager(PlatformMode::Respawn, vec![TextureRef(0)]);
        let mut state = GameState::default();
        assert!(m.on_landing(999, BOUNDS, &mut state).is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(m.len(), 15);
    }

    #[test]
    fn tiny_world_collapses_ranges() {
        let mut m = manager(PlatformMode::Respawn, vec![TextureRef(0)]);
        let tiny = WorldBounds::new(10.0, 30.0);
        m.spawn_initial(tiny);
        assert!(m.platforms().iter().all(|p| p.x == 0.0 && p.y == 0.0));
        let mut state = GameState::default();
        let id = m.platforms[0].id;
        m.on_landing(id, tiny, &mut state);
        let added = m.platforms().last().unwrap();
        assert_eq!(added.x, 0.0);
        assert_eq!(added.y, 0.0);
    }

    #[test]
    fn replacement_fits_shrunken_world() {
        let mut m = manager(PlatformMode::Respawn, vec![TextureRef(0)]);
        let mut state = GameState::default();
        // Spawn band [50, 10) is empty; the platform must still end above the floor
        let short = WorldBounds::new(640.0, 60.0);
        let id = m.platforms[0].id;
        m.on_landing(id, short, &mut state);

        let added = m.platforms().last().unwrap();
        assert_eq!(state.score, 1);
        assert_eq!(added.x, 640.0 - 32.0);
        assert_eq!(added.y, 60.0 - 32.0);
        assert!(added.y + added.height <= short.height);
    }

    #[test]
    fn wrap_fits_shrunken_world() {
        let mut m = manager(PlatformMode::Scroll, vec![TextureRef(0)]);
        let short = WorldBounds::new(640.0, 60.0);
        m.platforms[0].x = -30.0;
        m.advance(short);
        let p = &m.platforms()[0];
        assert_eq!(p.x, 640.0);
        assert!(p.y >= 0.0 && p.y + p.height <= short.height, "y={}", p.y);
    }

    #[test]
    fn zero_bottom_margin_keeps_platform_above_floor() {
        let config = PlatformConfig {
            spawn_margin_bottom: 0.0,
            ..PlatformConfig::default()
        };
        let mut m = PlatformManager::new(
            &config,
            PlatformMode::Respawn,
            vec![TextureRef(0)],
            StdRng::seed_from_u64(9),
        );
        m.spawn_initial(BOUNDS);
        let mut state = GameState::default();
        for _ in 0..200 {
            let id = m.platforms[0].id;
            m.on_landing(id, BOUNDS, &mut state);
            let added = m.platforms().last().unwrap();
            assert!(added.y + added.height <= BOUNDS.height, "y={}", added.y);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wraps_stay_in_band(seed in 0u64..500, height in 200.0f32..1400.0) {
                let bounds = WorldBounds::new(1000.0, height);
                let mut m = PlatformManager::new(
                    &PlatformConfig::default(),
                    PlatformMode::Scroll,
                    vec![TextureRef(0)],
                    StdRng::seed_from_u64(seed),
                );
                m.spawn_initial(bounds);
                for _ in 0..400 {
                    for event in m.advance(bounds) {
                        let SimEvent::PlatformWrapped { platform_id } = event else {
                            continue;
                        };
                        let p = m.platforms().iter().find(|p| p.id == platform_id).unwrap();
                        prop_assert_eq!(p.x, bounds.width);
                        prop_assert!(p.y >= 50.0 && p.y < height - 50.0);
                    }
                }
                prop_assert_eq!(m.len(), 15);
            }

            #[test]
            fn replacements_stay_inside_world(
                seed in 0u64..500,
                width in 32.0f32..2000.0,
                height in 32.0f32..400.0,
            ) {
                let bounds = WorldBounds::new(width, height);
                let mut m = PlatformManager::new(
                    &PlatformConfig::default(),
                    PlatformMode::Respawn,
                    vec![TextureRef(0)],
                    StdRng::seed_from_u64(seed),
                );
                m.spawn_initial(bounds);
                let mut state = GameState::default();
                for _ in 0..20 {
                    let id = m.platforms()[0].id;
                    m.on_landing(id, bounds, &mut state);
                    let added = m.platforms().last().unwrap();
                    prop_assert!(added.x >= 0.0 && added.x + added.width <= bounds.width);
                    prop_assert!(added.y >= 0.0 && added.y + added.height <= bounds.height);
                }
            }
        }
    }
}
