pub mod bounds;
pub mod error;
pub mod events;
pub mod key;
pub mod simulation;
pub mod texture;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::bounds::WorldBounds;
    use crate::error::SetupError;
    use crate::events::SimEvent;
    use crate::key::Key;
    use crate::simulation::Simulation;
    use crate::texture::{TextureFactory, TextureRef};

    /// Default test world, large enough for the stock scene.
    pub fn test_bounds() -> WorldBounds {
        WorldBounds::new(1280.0, 720.0)
    }

    /// Texture factory handing out sequential handles, optionally refusing one asset.
    #[derive(Debug, Default)]
    pub struct SequentialTextures {
        pub next: u32,
        pub loaded: Vec<String>,
        pub fail_on: Option<String>,
    }

    impl SequentialTextures {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(asset: &str) -> Self {
            Self {
                fail_on: Some(asset.to_string()),
                ..Self::default()
            }
        }
    }

    impl TextureFactory for SequentialTextures {
        fn load(&mut self, asset: &str) -> Result<TextureRef, SetupError> {
            if self.fail_on.as_deref() == Some(asset) {
                return Err(SetupError::TextureUnavailable(asset.to_string()));
            }
            let handle = TextureRef(self.next);
            self.next += 1;
            self.loaded.push(asset.to_string());
            Ok(handle)
        }
    }

    /// Run N ticks with no input changes, returning all accumulated events.
    pub fn run_ticks(sim: &mut dyn Simulation, n: usize, bounds: WorldBounds) -> Vec<SimEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.tick(bounds));
        }
        all_events
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================
    // Generic checks every Simulation implementation must pass. Scene
    // crates call them from their own #[cfg(test)] modules.

    /// A freshly built scene must produce a non-empty snapshot.
    pub fn contract_snapshot_non_empty(sim: &dyn Simulation) {
        assert!(
            !sim.encode_snapshot().is_empty(),
            "encode_snapshot() must return non-empty bytes"
        );
    }

    /// A tick must change the render-facing state (at minimum the tick counter).
    pub fn contract_tick_changes_state(sim: &mut dyn Simulation, bounds: WorldBounds) {
        let before = sim.encode_snapshot();
        sim.tick(bounds);
        let after = sim.encode_snapshot();
        assert_ne!(before, after, "tick() must advance scene state");
    }

    /// Keys that map to `Key::Other` must not affect the next tick.
    pub fn contract_other_keys_are_inert(
        with_key: &mut dyn Simulation,
        without_key: &mut dyn Simulation,
        bounds: WorldBounds,
    ) {
        with_key.press(Key::Other);
        with_key.release(Key::Other);
        with_key.tick(bounds);
        without_key.tick(bounds);
        assert_eq!(
            with_key.encode_snapshot(),
            without_key.encode_snapshot(),
            "Key::Other must be ignored"
        );
    }

    /// Score must never decrease while driving the scene with jumps and movement.
    pub fn contract_score_monotonic(sim: &mut dyn Simulation, ticks: usize, bounds: WorldBounds) {
        let mut last = sim.score();
        sim.press(Key::MoveRight);
        for i in 0..ticks {
            if i % 20 == 0 {
                sim.press(Key::Jump);
            } else if i % 20 == 1 {
                sim.release(Key::Jump);
            }
            sim.tick(bounds);
            let now = sim.score();
            assert!(now >= last, "score decreased from {last} to {now}");
            last = now;
        }
    }
}
