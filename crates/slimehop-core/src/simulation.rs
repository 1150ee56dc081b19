use crate::bounds::WorldBounds;
use crate::events::SimEvent;
use crate::key::Key;

/// Core trait a hosted scene implements.
///
/// The host owns frame pacing and event delivery; the scene only reacts to
/// key transitions and "a tick occurred".
pub trait Simulation: Send {
    /// A key went down. Only records input intent; physics is untouched until the next tick.
    fn press(&mut self, key: Key);

    /// A key went up.
    fn release(&mut self, key: Key);

    /// Advance one frame against the current world bounds.
    fn tick(&mut self, bounds: WorldBounds) -> Vec<SimEvent>;

    /// Current score. Never decreases.
    fn score(&self) -> u32;

    /// Serialize the render-facing state for the drawing collaborator.
    fn encode_snapshot(&self) -> Vec<u8>;

    /// Preferred tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }
}
