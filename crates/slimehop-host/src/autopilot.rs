use crate::config::AutopilotConfig;
use crate::session::SessionCommand;

const RIGHT: &str = "ArrowRight";
const JUMP: &str = " ";

/// Deterministic key script: hold right, tap jump on a fixed cadence,
/// occasionally tapping twice for a double jump.
#[derive(Debug, Clone)]
pub struct Autopilot {
    config: AutopilotConfig,
    tick: u64,
}

impl Autopilot {
    pub fn new(config: AutopilotConfig) -> Self {
        Self { config, tick: 0 }
    }

    /// Key commands to apply before the next tick.
    pub fn next_commands(&mut self) -> Vec<SessionCommand> {
        let tick = self.tick;
        self.tick += 1;
        if !self.config.enabled {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if tick == 0 && self.config.hold_right {
            commands.push(SessionCommand::KeyDown(RIGHT.to_string()));
        }
        if every(tick, self.config.jump_every) {
            commands.extend(tap(JUMP));
            if every(tick, self.config.double_jump_every) {
                commands.extend(tap(JUMP));
            }
        }
        commands
    }
}

fn every(tick: u64, period: u64) -> bool {
    period > 0 && tick > 0 && tick % period == 0
}

fn tap(code: &str) -> [SessionCommand; 2] {
    [
        SessionCommand::KeyDown(code.to_string()),
        SessionCommand::KeyUp(code.to_string()),
    ]
}
