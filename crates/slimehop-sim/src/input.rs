use std::collections::HashSet;

use slimehop_core::key::Key;

use crate::player::Facing;

/// What a key transition asks of the scene. Returned to the caller so key
/// handlers only ever touch intent flags, never physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    /// Unmapped key, or a repeat of a key already held.
    Ignored,
    /// A horizontal key is down; the player now intends to move this way.
    Steer(Facing),
    /// The jump key went from released to held; a request was queued.
    JumpQueued,
    /// No horizontal key remains held.
    Stopped,
    /// A key went up while a horizontal key is still held.
    Released,
}

/// Held-key set plus edge-triggered jump requests, drained once per tick.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pending_jumps: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) -> InputChange {
        if key == Key::Other {
            return InputChange::Ignored;
        }
        let newly_held = self.held.insert(key);
        match key {
            Key::MoveLeft => InputChange::Steer(Facing::Left),
            Key::MoveRight => InputChange::Steer(Facing::Right),
            Key::Jump if newly_held => {
                self.pending_jumps += 1;
                InputChange::JumpQueued
            },
            _ => InputChange::Ignored,
        }
    }

    pub fn release(&mut self, key: Key) -> InputChange {
        if key == Key::Other {
            return InputChange::Ignored;
        }
        self.held.remove(&key);
        if self.horizontal_held() {
            InputChange::Released
        } else {
            InputChange::Stopped
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn horizontal_held(&self) -> bool {
        self.is_held(Key::MoveLeft) || self.is_held(Key::MoveRight)
    }

    /// Jump transitions seen since the last tick, in arrival order. Resets the queue.
    pub fn take_jump_requests(&mut self) -> u32 {
        std::mem::take(&mut self.pending_jumps)
    }
}
