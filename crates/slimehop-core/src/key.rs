use serde::{Deserialize, Serialize};

/// Logical keys the simulation reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Jump,
    Other,
}

impl Key {
    /// Map a DOM-style key identifier (`KeyboardEvent.key` or `.code`) to a logical key.
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" | "KeyA" => Key::MoveLeft,
            "ArrowRight" | "KeyD" => Key::MoveRight,
            " " | "Space" | "ArrowUp" | "KeyW" => Key::Jump,
            _ => Key::Other,
        }
    }
}
