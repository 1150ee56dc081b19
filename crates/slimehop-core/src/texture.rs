use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Opaque drawable handle issued by the rendering collaborator.
/// The simulation stores and forwards these, never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub u32);

/// Produces texture handles for named assets during scene setup.
pub trait TextureFactory {
    fn load(&mut self, asset: &str) -> Result<TextureRef, SetupError>;
}
