use std::collections::HashMap;
use std::path::PathBuf;

use slimehop_core::error::SetupError;
use slimehop_core::texture::{TextureFactory, TextureRef};

/// Hands out one texture handle per distinct asset path.
///
/// With a root directory set, every asset must exist under it; without one
/// (headless runs) any name is accepted.
#[derive(Debug, Default)]
pub struct AssetTextures {
    root: Option<PathBuf>,
    handles: HashMap<String, TextureRef>,
}

impl AssetTextures {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            handles: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl TextureFactory for AssetTextures {
    fn load(&mut self, asset: &str) -> Result<TextureRef, SetupError> {
        if let Some(&handle) = self.handles.get(asset) {
            return Ok(handle);
        }
        if let Some(root) = &self.root {
            let path = root.join(asset);
            if !path.is_file() {
                tracing::error!(path = %path.display(), "Texture asset missing");
                return Err(SetupError::TextureUnavailable(asset.to_string()));
            }
        }
        let handle = TextureRef(self.handles.len() as u32);
        self.handles.insert(asset.to_string(), handle);
        tracing::debug!(asset, handle = handle.0, "Texture registered");
        Ok(handle)
    }
}
