use serde::{Deserialize, Serialize};

use slimehop_sim::config::SceneConfig;

/// Top-level host configuration, loaded from `config/host.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub scene: SceneConfig,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Stop after this many ticks. `0` runs until stopped.
    pub run_ticks: u64,
    /// Directory the texture assets must exist under. Unset skips the check.
    pub asset_root: Option<String>,
    pub autopilot: AutopilotConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            viewport_width: 1280.0,
            viewport_height: 720.0,
            run_ticks: 600,
            asset_root: None,
            autopilot: AutopilotConfig::default(),
        }
    }
}

/// Scripted key source for headless runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    pub enabled: bool,
    pub hold_right: bool,
    /// Tap jump every N ticks. `0` never jumps.
    pub jump_every: u64,
    /// Every M ticks the jump tap is doubled. `0` never double-jumps.
    pub double_jump_every: u64,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hold_right: true,
            jump_every: 45,
            double_jump_every: 90,
        }
    }
}

impl HostConfig {
    /// Load config from the TOML file named by `SLIMEHOP_HOST_CONFIG`, falling
    /// back to `config/host.toml`, then apply env var overrides.
    pub fn load() -> Self {
        let path = std::env::var("SLIMEHOP_HOST_CONFIG")
            .unwrap_or_else(|_| "config/host.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<HostConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    HostConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                HostConfig::default()
            },
        };

        if let Ok(val) = std::env::var("SLIMEHOP_RUN_TICKS")
            && let Ok(n) = val.parse::<u64>()
        {
            config.run_ticks = n;
        }
        if let Ok(val) = std::env::var("SLIMEHOP_SEED")
            && let Ok(seed) = val.parse::<u64>()
        {
            config.scene.seed = Some(seed);
        }
        if let Ok(root) = std::env::var("SLIMEHOP_ASSET_ROOT")
            && !root.is_empty()
        {
            config.asset_root = Some(root);
        }

        config
    }
}
