pub mod assets;
pub mod autopilot;
pub mod config;
pub mod error;
pub mod session;
pub mod viewport;

use std::path::PathBuf;

use slimehop_core::bounds::BoundsProvider;
use slimehop_core::error::SetupError;
use slimehop_core::events::SimEvent;
use slimehop_sim::Scene;

use assets::AssetTextures;
use autopilot::Autopilot;
use config::HostConfig;
use error::HostError;
use session::{SessionBroadcast, SessionConfig, spawn_session};
use viewport::Viewport;

/// Build the scene described by a host config, sized to its viewport.
pub fn build_scene(config: &HostConfig) -> Result<Scene, SetupError> {
    let viewport = Viewport::new(config.viewport_width, config.viewport_height);
    let mut textures = AssetTextures::new(config.asset_root.as_ref().map(PathBuf::from));
    Scene::new(
        config.scene.clone(),
        viewport.bounds(),
        &mut textures,
    )
}

/// Run a headless session to completion, driving keys from the autopilot.
/// Returns the final score.
pub async fn run(config: HostConfig) -> Result<u32, HostError> {
    let scene = build_scene(&config)?;
    let (cmd_tx, mut broadcast_rx, handle) = spawn_session(
        Box::new(scene),
        SessionConfig {
            viewport: Viewport::new(config.viewport_width, config.viewport_height),
            max_ticks: config.run_ticks,
        },
    );

    let mut pilot = Autopilot::new(config.autopilot.clone());
    while let Some(msg) = broadcast_rx.recv().await {
        match msg {
            SessionBroadcast::Snapshot(_) => {
                for cmd in pilot.next_commands() {
                    let _ = cmd_tx.send(cmd);
                }
            },
            SessionBroadcast::Event(SimEvent::ScoreUpdate { score }) => {
                tracing::info!(score, "Score");
            },
            SessionBroadcast::Event(SimEvent::Jumped { double }) => {
                tracing::debug!(double, "Jumped");
            },
            SessionBroadcast::Event(_) => {},
            SessionBroadcast::Ended => break,
        }
    }

    handle.await.map_err(|e| HostError::Session(e.to_string()))
}
