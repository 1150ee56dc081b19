use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use slimehop_core::bounds::BoundsProvider;
use slimehop_core::events::SimEvent;
use slimehop_core::key::Key;
use slimehop_core::simulation::Simulation;

use crate::viewport::Viewport;

/// Commands sent from the event source to the tick loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// DOM-style key identifier went down.
    KeyDown(String),
    KeyUp(String),
    Resize {
        width: f32,
        height: f32,
    },
    Stop,
}

/// Broadcasts sent from the tick loop to the renderer.
#[derive(Debug, Clone)]
pub enum SessionBroadcast {
    /// MessagePack-encoded scene snapshot, one per tick plus one before the first.
    Snapshot(Bytes),
    Event(SimEvent),
    /// The loop has exited.
    Ended,
}

/// Configuration for a spawned session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub viewport: Viewport,
    /// Stop after this many ticks. `0` runs until stopped.
    pub max_ticks: u64,
}

/// Spawn the tick loop as a tokio task.
/// Returns the command sender, the broadcast receiver, and a handle that
/// resolves to the final score.
pub fn spawn_session(
    mut sim: Box<dyn Simulation>,
    config: SessionConfig,
) -> (
    mpsc::UnboundedSender<SessionCommand>,
    mpsc::UnboundedReceiver<SessionBroadcast>,
    JoinHandle<u32>,
) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (broadcast_tx, broadcast_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        run_session_loop(&mut *sim, config, cmd_rx, broadcast_tx).await
    });

    (cmd_tx, broadcast_rx, handle)
}

/// Commands are handled between ticks, so a tick always sees a consistent
/// input set and a single viewport size.
async fn run_session_loop(
    sim: &mut dyn Simulation,
    config: SessionConfig,
    mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
    broadcast_tx: mpsc::UnboundedSender<SessionBroadcast>,
) -> u32 {
    let mut viewport = config.viewport;
    let _ = broadcast_tx.send(SessionBroadcast::Snapshot(Bytes::from(
        sim.encode_snapshot(),
    )));

    let tick_rate = sim.tick_rate();
    let tick_interval = Duration::from_secs_f32(1.0 / tick_rate);
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(tick_rate, max_ticks = config.max_ticks, "Session started");
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let events = sim.tick(viewport.bounds());
                ticks += 1;

                for event in events {
                    let _ = broadcast_tx.send(SessionBroadcast::Event(event));
                }
                let _ = broadcast_tx.send(SessionBroadcast::Snapshot(Bytes::from(
                    sim.encode_snapshot(),
                )));

                if config.max_ticks > 0 && ticks >= config.max_ticks {
                    tracing::debug!(ticks, "Tick limit reached");
                    break;
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(SessionCommand::KeyDown(code)) => sim.press(parse_key(&code)),
                    Some(SessionCommand::KeyUp(code)) => sim.release(parse_key(&code)),
                    Some(SessionCommand::Resize { width, height }) => {
                        viewport.resize(width, height);
                    },
                    Some(SessionCommand::Stop) | None => {
                        break;
                    },
                }
            }
        }
    }

    let score = sim.score();
    tracing::info!(ticks, score, "Session ended");
    let _ = broadcast_tx.send(SessionBroadcast::Ended);
    score
}

fn parse_key(code: &str) -> Key {
    if code.is_empty() {
        tracing::warn!("Empty key code from event source");
    }
    Key::from_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slimehop_core::bounds::WorldBounds;

    /// Records what the loop hands it; scores one point per jump press.
    struct Recorder {
        ticks: u32,
        presses: Vec<Key>,
        last_bounds: Option<WorldBounds>,
    }

    impl Simulation for Recorder {
        fn press(&mut self, key: Key) {
            self.presses.push(key);
        }

        fn release(&mut self, _key: Key) {}

        fn tick(&mut self, bounds: WorldBounds) -> Vec<SimEvent> {
            self.ticks += 1;
            self.last_bounds = Some(bounds);
            vec![SimEvent::HitFloor]
        }

        fn score(&self) -> u32 {
            self.presses.iter().filter(|k| **k == Key::Jump).count() as u32
        }

        fn encode_snapshot(&self) -> Vec<u8> {
            let w = self.last_bounds.map_or(0, |b| b.width as u32);
            [self.ticks.to_le_bytes(), w.to_le_bytes()].concat()
        }

        fn tick_rate(&self) -> f32 {
            200.0
        }
    }

    fn recorder() -> Box<dyn Simulation> {
        Box::new(Recorder {
            ticks: 0,
            presses: Vec::new(),
            last_bounds: None,
        })
    }

    fn config(max_ticks: u64) -> SessionConfig {
        SessionConfig {
            viewport: Viewport::new(1280.0, 720.0),
            max_ticks,
        }
    }

    fn decode(bytes: &Bytes) -> (u32, u32) {
        let ticks = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let width = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        (ticks, width)
    }

    #[tokio::test]
    async fn initial_snapshot_precedes_ticks() {
        let (cmd_tx, mut rx, handle) = spawn_session(recorder(), config(0));
        match rx.recv().await {
            Some(SessionBroadcast::Snapshot(bytes)) => assert_eq!(decode(&bytes).0, 0),
            other => panic!("Expected initial Snapshot, got: {other:?}"),
        }
        let _ = cmd_tx.send(SessionCommand::Stop);
        let _ = handle.await;
    }

    #[tokio::test]
    async fn tick_limit_ends_session() {
        let (_cmd_tx, mut rx, handle) = spawn_session(recorder(), config(5));
        let mut snapshots = 0;
        let mut events = 0;
        while let Some(msg) = rx.recv().await {
            match msg {
                SessionBroadcast::Snapshot(_) => snapshots += 1,
                SessionBroadcast::Event(e) => {
                    assert_eq!(e, SimEvent::HitFloor);
                    events += 1;
                },
                SessionBroadcast::Ended => break,
            }
        }
        assert_eq!(snapshots, 6);
        assert_eq!(events, 5);
        assert_eq!(handle.await.unwrap(), 0);
    }

    #[tokio::test]
    async fn key_codes_are_mapped_and_score_returned() {
        let (cmd_tx, mut rx, handle) = spawn_session(recorder(), config(0));
        let _ = rx.recv().await;
        let _ = cmd_tx.send(SessionCommand::KeyDown(" ".to_string()));
        let _ = cmd_tx.send(SessionCommand::KeyDown("Escape".to_string()));
        let _ = cmd_tx.send(SessionCommand::KeyDown("KeyW".to_string()));
        let _ = cmd_tx.send(SessionCommand::Stop);
        assert_eq!(handle.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn resize_applies_to_following_ticks() {
        let (cmd_tx, mut rx, handle) = spawn_session(recorder(), config(0));
        let _ = cmd_tx.send(SessionCommand::Resize {
            width: 640.0,
            height: 480.0,
        });

        let mut saw_resized = false;
        for _ in 0..40 {
            match tokio::time::timeout(Duration::from_millis(500), rx.recv()).await {
                Ok(Some(SessionBroadcast::Snapshot(bytes))) => {
                    let (ticks, width) = decode(&bytes);
                    if ticks > 0 && width == 640 {
                        saw_resized = true;
                        break;
                    }
                },
                Ok(Some(_)) => continue,
                _ => break,
            }
        }
        assert!(saw_resized, "ticks after Resize should use the new bounds");

        let _ = cmd_tx.send(SessionCommand::Stop);
        let _ = handle.await;
    }

    #[tokio::test]
    async fn dropped_sender_ends_session() {
        let (cmd_tx, mut rx, handle) = spawn_session(recorder(), config(0));
        drop(cmd_tx);
        let mut got_ended = false;
        for _ in 0..50 {
            match tokio::time::timeout(Duration::from_millis(500), rx.recv()).await {
                Ok(Some(SessionBroadcast::Ended)) => {
                    got_ended = true;
                    break;
                },
                Ok(Some(_)) => continue,
                _ => break,
            }
        }
        assert!(got_ended, "closing the command channel should end the session");
        let _ = handle.await;
    }
}
