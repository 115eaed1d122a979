//! Drive loop thread: runs the simulator once per display frame and
//! publishes snapshots.
//!
//! The simulator is moved into the thread and owned there. Commands arrive
//! via an `mpsc` channel and are applied at the next frame boundary. Each
//! frame passes the elapsed wall-clock time to `ParkingSimulator::frame`,
//! which turns it into a clamped step.
//!
//! `replay_script` drives the same simulator from a `DriveScript` with a
//! synthetic clock, so scripted sessions are reproducible.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use parksim_core::error::ConfigError;
use parksim_core::state::SceneSnapshot;
use parksim_sim::engine::ParkingSimulator;

use crate::script::DriveScript;
use crate::state::{AppState, LoopCommand};

/// Nominal frame duration at `fps`. Non-positive rates fall back to the default.
fn frame_duration(fps: f64) -> Duration {
    let fps = if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        parksim_core::constants::DEFAULT_FPS
    };
    Duration::from_secs_f64(1.0 / fps)
}

/// Spawns the drive loop in a new thread.
///
/// Returns the command sender and a handle yielding the final snapshot
/// once the loop shuts down.
pub fn spawn_drive_loop(
    sim: ParkingSimulator,
    fps: f64,
    latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
) -> io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<SceneSnapshot>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let period = frame_duration(fps);

    let handle = std::thread::Builder::new()
        .name("parksim-drive-loop".into())
        .spawn(move || run_drive_loop(sim, cmd_rx, &latest_snapshot, period))?;

    Ok((cmd_tx, handle))
}

/// Start a loop and register its sender in `state`.
pub fn start_drive_loop(
    state: &AppState,
    sim: ParkingSimulator,
    fps: f64,
) -> io::Result<JoinHandle<SceneSnapshot>> {
    let (tx, handle) = spawn_drive_loop(sim, fps, Arc::clone(&state.latest_snapshot))?;
    if let Ok(mut lock) = state.command_tx.lock() {
        *lock = Some(tx);
    }
    Ok(handle)
}

/// The drive loop. Runs until Shutdown or channel disconnect.
fn run_drive_loop(
    mut sim: ParkingSimulator,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SceneSnapshot>>,
    period: Duration,
) -> SceneSnapshot {
    info!(period_ms = period.as_secs_f64() * 1000.0, "drive loop started");
    let start = Instant::now();
    let mut next_frame_time = start;

    loop {
        // 1. Drain pending commands into the simulator queue
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Scene(cmd)) => sim.queue_command(cmd),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    sim.stop_session();
                    let snapshot = sim.snapshot();
                    info!(steps = snapshot.steps, "drive loop stopped");
                    return snapshot;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Run one frame at the current wall-clock time
        sim.frame(start.elapsed().as_secs_f64());

        // 3. Publish for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(sim.snapshot());
        }

        // 4. Sleep until the next frame
        next_frame_time += period;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > period * 2 {
            // Too far behind; the engine clamps the step anyway
            debug!("drive loop behind schedule, resetting pacing");
            next_frame_time = now;
        }
    }
}

/// Play a script against `sim` with a synthetic clock at `script.fps`.
///
/// Frame `n` runs at `n / fps` seconds. Events for a frame are applied
/// before it runs. A rejected command aborts the replay.
pub fn replay_script(
    sim: &mut ParkingSimulator,
    script: &DriveScript,
) -> Result<SceneSnapshot, ConfigError> {
    if let Some(scenario) = script.scenario {
        sim.load_scenario(scenario, script.seed)?;
    }

    let frame_secs = 1.0 / script.fps;
    for frame in 0..script.frames {
        for command in script.events_at(frame) {
            debug!(frame, ?command, "script event");
            sim.handle_command(command.clone())?;
        }
        sim.frame(frame as f64 * frame_secs);
    }

    sim.stop_session();
    Ok(sim.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parksim_core::commands::SceneCommand;
    use parksim_core::enums::{DriveState, Gear, ScenarioId, SteerDirection};
    use parksim_sim::engine::SimConfig;

    fn drive_forward() -> SceneCommand {
        SceneCommand::SetControl {
            steer: SteerDirection::Straight,
            gear: Gear::Forward,
            throttle: true,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Scene(SceneCommand::ClearTrails)).unwrap();
        tx.send(LoopCommand::Scene(SceneCommand::StopSession)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Scene(SceneCommand::ClearTrails)
        ));
        assert!(matches!(
            commands[1],
            LoopCommand::Scene(SceneCommand::StopSession)
        ));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_frame_duration_fallback() {
        assert_eq!(frame_duration(50.0), Duration::from_millis(20));
        assert_eq!(frame_duration(0.0), frame_duration(f64::NAN));
    }

    #[test]
    fn test_replay_straight_one_second() {
        let script = DriveScript {
            fps: 60.0,
            frames: 61,
            scenario: None,
            seed: 0,
            events: vec![
                crate::script::ScriptEvent {
                    frame: 0,
                    command: SceneCommand::PlacePlayer {
                        vehicle: "Toyota Corolla".into(),
                        x: 0.0,
                        y: 0.0,
                    },
                },
                crate::script::ScriptEvent {
                    frame: 0,
                    command: drive_forward(),
                },
            ],
        };

        let mut sim = ParkingSimulator::new(SimConfig::default()).unwrap();
        let snapshot = replay_script(&mut sim, &script).unwrap();

        // Frame 0 sets the baseline; frames 1..=60 each advance 1/60 s.
        assert_eq!(snapshot.steps, 60);
        let pose = snapshot.player.unwrap().pose;
        assert!((pose.x - 4.0).abs() < 1e-9, "x = {}", pose.x);
        assert!(pose.y.abs() < 1e-12);
        assert_eq!(snapshot.drive_state, DriveState::Idle);
        assert_eq!(snapshot.trails.front_left.len(), 30);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let json = r#"{
            "fps": 30.0,
            "frames": 90,
            "scenario": "RandomLot",
            "seed": 7,
            "events": [
                { "frame": 0, "command": { "type": "SetControl", "steer": "Left", "gear": "Reverse", "throttle": true } },
                { "frame": 45, "command": { "type": "SetSteer", "steer": "Right" } }
            ]
        }"#;
        let script = DriveScript::from_json(json).unwrap();

        let run = || {
            let mut sim = ParkingSimulator::new(SimConfig::default()).unwrap();
            let snapshot = replay_script(&mut sim, &script).unwrap();
            serde_json::to_string(&snapshot).unwrap()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_replay_rejects_unknown_vehicle() {
        let script = DriveScript {
            fps: 60.0,
            frames: 2,
            scenario: None,
            seed: 0,
            events: vec![crate::script::ScriptEvent {
                frame: 1,
                command: SceneCommand::PlaceObstacle {
                    vehicle: "Batmobile".into(),
                    x: 0.0,
                    y: 0.0,
                },
            }],
        };

        let mut sim = ParkingSimulator::new(SimConfig::default()).unwrap();
        let err = replay_script(&mut sim, &script).unwrap_err();
        assert_eq!(err, ConfigError::UnknownVehicle("Batmobile".into()));
    }

    #[test]
    fn test_replay_loads_scenario() {
        let script = DriveScript {
            fps: 60.0,
            frames: 1,
            scenario: Some(ScenarioId::ParallelSpot),
            seed: 0,
            events: Vec::new(),
        };

        let mut sim = ParkingSimulator::new(SimConfig::default()).unwrap();
        let snapshot = replay_script(&mut sim, &script).unwrap();
        assert!(snapshot.player.is_some());
        assert!(!snapshot.obstacles.is_empty());
        assert_eq!(snapshot.steps, 0);
    }

    #[test]
    fn test_drive_loop_moves_player_and_shuts_down() {
        let state = AppState::new();
        let sim = ParkingSimulator::new(SimConfig::default()).unwrap();
        let handle = start_drive_loop(&state, sim, 200.0).unwrap();
        assert!(state.is_running());

        state
            .send_command(SceneCommand::PlacePlayer {
                vehicle: "Honda Civic".into(),
                x: 0.0,
                y: 0.0,
            })
            .unwrap();
        state.send_command(drive_forward()).unwrap();

        std::thread::sleep(Duration::from_millis(250));
        state.shutdown().unwrap();
        let final_snapshot = handle.join().unwrap();

        let pose = final_snapshot.player.unwrap().pose;
        assert!(pose.x > 0.0, "player should have moved forward");
        assert!(pose.y.abs() < 1e-9);
        assert_eq!(final_snapshot.drive_state, DriveState::Idle);
        assert!(state.snapshot().unwrap().is_some());
        assert!(!state.is_running());
    }
}
