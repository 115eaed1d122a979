//! Drive scripts: JSON files describing a reproducible session.
//!
//! A script names a frame rate, a frame count, an optional starting
//! scenario, and scene commands keyed to the frame they fire on.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use parksim_core::commands::SceneCommand;
use parksim_core::constants::DEFAULT_FPS;
use parksim_core::enums::ScenarioId;

/// One command fired at the start of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub frame: u64,
    pub command: SceneCommand,
}

/// A complete scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveScript {
    #[serde(default = "default_fps")]
    pub fps: f64,
    pub frames: u64,
    #[serde(default)]
    pub scenario: Option<ScenarioId>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

impl DriveScript {
    /// Parse and validate a script from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let script: DriveScript = serde_json::from_str(json).context("Invalid drive script")?;
        script.validate()?;
        Ok(script)
    }

    /// Read a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load script {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.fps.is_finite() && self.fps > 0.0,
            "fps must be positive, got {}",
            self.fps
        );
        Ok(())
    }

    /// Commands scheduled for `frame`, in file order.
    pub fn events_at(&self, frame: u64) -> impl Iterator<Item = &SceneCommand> + '_ {
        self.events
            .iter()
            .filter(move |event| event.frame == frame)
            .map(|event| &event.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_script() {
        let script = DriveScript::from_json(r#"{ "frames": 10 }"#).unwrap();
        assert_eq!(script.fps, DEFAULT_FPS);
        assert_eq!(script.frames, 10);
        assert!(script.scenario.is_none());
        assert!(script.events.is_empty());
    }

    #[test]
    fn test_events_at_frame() {
        let script = DriveScript::from_json(
            r#"{
                "fps": 30.0,
                "frames": 5,
                "scenario": "ParallelSpot",
                "events": [
                    { "frame": 2, "command": { "type": "SetThrottle", "throttle": true } },
                    { "frame": 0, "command": { "type": "ClearTrails" } },
                    { "frame": 2, "command": { "type": "StopSession" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.scenario, Some(ScenarioId::ParallelSpot));
        let at_two: Vec<&SceneCommand> = script.events_at(2).collect();
        assert_eq!(
            at_two,
            vec![
                &SceneCommand::SetThrottle { throttle: true },
                &SceneCommand::StopSession
            ]
        );
        assert_eq!(script.events_at(1).count(), 0);
    }

    #[test]
    fn test_rejects_bad_fps() {
        assert!(DriveScript::from_json(r#"{ "fps": 0.0, "frames": 1 }"#).is_err());
        assert!(DriveScript::from_json(r#"{ "fps": -5.0, "frames": 1 }"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_command() {
        let err = DriveScript::from_json(
            r#"{ "frames": 1, "events": [ { "frame": 0, "command": { "type": "Honk" } } ] }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Invalid drive script"));
    }
}
