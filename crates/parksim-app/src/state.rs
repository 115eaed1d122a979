//! Application state shared between the caller and the drive loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use parksim_core::commands::SceneCommand;
use parksim_core::state::SceneSnapshot;

/// Commands sent to the drive loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A scene command to apply at the next frame boundary.
    Scene(SceneCommand),
    /// Stop driving and shut the loop down.
    Shutdown,
}

/// Handles for talking to a running drive loop.
///
/// - `Mutex<Option<Sender>>` because the loop may not be started yet
/// - `Arc<Mutex<..>>` for the latest snapshot, written by the loop thread
pub struct AppState {
    /// Channel sender to the drive loop. `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest snapshot, updated by the loop after every frame.
    pub latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Forward a scene command to the loop.
    pub fn send_command(&self, command: SceneCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(LoopCommand::Scene(command))
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("Drive loop not started".into()),
        }
    }

    /// Ask the loop to stop. Safe to call when it is not running.
    pub fn shutdown(&self) -> Result<(), String> {
        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        if let Some(tx) = tx_lock.take() {
            // A closed channel means the loop already exited.
            let _ = tx.send(LoopCommand::Shutdown);
        }
        Ok(())
    }

    /// The most recent snapshot published by the loop.
    pub fn snapshot(&self) -> Result<Option<SceneSnapshot>, String> {
        let lock = self.latest_snapshot.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        let err = state.send_command(SceneCommand::ClearTrails).unwrap_err();
        assert!(err.contains("not started"));
        assert!(state.shutdown().is_ok());
    }
}
