//! Playback events
//!
//! Two kinds of input reach the controller besides direct calls:
//! - Lifecycle events relayed from the device audio engine
//! - Commands pushed by the remote playback session

use crate::types::TrackInfo;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle events reported by the device audio engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Playback started or resumed
    Played,

    /// Playback paused
    Paused,

    /// Playback stopped or nothing loaded
    Stopped,

    /// Track finished naturally
    Ended,

    /// Track failed to load or play
    Errored {
        /// Engine-provided description, if any
        message: Option<String>,
    },

    /// State changed but the engine did not say to what
    StateUnknown,
}

/// Authoritative playback snapshot from the remote session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    /// Track that should be active, `None` to stop
    pub track: Option<TrackInfo>,

    /// Playback position in milliseconds
    #[serde(default)]
    pub progress: u64,

    #[serde(default)]
    pub paused: bool,

    /// Whether `progress` should be applied
    #[serde(default)]
    pub seek: bool,
}

impl SyncState {
    pub fn progress(&self) -> Duration {
        Duration::from_millis(self.progress)
    }
}

/// Commands pushed by the remote playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RemoteCommand {
    Play,
    Pause,
    Stop,
    Next,
    Previous,

    /// Seek the current track
    Seek {
        /// Position in milliseconds
        position: u64,
    },

    /// Reconcile with an authoritative snapshot
    Sync(SyncState),
}
