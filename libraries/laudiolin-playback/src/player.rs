//! Active track slot

use crate::binding::DeviceBinding;
use crate::engine::AudioEngine;
use crate::error::Result;
use crate::types::{EngineState, TrackInfo};
use chrono::{DateTime, Utc};

/// Currently active track and when it started
///
/// Written only by the playback controller, once the engine has accepted a
/// new track. Paused/playing is never stored here; it is always read back
/// from the engine.
#[derive(Debug, Clone)]
pub struct PlayerState {
    track: Option<TrackInfo>,
    started_at: DateTime<Utc>,
}

impl PlayerState {
    /// Idle player state
    pub fn new() -> Self {
        Self {
            track: None,
            started_at: Utc::now(),
        }
    }

    /// Replace the active track and restart the clock
    pub fn set_track(&mut self, track: TrackInfo) {
        self.track = Some(track);
        self.started_at = Utc::now();
    }

    pub fn track(&self) -> Option<&TrackInfo> {
        self.track.as_ref()
    }

    /// Wall-clock instant the active track became active
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether the engine reports playback as paused
    pub async fn is_paused<E: AudioEngine>(&self, binding: &mut DeviceBinding<E>) -> Result<bool> {
        Ok(binding.state().await? == EngineState::Paused)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
