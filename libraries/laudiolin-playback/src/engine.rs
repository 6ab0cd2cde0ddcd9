//! Device audio engine capability
//!
//! Abstracts the platform audio engine (the thing that actually decodes and
//! outputs sound). The controller only ever talks to it through this trait,
//! so the same state machine drives a mobile player service, a desktop
//! output, or a test double.

use crate::error::Result;
use crate::types::{EngineState, RepeatMode};
use async_trait::async_trait;
use std::time::Duration;

/// Track in the shape the engine loads
///
/// Built from a [`TrackInfo`](crate::TrackInfo) by the device binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineTrack {
    pub id: String,

    /// Streaming URL or local file path
    pub url: String,

    pub title: String,
    pub artist: String,

    /// Resolved artwork location
    pub artwork: String,

    /// `User-Agent` to send when fetching `url` (remote tracks only)
    pub user_agent: Option<String>,

    /// Expected content type of `url` (remote tracks only)
    pub content_type: Option<String>,
}

/// Platform audio engine
///
/// Every call may suspend. State changes caused by these calls are reported
/// asynchronously through the engine's own event stream, which the device
/// binding relays as [`EngineEvent`](crate::EngineEvent)s.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioEngine: Send {
    /// Add a track to the engine's internal list
    ///
    /// # Errors
    /// Returns an error if the engine refuses the track
    async fn load(&mut self, track: EngineTrack) -> Result<()>;

    /// Start or resume playback of whatever is loaded (no-op when idle)
    async fn play(&mut self) -> Result<()>;

    async fn pause(&mut self) -> Result<()>;

    /// Halt playback
    async fn stop(&mut self) -> Result<()>;

    /// Halt playback and unload everything, returning to [`EngineState::None`]
    async fn reset(&mut self) -> Result<()>;

    /// Reload the current track after an error
    async fn retry(&mut self) -> Result<()>;

    /// Drop the engine's internal track list
    async fn clear(&mut self) -> Result<()>;

    /// Seek within the current track
    async fn seek_to(&mut self, position: Duration) -> Result<()>;

    /// Current lifecycle state
    async fn state(&mut self) -> Result<EngineState>;

    /// Persisted repeat mode
    async fn repeat_mode(&mut self) -> Result<RepeatMode>;

    async fn set_repeat_mode(&mut self, mode: RepeatMode) -> Result<()>;
}
