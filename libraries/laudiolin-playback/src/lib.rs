//! Laudiolin - Playback Control
//!
//! Remote-controllable playback controller for the Laudiolin client.
//!
//! This crate provides:
//! - FIFO track queues (forward queue + back-history)
//! - Play / queue / resume decisions for every play request
//! - Repeat modes (Off, Queue, Track) cycled on the audio engine
//! - Retry-on-error recovery with a bounded number of attempts
//! - Reconciliation with a remote playback session (`sync`)
//!
//! # Architecture
//!
//! `laudiolin-playback` does not decode or output audio. The platform audio
//! engine is reached through the [`AudioEngine`] trait; the
//! [`DeviceBinding`] turns track descriptors into engine tracks and relays
//! engine state changes back as [`EngineEvent`]s. A single
//! [`PlaybackController`] owns both queues and the active track.
//!
//! # Example
//!
//! ```rust,no_run
//! use laudiolin_playback::{
//!     AudioEngine, PlaybackConfig, PlaybackController, PlayOptions, TrackInfo,
//! };
//!
//! # async fn example<E: AudioEngine>(engine: E) -> laudiolin_playback::Result<()> {
//! let config = PlaybackConfig::load(None)?;
//! let mut controller = PlaybackController::new(engine, &config)?;
//!
//! let album = vec![
//!     TrackInfo::remote("t1", "Opening", "Band", ""),
//!     TrackInfo::remote("t2", "Closing", "Band", ""),
//! ];
//!
//! // Start the album from scratch, replacing anything queued
//! controller
//!     .play(album, PlayOptions::reset().with_clear().from_playlist("Album"))
//!     .await?;
//!
//! controller.skip_to_next().await?;
//! controller.skip_to_previous().await?;
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod config;
mod controller;
pub mod engine;
mod error;
pub mod events;
mod player;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use binding::DeviceBinding;
pub use config::PlaybackConfig;
pub use controller::{PlaybackController, PlaybackSnapshot};
pub use engine::{AudioEngine, EngineTrack};
pub use error::{PlaybackError, Result};
pub use events::{EngineEvent, RemoteCommand, SyncState};
pub use player::PlayerState;
pub use queue::Queue;
pub use types::{EngineState, PlayOptions, PlayRequest, RepeatMode, TrackInfo, TrackSource};
