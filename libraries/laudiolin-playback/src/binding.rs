//! Device audio binding
//!
//! Thin adapter between the controller and the platform [`AudioEngine`]:
//! - Turns [`TrackInfo`] descriptors into loadable [`EngineTrack`]s,
//!   resolving remote ids to streaming URLs
//! - Forwards playback commands
//! - Translates raw engine state changes into [`EngineEvent`]s

use crate::config::PlaybackConfig;
use crate::engine::{AudioEngine, EngineTrack};
use crate::error::{PlaybackError, Result};
use crate::events::EngineEvent;
use crate::types::{EngineState, RepeatMode, TrackInfo, TrackSource};
use std::time::Duration;
use url::Url;

/// Owns the audio engine and the settings needed to address the backend
pub struct DeviceBinding<E> {
    engine: E,

    /// Backend root, used to resolve relative artwork
    base_url: Url,

    /// `<base_url>/download`, query added per track
    download_url: Url,

    user_agent: String,
    content_type: String,
}

impl<E: AudioEngine> DeviceBinding<E> {
    /// Wrap an engine using the backend settings from `config`
    pub fn new(engine: E, config: &PlaybackConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut download_url = base_url.clone();
        download_url
            .path_segments_mut()
            .map_err(|()| {
                PlaybackError::Config(format!("base URL {base_url} cannot carry a path"))
            })?
            .pop_if_empty()
            .push("download");

        Ok(Self {
            engine,
            base_url,
            download_url,
            user_agent: config.user_agent.clone(),
            content_type: config.content_type.clone(),
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Build the engine's view of a track
    pub fn transform(&self, track: &TrackInfo) -> EngineTrack {
        match &track.source {
            TrackSource::Remote => EngineTrack {
                id: track.id.clone(),
                url: self.stream_url(&track.id),
                title: track.title.clone(),
                artist: track.artist.clone(),
                artwork: self.resolve_icon(&track.icon),
                user_agent: Some(self.user_agent.clone()),
                content_type: Some(self.content_type.clone()),
            },
            TrackSource::Local { file_path } => EngineTrack {
                id: track.id.clone(),
                url: file_path.to_string_lossy().into_owned(),
                title: track.title.clone(),
                artist: track.artist.clone(),
                artwork: track.icon.clone(),
                user_agent: None,
                content_type: None,
            },
        }
    }

    /// Streaming URL for a remote track id
    pub fn stream_url(&self, id: &str) -> String {
        let mut url = self.download_url.clone();
        url.query_pairs_mut().clear().append_pair("id", id);
        url.into()
    }

    /// Absolute icons pass through; relative ones are served by the backend
    fn resolve_icon(&self, icon: &str) -> String {
        if icon.is_empty() || Url::parse(icon).is_ok() {
            return icon.to_string();
        }

        match self.base_url.join(icon) {
            Ok(url) => url.into(),
            Err(e) => {
                tracing::debug!("Could not resolve icon {icon:?}: {e}");
                icon.to_string()
            }
        }
    }

    /// Load a track and start it
    pub async fn start(&mut self, track: &TrackInfo) -> Result<()> {
        let engine_track = self.transform(track);
        tracing::debug!("Loading {} from {}", engine_track.id, engine_track.url);

        self.engine.load(engine_track).await?;
        self.engine.play().await
    }

    pub async fn play(&mut self) -> Result<()> {
        self.engine.play().await
    }

    pub async fn pause(&mut self) -> Result<()> {
        self.engine.pause().await
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.engine.stop().await
    }

    pub async fn reset(&mut self) -> Result<()> {
        self.engine.reset().await
    }

    pub async fn retry(&mut self) -> Result<()> {
        self.engine.retry().await
    }

    pub async fn clear(&mut self) -> Result<()> {
        self.engine.clear().await
    }

    pub async fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.engine.seek_to(position).await
    }

    pub async fn state(&mut self) -> Result<EngineState> {
        self.engine.state().await
    }

    pub async fn repeat_mode(&mut self) -> Result<RepeatMode> {
        self.engine.repeat_mode().await
    }

    pub async fn set_repeat_mode(&mut self, mode: RepeatMode) -> Result<()> {
        self.engine.set_repeat_mode(mode).await
    }
}

/// Translate a raw engine state change into a lifecycle event
///
/// `None` means the engine signalled a change without a state. Buffering is
/// transient and produces no event.
///
/// ```rust,no_run
/// use laudiolin_playback::{binding::relay, EngineEvent, EngineState};
/// use tokio::sync::mpsc;
///
/// // Engine state callback feeding `PlaybackController::run`
/// async fn on_state_change(events: &mpsc::Sender<EngineEvent>, state: Option<EngineState>) {
///     if let Some(event) = relay(state) {
///         let _ = events.send(event).await;
///     }
/// }
/// ```
pub fn relay(state: Option<EngineState>) -> Option<EngineEvent> {
    let Some(state) = state else {
        return Some(EngineEvent::StateUnknown);
    };

    match state {
        EngineState::Playing => Some(EngineEvent::Played),
        EngineState::Paused => Some(EngineEvent::Paused),
        EngineState::None => Some(EngineEvent::Stopped),
        EngineState::Ended => Some(EngineEvent::Ended),
        EngineState::Error => Some(EngineEvent::Errored { message: None }),
        EngineState::Buffering => None,
    }
}
