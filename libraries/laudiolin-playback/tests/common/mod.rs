//! Shared test helpers: a recording audio engine and track builders

use async_trait::async_trait;
use laudiolin_playback::{
    AudioEngine, EngineState, EngineTrack, PlaybackConfig, PlaybackController, PlaybackError,
    RepeatMode, Result, TrackInfo,
};
use std::collections::HashSet;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Engine command as observed by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(String),
    Play,
    Pause,
    Stop,
    Reset,
    Retry,
    Clear,
    SeekTo(Duration),
    SetRepeatMode(RepeatMode),
}

/// In-memory engine that records every command it receives
///
/// State transitions follow a real player closely enough for the
/// controller: `play` only starts something when a track is loaded,
/// `reset`/`clear`/`stop` return to idle.
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub state: EngineState,
    pub repeat: RepeatMode,
    pub loaded: Vec<EngineTrack>,
    pub calls: Vec<Call>,

    /// Track ids whose `load` fails
    pub failing: HashSet<String>,

    /// Every state query fails while set
    pub unreachable: bool,
}

#[async_trait]
impl AudioEngine for FakeEngine {
    async fn load(&mut self, track: EngineTrack) -> Result<()> {
        self.calls.push(Call::Load(track.id.clone()));
        if self.failing.contains(&track.id) {
            return Err(PlaybackError::engine(format!("cannot load {}", track.id)));
        }
        self.loaded.push(track);
        Ok(())
    }

    async fn play(&mut self) -> Result<()> {
        self.calls.push(Call::Play);
        if !self.loaded.is_empty() {
            self.state = EngineState::Playing;
        }
        Ok(())
    }

    async fn pause(&mut self) -> Result<()> {
        self.calls.push(Call::Pause);
        if self.state == EngineState::Playing {
            self.state = EngineState::Paused;
        }
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.calls.push(Call::Stop);
        self.state = EngineState::None;
        Ok(())
    }

    async fn reset(&mut self) -> Result<()> {
        self.calls.push(Call::Reset);
        self.loaded.clear();
        self.state = EngineState::None;
        Ok(())
    }

    async fn retry(&mut self) -> Result<()> {
        self.calls.push(Call::Retry);
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        self.calls.push(Call::Clear);
        self.loaded.clear();
        self.state = EngineState::None;
        Ok(())
    }

    async fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.calls.push(Call::SeekTo(position));
        Ok(())
    }

    async fn state(&mut self) -> Result<EngineState> {
        if self.unreachable {
            return Err(PlaybackError::engine("engine unreachable"));
        }
        Ok(self.state)
    }

    async fn repeat_mode(&mut self) -> Result<RepeatMode> {
        Ok(self.repeat)
    }

    async fn set_repeat_mode(&mut self, mode: RepeatMode) -> Result<()> {
        self.calls.push(Call::SetRepeatMode(mode));
        self.repeat = mode;
        Ok(())
    }
}

pub fn create_track(id: &str) -> TrackInfo {
    TrackInfo::remote(id, format!("Track {id}"), "Test Artist", "")
}

/// Route controller logs to the test harness (`RUST_LOG=debug` to see them)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn controller() -> PlaybackController<FakeEngine> {
    init_tracing();
    PlaybackController::new(FakeEngine::default(), &PlaybackConfig::default()).unwrap()
}

pub fn engine(controller: &mut PlaybackController<FakeEngine>) -> &mut FakeEngine {
    controller.binding_mut().engine_mut()
}

/// Drain the commands recorded so far
pub fn take_calls(controller: &mut PlaybackController<FakeEngine>) -> Vec<Call> {
    std::mem::take(&mut engine(controller).calls)
}

pub fn queue_ids(controller: &PlaybackController<FakeEngine>) -> Vec<String> {
    controller.queue().iter().map(|t| t.id.clone()).collect()
}

pub fn history_ids(controller: &PlaybackController<FakeEngine>) -> Vec<String> {
    controller.history().iter().map(|t| t.id.clone()).collect()
}

pub fn current_id(controller: &PlaybackController<FakeEngine>) -> Option<String> {
    controller.current_track().map(|t| t.id.clone())
}

/// Let the engine report the current track as finished
pub async fn finish_track(controller: &mut PlaybackController<FakeEngine>) {
    engine(controller).state = EngineState::Ended;
    controller
        .handle_event(laudiolin_playback::EngineEvent::Ended)
        .await
        .unwrap();
}
