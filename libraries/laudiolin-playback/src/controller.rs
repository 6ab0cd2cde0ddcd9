//! Playback controller - the queue/playback state machine
//!
//! Decides, for every play request, whether to start immediately, queue, or
//! resume; owns next/previous navigation, repeat-mode cycling, retry-on-error
//! recovery, and reconciliation with the remote playback session.
//!
//! The controller keeps no playback state enum of its own. It reacts to the
//! state the engine reports and to the contents of its two queues.

use crate::{
    binding::DeviceBinding,
    config::PlaybackConfig,
    engine::AudioEngine,
    error::Result,
    events::{EngineEvent, RemoteCommand},
    player::PlayerState,
    queue::Queue,
    shuffle::shuffle_random,
    types::{EngineState, PlayOptions, PlayRequest, RepeatMode, TrackInfo},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Read-only view of the controller for UI and diagnostics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub track: Option<TrackInfo>,
    pub started_at: DateTime<Utc>,
    pub queue_len: usize,
    pub next: Option<TrackInfo>,
    pub history_len: usize,
    pub from_playlist: Option<String>,
}

/// Playback controller
///
/// Sole owner of the forward queue, the back-history queue, the active
/// track slot and the retry counter. Every method takes `&mut self`, so
/// callers finish one command before issuing the next.
pub struct PlaybackController<E> {
    binding: DeviceBinding<E>,
    player: PlayerState,

    /// What plays next
    queue: Queue<TrackInfo>,

    /// What played before
    back_queue: Queue<TrackInfo>,

    /// Consecutive load failures of the current track
    load_tries: u32,
    max_load_retries: u32,

    /// Playlist the current material was started from
    from_playlist: Option<String>,

    log_playback_state: bool,
    log_track_info: bool,
}

impl<E: AudioEngine> PlaybackController<E> {
    /// Create a controller driving `engine`
    pub fn new(engine: E, config: &PlaybackConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            binding: DeviceBinding::new(engine, config)?,
            player: PlayerState::new(),
            queue: Queue::new(),
            back_queue: Queue::new(),
            load_tries: 0,
            max_load_retries: config.max_load_retries,
            from_playlist: None,
            log_playback_state: config.log_playback_state,
            log_track_info: config.log_track_info,
        })
    }

    // ===== Playback Control =====

    /// Play a track, a list of tracks, or whatever comes next
    ///
    /// Starts the first track right away when the engine is idle. Anything
    /// else (the rest of a list, or everything while the engine is busy) is
    /// appended to the forward queue. Load failures are logged, not returned;
    /// the engine's error event drives recovery.
    pub async fn play(
        &mut self,
        request: impl Into<PlayRequest>,
        options: PlayOptions,
    ) -> Result<()> {
        let request = request.into();
        if self.log_track_info {
            info!("Playing track: {request:?}");
        } else {
            debug!("Play request: {request:?} ({options:?})");
        }

        self.from_playlist = options.playlist;

        if options.reset {
            self.binding.reset().await?;
        }

        let mut tracks = match request {
            PlayRequest::Resume => return self.resume().await,
            PlayRequest::Track(track) => vec![track],
            PlayRequest::Tracks(tracks) => tracks,
        };

        if options.clear {
            self.queue.clear();
        }

        if tracks.is_empty() {
            warn!("Ignoring play request without tracks");
            return Ok(());
        }

        if options.shuffle {
            shuffle_random(&mut tracks);
        }

        self.play_tracks(tracks).await
    }

    /// Play the next queued track, or resume the engine when nothing is queued
    async fn resume(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return self.binding.play().await;
        }

        // Track repeat restarts the current track and leaves the queue as is
        if self.binding.state().await? == EngineState::None
            && self.binding.repeat_mode().await? == RepeatMode::Track
        {
            debug!("Repeat track is on, restarting current track");
            return self.binding.seek_to(Duration::ZERO).await;
        }

        let Some(next) = self.queue.dequeue() else {
            return Ok(());
        };
        self.from_playlist = None;
        self.play_tracks(vec![next]).await
    }

    /// Start `tracks[0]` if the engine is idle, otherwise queue everything
    async fn play_tracks(&mut self, tracks: Vec<TrackInfo>) -> Result<()> {
        let mut tracks = tracks.into_iter();
        let Some(first) = tracks.next() else {
            return Ok(());
        };

        let state = self.binding.state().await?;
        if state != EngineState::None {
            debug!("Engine is {state:?}, queueing {} track(s)", tracks.len() + 1);
            self.queue.enqueue(first);
            self.queue.enqueue_all(tracks);
            return Ok(());
        }

        let previous = self.player.track().cloned();

        match self.binding.repeat_mode().await? {
            RepeatMode::Track => {
                // Repeating wins over starting new material
                debug!("Repeat track is on, restarting current track");
                return self.binding.seek_to(Duration::ZERO).await;
            }
            RepeatMode::Queue => {
                if let Some(previous) = &previous {
                    self.queue.enqueue(previous.clone());
                }
            }
            RepeatMode::Off => {}
        }

        self.queue.enqueue_all(tracks);

        if let Some(previous) = previous {
            self.back_queue.enqueue(previous);
        }

        match self.binding.start(&first).await {
            Ok(()) => {
                info!("Now playing {} by {} ({})", first.title, first.artist, first.id);
                self.load_tries = 0;
                self.player.set_track(first);
            }
            Err(e) => warn!("Failed to play track {}: {e}", first.id),
        }

        Ok(())
    }

    /// Stop the current track and play the next queued one
    pub async fn skip_to_next(&mut self) -> Result<()> {
        self.play(PlayRequest::Resume, PlayOptions::reset()).await
    }

    /// Go back to the oldest track in the history
    ///
    /// The active track is queued so it can be returned to. No-op when the
    /// history is empty.
    pub async fn skip_to_previous(&mut self) -> Result<()> {
        let Some(track) = self.back_queue.dequeue() else {
            debug!("No previous track");
            return Ok(());
        };

        if let Some(current) = self.player.track().cloned() {
            self.queue.enqueue(current);
        }

        self.play(track, PlayOptions::reset()).await
    }

    /// Shuffle the forward queue
    pub fn shuffle(&mut self) {
        self.queue.shuffle();
    }

    /// Advance the engine's repeat mode and return the new mode
    pub async fn next_repeat_mode(&mut self) -> Result<RepeatMode> {
        let mode = self.binding.repeat_mode().await?.next();
        self.binding.set_repeat_mode(mode).await?;

        debug!("Repeat mode is now {mode:?}");
        Ok(mode)
    }

    /// Whether the engine reports playback as paused
    pub async fn is_paused(&mut self) -> Result<bool> {
        self.player.is_paused(&mut self.binding).await
    }

    // ===== Remote Session =====

    /// Reconcile with an authoritative snapshot from the remote session
    ///
    /// The track is replaced before seeking, and seeking happens before
    /// pause/resume, so a "new track + seek + paused" snapshot lands on the
    /// new track.
    pub async fn sync(
        &mut self,
        track: Option<TrackInfo>,
        progress: Duration,
        paused: bool,
        seek: bool,
    ) -> Result<()> {
        let Some(track) = track else {
            debug!("Remote session has no track, resetting");
            return self.binding.reset().await;
        };

        if self.player.track().map(|t| t.id.as_str()) != Some(track.id.as_str()) {
            self.play(track, PlayOptions::reset()).await?;
        }

        if seek {
            self.binding.seek_to(progress).await?;
        }

        if paused {
            self.binding.pause().await
        } else {
            self.binding.play().await
        }
    }

    /// Apply a command pushed by the remote session
    pub async fn handle_remote(&mut self, command: RemoteCommand) -> Result<()> {
        debug!("Remote command: {command:?}");

        match command {
            RemoteCommand::Play => self.binding.play().await,
            RemoteCommand::Pause => self.binding.pause().await,
            RemoteCommand::Stop => self.binding.stop().await,
            RemoteCommand::Next => self.skip_to_next().await,
            RemoteCommand::Previous => self.skip_to_previous().await,
            RemoteCommand::Seek { position } => {
                self.binding.seek_to(Duration::from_millis(position)).await
            }
            RemoteCommand::Sync(state) => {
                let progress = state.progress();
                self.sync(state.track, progress, state.paused, state.seek)
                    .await
            }
        }
    }

    // ===== Engine Events =====

    /// React to a lifecycle event from the engine
    pub async fn handle_event(&mut self, event: EngineEvent) -> Result<()> {
        if self.log_playback_state {
            info!("Playback state changed: {event:?}");
        } else {
            debug!("Engine event: {event:?}");
        }

        match event {
            EngineEvent::Played => {
                self.load_tries = 0;
                Ok(())
            }
            EngineEvent::Paused | EngineEvent::Stopped => Ok(()),
            EngineEvent::Ended => self.on_track_ended().await,
            EngineEvent::Errored { message } => self.on_track_error(message).await,
            EngineEvent::StateUnknown => self.binding.reset().await,
        }
    }

    async fn on_track_ended(&mut self) -> Result<()> {
        // Drop the finished track from the engine's own list
        self.binding.clear().await?;

        if self.queue.is_empty() {
            self.binding.stop().await
        } else {
            self.play(PlayRequest::Resume, PlayOptions::default()).await
        }
    }

    async fn on_track_error(&mut self, message: Option<String>) -> Result<()> {
        self.load_tries += 1;

        if self.load_tries >= self.max_load_retries {
            error!(
                "Failed to load track after {} tries{}",
                self.load_tries,
                message.map(|m| format!(": {m}")).unwrap_or_default()
            );
            self.load_tries = 0;
            self.binding.reset().await?;
            return self.skip_to_next().await;
        }

        warn!(
            "Track failed to load (attempt {}/{}), retrying",
            self.load_tries, self.max_load_retries
        );
        self.binding.retry().await
    }

    /// Consume engine events and remote commands until both channels close
    ///
    /// Inputs are handled one at a time. A failing handler is logged and
    /// does not stop the loop.
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<EngineEvent>,
        mut commands: mpsc::Receiver<RemoteCommand>,
    ) {
        let mut events_open = true;
        let mut commands_open = true;

        while events_open || commands_open {
            tokio::select! {
                event = events.recv(), if events_open => match event {
                    Some(event) => {
                        if let Err(e) = self.handle_event(event).await {
                            error!("Failed to handle engine event: {e}");
                        }
                    }
                    None => events_open = false,
                },
                command = commands.recv(), if commands_open => match command {
                    Some(command) => {
                        if let Err(e) = self.handle_remote(command).await {
                            error!("Failed to handle remote command: {e}");
                        }
                    }
                    None => commands_open = false,
                },
            }
        }

        debug!("Playback event loop finished");
    }

    // ===== Queries =====

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn current_track(&self) -> Option<&TrackInfo> {
        self.player.track()
    }

    /// Forward queue
    pub fn queue(&self) -> &Queue<TrackInfo> {
        &self.queue
    }

    /// Back-history queue
    pub fn history(&self) -> &Queue<TrackInfo> {
        &self.back_queue
    }

    pub fn load_tries(&self) -> u32 {
        self.load_tries
    }

    pub fn from_playlist(&self) -> Option<&str> {
        self.from_playlist.as_deref()
    }

    pub fn binding(&self) -> &DeviceBinding<E> {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut DeviceBinding<E> {
        &mut self.binding
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            track: self.player.track().cloned(),
            started_at: self.player.started_at(),
            queue_len: self.queue.len(),
            next: self.queue.peek().cloned(),
            history_len: self.back_queue.len(),
            from_playlist: self.from_playlist.clone(),
        }
    }
}
