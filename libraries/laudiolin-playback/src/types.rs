//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Track descriptor
///
/// Identifies one playable unit along with the metadata shown while it plays.
/// Two descriptors are the same track when their ids match, regardless of
/// the rest of the metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Artwork reference (URL or path, resolved by the device binding)
    #[serde(default)]
    pub icon: String,

    /// Where the audio for this track lives
    #[serde(flatten)]
    pub source: TrackSource,
}

impl TrackInfo {
    /// Create a descriptor for a track streamed from the backend
    pub fn remote(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            icon: icon.into(),
            source: TrackSource::Remote,
        }
    }

    /// Create a descriptor for a track stored on the device
    pub fn local(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        icon: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            icon: icon.into(),
            source: TrackSource::Local {
                file_path: file_path.into(),
            },
        }
    }

    /// Whether the audio is streamed from the backend
    pub fn is_remote(&self) -> bool {
        matches!(self.source, TrackSource::Remote)
    }
}

impl PartialEq for TrackInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TrackInfo {}

impl Hash for TrackInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Source kind of a track
///
/// Remote tracks are located by their id, which the binding resolves to a
/// streaming URL. Local tracks carry a direct filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TrackSource {
    /// Streamed from the backend
    Remote,

    /// Stored on the device
    #[serde(rename_all = "camelCase")]
    Local { file_path: PathBuf },
}

/// Repeat mode, persisted by the device audio engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatMode {
    /// Stop when the queue runs out
    #[default]
    Off,

    /// Recycle finished tracks to the end of the queue
    Queue,

    /// Repeat the current track
    Track,
}

impl RepeatMode {
    /// Successor in the Off -> Queue -> Track -> Off rotation
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Queue,
            RepeatMode::Queue => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }
}

/// Lifecycle state reported by the device audio engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineState {
    /// Nothing loaded
    #[default]
    None,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Waiting for data
    Buffering,

    /// Track reached its end
    Ended,

    /// Track failed to load or play
    Error,
}

/// What a play request asks for
#[derive(Debug, Clone, PartialEq)]
pub enum PlayRequest {
    /// Play the next queued track, or resume the engine
    Resume,

    /// Play a single track
    Track(TrackInfo),

    /// Play the first track of a list and queue the rest
    Tracks(Vec<TrackInfo>),
}

impl From<TrackInfo> for PlayRequest {
    fn from(track: TrackInfo) -> Self {
        PlayRequest::Track(track)
    }
}

impl From<Vec<TrackInfo>> for PlayRequest {
    fn from(tracks: Vec<TrackInfo>) -> Self {
        PlayRequest::Tracks(tracks)
    }
}

impl From<Option<TrackInfo>> for PlayRequest {
    fn from(track: Option<TrackInfo>) -> Self {
        track.map_or(PlayRequest::Resume, PlayRequest::Track)
    }
}

/// Options for a play request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayOptions {
    /// Stop whatever is active first
    pub reset: bool,

    /// Empty the forward queue first
    pub clear: bool,

    /// Shuffle a list before queueing it
    pub shuffle: bool,

    /// Name of the playlist the tracks were picked from
    pub playlist: Option<String>,
}

impl PlayOptions {
    /// Options with only `reset` set
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    pub fn with_clear(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn with_shuffle(mut self) -> Self {
        self.shuffle = true;
        self
    }

    pub fn from_playlist(mut self, name: impl Into<String>) -> Self {
        self.playlist = Some(name.into());
        self
    }
}
