//! Playback configuration
use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Configuration for the playback controller
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Backend the remote tracks are streamed from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Consecutive load failures tolerated before skipping a track
    #[serde(default = "default_max_load_retries")]
    pub max_load_retries: u32,

    /// `User-Agent` sent when streaming remote tracks
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Content type announced for remote tracks
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Log every engine state change at info level
    #[serde(default)]
    pub log_playback_state: bool,

    /// Log every play request at info level
    #[serde(default)]
    pub log_track_info: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_load_retries: default_max_load_retries(),
            user_agent: default_user_agent(),
            content_type: default_content_type(),
            log_playback_state: false,
            log_track_info: false,
        }
    }
}

impl PlaybackConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables prefixed with `LAUDIOLIN_` override the file,
    /// e.g. `LAUDIOLIN_BASE_URL` or `LAUDIOLIN_MAX_LOAD_RETRIES`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            } else {
                tracing::debug!("Config file {} not found, using defaults", path.display());
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("LAUDIOLIN")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| PlaybackError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(PlaybackError::Config(format!(
                "base URL {} cannot carry a path",
                self.base_url
            )));
        }

        if self.max_load_retries == 0 {
            return Err(PlaybackError::Config(
                "max_load_retries must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_load_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    format!("laudiolin/{}", env!("CARGO_PKG_VERSION"))
}

fn default_content_type() -> String {
    "audio/mpeg".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.max_load_retries, 3);
        assert_eq!(config.content_type, "audio/mpeg");
        assert!(config.user_agent.starts_with("laudiolin/"));
        assert!(!config.log_playback_state);
        assert!(!config.log_track_info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "base_url = \"https://api.example.com\"\nmax_load_retries = 5\nlog_track_info = true"
        )
        .unwrap();

        let config = PlaybackConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.max_load_retries, 5);
        assert!(config.log_track_info);
        assert_eq!(config.content_type, "audio/mpeg");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = PlaybackConfig::load(Some(Path::new("/nonexistent/laudiolin.toml"))).unwrap();
        assert_eq!(config.max_load_retries, 3);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = PlaybackConfig {
            base_url: "not a url".to_string(),
            ..PlaybackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaybackError::InvalidBaseUrl(_))
        ));

        let config = PlaybackConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..PlaybackConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlaybackError::Config(_))));
    }

    #[test]
    fn rejects_zero_retries() {
        let config = PlaybackConfig {
            max_load_retries: 0,
            ..PlaybackConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlaybackError::Config(_))));
    }
}
