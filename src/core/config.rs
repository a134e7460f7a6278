//! Session and process configuration.
//!
//! `GameConfig` is the immutable bundle every entity is built from.
//! `AppConfig` holds the process settings, read from `~/.flappy/config.json`
//! with environment overrides on top.

use crate::core::constants::*;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const ENV_FPS: &str = "FLAPPY_FPS";
pub const ENV_METRICS_PORT: &str = "FLAPPY_METRICS_PORT";
pub const ENV_PROBE_URL: &str = "FLAPPY_PROBE_URL";
pub const ENV_SCORE_URL: &str = "FLAPPY_SCORE_URL";
pub const ENV_ASSET_URL: &str = "FLAPPY_ASSET_URL";
pub const ENV_ASSET_DIR: &str = "FLAPPY_ASSET_DIR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Logical window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub width: f64,
    pub height: f64,
}

impl Window {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height of the playable area; the floor starts here.
    pub fn viewport_height(&self) -> f64 {
        self.height * VIEWPORT_RATIO
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub fps: u32,
    pub window: Window,
    pub pipe_gap: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: TARGET_FPS,
            window: Window::default(),
            pipe_gap: PIPE_GAP,
        }
    }
}

impl GameConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fps: u32,
    pub metrics_port: u16,
    pub probe_url: String,
    pub probe_timeout_ms: u64,
    pub latency_interval_secs: u64,
    pub bandwidth_interval_secs: u64,
    /// Score submissions are only logged when unset.
    pub score_url: Option<String>,
    pub asset_base_url: String,
    /// Local directory that takes precedence over `asset_base_url`.
    pub asset_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: TARGET_FPS,
            metrics_port: METRICS_PORT,
            probe_url: DEFAULT_PROBE_URL.to_string(),
            probe_timeout_ms: LATENCY_PROBE_TIMEOUT_MS,
            latency_interval_secs: LATENCY_PROBE_INTERVAL_SECONDS,
            bandwidth_interval_secs: BANDWIDTH_SAMPLE_INTERVAL_SECONDS,
            score_url: None,
            asset_base_url: ASSET_BASE_URL.to_string(),
            asset_dir: None,
        }
    }
}

impl AppConfig {
    /// Load `~/.flappy/config.json` (defaults if missing or invalid) and apply
    /// environment overrides. Invalid overrides are logged and skipped.
    pub fn load() -> Self {
        let base: AppConfig = load_json_or_default(CONFIG_FILE);
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_FPS) {
            match parse_fps(&raw) {
                Ok(fps) => self.fps = fps,
                Err(error) => warn!(%error, "config_override_ignored"),
            }
        }
        if let Some(raw) = lookup(ENV_METRICS_PORT) {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.metrics_port = port,
                Err(_) => warn!(
                    error = %ConfigError::InvalidValue { key: ENV_METRICS_PORT, value: raw },
                    "config_override_ignored"
                ),
            }
        }
        if let Some(url) = lookup(ENV_PROBE_URL).filter(|s| !s.trim().is_empty()) {
            self.probe_url = url;
        }
        if let Some(url) = lookup(ENV_SCORE_URL) {
            self.score_url = Some(url).filter(|s| !s.trim().is_empty());
        }
        if let Some(url) = lookup(ENV_ASSET_URL).filter(|s| !s.trim().is_empty()) {
            self.asset_base_url = url;
        }
        if let Some(dir) = lookup(ENV_ASSET_DIR).filter(|s| !s.trim().is_empty()) {
            self.asset_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            fps: self.fps.max(1),
            ..GameConfig::default()
        }
    }

    pub fn latency_interval(&self) -> Duration {
        Duration::from_secs(self.latency_interval_secs.max(1))
    }

    pub fn bandwidth_interval(&self) -> Duration {
        Duration::from_secs(self.bandwidth_interval_secs.max(1))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(1))
    }
}

fn parse_fps(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(fps) if (1..=240).contains(&fps) => Ok(fps),
        _ => Err(ConfigError::InvalidValue {
            key: ENV_FPS,
            value: raw.to_string(),
        }),
    }
}
