//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Local config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "look-back.yaml";

pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_SITE_URL: &str = "https://boardgamegeek.com";
pub const DEFAULT_XML_API_URL: &str = "https://boardgamegeek.com/xmlapi2";
pub const DEFAULT_VIDEO_API_URL: &str = "https://api.geekdo.com/api";

/// Look-back configuration with layered hierarchy
///
/// Every field is optional so layers can be merged; the accessors supply
/// the built-in defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the CSV reports are written to
    pub output_dir: Option<PathBuf>,

    /// BGG XML API application token
    pub api_token: Option<String>,

    /// Base URL of the BGG XML API2
    pub xml_api_url: Option<String>,

    /// Base URL of the geekdo JSON API (videos)
    pub video_api_url: Option<String>,

    /// Prefix for game links in reports
    pub site_url: Option<String>,

    /// HTTP request timeout
    pub timeout_secs: Option<u64>,

    /// How often to ask again while BGG is still queueing a collection request
    pub queued_attempts: Option<u32>,

    /// Pause between those attempts
    pub queued_wait_secs: Option<u64>,

    /// Add the "YT Description" column
    pub include_description: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (see accessors)

        // 2. Global user config (~/.config/bgg-look-back/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./look-back.yaml)
        if let Some(local) = Self::read_file(Path::new(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "bgg-look-back")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Parse a YAML config file; missing or broken files yield `None`
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable config file"
                );
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping invalid config file");
                None
            }
        }
    }

    /// Apply `LOOK_BACK_OUTPUT_DIR` and `BGG_API_TOKEN`
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("LOOK_BACK_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(token) = var("BGG_API_TOKEN").filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.api_token.is_some() {
            self.api_token = other.api_token;
        }
        if other.xml_api_url.is_some() {
            self.xml_api_url = other.xml_api_url;
        }
        if other.video_api_url.is_some() {
            self.video_api_url = other.video_api_url;
        }
        if other.site_url.is_some() {
            self.site_url = other.site_url;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.queued_attempts.is_some() {
            self.queued_attempts = other.queued_attempts;
        }
        if other.queued_wait_secs.is_some() {
            self.queued_wait_secs = other.queued_wait_secs;
        }
        if other.include_description.is_some() {
            self.include_description = other.include_description;
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn xml_api_url(&self) -> &str {
        self.xml_api_url.as_deref().unwrap_or(DEFAULT_XML_API_URL)
    }

    pub fn video_api_url(&self) -> &str {
        self.video_api_url.as_deref().unwrap_or(DEFAULT_VIDEO_API_URL)
    }

    pub fn site_url(&self) -> &str {
        self.site_url.as_deref().unwrap_or(DEFAULT_SITE_URL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(30)
    }

    pub fn queued_attempts(&self) -> u32 {
        self.queued_attempts.unwrap_or(5)
    }

    pub fn queued_wait_secs(&self) -> u64 {
        self.queued_wait_secs.unwrap_or(2)
    }

    pub fn include_description(&self) -> bool {
        self.include_description.unwrap_or(true)
    }
}
