//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::image::{DEFAULT_CACHE_SIZE, ImageFetcherConfig};

pub(crate) const APP_NAME: &str = "folio";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "folio";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Content locations.
    #[serde(default)]
    pub content: ContentConfig,

    /// Image cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// HTTP fetching configuration.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Where portfolio content lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory served at the site root.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Pictures directory, relative to `public_dir`.
    #[serde(default = "default_pictures_path")]
    pub pictures_path: String,

    /// Videos directory, relative to `public_dir`.
    #[serde(default = "default_videos_path")]
    pub videos_path: String,
}

impl ContentConfig {
    /// Returns the on-disk pictures directory.
    #[must_use]
    pub fn pictures_dir(&self) -> PathBuf {
        self.public_dir.join(self.pictures_path.trim_matches('/'))
    }

    /// Returns the on-disk videos directory.
    #[must_use]
    pub fn videos_dir(&self) -> PathBuf {
        self.public_dir.join(self.videos_path.trim_matches('/'))
    }

    /// Returns the URL prefix under which pictures are served.
    #[must_use]
    pub fn public_base(&self) -> String {
        format!("/{}", self.pictures_path.trim_matches('/'))
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            pictures_path: default_pictures_path(),
            videos_path: default_videos_path(),
        }
    }
}

/// Image cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached images.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Merge concurrent preloads of the same image into one fetch.
    #[serde(default)]
    pub single_flight: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_SIZE,
            single_flight: false,
        }
    }
}

/// HTTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Site origin used to resolve relative image paths, e.g. `https://example.com`.
    #[serde(default)]
    pub origin: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            origin: None,
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_pictures_path() -> String {
    "content/pictures".to_string()
}

fn default_videos_path() -> String {
    "content/videos".to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(public_dir) = &args.public_dir {
            self.content.public_dir = public_dir.clone();
        }
        if let Some(capacity) = args.cache_capacity {
            self.cache.capacity = capacity;
        }
        if let Some(single_flight) = args.single_flight {
            self.cache.single_flight = single_flight;
        }
        if let Some(origin) = &args.origin {
            self.http.origin = Some(origin.clone());
        }
        if let Some(timeout) = args.timeout {
            self.http.timeout_secs = timeout;
        }
    }

    /// Returns the fetcher settings derived from this configuration.
    #[must_use]
    pub fn fetcher_config(&self) -> ImageFetcherConfig {
        ImageFetcherConfig {
            timeout_secs: self.http.timeout_secs,
            origin: self.http.origin.clone(),
            public_dir: self.content.public_dir.clone(),
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            content: ContentConfig::default(),
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [content]
            public_dir = "site/public"

            [cache]
            single_flight = true

            [http]
            origin = "https://example.com"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.content.pictures_dir(),
            PathBuf::from("site/public/content/pictures")
        );
        assert_eq!(config.content.public_base(), "/content/pictures");
        assert_eq!(config.cache.capacity, DEFAULT_CACHE_SIZE);
        assert!(config.cache.single_flight);
        assert_eq!(config.http.origin.as_deref(), Some("https://example.com"));
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.cache.capacity, 30);
        assert!(!config.cache.single_flight);
        assert_eq!(config.content.videos_dir(), PathBuf::from("public/content/videos"));
        assert!(config.http.origin.is_none());
    }

    #[test]
    fn test_merge_with_args() {
        let args = CliArgs::parse_from([
            "folio",
            "--cache-capacity",
            "5",
            "--single-flight",
            "true",
            "--public-dir",
            "/srv/www",
            "pictures",
        ]);
        let mut config = AppConfig::default();
        config.merge_with_args(&args);

        assert_eq!(config.cache.capacity, 5);
        assert!(config.cache.single_flight);
        assert_eq!(config.fetcher_config().public_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
