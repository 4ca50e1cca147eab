// ABOUTME: Configuration module for the carousel renderer
// ABOUTME: Provides configuration settings and environment variable handling

use crate::errors::{CarouselError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default bound on how long the page may take to reach network idle.
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 15_000;

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub browser_path: Option<PathBuf>,
    /// Root holding `templates/`, `content/` and `output/`
    pub assets_dir: PathBuf,
    pub load_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_path: None,
            assets_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var("BROWSER_PATH") {
            if !path.is_empty() {
                config.browser_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(dir) = env::var("CAROUSEL_ASSETS_DIR") {
            if !dir.is_empty() {
                config.assets_dir = PathBuf::from(dir);
            }
        }

        if let Ok(raw) = env::var("CAROUSEL_LOAD_TIMEOUT_MS") {
            config.load_timeout_ms = parse_timeout_ms(&raw)?;
        }

        Ok(config)
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.assets_dir.join("templates")
    }

    pub fn css_dir(&self) -> PathBuf {
        self.templates_dir().join("css")
    }

    /// Content file used when no path is given on the command line
    pub fn default_content_path(&self) -> PathBuf {
        self.assets_dir.join("content").join("example.json")
    }

    /// Output directory used when `--output` is not given
    pub fn default_output_dir(&self) -> PathBuf {
        self.assets_dir.join("output")
    }
}

fn parse_timeout_ms(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(CarouselError::ConfigError(format!(
            "CAROUSEL_LOAD_TIMEOUT_MS must be a positive number of milliseconds, got {:?}",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_hang_off_assets_dir() {
        let config = Config::new().with_assets_dir("/srv/carousel");
        assert_eq!(config.templates_dir(), PathBuf::from("/srv/carousel/templates"));
        assert_eq!(config.css_dir(), PathBuf::from("/srv/carousel/templates/css"));
        assert_eq!(
            config.default_content_path(),
            PathBuf::from("/srv/carousel/content/example.json")
        );
        assert_eq!(config.default_output_dir(), PathBuf::from("/srv/carousel/output"));
    }

    #[test]
    fn default_timeout_is_fifteen_seconds() {
        assert_eq!(Config::new().load_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn timeout_must_be_positive_integer() {
        assert_eq!(parse_timeout_ms(" 2500 ").unwrap(), 2500);
        assert!(matches!(
            parse_timeout_ms("0"),
            Err(CarouselError::ConfigError(_))
        ));
        assert!(matches!(
            parse_timeout_ms("soon"),
            Err(CarouselError::ConfigError(_))
        ));
    }
}
