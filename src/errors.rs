// ABOUTME: Error types for the carousel renderer
// ABOUTME: Provides structured error handling for each stage of the pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to write {path:?}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Content validation error: {0}")]
    ValidationError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Headless browser error: {message}")]
    BrowserError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("Capture error: {0}")]
    CaptureError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CarouselError {
    /// Wrap a headless_chrome failure with a short description of the step that failed.
    pub fn browser(message: impl Into<String>, err: anyhow::Error) -> Self {
        let message = format!("{}: {}", message.into(), err);
        CarouselError::BrowserError {
            message,
            source: Some(err.into()),
        }
    }
}

// headless_chrome reports its failures as anyhow errors
impl From<anyhow::Error> for CarouselError {
    fn from(err: anyhow::Error) -> Self {
        CarouselError::BrowserError {
            message: err.to_string(),
            source: Some(err.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CarouselError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_errors_become_browser_errors() {
        let err: CarouselError = anyhow::anyhow!("tab closed").into();
        match &err {
            CarouselError::BrowserError { message, source } => {
                assert_eq!(message, "tab closed");
                assert!(source.is_some());
            }
            other => panic!("expected browser error, got {:?}", other),
        }
        assert_eq!(err.to_string(), "Headless browser error: tab closed");
    }

    #[test]
    fn browser_helper_prefixes_the_failed_step() {
        let err = CarouselError::browser("Failed to create new tab", anyhow::anyhow!("no target"));
        assert_eq!(
            err.to_string(),
            "Headless browser error: Failed to create new tab: no target"
        );
    }
}
