// ABOUTME: Utility functions for the carousel renderer
// ABOUTME: Path validation, directory creation and output file writing

use crate::errors::{CarouselError, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Content must be a regular file, not a directory or a dangling path.
pub fn validate_file_exists(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(CarouselError::ValidationError(format!(
            "expected a content file but found a directory: {}",
            path.display()
        ))),
        Err(_) => Err(CarouselError::PathNotFoundError(path.to_path_buf())),
    }
}

/// Templates and stylesheets are read from directories.
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CarouselError::ValidationError(format!(
            "expected an asset directory but found a file: {}",
            path.display()
        ))),
        Err(_) => Err(CarouselError::PathNotFoundError(path.to_path_buf())),
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| CarouselError::FileWriteError {
            path: path.to_path_buf(),
            source,
        })?;
    } else if !path.is_dir() {
        return Err(CarouselError::ValidationError(format!(
            "cannot write outputs into {}: it is a file",
            path.display()
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Write one output file and announce it on stdout.
pub fn write_output_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, bytes).map_err(|source| CarouselError::FileWriteError {
        path: path.clone(),
        source,
    })?;
    info!("Wrote {} bytes to {:?}", bytes.len(), path);
    println!("Written: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn content_path_must_be_a_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let err = validate_file_exists(dir.path()).unwrap_err();
        assert!(err.to_string().contains("found a directory"), "{}", err);

        let missing = dir.path().join("deck.json");
        assert!(matches!(
            validate_file_exists(&missing),
            Err(CarouselError::PathNotFoundError(_))
        ));
    }

    #[test]
    fn output_directory_cannot_be_a_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file = dir.path().join("out");
        fs::write(&file, "").expect("Failed to write file");

        assert!(validate_directory_exists(&file).is_err());
        let err = ensure_directory_exists(&file).unwrap_err();
        assert!(err.to_string().contains("it is a file"), "{}", err);
    }
}
