// ABOUTME: Stylesheet assembly for the carousel renderer
// ABOUTME: Concatenates the base stylesheet with fragments for the frame types in use

use crate::content::{Deck, FrameType};
use crate::errors::{CarouselError, Result};
use crate::layout::LayoutMode;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Stylesheet appended to `base.css` for resource documents.
pub const RESOURCE_STYLESHEET: &str = "twitter-resource.css";

/// Builds the inline stylesheet for a render from the files under one css directory.
pub struct StyleAssembler {
    css_dir: PathBuf,
}

impl StyleAssembler {
    pub fn new(css_dir: impl Into<PathBuf>) -> Self {
        Self {
            css_dir: css_dir.into(),
        }
    }

    /// Base stylesheet for the layout plus one fragment per frame type used by
    /// the deck, in first-seen order. Fragments that don't exist are skipped.
    pub fn assemble_deck(&self, layout: LayoutMode, deck: &Deck) -> Result<String> {
        self.assemble_types(layout, &deck.frame_types())
    }

    pub fn assemble_types(&self, layout: LayoutMode, types: &[FrameType]) -> Result<String> {
        let mut css = self.read_base(layout.base_stylesheet())?;

        let Some(fragment_dir) = layout.fragment_dir() else {
            return Ok(css);
        };
        let fragment_dir = self.css_dir.join(fragment_dir);

        for kind in types {
            let path = fragment_dir.join(format!("{}.css", kind.name()));
            if let Some(fragment) = read_optional(&path)? {
                css.push('\n');
                css.push_str(&fragment);
            }
        }

        info!(
            "Assembled {} bytes of CSS for {} frame types",
            css.len(),
            types.len()
        );
        Ok(css)
    }

    /// `base.css` plus the resource fragment, independent of any slide types.
    pub fn assemble_resource(&self) -> Result<String> {
        let mut css = self.read_base(LayoutMode::TwitterSingle.base_stylesheet())?;
        if let Some(fragment) = read_optional(&self.css_dir.join(RESOURCE_STYLESHEET))? {
            css.push('\n');
            css.push_str(&fragment);
        }
        Ok(css)
    }

    fn read_base(&self, name: &str) -> Result<String> {
        let path = self.css_dir.join(name);
        if !path.exists() {
            return Err(CarouselError::PathNotFoundError(path));
        }
        fs::read_to_string(&path).map_err(CarouselError::FileReadError)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        debug!("No stylesheet fragment at {:?}", path);
        return Ok(None);
    }
    let css = fs::read_to_string(path).map_err(CarouselError::FileReadError)?;
    Ok(Some(css))
}
