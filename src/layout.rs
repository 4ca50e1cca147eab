// ABOUTME: Layout modes and image formats for the carousel renderer
// ABOUTME: Holds the per-mode viewport, template and stylesheet choices

use clap::ValueEnum;
use std::fmt;

/// Pixel size of the browser viewport and of one exported PDF page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// The three mutually exclusive ways a run can lay out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Portrait carousel, one 630×1200 frame per slide
    #[default]
    Standard,
    /// Square carousel, one 1080×1080 frame per slide
    Square,
    /// A single 1080×1350 vertical resource image
    TwitterSingle,
}

impl LayoutMode {
    /// Pick the layout from the CLI flags. `--twitter` is checked first, so it
    /// wins when both flags are given.
    pub fn from_flags(twitter: bool, square: bool) -> Self {
        if twitter {
            LayoutMode::TwitterSingle
        } else if square {
            LayoutMode::Square
        } else {
            LayoutMode::Standard
        }
    }

    pub fn viewport(self) -> Viewport {
        match self {
            LayoutMode::Standard => Viewport {
                width: 630,
                height: 1200,
            },
            LayoutMode::Square => Viewport {
                width: 1080,
                height: 1080,
            },
            LayoutMode::TwitterSingle => Viewport {
                width: 1080,
                height: 1350,
            },
        }
    }

    /// Template file name, relative to the templates directory.
    pub fn template_name(self) -> &'static str {
        match self {
            LayoutMode::Standard => "slide.html",
            LayoutMode::Square => "slide-square.html",
            LayoutMode::TwitterSingle => "twitter-resource.html",
        }
    }

    /// Base stylesheet, relative to the css directory.
    pub fn base_stylesheet(self) -> &'static str {
        match self {
            LayoutMode::Square => "base-square.css",
            LayoutMode::Standard | LayoutMode::TwitterSingle => "base.css",
        }
    }

    /// Directory of per-frame-type fragments. The resource layout has none.
    pub fn fragment_dir(self) -> Option<&'static str> {
        match self {
            LayoutMode::Standard => Some("frames"),
            LayoutMode::Square => Some("frames-square"),
            LayoutMode::TwitterSingle => None,
        }
    }

    pub fn is_deck(self) -> bool {
        !matches!(self, LayoutMode::TwitterSingle)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutMode::Standard => "standard",
            LayoutMode::Square => "square",
            LayoutMode::TwitterSingle => "twitter-single",
        };
        f.write_str(name)
    }
}

/// Encoding used for captured images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImageFormat {
    #[default]
    Png,
    #[value(alias = "jpg")]
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => f.write_str("png"),
            ImageFormat::Jpeg => f.write_str("jpeg"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_flag_takes_precedence_over_square() {
        assert_eq!(LayoutMode::from_flags(true, true), LayoutMode::TwitterSingle);
        assert_eq!(LayoutMode::from_flags(true, false), LayoutMode::TwitterSingle);
        assert_eq!(LayoutMode::from_flags(false, true), LayoutMode::Square);
        assert_eq!(LayoutMode::from_flags(false, false), LayoutMode::Standard);
    }

    #[test]
    fn viewports_are_fixed_per_mode() {
        assert_eq!(
            LayoutMode::Standard.viewport(),
            Viewport {
                width: 630,
                height: 1200
            }
        );
        assert_eq!(
            LayoutMode::Square.viewport(),
            Viewport {
                width: 1080,
                height: 1080
            }
        );
        assert_eq!(
            LayoutMode::TwitterSingle.viewport(),
            Viewport {
                width: 1080,
                height: 1350
            }
        );
    }

    #[test]
    fn image_format_parsing_ignores_case() {
        let parse = |name: &str| <ImageFormat as ValueEnum>::from_str(name, true).ok();
        assert_eq!(parse("PNG"), Some(ImageFormat::Png));
        assert_eq!(parse("Jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(parse("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(parse("gif"), None);
    }

    #[test]
    fn jpeg_uses_jpg_extension() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.extension(), "png");
    }
}
