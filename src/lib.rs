// ABOUTME: Library module for the carousel renderer.
// ABOUTME: Turns JSON slide content into frame images and a PDF via a headless browser.

pub mod browser;
pub mod config;
pub mod content;
pub mod errors;
pub mod html;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod styles;
pub mod utils;

// Reexport common types and functions
pub use browser::{CapturePage, ChromePage, Clip};
pub use config::Config;
pub use content::{load_content, Content, Deck, FrameType, Slide, TwitterResource};
pub use errors::{CarouselError, Result};
pub use html::{write_html_to_file, TemplateRenderer};
pub use layout::{ImageFormat, LayoutMode, Viewport};
pub use pipeline::{prepare_html, run, RenderOptions};
pub use render::{capture_deck, capture_resource, CaptureOptions};
pub use styles::StyleAssembler;
