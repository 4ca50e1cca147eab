// ABOUTME: End-to-end pipeline for the carousel renderer
// ABOUTME: Runs content loading, style assembly, templating and capture in order

use crate::browser::ChromePage;
use crate::config::Config;
use crate::content::{self, Content};
use crate::errors::Result;
use crate::html::{self, TemplateRenderer};
use crate::layout::{ImageFormat, LayoutMode};
use crate::render::{self, CaptureOptions};
use crate::styles::StyleAssembler;
use log::info;
use std::path::PathBuf;

/// Name of the rendered document written when `keep_html` is set.
pub const HTML_FILE_NAME: &str = "carousel.html";

/// Everything one invocation needs to know.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub content_path: PathBuf,
    pub output_dir: PathBuf,
    pub image_format: ImageFormat,
    pub emit_pdf: bool,
    pub layout: LayoutMode,
    /// Also write the rendered HTML into the output directory
    pub keep_html: bool,
}

impl RenderOptions {
    /// Options with the bundled example content and output directory.
    pub fn with_defaults(config: &Config) -> Self {
        Self {
            content_path: config.default_content_path(),
            output_dir: config.default_output_dir(),
            image_format: ImageFormat::Png,
            emit_pdf: true,
            layout: LayoutMode::Standard,
            keep_html: false,
        }
    }

    fn capture_options(&self, config: &Config) -> CaptureOptions {
        CaptureOptions {
            output_dir: self.output_dir.clone(),
            image_format: self.image_format,
            emit_pdf: self.emit_pdf,
            layout: self.layout,
            load_timeout: config.load_timeout(),
        }
    }
}

/// Load the content, assemble its styles and render the layout's template.
/// Touches nothing in the output directory.
pub fn prepare_html(options: &RenderOptions, config: &Config) -> Result<String> {
    let content = content::load_content(&options.content_path, options.layout)?;

    let styles = StyleAssembler::new(config.css_dir());
    let inline_styles = match &content {
        Content::Deck(deck) => styles.assemble_deck(options.layout, deck)?,
        Content::Resource(_) => styles.assemble_resource()?,
    };

    let renderer = TemplateRenderer::new(config.templates_dir())?;
    renderer.render(&content, &inline_styles, options.layout)
}

/// Run a whole render and return every file written, in write order.
pub fn run(options: &RenderOptions, config: &Config) -> Result<Vec<PathBuf>> {
    info!(
        "Rendering {:?} as {} into {:?}",
        options.content_path, options.layout, options.output_dir
    );
    let document = prepare_html(options, config)?;

    let mut written = Vec::new();
    if options.keep_html {
        let path = options.output_dir.join(HTML_FILE_NAME);
        html::write_html_to_file(&document, &path)?;
        written.push(path);
    }

    let page = ChromePage::launch(options.layout.viewport(), config.browser_path.clone())?;
    let capture = options.capture_options(config);

    if options.layout.is_deck() {
        written.extend(render::capture_deck(&page, &document, &capture)?);
    } else {
        written.push(render::capture_resource(&page, &document, &capture)?);
    }

    Ok(written)
}
