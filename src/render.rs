// ABOUTME: Capture driver for the carousel renderer
// ABOUTME: Screenshots each rendered frame and exports the deck PDF through a browser page

use crate::browser::{CapturePage, Clip};
use crate::errors::{CarouselError, Result};
use crate::layout::{ImageFormat, LayoutMode};
use crate::utils;
use image::io::Reader as ImageReader;
use log::{info, warn};
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// File name of the exported deck PDF.
pub const PDF_FILE_NAME: &str = "carousel.pdf";

/// Base name of the single resource image.
pub const RESOURCE_IMAGE_STEM: &str = "twitter-resource";

/// Configuration for one capture run
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub output_dir: PathBuf,
    pub image_format: ImageFormat,
    pub emit_pdf: bool,
    pub layout: LayoutMode,
    pub load_timeout: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            image_format: ImageFormat::Png,
            emit_pdf: true,
            layout: LayoutMode::Standard,
            load_timeout: Duration::from_millis(crate::config::DEFAULT_LOAD_TIMEOUT_MS),
        }
    }
}

/// `frame-01.png`, `frame-02.png`, ... for a zero-based frame index.
pub fn frame_file_name(index: usize, format: ImageFormat) -> String {
    format!("frame-{:02}.{}", index + 1, format.extension())
}

pub fn resource_file_name(format: ImageFormat) -> String {
    format!("{}.{}", RESOURCE_IMAGE_STEM, format.extension())
}

/// Capture every frame of a deck, then export the PDF unless disabled.
///
/// Frames without a measurable box are skipped; their index is still used,
/// so names can have gaps. Any failing browser call aborts the run and files
/// already written stay on disk.
pub fn capture_deck<P: CapturePage>(
    page: &P,
    html: &str,
    options: &CaptureOptions,
) -> Result<Vec<PathBuf>> {
    utils::ensure_directory_exists(&options.output_dir)?;
    page.load_html(html, options.load_timeout)?;

    let frame_count = page.frame_count()?;
    info!("Loaded! Ready to render {} frames", frame_count);

    let start_time = Instant::now();
    let mut output_files = Vec::with_capacity(frame_count + 1);

    for index in 0..frame_count {
        let Some(clip) = page.frame_clip(index)? else {
            warn!("Frame {} has no bounding box, skipping", index + 1);
            continue;
        };

        let bytes = page.screenshot(options.image_format, clip)?;
        check_dimensions(&bytes, clip, options.image_format)?;

        let file_name = frame_file_name(index, options.image_format);
        output_files.push(utils::write_output_file(&options.output_dir, &file_name, &bytes)?);
    }

    if options.emit_pdf && options.layout.is_deck() {
        let pdf = page.print_pdf(options.layout.viewport())?;
        output_files.push(utils::write_output_file(&options.output_dir, PDF_FILE_NAME, &pdf)?);
    }

    info!(
        "Rendering complete. Wrote {} files in {:.2} seconds",
        output_files.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(output_files)
}

/// Capture the whole viewport as one resource image. Never exports a PDF.
pub fn capture_resource<P: CapturePage>(
    page: &P,
    html: &str,
    options: &CaptureOptions,
) -> Result<PathBuf> {
    utils::ensure_directory_exists(&options.output_dir)?;
    page.load_html(html, options.load_timeout)?;

    let clip = Clip::from_viewport(options.layout.viewport());
    let bytes = page.screenshot(options.image_format, clip)?;
    check_dimensions(&bytes, clip, options.image_format)?;

    utils::write_output_file(
        &options.output_dir,
        &resource_file_name(options.image_format),
        &bytes,
    )
}

/// Decode the image header and compare it with the requested clip. A mismatch
/// (for example on a scaled display) is logged, unreadable bytes are an error.
fn check_dimensions(bytes: &[u8], clip: Clip, format: ImageFormat) -> Result<()> {
    let unreadable = |e: &dyn std::fmt::Display| {
        CarouselError::CaptureError(format!("Unreadable {} screenshot: {}", format, e))
    };
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| unreadable(&e))?
        .into_dimensions()
        .map_err(|e| unreadable(&e))?;

    let expected = (clip.width.round() as u32, clip.height.round() as u32);
    if (width, height) != expected {
        warn!(
            "Screenshot is {}x{}, expected {}x{}",
            width, height, expected.0, expected.1
        );
    }
    Ok(())
}
