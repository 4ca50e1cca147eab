// ABOUTME: Headless browser page used by the capture driver
// ABOUTME: Wraps headless_chrome behind a small trait so capture logic can run against fakes

use crate::errors::{CarouselError, Result};
use crate::layout::{ImageFormat, Viewport};
use headless_chrome::protocol::cdp::{Emulation, Page};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use log::{debug, info};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// CSS selector marking each capturable frame.
pub const FRAME_SELECTOR: &str = ".frame";

/// How long the page must stay quiet before it counts as network idle.
pub const NETWORK_QUIET_PERIOD: Duration = Duration::from_millis(500);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// CSS pixels per inch, used to turn pixel page sizes into PDF paper sizes.
const CSS_PX_PER_INCH: f64 = 96.0;

/// A rectangle in document coordinates, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Clip {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Clip {
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: f64::from(viewport.width),
            height: f64::from(viewport.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// The browser operations the capture driver needs, issued one at a time.
pub trait CapturePage {
    /// Replace the page document with `html` and wait for network idle.
    fn load_html(&self, html: &str, timeout: Duration) -> Result<()>;

    /// Number of frame elements in the loaded document.
    fn frame_count(&self) -> Result<usize>;

    /// Scroll frame `index` into view and measure it. `None` when the frame
    /// has no measurable box.
    fn frame_clip(&self, index: usize) -> Result<Option<Clip>>;

    /// Encoded image of exactly `clip`.
    fn screenshot(&self, format: ImageFormat, clip: Clip) -> Result<Vec<u8>>;

    /// Switch to print media, wait for fonts and export the whole page as a PDF
    /// with `page` as the paper size.
    fn print_pdf(&self, page: Viewport) -> Result<Vec<u8>>;
}

/// Page state sampled while waiting for network idle.
#[derive(Debug, Deserialize, PartialEq)]
struct LoadProbe {
    ready: String,
    resources: u64,
}

/// A headless Chrome tab. The browser process goes away when this is dropped.
pub struct ChromePage {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl ChromePage {
    /// Launch headless Chrome with a window the size of `viewport`.
    pub fn launch(viewport: Viewport, browser_path: Option<PathBuf>) -> Result<Self> {
        let mut launch_options_builder = LaunchOptionsBuilder::default();
        launch_options_builder.window_size(Some((viewport.width, viewport.height)));
        launch_options_builder.headless(true);
        if let Some(path) = browser_path {
            launch_options_builder.path(Some(path));
        }

        let launch_options = launch_options_builder
            .build()
            .map_err(|e| CarouselError::BrowserError {
                message: format!("Failed to build browser options: {:?}", e),
                source: None,
            })?;

        info!(
            "Launching headless browser at {}x{}",
            viewport.width, viewport.height
        );
        let browser = Browser::new(launch_options)
            .map_err(|e| CarouselError::browser("Failed to launch browser", e))?;
        let tab = browser
            .new_tab()
            .map_err(|e| CarouselError::browser("Failed to create new tab", e))?;

        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    fn evaluate_value(&self, expression: &str, await_promise: bool) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(expression, await_promise)
            .map_err(|e| CarouselError::browser("Script evaluation failed", e))?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    fn probe_load_state(&self) -> Result<LoadProbe> {
        let value = self.evaluate_value(
            "JSON.stringify({ ready: document.readyState, resources: performance.getEntriesByType('resource').length })",
            false,
        )?;
        let raw = value.as_str().unwrap_or("{}");
        serde_json::from_str(raw).map_err(|e| CarouselError::BrowserError {
            message: format!("Unexpected load probe result {:?}: {}", raw, e),
            source: None,
        })
    }

    fn wait_for_network_idle(&self, timeout: Duration) -> Result<()> {
        wait_until_idle(
            || self.probe_load_state(),
            Instant::now,
            std::thread::sleep,
            timeout,
        )
    }
}

/// Poll `next_probe` until the document is complete and no new resources have
/// finished for a full quiet period, or fail once `timeout` has passed.
fn wait_until_idle(
    mut next_probe: impl FnMut() -> Result<LoadProbe>,
    mut now: impl FnMut() -> Instant,
    mut pause: impl FnMut(Duration),
    timeout: Duration,
) -> Result<()> {
    let started = now();
    let mut quiet_since = started;
    let mut last_seen: Option<LoadProbe> = None;

    loop {
        let probe = next_probe()?;
        let sampled_at = now();
        if last_seen.as_ref() != Some(&probe) {
            quiet_since = sampled_at;
        }
        if probe.ready == "complete"
            && sampled_at.duration_since(quiet_since) >= NETWORK_QUIET_PERIOD
        {
            debug!(
                "Network idle after {:?} ({} resources)",
                sampled_at.duration_since(started),
                probe.resources
            );
            return Ok(());
        }
        last_seen = Some(probe);

        if sampled_at.duration_since(started) >= timeout {
            return Err(CarouselError::TimeoutError(format!(
                "page did not reach network idle within {:.1}s",
                timeout.as_secs_f64()
            )));
        }
        pause(POLL_INTERVAL);
    }
}

/// Decode the measuring script result. `null` means the frame does not exist;
/// anything other than a JSON string means the script itself failed.
fn frame_box_from_value(index: usize, value: &serde_json::Value) -> Result<Option<Clip>> {
    let raw = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::String(raw) => raw,
        other => {
            return Err(CarouselError::CaptureError(format!(
                "Measuring frame {} failed: {:?}",
                index + 1,
                other
            )))
        }
    };
    let clip: Clip = serde_json::from_str(raw).map_err(|e| CarouselError::BrowserError {
        message: format!("Unexpected frame box {:?}: {}", raw, e),
        source: None,
    })?;
    Ok(if clip.is_empty() { None } else { Some(clip) })
}

impl CapturePage for ChromePage {
    fn load_html(&self, html: &str, timeout: Duration) -> Result<()> {
        self.tab.set_default_timeout(timeout);
        self.tab
            .navigate_to("about:blank")
            .map_err(|e| CarouselError::browser("Failed to open blank page", e))?;
        self.tab.wait_until_navigated()?;

        // A JSON string is a valid JavaScript string literal.
        let literal = serde_json::to_string(html).map_err(|e| CarouselError::BrowserError {
            message: format!("Failed to encode document: {}", e),
            source: None,
        })?;
        let script = format!(
            "document.open(); document.write({}); document.close(); true",
            literal
        );
        self.evaluate_value(&script, false)?;

        self.wait_for_network_idle(timeout)
    }

    fn frame_count(&self) -> Result<usize> {
        let value = self.evaluate_value(
            &format!("document.querySelectorAll('{}').length", FRAME_SELECTOR),
            false,
        )?;
        value
            .as_u64()
            .or_else(|| value.as_f64().map(|n| n as u64))
            .map(|n| n as usize)
            .ok_or_else(|| CarouselError::BrowserError {
                message: format!("Unexpected frame count {:?}", value),
                source: None,
            })
    }

    fn frame_clip(&self, index: usize) -> Result<Option<Clip>> {
        let script = format!(
            r#"(function() {{
                var el = document.querySelectorAll('{selector}')[{index}];
                if (!el) return null;
                el.scrollIntoView({{ block: 'nearest', inline: 'nearest' }});
                var r = el.getBoundingClientRect();
                return JSON.stringify({{
                    x: r.left + window.scrollX,
                    y: r.top + window.scrollY,
                    width: r.width,
                    height: r.height
                }});
            }})()"#,
            selector = FRAME_SELECTOR,
            index = index
        );
        let value = self.evaluate_value(&script, false)?;
        frame_box_from_value(index, &value)
    }

    fn screenshot(&self, format: ImageFormat, clip: Clip) -> Result<Vec<u8>> {
        let format = match format {
            ImageFormat::Png => Page::CaptureScreenshotFormatOption::Png,
            ImageFormat::Jpeg => Page::CaptureScreenshotFormatOption::Jpeg,
        };
        let viewport = Page::Viewport {
            x: clip.x,
            y: clip.y,
            width: clip.width,
            height: clip.height,
            scale: 1.0,
        };
        self.tab
            .capture_screenshot(format, None, Some(viewport), true)
            .map_err(|e| CarouselError::CaptureError(format!("Screenshot failed: {}", e)))
    }

    fn print_pdf(&self, page: Viewport) -> Result<Vec<u8>> {
        self.tab
            .call_method(Emulation::SetEmulatedMedia {
                media: Some("print".to_string()),
                features: None,
            })
            .map_err(|e| CarouselError::browser("Failed to emulate print media", e))?;
        self.evaluate_value("document.fonts.ready.then(function() { return true; })", true)?;

        let options = PrintToPdfOptions {
            print_background: Some(true),
            paper_width: Some(f64::from(page.width) / CSS_PX_PER_INCH),
            paper_height: Some(f64::from(page.height) / CSS_PX_PER_INCH),
            margin_top: Some(0.0),
            margin_bottom: Some(0.0),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            prefer_css_page_size: Some(true),
            ..Default::default()
        };
        self.tab
            .print_to_pdf(Some(options))
            .map_err(|e| CarouselError::CaptureError(format!("PDF export failed: {}", e)))
    }
}
