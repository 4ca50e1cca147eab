// ABOUTME: Main entry point for the carousel-render program.
// ABOUTME: Parses CLI arguments and runs the render pipeline from the library.

use carousel::{Config, ImageFormat, LayoutMode, RenderOptions};
use clap::Parser;
use std::path::PathBuf;

/// Render a JSON slide deck into carousel images and a PDF.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Content JSON file (defaults to the bundled example)
    content: Option<PathBuf>,

    /// Output directory (defaults to the bundled output directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image format for captured frames
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = ImageFormat::Png)]
    format: ImageFormat,

    /// Skip the PDF export
    #[arg(long)]
    no_pdf: bool,

    /// Render a single 1080x1350 resource image instead of a deck
    #[arg(long)]
    twitter: bool,

    /// Use the square 1080x1080 deck layout
    #[arg(long)]
    square: bool,

    /// Also write the rendered HTML into the output directory
    #[arg(long)]
    keep_html: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn render_options(&self, config: &Config) -> RenderOptions {
        let defaults = RenderOptions::with_defaults(config);
        RenderOptions {
            content_path: self.content.clone().unwrap_or(defaults.content_path),
            output_dir: self.output.clone().unwrap_or(defaults.output_dir),
            image_format: self.format,
            emit_pdf: !self.no_pdf,
            layout: LayoutMode::from_flags(self.twitter, self.square),
            keep_html: self.keep_html,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let result = Config::from_env().and_then(|config| {
        let options = cli.render_options(&config);
        carousel::run(&options, &config)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
