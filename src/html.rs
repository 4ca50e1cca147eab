// ABOUTME: HTML generation module for the carousel renderer
// ABOUTME: Binds loaded content and inline styles into the layout's template

use crate::content::Content;
use crate::errors::{CarouselError, Result};
use crate::layout::LayoutMode;
use crate::utils;
use log::info;
use minijinja::{path_loader, Environment};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders content into one of the fixed templates.
///
/// Each renderer owns its template environment, so two renderers pointed at
/// different template directories never share configuration.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Result<Self> {
        let templates_dir = templates_dir.into();
        utils::validate_directory_exists(&templates_dir)?;

        let mut env = Environment::new();
        // The default callback already escapes `.html` templates; keep it explicit.
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                minijinja::AutoEscape::Html
            } else {
                minijinja::AutoEscape::None
            }
        });
        env.set_loader(path_loader(&templates_dir));

        Ok(Self { env })
    }

    /// Render `content` with `inline_styles` into the template for `layout`.
    pub fn render(
        &self,
        content: &Content,
        inline_styles: &str,
        layout: LayoutMode,
    ) -> Result<String> {
        let context = build_context(content, inline_styles)?;
        let name = layout.template_name();
        info!("Rendering template {}", name);

        let template = self.env.get_template(name)?;
        Ok(template.render(&context)?)
    }
}

/// Template context: every content field, plus `title` defaulted for decks and
/// the assembled stylesheet as `inlineStyles`.
fn build_context(content: &Content, inline_styles: &str) -> Result<Value> {
    let mut context = match content {
        Content::Deck(deck) => {
            let mut value = to_object(deck)?;
            if let Value::Object(map) = &mut value {
                map.insert(
                    "title".to_string(),
                    Value::String(deck.display_title().to_string()),
                );
            }
            value
        }
        Content::Resource(resource) => to_object(resource)?,
    };

    if let Value::Object(map) = &mut context {
        map.insert(
            "inlineStyles".to_string(),
            Value::String(inline_styles.to_string()),
        );
    }
    Ok(context)
}

fn to_object<T: serde::Serialize>(content: &T) -> Result<Value> {
    serde_json::to_value(content).map_err(|e| {
        CarouselError::ValidationError(format!("content cannot be passed to template: {}", e))
    })
}

/// Utility function to write HTML content to a file
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);

    utils::ensure_parent_directory_exists(output_path)?;

    fs::write(output_path, html_content).map_err(|source| CarouselError::FileWriteError {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(())
}
