// ABOUTME: Content loading for the carousel renderer
// ABOUTME: Reads deck or resource JSON, validates its shape and normalizes frame types

use crate::errors::{CarouselError, Result};
use crate::layout::LayoutMode;
use crate::utils;
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;

/// Title used by deck templates when the content has none.
pub const DEFAULT_DECK_TITLE: &str = "Carousel";

/// Title used for resource documents when `resourceTitle` is missing or empty.
pub const DEFAULT_RESOURCE_TITLE: &str = "Resource";

/// The fixed set of slide layouts a template knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameType {
    Cover,
    SectionDivider,
    Outro,
    #[default]
    TitleParagraph,
    BulletList,
    NumberedSteps,
    Definition,
    TwoColumn,
    ProsCons,
    BeforeAfter,
    Quote,
    DataStats,
    Diagram,
    ImageCaption,
    Agenda,
    Recap,
    Default,
}

impl FrameType {
    pub const ALL: [FrameType; 17] = [
        FrameType::Cover,
        FrameType::SectionDivider,
        FrameType::Outro,
        FrameType::TitleParagraph,
        FrameType::BulletList,
        FrameType::NumberedSteps,
        FrameType::Definition,
        FrameType::TwoColumn,
        FrameType::ProsCons,
        FrameType::BeforeAfter,
        FrameType::Quote,
        FrameType::DataStats,
        FrameType::Diagram,
        FrameType::ImageCaption,
        FrameType::Agenda,
        FrameType::Recap,
        FrameType::Default,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FrameType::Cover => "cover",
            FrameType::SectionDivider => "section-divider",
            FrameType::Outro => "outro",
            FrameType::TitleParagraph => "title-paragraph",
            FrameType::BulletList => "bullet-list",
            FrameType::NumberedSteps => "numbered-steps",
            FrameType::Definition => "definition",
            FrameType::TwoColumn => "two-column",
            FrameType::ProsCons => "pros-cons",
            FrameType::BeforeAfter => "before-after",
            FrameType::Quote => "quote",
            FrameType::DataStats => "data-stats",
            FrameType::Diagram => "diagram",
            FrameType::ImageCaption => "image-caption",
            FrameType::Agenda => "agenda",
            FrameType::Recap => "recap",
            FrameType::Default => "default",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Resolve a raw `type` value. Anything that is not one of the known
    /// names falls back to `title-paragraph`.
    pub fn normalize(raw: Option<&Value>) -> Self {
        raw.and_then(Value::as_str)
            .and_then(Self::from_name)
            .unwrap_or_default()
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FrameType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(FrameType::normalize(Some(&raw)))
    }
}

/// One slide of a deck. Display fields are kept as-is for the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(rename = "type", default)]
    pub kind: FrameType,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub slides: Vec<Slide>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deck {
    /// Distinct frame types in the order they first appear.
    pub fn frame_types(&self) -> Vec<FrameType> {
        let mut seen = Vec::new();
        for slide in &self.slides {
            if !seen.contains(&slide.kind) {
                seen.push(slide.kind);
            }
        }
        seen
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_DECK_TITLE,
        }
    }
}

/// Single-image resource document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterResource {
    #[serde(
        rename = "resourceTitle",
        default = "default_resource_title",
        deserialize_with = "resource_title_or_default"
    )]
    pub resource_title: String,
    pub sections: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_resource_title() -> String {
    DEFAULT_RESOURCE_TITLE.to_string()
}

fn resource_title_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let title = Option::<String>::deserialize(deserializer)?;
    Ok(title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(default_resource_title))
}

/// Loaded content, shaped by the layout mode it was loaded for.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Deck(Deck),
    Resource(TwitterResource),
}

/// Read and validate a content file for the given layout.
pub fn load_content(path: &Path, layout: LayoutMode) -> Result<Content> {
    info!("Loading {} content from {:?}", layout, path);

    utils::validate_file_exists(path)?;
    let raw = fs::read_to_string(path).map_err(CarouselError::FileReadError)?;
    parse_content(&raw, layout)
}

/// Validate and deserialize content JSON that has already been read.
pub fn parse_content(raw: &str, layout: LayoutMode) -> Result<Content> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CarouselError::ValidationError(format!("content is not valid JSON: {}", e)))?;

    if layout.is_deck() {
        require_array(&value, "slides", "Content JSON must have a \"slides\" array.")?;
        let deck: Deck = serde_json::from_value(value)
            .map_err(|e| CarouselError::ValidationError(format!("invalid deck: {}", e)))?;
        debug!(
            "Loaded deck with {} slides using frame types {:?}",
            deck.slides.len(),
            deck.frame_types()
        );
        Ok(Content::Deck(deck))
    } else {
        require_array(
            &value,
            "sections",
            "Twitter resource JSON must have a \"sections\" array.",
        )?;
        let resource: TwitterResource = serde_json::from_value(value)
            .map_err(|e| CarouselError::ValidationError(format!("invalid resource: {}", e)))?;
        debug!(
            "Loaded resource {:?} with {} sections",
            resource.resource_title,
            resource.sections.len()
        );
        Ok(Content::Resource(resource))
    }
}

fn require_array(value: &Value, field: &str, message: &str) -> Result<()> {
    match value.get(field) {
        Some(Value::Array(_)) => Ok(()),
        _ => Err(CarouselError::ValidationError(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deck(raw: Value) -> Deck {
        match parse_content(&raw.to_string(), LayoutMode::Standard).unwrap() {
            Content::Deck(deck) => deck,
            other => panic!("expected deck, got {:?}", other),
        }
    }

    #[test]
    fn unknown_and_missing_types_become_title_paragraph() {
        let deck = deck(json!({
            "slides": [
                {"type": "cover", "title": "Hi"},
                {"type": "hologram"},
                {"body": "no type"},
                {"type": null},
                {"type": 7},
                {"type": ""}
            ]
        }));
        let kinds: Vec<_> = deck.slides.iter().map(|s| s.kind).collect();
        assert_eq!(kinds[0], FrameType::Cover);
        assert!(kinds[1..].iter().all(|k| *k == FrameType::TitleParagraph));
    }

    #[test]
    fn every_known_name_round_trips() {
        for kind in FrameType::ALL {
            assert_eq!(FrameType::from_name(kind.name()), Some(kind));
            assert_eq!(FrameType::normalize(Some(&json!(kind.name()))), kind);
        }
    }

    #[test]
    fn display_fields_survive_normalization() {
        let deck = deck(json!({
            "slides": [{"type": "bogus", "body": "text", "footer": {"handle": "@me"}}]
        }));
        let serialized = serde_json::to_value(&deck.slides[0]).unwrap();
        assert_eq!(
            serialized,
            json!({"type": "title-paragraph", "body": "text", "footer": {"handle": "@me"}})
        );
    }

    #[test]
    fn frame_types_are_distinct_in_first_seen_order() {
        let deck = deck(json!({
            "slides": [
                {"type": "quote"},
                {"type": "cover"},
                {"type": "quote"},
                {"type": "nope"},
                {"type": "cover"}
            ]
        }));
        assert_eq!(
            deck.frame_types(),
            vec![FrameType::Quote, FrameType::Cover, FrameType::TitleParagraph]
        );
    }

    #[test]
    fn deck_without_slides_array_is_rejected() {
        for raw in [json!({}), json!({"slides": "x"}), json!({"slides": null})] {
            let err = parse_content(&raw.to_string(), LayoutMode::Square).unwrap_err();
            assert!(matches!(err, CarouselError::ValidationError(_)), "{:?}", err);
        }
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = parse_content("{\"slides\": [", LayoutMode::Standard).unwrap_err();
        assert!(matches!(err, CarouselError::ValidationError(_)));
    }

    #[test]
    fn resource_title_defaults_when_missing_or_empty() {
        for raw in [
            json!({"sections": [{"heading": "A"}]}),
            json!({"sections": [], "resourceTitle": ""}),
            json!({"sections": [], "resourceTitle": null}),
        ] {
            match parse_content(&raw.to_string(), LayoutMode::TwitterSingle).unwrap() {
                Content::Resource(resource) => {
                    assert_eq!(resource.resource_title, DEFAULT_RESOURCE_TITLE)
                }
                other => panic!("expected resource, got {:?}", other),
            }
        }
    }

    #[test]
    fn resource_without_sections_is_rejected() {
        let err = parse_content(r#"{"resourceTitle": "Guide"}"#, LayoutMode::TwitterSingle)
            .unwrap_err();
        assert!(matches!(err, CarouselError::ValidationError(_)));
    }

    #[test]
    fn deck_title_defaults_to_carousel() {
        assert_eq!(deck(json!({"slides": []})).display_title(), DEFAULT_DECK_TITLE);
        assert_eq!(
            deck(json!({"title": "Launch", "slides": []})).display_title(),
            "Launch"
        );
    }
}
