//! Source document parsing.
//!
//! A document is UTF-8 text with an optional JSON header separated from the
//! markdown body by `===`:
//!
//! ```text
//! { "title": "Hello", "date": "2024-01-15" }
//! ===
//! # Hello
//!
//! Body text.
//! ```
//!
//! The text is split on *every* `===`. Segment 0 is the header and segment 1
//! the body; anything after a second delimiter is dropped, so a body that
//! itself contains `===` is cut short. Kept as-is for compatibility with
//! existing content.

use crate::{config::SiteConfig, error::BuildError};
use pulldown_cmark::{Options, Parser, html::push_html};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Separator between the JSON header and the markdown body.
pub const DELIMITER: &str = "===";

// ============================================================================
// Types
// ============================================================================

/// Document metadata from the JSON header.
///
/// The header object is kept exactly as written. Known keys are read through
/// accessors that only accept strings, so a wrongly typed value behaves as if
/// the key were absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: Map<String, Value>,
}

impl FrontMatter {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn template(&self) -> Option<&str> {
        self.str_field("template")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// ISO 8601 date string, kept verbatim for ordering.
    pub fn date(&self) -> Option<&str> {
        self.str_field("date")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// Metadata as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for FrontMatter {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// A parsed source document, ready for the template renderer.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub metadata: FrontMatter,
    pub body_html: String,
    /// Header `title`, else the site title.
    pub title: String,
    /// Header `template`, else the configured default template.
    pub template_name: String,
}

// ============================================================================
// Public API
// ============================================================================

/// Parse a raw document read from `source`.
///
/// # Errors
///
/// Returns [`BuildError::Frontmatter`] or [`BuildError::FrontmatterShape`]
/// when the header is not a well-formed JSON object. Values inside a
/// well-formed object never fail parsing.
pub fn parse_document(
    text: &str,
    source: &Path,
    config: &SiteConfig,
) -> Result<ParsedDocument, BuildError> {
    let (header, body) = split_frontmatter(text);

    let metadata = match header {
        Some(header) if !header.is_empty() => parse_frontmatter(header, source)?,
        _ => FrontMatter::default(),
    };

    let template_name = metadata
        .template()
        .unwrap_or(config.default_template.as_str())
        .to_owned();
    let title = metadata.title().unwrap_or(config.site_title.as_str()).to_owned();

    Ok(ParsedDocument {
        body_html: render_markdown(body),
        metadata,
        title,
        template_name,
    })
}

/// Split text into `(header, body)`, both trimmed.
///
/// `header` is `None` when the text contains no delimiter.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let mut segments = text.split(DELIMITER).map(str::trim);
    let first = segments.next().unwrap_or_default();

    match segments.next() {
        Some(body) => (Some(first), body),
        None => (None, first),
    }
}

/// Render a markdown fragment to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, parser);
    html
}

// ============================================================================
// Internal
// ============================================================================

fn parse_frontmatter(header: &str, source: &Path) -> Result<FrontMatter, BuildError> {
    let value: Value = serde_json::from_str(header).map_err(|err| BuildError::Frontmatter {
        path: source.to_path_buf(),
        source: err,
    })?;

    match value {
        Value::Object(fields) => Ok(FrontMatter::new(fields)),
        _ => Err(BuildError::FrontmatterShape {
            path: source.to_path_buf(),
        }),
    }
}
