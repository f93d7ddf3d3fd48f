use crate::loader::error::LoadError;
use crate::schema_loader::validate_style_value;
use crate::style::StyleDocument;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// What a caller hands the loader: a document already in memory, or a URL to
/// fetch one from.
#[derive(Clone, Debug)]
pub enum StyleInput {
    Document(Arc<StyleDocument>),
    Url(Url),
}

impl From<StyleDocument> for StyleInput {
    fn from(document: StyleDocument) -> Self {
        StyleInput::Document(Arc::new(document))
    }
}

impl From<Arc<StyleDocument>> for StyleInput {
    fn from(document: Arc<StyleDocument>) -> Self {
        StyleInput::Document(document)
    }
}

impl From<Url> for StyleInput {
    fn from(url: Url) -> Self {
        StyleInput::Url(url)
    }
}

impl StyleInput {
    /// Resolve a command-line argument into an input.
    ///
    /// Inline JSON (leading `{`) is parsed on the spot, strings with a URL
    /// scheme are taken as URLs, and anything else is a local path turned
    /// into a `file://` URL.
    pub fn parse_arg(raw: &str, validate_schema: bool) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("empty style input");
        }

        if trimmed.starts_with('{') {
            let document = parse_style_document("inline style", trimmed.as_bytes(), validate_schema)?;
            return Ok(StyleInput::from(document));
        }

        if let Ok(url) = Url::parse(trimmed) {
            // Single-letter schemes are Windows drive letters, not URLs.
            if url.scheme().len() > 1 {
                return Ok(StyleInput::Url(url));
            }
        }

        let path = Path::new(trimmed);
        let canonical = path
            .canonicalize()
            .with_context(|| format!("resolving style path {}", path.display()))?;
        let url = Url::from_file_path(&canonical).map_err(|()| {
            anyhow::anyhow!("cannot express {} as a file URL", canonical.display())
        })?;
        Ok(StyleInput::Url(url))
    }

    /// Short label for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            StyleInput::Document(_) => "inline style".to_string(),
            StyleInput::Url(url) => url.to_string(),
        }
    }
}

/// Parse raw bytes into a style document.
///
/// Only the outer shape can fail the parse. With `validate_schema`, the body
/// is checked against the embedded schema first so every outer-shape
/// violation is reported together. Layers and sources with bad fields are
/// kept as malformed entries for the classifiers to drop.
pub fn parse_style_document(
    origin: &str,
    bytes: &[u8],
    validate_schema: bool,
) -> Result<StyleDocument, LoadError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| LoadError::Malformed {
        origin: origin.to_string(),
        source,
    })?;

    if validate_schema {
        validate_style_value(&value).map_err(|details| LoadError::Schema {
            origin: origin.to_string(),
            details,
        })?;
    }

    serde_json::from_value(value).map_err(|source| LoadError::Malformed {
        origin: origin.to_string(),
        source,
    })
}
