//! Diagnostics for style entries dropped during classification.
//!
//! Dropping an entry is never an error: the rest of the document still
//! renders. The records are returned alongside the descriptors so callers
//! and tests can inspect them without scraping logs.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum DiagnosticCode {
    UnsupportedLayerType,
    UnsupportedSourceType,
    /// A layer whose fields have the wrong shape (missing `type`, string zoom, ...).
    MalformedLayer,
    MalformedSource,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "entry", rename_all = "lowercase")]
/// Which document entry a diagnostic refers to.
pub enum DiagnosticContext {
    /// `id` is empty when a malformed layer had no string id.
    Layer { id: String, index: usize },
    Source { id: String },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One dropped layer or source.
pub struct Diagnostic {
    pub code: DiagnosticCode,
    /// The entry's `type` tag. Always set for unsupported types; absent for a
    /// malformed entry without a string `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    pub context: DiagnosticContext,
    /// Parse failure for malformed entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Diagnostic {
    pub fn unsupported_layer(id: &str, index: usize, type_tag: &str) -> Self {
        Self {
            code: DiagnosticCode::UnsupportedLayerType,
            type_tag: Some(type_tag.to_string()),
            context: DiagnosticContext::Layer {
                id: id.to_string(),
                index,
            },
            reason: None,
        }
    }

    pub fn unsupported_source(id: &str, type_tag: &str) -> Self {
        Self {
            code: DiagnosticCode::UnsupportedSourceType,
            type_tag: Some(type_tag.to_string()),
            context: DiagnosticContext::Source { id: id.to_string() },
            reason: None,
        }
    }

    pub fn malformed_layer(
        id: Option<&str>,
        index: usize,
        type_tag: Option<&str>,
        reason: &str,
    ) -> Self {
        Self {
            code: DiagnosticCode::MalformedLayer,
            type_tag: type_tag.map(str::to_string),
            context: DiagnosticContext::Layer {
                id: id.unwrap_or_default().to_string(),
                index,
            },
            reason: Some(reason.to_string()),
        }
    }

    pub fn malformed_source(id: &str, type_tag: Option<&str>, reason: &str) -> Self {
        Self {
            code: DiagnosticCode::MalformedSource,
            type_tag: type_tag.map(str::to_string),
            context: DiagnosticContext::Source { id: id.to_string() },
            reason: Some(reason.to_string()),
        }
    }

    /// Id of the dropped entry.
    pub fn entry_id(&self) -> &str {
        match &self.context {
            DiagnosticContext::Layer { id, .. } | DiagnosticContext::Source { id } => id,
        }
    }
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnsupportedLayerType => "UnsupportedLayerType",
            DiagnosticCode::UnsupportedSourceType => "UnsupportedSourceType",
            DiagnosticCode::MalformedLayer => "MalformedLayer",
            DiagnosticCode::MalformedSource => "MalformedSource",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.code.as_str())?;
        match &self.context {
            DiagnosticContext::Layer { id, index } => write!(f, "layer '{id}' (#{index})")?,
            DiagnosticContext::Source { id } => write!(f, "source '{id}'")?,
        }
        match (&self.reason, &self.type_tag) {
            (Some(reason), _) => write!(f, " is malformed ({reason})")?,
            (None, Some(tag)) => write!(f, " has type '{tag}'")?,
            (None, None) => {}
        }
        let noun = match self.context {
            DiagnosticContext::Layer { .. } => "layer",
            DiagnosticContext::Source { .. } => "source",
        };
        write!(f, "; {noun} dropped")
    }
}
