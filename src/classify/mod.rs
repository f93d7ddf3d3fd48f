//! Dispatch from declared `type` tags to typed descriptors.
//!
//! Both classifiers are total: an unsupported tag or a malformed entry
//! yields [`Classified::Dropped`] carrying a diagnostic instead of failing,
//! so one bad entry never blanks the rest of the map.

pub mod layer;
pub mod source;

pub use layer::{classify_layer, classify_layer_entry};
pub use source::{classify_source, classify_source_entry};

use crate::diagnostics::Diagnostic;
use serde_json::Number;

/// Result of classifying one document entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Classified<T> {
    Kept(T),
    Dropped(Diagnostic),
}

impl<T> Classified<T> {
    pub fn kept(self) -> Option<T> {
        match self {
            Classified::Kept(value) => Some(value),
            Classified::Dropped(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Classified::Kept(_) => None,
            Classified::Dropped(diag) => Some(diag),
        }
    }
}

/// Numeric style fields where zero reads as "not set".
pub(crate) fn non_zero(value: Option<&Number>) -> Option<Number> {
    value.filter(|n| n.as_f64() != Some(0.0)).cloned()
}

/// String style fields where the empty string reads as "not set".
pub(crate) fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
