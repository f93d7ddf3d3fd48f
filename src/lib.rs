//! Style document interpreter for a map renderer.
//!
//! A style document lists data sources and an ordered stack of layers. This
//! crate loads such a document (inline or from a URL), classifies each entry
//! into a typed descriptor the rendering engine understands, drops entries of
//! unsupported types with a diagnostic, and hands the survivors to a
//! [`RenderTarget`] with every source ahead of every layer.
//!
//! Loading is asynchronous and cancellable; [`StyleSession`] ties a loader,
//! the currently applied document, and a memoized [`Assembly`] together so
//! only the newest input is ever applied.

pub mod assemble;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod loader;
pub mod normalize;
pub mod render;
pub mod schema_loader;
pub mod session;
pub mod style;

pub use assemble::{Assembly, AssemblyCache, DocumentVersion, StyleSnapshot, assemble};
pub use classify::{
    Classified, classify_layer, classify_layer_entry, classify_source, classify_source_entry,
};
pub use config::StyleConfig;
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticContext};
pub use loader::{
    AttemptId, CancelToken, DefaultTransport, DocumentLoader, LoadError, LoadOutcome, LoadState,
    StyleInput, StyleTransport, parse_style_document,
};
pub use normalize::{merge_properties, normalize_bag, normalize_key};
pub use render::{JsonLinesTarget, RenderTarget};
pub use session::StyleSession;
pub use style::{
    Descriptor, DescriptorRef, Entry, LayerDescriptor, LayerKind, LayerSpec, LayerType,
    MalformedEntry, SourceDescriptor, SourceKind, SourceMap, SourceProps, SourceSpec, SourceType,
    StyleDocument,
};

use tracing_subscriber::EnvFilter;

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Install a stderr `tracing` subscriber driven by `config.log_filter`.
///
/// An unparsable filter falls back to `warn`. Calling this twice is harmless;
/// the second subscriber is ignored.
pub fn init_tracing(config: &StyleConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
