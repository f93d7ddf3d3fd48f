use crate::classify::{Classified, non_empty, non_zero};
use crate::diagnostics::Diagnostic;
use crate::normalize::merge_properties;
use crate::style::{Entry, LayerDescriptor, LayerSpec, LayerType};
use serde_json::Value;
use tracing::debug;

/// Turn one layer spec into a descriptor, or drop it with a diagnostic.
///
/// `index` is the layer's position in the document array and only feeds the
/// diagnostic. Optional fields follow the style tooling's truthiness rules:
/// empty strings, zero zoom levels and a `null` filter count as absent.
pub fn classify_layer(index: usize, spec: &LayerSpec) -> Classified<LayerDescriptor> {
    let kind = match &spec.kind {
        LayerType::Known(kind) => *kind,
        LayerType::Unsupported(tag) => {
            debug!(layer = %spec.id, index, tag = %tag, "dropping layer with unsupported type");
            return Classified::Dropped(Diagnostic::unsupported_layer(&spec.id, index, tag));
        }
    };

    let style = merge_properties(spec.paint.as_ref(), spec.layout.as_ref());

    Classified::Kept(LayerDescriptor {
        id: spec.id.clone(),
        kind,
        source_id: non_empty(spec.source.as_ref()),
        source_layer_id: non_empty(spec.source_layer.as_ref()),
        min_zoom_level: non_zero(spec.minzoom.as_ref()),
        max_zoom_level: non_zero(spec.maxzoom.as_ref()),
        filter: spec.filter.clone().filter(|f| !f.is_null() && *f != Value::Bool(false)),
        style: (!style.is_empty()).then_some(style),
    })
}

/// Classify a layer entry, dropping it with a diagnostic if it did not parse.
pub fn classify_layer_entry(
    index: usize,
    entry: &Entry<LayerSpec>,
) -> Classified<LayerDescriptor> {
    match entry {
        Entry::Parsed(spec) => classify_layer(index, spec),
        Entry::Malformed(malformed) => {
            debug!(
                layer = ?malformed.id(),
                index,
                reason = %malformed.reason,
                "dropping malformed layer"
            );
            Classified::Dropped(Diagnostic::malformed_layer(
                malformed.id(),
                index,
                malformed.type_tag(),
                &malformed.reason,
            ))
        }
    }
}
