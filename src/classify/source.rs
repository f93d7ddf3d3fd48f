use crate::classify::{Classified, non_empty, non_zero};
use crate::diagnostics::Diagnostic;
use crate::style::{
    Entry, GeoJsonSourceProps, ImageSourceProps, RasterSourceProps, SourceDescriptor, SourceKind,
    SourceProps, SourceSpec, SourceType, TileSourceProps,
};
use serde_json::Value;
use tracing::debug;

const TMS_SCHEME: &str = "tms";

/// Turn one source spec into a descriptor, or drop it with a diagnostic.
pub fn classify_source(id: &str, spec: &SourceSpec) -> Classified<SourceDescriptor> {
    let kind = match &spec.kind {
        SourceType::Known(kind) => *kind,
        SourceType::Unsupported(tag) => {
            debug!(source = id, tag = %tag, "dropping source with unsupported type");
            return Classified::Dropped(Diagnostic::unsupported_source(id, tag));
        }
    };

    let props = match kind {
        SourceKind::Vector => SourceProps::Vector(tile_props(spec)),
        SourceKind::Raster => SourceProps::Raster(RasterSourceProps {
            tiles: tile_props(spec),
            tile_size: non_zero(spec.tile_size.as_ref()),
        }),
        SourceKind::Image => SourceProps::Image(ImageSourceProps {
            url: spec.url.clone(),
            coordinates: spec.coordinates.clone(),
        }),
        SourceKind::GeoJson => SourceProps::GeoJson(geojson_props(spec)),
    };

    Classified::Kept(SourceDescriptor {
        id: id.to_string(),
        props,
    })
}

/// Classify a source entry, dropping it with a diagnostic if it did not parse.
pub fn classify_source_entry(id: &str, entry: &Entry<SourceSpec>) -> Classified<SourceDescriptor> {
    match entry {
        Entry::Parsed(spec) => classify_source(id, spec),
        Entry::Malformed(malformed) => {
            debug!(source = id, reason = %malformed.reason, "dropping malformed source");
            Classified::Dropped(Diagnostic::malformed_source(
                id,
                malformed.type_tag(),
                &malformed.reason,
            ))
        }
    }
}

/// Fields shared by `vector` and `raster` sources.
///
/// `url` and `tiles` may both be set; the renderer decides which wins. Zoom
/// bounds of zero are indistinguishable from absent, matching layers.
fn tile_props(spec: &SourceSpec) -> TileSourceProps {
    TileSourceProps {
        url: non_empty(spec.url.as_ref()),
        tile_url_templates: spec.tiles.clone(),
        min_zoom_level: non_zero(spec.minzoom.as_ref()),
        max_zoom_level: non_zero(spec.maxzoom.as_ref()),
        attribution: non_empty(spec.attribution.as_ref()),
        tms: (spec.scheme.as_deref() == Some(TMS_SCHEME)).then_some(true),
    }
}

fn geojson_props(spec: &SourceSpec) -> GeoJsonSourceProps {
    let (url, shape) = match &spec.data {
        Some(Value::String(url)) if !url.is_empty() => (Some(url.clone()), None),
        Some(data @ (Value::Object(_) | Value::Array(_))) => (None, Some(data.clone())),
        _ => (None, None),
    };

    GeoJsonSourceProps {
        url,
        shape,
        cluster: spec.cluster,
        cluster_radius: spec.cluster_radius.clone(),
        cluster_max_zoom_level: spec.cluster_max_zoom.clone(),
        cluster_properties: spec.cluster_properties.clone(),
        buffer: spec.buffer.clone(),
        tolerance: spec.tolerance.clone(),
        line_metrics: spec.line_metrics,
        max_zoom_level: spec.maxzoom.clone(),
    }
}
