//! Normalized descriptors handed to the rendering collaborator.
//!
//! Every optional field is skipped when absent so the renderer's own
//! defaults apply; a descriptor never carries an explicit `null`.

use crate::style::identity::{LayerKind, SourceKind};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A layer the renderer should draw, in z-order position.
pub struct LayerDescriptor {
    pub id: String,
    pub kind: LayerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_layer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom_level: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom_level: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Merged paint and layout properties with camel-cased keys. `None`
    /// means no styling was specified, never an empty map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// A data source the renderer should register before any layer.
pub struct SourceDescriptor {
    pub id: String,
    #[serde(flatten)]
    pub props: SourceProps,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
/// Kind-specific source fields.
pub enum SourceProps {
    #[serde(rename = "vector")]
    Vector(TileSourceProps),
    #[serde(rename = "raster")]
    Raster(RasterSourceProps),
    #[serde(rename = "image")]
    Image(ImageSourceProps),
    #[serde(rename = "geojson")]
    GeoJson(GeoJsonSourceProps),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Fields shared by tiled sources.
pub struct TileSourceProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_url_templates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom_level: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom_level: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// `Some(true)` only for the `tms` scheme; never `Some(false)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tms: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSourceProps {
    #[serde(flatten)]
    pub tiles: TileSourceProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<Number>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
/// Georeferenced image. `coordinates` is passed through unvalidated.
pub struct ImageSourceProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// GeoJSON source. At most one of `url` and `shape` is set.
pub struct GeoJsonSourceProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_radius: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_max_zoom_level: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_properties: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_metrics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom_level: Option<Number>,
}

#[derive(Clone, Debug, PartialEq)]
/// One element of the assembled output.
pub enum Descriptor {
    Source(SourceDescriptor),
    Layer(LayerDescriptor),
}

/// Borrowed view of a descriptor with the same wire form as [`Descriptor`].
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(tag = "descriptor", rename_all = "lowercase")]
pub enum DescriptorRef<'a> {
    Source(&'a SourceDescriptor),
    Layer(&'a LayerDescriptor),
}

impl Serialize for Descriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.borrowed().serialize(serializer)
    }
}

impl SourceDescriptor {
    pub fn kind(&self) -> SourceKind {
        match &self.props {
            SourceProps::Vector(_) => SourceKind::Vector,
            SourceProps::Raster(_) => SourceKind::Raster,
            SourceProps::Image(_) => SourceKind::Image,
            SourceProps::GeoJson(_) => SourceKind::GeoJson,
        }
    }
}

impl Descriptor {
    /// Stable id, usable as a diffing key by the renderer.
    pub fn id(&self) -> &str {
        match self {
            Descriptor::Source(source) => &source.id,
            Descriptor::Layer(layer) => &layer.id,
        }
    }

    pub fn borrowed(&self) -> DescriptorRef<'_> {
        match self {
            Descriptor::Source(source) => DescriptorRef::Source(source),
            Descriptor::Layer(layer) => DescriptorRef::Layer(layer),
        }
    }

    pub fn as_source(&self) -> Option<&SourceDescriptor> {
        match self {
            Descriptor::Source(source) => Some(source),
            Descriptor::Layer(_) => None,
        }
    }

    pub fn as_layer(&self) -> Option<&LayerDescriptor> {
        match self {
            Descriptor::Layer(layer) => Some(layer),
            Descriptor::Source(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_layer_fields_are_not_serialized() {
        let layer = LayerDescriptor {
            id: "water".to_string(),
            kind: LayerKind::Fill,
            source_id: None,
            source_layer_id: None,
            min_zoom_level: None,
            max_zoom_level: None,
            filter: None,
            style: None,
        };
        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value, json!({"id": "water", "kind": "fill"}));
    }

    #[test]
    fn raster_descriptor_flattens_tile_fields() {
        let source = SourceDescriptor {
            id: "satellite".to_string(),
            props: SourceProps::Raster(RasterSourceProps {
                tiles: TileSourceProps {
                    tile_url_templates: Some(vec!["https://t/{z}/{x}/{y}.png".to_string()]),
                    tms: Some(true),
                    ..Default::default()
                },
                tile_size: Some(256.into()),
            }),
        };
        let value = serde_json::to_value(Descriptor::Source(source)).unwrap();
        assert_eq!(
            value,
            json!({
                "descriptor": "source",
                "id": "satellite",
                "kind": "raster",
                "tileUrlTemplates": ["https://t/{z}/{x}/{y}.png"],
                "tms": true,
                "tileSize": 256
            })
        );
    }

    #[test]
    fn borrowed_view_matches_owned_form() {
        let layer = LayerDescriptor {
            id: "roads".to_string(),
            kind: LayerKind::Line,
            source_id: Some("osm".to_string()),
            source_layer_id: None,
            min_zoom_level: Some(4.into()),
            max_zoom_level: None,
            filter: None,
            style: None,
        };
        let borrowed = serde_json::to_value(DescriptorRef::Layer(&layer)).unwrap();
        assert_eq!(
            borrowed,
            json!({"descriptor": "layer", "id": "roads", "kind": "line", "sourceId": "osm", "minZoomLevel": 4})
        );
        assert_eq!(borrowed, serde_json::to_value(Descriptor::Layer(layer)).unwrap());
    }
}
