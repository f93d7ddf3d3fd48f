use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Layer kinds the renderer knows how to draw.
///
/// The string forms match the style document `type` tag exactly, including
/// the dash in `fill-extrusion`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LayerKind {
    Circle,
    Symbol,
    Raster,
    Line,
    Fill,
    FillExtrusion,
    Background,
    Heatmap,
}

/// Declared layer `type`, as read from the document.
///
/// Known tags resolve to a [`LayerKind`]; anything else is kept verbatim in
/// `Unsupported` so the classifier can report it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LayerType {
    Known(LayerKind),
    Unsupported(String),
}

/// Source kinds the renderer can register.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SourceKind {
    Vector,
    Raster,
    Image,
    GeoJson,
}

/// Declared source `type`; unknown tags are preserved in `Unsupported`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SourceType {
    Known(SourceKind),
    Unsupported(String),
}

impl LayerKind {
    pub const ALL: [LayerKind; 8] = [
        LayerKind::Circle,
        LayerKind::Symbol,
        LayerKind::Raster,
        LayerKind::Line,
        LayerKind::Fill,
        LayerKind::FillExtrusion,
        LayerKind::Background,
        LayerKind::Heatmap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Circle => "circle",
            LayerKind::Symbol => "symbol",
            LayerKind::Raster => "raster",
            LayerKind::Line => "line",
            LayerKind::Fill => "fill",
            LayerKind::FillExtrusion => "fill-extrusion",
            LayerKind::Background => "background",
            LayerKind::Heatmap => "heatmap",
        }
    }
}

impl LayerType {
    pub fn as_str(&self) -> &str {
        match self {
            LayerType::Known(kind) => kind.as_str(),
            LayerType::Unsupported(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "circle" => LayerType::Known(LayerKind::Circle),
            "symbol" => LayerType::Known(LayerKind::Symbol),
            "raster" => LayerType::Known(LayerKind::Raster),
            "line" => LayerType::Known(LayerKind::Line),
            "fill" => LayerType::Known(LayerKind::Fill),
            "fill-extrusion" => LayerType::Known(LayerKind::FillExtrusion),
            "background" => LayerType::Known(LayerKind::Background),
            "heatmap" => LayerType::Known(LayerKind::Heatmap),
            other => LayerType::Unsupported(other.to_string()),
        }
    }
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Vector,
        SourceKind::Raster,
        SourceKind::Image,
        SourceKind::GeoJson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Vector => "vector",
            SourceKind::Raster => "raster",
            SourceKind::Image => "image",
            SourceKind::GeoJson => "geojson",
        }
    }
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::Known(kind) => kind.as_str(),
            SourceType::Unsupported(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "vector" => SourceType::Known(SourceKind::Vector),
            "raster" => SourceType::Known(SourceKind::Raster),
            "image" => SourceType::Known(SourceKind::Image),
            "geojson" => SourceType::Known(SourceKind::GeoJson),
            other => SourceType::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LayerKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for SourceKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for LayerType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LayerType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl Serialize for SourceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}
