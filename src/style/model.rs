//! Deserializable representation of a style document.
//!
//! Only `sources` and `layers` are modeled; every other top-level field
//! (`sprite`, `glyphs`, `terrain`, `light`, `fog`, ...) is accepted and
//! dropped. Field names follow the style JSON, so `source-layer` and the
//! camel-cased source options are renamed explicitly.
//!
//! Only the document's outer shape is strict. Each layer and source is read
//! on its own; an entry that does not fit its typed form is kept as
//! [`Entry::Malformed`] so the rest of the document still loads.

use crate::style::identity::{LayerType, SourceType};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// Sources and layers of one style document.
pub struct StyleDocument {
    #[serde(default, deserialize_with = "nullable")]
    pub sources: SourceMap,
    #[serde(default, deserialize_with = "nullable")]
    pub layers: Vec<Entry<LayerSpec>>,
}

impl StyleDocument {
    /// Layers that parsed, in document order.
    pub fn parsed_layers(&self) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter().filter_map(Entry::parsed)
    }
}

/// One layer or source as read from the document.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry<T> {
    Parsed(T),
    Malformed(MalformedEntry),
}

/// An entry whose fields did not match their expected types.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedEntry {
    /// The entry exactly as it appeared in the document.
    pub raw: Value,
    pub reason: String,
}

impl MalformedEntry {
    /// The entry's `id` field, when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.raw.get("id").and_then(Value::as_str)
    }

    /// The entry's `type` field, when it is a string.
    pub fn type_tag(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }
}

impl<T> Entry<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Entry::Parsed(spec) => Some(spec),
            Entry::Malformed(_) => None,
        }
    }
}

impl<T: DeserializeOwned> Entry<T> {
    /// Read `raw` as `T`, keeping it verbatim if that fails.
    pub fn from_value(raw: Value) -> Self {
        match T::deserialize(&raw) {
            Ok(spec) => Entry::Parsed(spec),
            Err(err) => Entry::Malformed(MalformedEntry {
                raw,
                reason: err.to_string(),
            }),
        }
    }
}

impl<T> From<T> for Entry<T> {
    fn from(spec: T) -> Self {
        Entry::Parsed(spec)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Entry<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Entry::from_value)
    }
}

impl<T: Serialize> Serialize for Entry<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Entry::Parsed(spec) => spec.serialize(serializer),
            Entry::Malformed(entry) => entry.raw.serialize(serializer),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// One entry of the document's `layers` array.
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(
        rename = "source-layer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
/// One value of the document's `sources` mapping.
///
/// The field set is the union over every supported source kind; the
/// classifier picks the subset relevant to `kind`.
pub struct SourceSpec {
    #[serde(rename = "type")]
    pub kind: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_radius: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_max_zoom: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_properties: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_metrics: Option<bool>,
}

/// Source entries keyed by id, in document order.
///
/// A repeated id replaces the earlier value but keeps the earlier position,
/// which is how a JSON object with duplicate keys is read by the style
/// tooling this format comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceMap(Vec<(String, Entry<SourceSpec>)>);

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a source, keeping the first-seen position of `id`.
    pub fn insert(&mut self, id: impl Into<String>, spec: impl Into<Entry<SourceSpec>>) {
        let id = id.into();
        let spec = spec.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = spec,
            None => self.0.push((id, spec)),
        }
    }

    /// The parsed source with this id; `None` if absent or malformed.
    pub fn get(&self, id: &str) -> Option<&SourceSpec> {
        self.0
            .iter()
            .find(|(existing, _)| existing == id)
            .and_then(|(_, entry)| entry.parsed())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry<SourceSpec>)> {
        self.0.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, SourceSpec)> for SourceMap {
    fn from_iter<I: IntoIterator<Item = (String, SourceSpec)>>(iter: I) -> Self {
        let mut map = SourceMap::new();
        for (id, spec) in iter {
            map.insert(id, spec);
        }
        map
    }
}

impl Serialize for SourceMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, spec) in &self.0 {
            map.serialize_entry(id, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SourceMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SourceMapVisitor;

        impl<'de> Visitor<'de> for SourceMapVisitor {
            type Value = SourceMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of source ids to source objects")
            }

            fn visit_map<A>(self, mut access: A) -> Result<SourceMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sources = SourceMap::new();
                while let Some((id, spec)) = access.next_entry::<String, Entry<SourceSpec>>()? {
                    sources.insert(id, spec);
                }
                Ok(sources)
            }
        }

        deserializer.deserialize_map(SourceMapVisitor)
    }
}

/// Treat an explicit `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
