//! Style document wiring.
//!
//! This module wraps the MapLibre/Mapbox style JSON so the classifiers can
//! work against typed specs instead of ad-hoc maps. `model` mirrors the input
//! document, `identity` holds the closed kind tags, and `descriptor` holds the
//! normalized output consumed by the rendering collaborator.

pub mod descriptor;
pub mod identity;
pub mod model;

pub use descriptor::{
    Descriptor, DescriptorRef, GeoJsonSourceProps, ImageSourceProps, LayerDescriptor,
    RasterSourceProps, SourceDescriptor, SourceProps, TileSourceProps,
};
pub use identity::{LayerKind, LayerType, SourceKind, SourceType};
pub use model::{Entry, LayerSpec, MalformedEntry, SourceMap, SourceSpec, StyleDocument};
