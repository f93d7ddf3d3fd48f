//! Final ordering of descriptors and memoized recomputation.
//!
//! The output lists every source before any layer: the renderer must have a
//! source registered before a layer that reads from it, and layers must keep
//! document order because later layers draw above earlier ones.

use crate::classify::{Classified, classify_layer_entry, classify_source_entry};
use crate::diagnostics::Diagnostic;
use crate::render::RenderTarget;
use crate::style::{Descriptor, LayerDescriptor, SourceDescriptor, StyleDocument};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Debug, Default, PartialEq)]
/// Ordered descriptors plus the diagnostics for every dropped entry.
pub struct Assembly {
    pub descriptors: Vec<Descriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify every source (mapping order) and layer (array order).
///
/// Entries that did not parse are dropped here with a diagnostic, exactly
/// like entries of an unsupported type.
///
/// Pure: the same document always yields a structurally identical assembly.
pub fn assemble(document: &StyleDocument) -> Assembly {
    let mut assembly = Assembly {
        descriptors: Vec::with_capacity(document.sources.len() + document.layers.len()),
        diagnostics: Vec::new(),
    };

    for (id, entry) in document.sources.iter() {
        match classify_source_entry(id, entry) {
            Classified::Kept(source) => assembly.descriptors.push(Descriptor::Source(source)),
            Classified::Dropped(diag) => assembly.diagnostics.push(diag),
        }
    }

    for (index, entry) in document.layers.iter().enumerate() {
        match classify_layer_entry(index, entry) {
            Classified::Kept(layer) => assembly.descriptors.push(Descriptor::Layer(layer)),
            Classified::Dropped(diag) => assembly.diagnostics.push(diag),
        }
    }

    assembly
}

impl Assembly {
    pub fn sources(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.descriptors.iter().filter_map(Descriptor::as_source)
    }

    pub fn layers(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.descriptors.iter().filter_map(Descriptor::as_layer)
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Feed every descriptor to `target` in output order.
    ///
    /// Stops at the first descriptor the target rejects.
    pub fn apply_to<T: RenderTarget + ?Sized>(&self, target: &mut T) -> Result<()> {
        for descriptor in &self.descriptors {
            match descriptor {
                Descriptor::Source(source) => target
                    .register_source(source)
                    .with_context(|| format!("registering source '{}'", source.id))?,
                Descriptor::Layer(layer) => target
                    .add_layer(layer)
                    .with_context(|| format!("adding layer '{}'", layer.id))?,
            }
        }
        Ok(())
    }
}

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Marker distinguishing one loaded document from another.
///
/// Each call to [`StyleSnapshot::new`] draws a fresh version, so two loads of
/// byte-identical JSON still count as different documents.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DocumentVersion(u64);

#[derive(Clone, Debug)]
/// Immutable document paired with its version marker.
pub struct StyleSnapshot {
    version: DocumentVersion,
    document: Arc<StyleDocument>,
}

impl StyleSnapshot {
    pub fn new(document: Arc<StyleDocument>) -> Self {
        Self {
            version: DocumentVersion(NEXT_VERSION.fetch_add(1, Ordering::Relaxed)),
            document,
        }
    }

    pub fn version(&self) -> DocumentVersion {
        self.version
    }

    pub fn document(&self) -> &Arc<StyleDocument> {
        &self.document
    }
}

#[derive(Debug, Default)]
/// Holds the assembly for the most recent snapshot only.
///
/// A different version replaces the cached entry outright; nothing from the
/// previous document is patched or reused.
pub struct AssemblyCache {
    entry: Option<(DocumentVersion, Arc<Assembly>)>,
}

impl AssemblyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached assembly for `snapshot`, recomputing on a version change.
    pub fn get_or_assemble(&mut self, snapshot: &StyleSnapshot) -> Arc<Assembly> {
        if let Some((version, assembly)) = &self.entry {
            if *version == snapshot.version() {
                return Arc::clone(assembly);
            }
        }
        let assembly = Arc::new(assemble(snapshot.document()));
        self.entry = Some((snapshot.version(), Arc::clone(&assembly)));
        assembly
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn cached_version(&self) -> Option<DocumentVersion> {
        self.entry.as_ref().map(|(version, _)| *version)
    }
}
