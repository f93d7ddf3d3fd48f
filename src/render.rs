//! Interface to the rendering collaborator.
//!
//! The engine that actually draws tiles lives outside this crate. It receives
//! descriptors through [`RenderTarget`] in assembly order: every source is
//! registered before the first layer is added, and layers arrive bottom to
//! top.

use crate::style::{DescriptorRef, LayerDescriptor, SourceDescriptor};
use anyhow::{Context, Result};
use std::io::Write;

pub trait RenderTarget {
    fn register_source(&mut self, source: &SourceDescriptor) -> Result<()>;
    fn add_layer(&mut self, layer: &LayerDescriptor) -> Result<()>;
}

/// Writes each descriptor as one compact JSON line.
///
/// Used by `style-inspect --ndjson` to hand descriptors to an out-of-process
/// renderer.
pub struct JsonLinesTarget<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesTarget<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, id: &str, descriptor: DescriptorRef<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, &descriptor)
            .with_context(|| format!("serializing descriptor '{id}'"))?;
        self.out.write_all(b"\n").context("writing descriptor line")?;
        Ok(())
    }
}

impl<W: Write> RenderTarget for JsonLinesTarget<W> {
    fn register_source(&mut self, source: &SourceDescriptor) -> Result<()> {
        self.write_line(&source.id, DescriptorRef::Source(source))
    }

    fn add_layer(&mut self, layer: &LayerDescriptor) -> Result<()> {
        self.write_line(&layer.id, DescriptorRef::Layer(layer))
    }
}
