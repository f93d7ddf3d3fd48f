#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use mapstyle::{LayerDescriptor, LoadError, RenderTarget, SourceDescriptor, StyleDocument, StyleTransport};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use url::Url;

pub fn style_inspect() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_style-inspect"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn document(value: Value) -> StyleDocument {
    serde_json::from_value(value).expect("fixture must be a valid style document")
}

pub fn url(raw: &str) -> Url {
    Url::parse(raw).expect("fixture url")
}

enum Route {
    Ready(Result<Vec<u8>, u16>),
    Gated(oneshot::Receiver<Vec<u8>>),
}

/// In-memory transport whose responses are scripted per URL.
///
/// Gated routes stay pending until the test sends the body, which lets a test
/// decide exactly when each of several concurrent fetches resolves.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, body: &Value) {
        let bytes = serde_json::to_vec(body).expect("fixture body");
        self.routes().insert(url.to_string(), Route::Ready(Ok(bytes)));
    }

    pub fn respond_raw(&self, url: &str, body: &[u8]) {
        self.routes()
            .insert(url.to_string(), Route::Ready(Ok(body.to_vec())));
    }

    pub fn fail_status(&self, url: &str, status: u16) {
        self.routes()
            .insert(url.to_string(), Route::Ready(Err(status)));
    }

    /// Hold the response for `url` until the returned sender fires.
    pub fn gate(&self, url: &str) -> oneshot::Sender<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        self.routes().insert(url.to_string(), Route::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    fn routes(&self) -> MutexGuard<'_, HashMap<String, Route>> {
        self.routes.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl StyleTransport for ScriptedTransport {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        self.requests
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(url.to_string());
        let route = self.routes().remove(url.as_str());
        match route {
            Some(Route::Ready(Ok(body))) => Ok(body),
            Some(Route::Ready(Err(status))) => Err(LoadError::status(url.as_str(), status)),
            Some(Route::Gated(rx)) => rx
                .await
                .map_err(|_| LoadError::network(url.as_str(), "gate dropped")),
            None => Err(LoadError::status(url.as_str(), 404)),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Call {
    Source(String),
    Layer(String),
}

/// Render target that records the order of calls it receives.
#[derive(Default)]
pub struct RecordingTarget {
    pub calls: Vec<Call>,
    pub reject_layer: Option<String>,
}

impl RenderTarget for RecordingTarget {
    fn register_source(&mut self, source: &SourceDescriptor) -> Result<()> {
        self.calls.push(Call::Source(source.id.clone()));
        Ok(())
    }

    fn add_layer(&mut self, layer: &LayerDescriptor) -> Result<()> {
        if self.reject_layer.as_deref() == Some(layer.id.as_str()) {
            bail!("layer '{}' references an unknown source", layer.id);
        }
        self.calls.push(Call::Layer(layer.id.clone()));
        Ok(())
    }
}
