//! Owns the current style document and its derived descriptors.
//!
//! A session is the long-lived holder a map view keeps: it feeds inputs to
//! the loader, applies only the newest result, memoizes the assembly per
//! document version, and cancels any in-flight load when closed or dropped.

use crate::assemble::{Assembly, AssemblyCache, StyleSnapshot};
use crate::config::StyleConfig;
use crate::loader::{
    CancelToken, DefaultTransport, DocumentLoader, LoadError, LoadOutcome, LoadState, StyleInput,
    StyleTransport,
};
use crate::style::StyleDocument;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Default)]
struct Current {
    snapshot: Option<StyleSnapshot>,
    cache: AssemblyCache,
}

pub struct StyleSession<T: StyleTransport = DefaultTransport> {
    loader: DocumentLoader<T>,
    scope: CancelToken,
    current: Mutex<Current>,
}

impl StyleSession<DefaultTransport> {
    pub fn new(config: StyleConfig) -> Self {
        Self::from_loader(DocumentLoader::new(config))
    }
}

impl<T: StyleTransport> StyleSession<T> {
    pub fn with_transport(transport: T, config: StyleConfig) -> Self {
        Self::from_loader(DocumentLoader::with_transport(transport, config))
    }

    pub fn from_loader(loader: DocumentLoader<T>) -> Self {
        Self {
            loader,
            scope: CancelToken::new(),
            current: Mutex::new(Current::default()),
        }
    }

    /// Switch to a new input and return its assembly.
    ///
    /// Returns `Ok(None)` when this request was superseded by a newer
    /// `set_input` call (or the session was closed) before it resolved. On
    /// failure the previous document is discarded, so the session renders
    /// nothing until a later load succeeds.
    pub async fn set_input(
        &self,
        input: impl Into<StyleInput>,
    ) -> Result<Option<Arc<Assembly>>, LoadError> {
        let (attempt, result) = self.loader.load_tracked(input.into(), &self.scope).await;
        match result {
            Ok(LoadOutcome::Loaded { attempt, document }) => {
                let mut current = self.lock();
                // Re-check under the lock: another set_input may have started
                // after the loader returned.
                if !self.loader.is_current(attempt) {
                    return Ok(None);
                }
                let snapshot = StyleSnapshot::new(document);
                let assembly = current.cache.get_or_assemble(&snapshot);
                debug!(
                    version = ?snapshot.version(),
                    descriptors = assembly.descriptors.len(),
                    dropped = assembly.diagnostics.len(),
                    "applied style document"
                );
                current.snapshot = Some(snapshot);
                Ok(Some(assembly))
            }
            Ok(LoadOutcome::Cancelled) => Ok(None),
            Err(err) => {
                let mut current = self.lock();
                if !self.loader.is_current(attempt) {
                    debug!(error = %err, "ignoring failure of superseded input");
                    return Ok(None);
                }
                current.snapshot = None;
                current.cache.clear();
                Err(err)
            }
        }
    }

    /// The applied document, if any.
    pub fn document(&self) -> Option<Arc<StyleDocument>> {
        self.lock()
            .snapshot
            .as_ref()
            .map(|snapshot| Arc::clone(snapshot.document()))
    }

    /// Assembly of the applied document, recomputed only when the document
    /// version changed since the last call.
    pub fn assembly(&self) -> Option<Arc<Assembly>> {
        let mut guard = self.lock();
        let current = &mut *guard;
        let snapshot = current.snapshot.as_ref()?;
        Some(current.cache.get_or_assemble(snapshot))
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    /// Cancel the in-flight load without tearing the session down.
    pub fn cancel_pending(&self) {
        self.loader.cancel();
    }

    /// The session's teardown token.
    ///
    /// Cancelling it has the same effect as [`StyleSession::close`]. Owners
    /// that share the session behind an `Arc` hold a clone so teardown does
    /// not have to wait for the last reference to drop.
    pub fn scope(&self) -> CancelToken {
        self.scope.clone()
    }

    /// Tear the session down: the in-flight load resolves to `Ok(None)` and
    /// every later `set_input` does too. The applied document stays readable.
    pub fn close(&self) {
        if !self.scope.is_cancelled() {
            debug!("closing style session");
        }
        self.scope.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_cancelled()
    }

    fn lock(&self) -> MutexGuard<'_, Current> {
        self.current.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl<T: StyleTransport> Drop for StyleSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}
