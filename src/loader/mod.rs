//! Resolves a [`StyleInput`] into an in-memory [`StyleDocument`].
//!
//! Inline documents resolve without touching the network. URLs are fetched
//! through a [`StyleTransport`] and parsed. Each call to
//! [`DocumentLoader::load`] is an attempt with its own generation number;
//! starting a new attempt cancels the previous one, and a result is only
//! delivered if its attempt is still the current one when it resolves.

pub mod cancel;
pub mod error;
pub mod input;
pub mod transport;

pub use cancel::CancelToken;
pub use error::LoadError;
pub use input::{StyleInput, parse_style_document};
pub use transport::{DefaultTransport, StyleTransport};

use crate::config::StyleConfig;
use crate::style::StyleDocument;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Cancelled,
    Failed,
}

/// Identifies one load attempt. Later attempts compare greater.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AttemptId(u64);

#[derive(Clone, Debug)]
pub enum LoadOutcome {
    Loaded {
        attempt: AttemptId,
        document: Arc<StyleDocument>,
    },
    /// The attempt was cancelled or superseded; nothing to apply.
    Cancelled,
}

struct Inflight {
    attempt: AttemptId,
    token: CancelToken,
}

struct LoaderState {
    next_attempt: u64,
    state: LoadState,
    current: Option<Inflight>,
}

pub struct DocumentLoader<T = DefaultTransport> {
    transport: T,
    config: StyleConfig,
    inner: Mutex<LoaderState>,
}

impl DocumentLoader<DefaultTransport> {
    pub fn new(config: StyleConfig) -> Self {
        Self::with_transport(DefaultTransport::new(), config)
    }
}

impl<T: StyleTransport> DocumentLoader<T> {
    pub fn with_transport(transport: T, config: StyleConfig) -> Self {
        Self {
            transport,
            config,
            inner: Mutex::new(LoaderState {
                next_attempt: 1,
                state: LoadState::Idle,
                current: None,
            }),
        }
    }

    pub fn state(&self) -> LoadState {
        self.lock().state
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// True while `attempt` is the most recently started one.
    pub fn is_current(&self, attempt: AttemptId) -> bool {
        self.lock()
            .current
            .as_ref()
            .is_some_and(|inflight| inflight.attempt == attempt)
    }

    /// Cancel whatever attempt is in flight, if any.
    pub fn cancel(&self) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if let Some(inflight) = &inner.current {
            inflight.token.cancel();
            if inner.state == LoadState::Loading {
                debug!(attempt = inflight.attempt.0, "load cancelled");
                inner.state = LoadState::Cancelled;
            }
        }
    }

    /// Resolve `input` into a document.
    ///
    /// `scope` is the caller's cancellation token: cancelling it suppresses
    /// delivery and yields [`LoadOutcome::Cancelled`]. Starting another load
    /// on this loader has the same effect on this one. Failures of attempts
    /// that were already superseded are swallowed the same way.
    pub async fn load(
        &self,
        input: StyleInput,
        scope: &CancelToken,
    ) -> Result<LoadOutcome, LoadError> {
        self.load_tracked(input, scope).await.1
    }

    /// [`DocumentLoader::load`], also returning the attempt id so a caller can
    /// check [`DocumentLoader::is_current`] before acting on a failure.
    pub async fn load_tracked(
        &self,
        input: StyleInput,
        scope: &CancelToken,
    ) -> (AttemptId, Result<LoadOutcome, LoadError>) {
        let (attempt, token) = self.begin(&input);
        let result = self.run_attempt(attempt, &token, input, scope).await;
        (attempt, result)
    }

    async fn run_attempt(
        &self,
        attempt: AttemptId,
        token: &CancelToken,
        input: StyleInput,
        scope: &CancelToken,
    ) -> Result<LoadOutcome, LoadError> {
        let url = match input {
            StyleInput::Document(document) => {
                if scope.is_cancelled() {
                    self.finish(attempt, LoadState::Cancelled);
                    return Ok(LoadOutcome::Cancelled);
                }
                self.finish(attempt, LoadState::Loaded);
                return Ok(LoadOutcome::Loaded { attempt, document });
            }
            StyleInput::Url(url) => url,
        };

        if !self.config.scheme_allowed(url.scheme()) {
            let err = LoadError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                url: url.to_string(),
            };
            return self.fail(attempt, err);
        }

        let fetched = tokio::select! {
            biased;
            _ = scope.cancelled() => None,
            _ = token.cancelled() => None,
            body = self.transport.fetch(&url) => Some(body),
        };

        let Some(body) = fetched else {
            self.finish(attempt, LoadState::Cancelled);
            return Ok(LoadOutcome::Cancelled);
        };
        // A cancel may land after the fetch won the race above.
        if scope.is_cancelled() || token.is_cancelled() || !self.is_current(attempt) {
            self.finish(attempt, LoadState::Cancelled);
            return Ok(LoadOutcome::Cancelled);
        }

        let parsed = body.and_then(|bytes| {
            parse_style_document(url.as_str(), &bytes, self.config.validate_schema)
        });
        match parsed {
            Ok(document) => {
                if !self.finish(attempt, LoadState::Loaded) {
                    return Ok(LoadOutcome::Cancelled);
                }
                debug!(
                    attempt = attempt.0,
                    url = %url,
                    layers = document.layers.len(),
                    sources = document.sources.len(),
                    "style loaded"
                );
                Ok(LoadOutcome::Loaded {
                    attempt,
                    document: Arc::new(document),
                })
            }
            Err(err) => self.fail(attempt, err),
        }
    }

    fn begin(&self, input: &StyleInput) -> (AttemptId, CancelToken) {
        let mut inner = self.lock();
        if let Some(previous) = inner.current.take() {
            if inner.state == LoadState::Loading {
                debug!(attempt = previous.attempt.0, "superseding in-flight load");
            }
            previous.token.cancel();
        }
        let attempt = AttemptId(inner.next_attempt);
        inner.next_attempt += 1;
        let token = CancelToken::new();
        inner.current = Some(Inflight {
            attempt,
            token: token.clone(),
        });
        inner.state = LoadState::Loading;
        debug!(attempt = attempt.0, input = %input.describe(), "load started");
        (attempt, token)
    }

    /// Record the terminal state for `attempt`. Returns false, leaving the
    /// state alone, when a newer attempt has started since.
    fn finish(&self, attempt: AttemptId, state: LoadState) -> bool {
        let mut inner = self.lock();
        let current = inner
            .current
            .as_ref()
            .is_some_and(|inflight| inflight.attempt == attempt);
        if current && inner.state == LoadState::Loading {
            inner.state = state;
        }
        current
    }

    fn fail(&self, attempt: AttemptId, err: LoadError) -> Result<LoadOutcome, LoadError> {
        if self.finish(attempt, LoadState::Failed) {
            warn!(attempt = attempt.0, error = %err, "style load failed");
            Err(err)
        } else {
            debug!(attempt = attempt.0, error = %err, "discarding failure of superseded load");
            Ok(LoadOutcome::Cancelled)
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState> {
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }
}
