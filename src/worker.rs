//! The cache worker: one event-dispatch surface per application origin.
//!
//! The host binds whatever delivers lifecycle, fetch, and message events to
//! the four `handle_*` methods and awaits each one, keeping the triggering
//! event alive until the async work behind it has settled. Lifecycle events
//! are ordered per version; fetch events may run concurrently and share no
//! mutable state beyond the store itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, info, warn};
use url::Origin;

use crate::config::WorkerConfig;
use crate::control::ControlMessage;
use crate::error::{WorkerError, WorkerResult};
use crate::fetch::Fetcher;
use crate::http::{HttpResponse, InterceptedRequest};
use crate::lifecycle::WorkerState;
use crate::router::{self, RouteDecision};
use crate::store::{CacheStorage, CachedEntry};
use crate::strategy::{CacheFirst, FetchStrategy, NetworkFirst, StrategyContext};
use crate::version::CacheNames;

/// Pages controlled by the worker. `claim` places every currently open page
/// under this worker version; the host supplies the binding.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    async fn claim(&self) -> anyhow::Result<()>;
}

/// For hosts with no page-claiming concept.
pub struct NoopClients;

#[async_trait]
impl ClientRegistry for NoopClients {
    async fn claim(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Outcome of one intercepted request.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Cross-origin: the host forwards the request untouched.
    Passthrough,
    /// Response for the page: live, cached, or the offline fallback. The
    /// page sees no interface difference, only latency and a 503 when
    /// offline and uncached.
    Response(HttpResponse),
}

pub struct CacheWorker {
    config: WorkerConfig,
    names: CacheNames,
    origin: Origin,
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
    clients: Arc<dyn ClientRegistry>,
    state: Mutex<WorkerState>,
    skip_waiting: AtomicBool,
}

impl CacheWorker {
    pub fn new(
        config: WorkerConfig,
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
        clients: Arc<dyn ClientRegistry>,
    ) -> Self {
        let names = CacheNames::for_version(&config.version);
        let origin = config.origin.origin();
        Self {
            config,
            names,
            origin,
            storage,
            fetcher,
            clients,
            state: Mutex::new(WorkerState::Installing),
            skip_waiting: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> WorkerState {
        *self.state.lock().unwrap()
    }

    /// Set once the installed version should cut over without waiting for
    /// old pages to close. The host dispatcher polls this and drives
    /// [`handle_activate`](Self::handle_activate).
    pub fn should_skip_waiting(&self) -> bool {
        self.skip_waiting.load(Ordering::SeqCst)
    }

    pub fn cache_names(&self) -> &CacheNames {
        &self.names
    }

    fn advance(&self, next: WorkerState) -> WorkerResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.can_advance_to(next) {
            return Err(WorkerError::Lifecycle { from: *state, to: next });
        }
        debug!(from = %*state, to = %next, "lifecycle transition");
        *state = next;
        Ok(())
    }

    /// Install: populate the static store from the precache manifest,
    /// all-or-nothing, then signal that this version should take effect
    /// immediately.
    pub async fn handle_install(&self) -> WorkerResult<()> {
        info!(version = %self.config.version, store = self.names.static_store(), "installing");

        let responses = self.fetch_manifest().await?;
        for (key, response) in responses {
            self.storage
                .put(self.names.static_store(), &key, CachedEntry::new(response))
                .await?;
        }

        self.skip_waiting.store(true, Ordering::SeqCst);
        self.advance(WorkerState::Installed)?;
        info!(
            version = %self.config.version,
            urls = self.config.precache.len(),
            "precache complete"
        );
        Ok(())
    }

    /// Every manifest fetch must succeed with an ok status before anything
    /// is written; the first failure aborts the whole manifest.
    async fn fetch_manifest(&self) -> WorkerResult<Vec<(String, HttpResponse)>> {
        let fetches = self.config.precache.iter().map(|raw| async move {
            let url = self.config.origin.join(raw)?;
            let request = InterceptedRequest::get(url);
            let response =
                self.fetcher
                    .fetch(&request)
                    .await
                    .map_err(|source| WorkerError::Precache {
                        url: raw.clone(),
                        source,
                    })?;
            if !response.is_ok() {
                return Err(WorkerError::PrecacheStatus {
                    url: raw.clone(),
                    status: response.status,
                });
            }
            Ok((request.cache_key().to_string(), response))
        });
        try_join_all(fetches).await
    }

    /// Activate: reclaim every stale store, then take control of all open
    /// pages. This is the only point old-version stores are deleted.
    pub async fn handle_activate(&self) -> WorkerResult<()> {
        self.advance(WorkerState::Activating)?;
        info!(version = %self.config.version, "activating");

        for name in self.storage.list_stores().await? {
            if self.names.is_current(&name) {
                continue;
            }
            // Best-effort per store: one failure must not block the rest.
            match self.storage.delete_store(&name).await {
                Ok(()) => debug!(store = %name, "deleted stale store"),
                Err(e) => warn!(store = %name, error = %e, "failed to delete stale store"),
            }
        }

        self.clients.claim().await.map_err(WorkerError::Claim)?;
        self.advance(WorkerState::Active)?;
        info!(version = %self.config.version, "active");
        Ok(())
    }

    /// One intercepted request. Routed to a strategy that always produces a
    /// response; the only error here is dispatch before activation.
    pub async fn handle_fetch(&self, request: &InterceptedRequest) -> WorkerResult<FetchOutcome> {
        let state = self.state();
        if !state.can_intercept() {
            return Err(WorkerError::NotActive(state));
        }

        let decision = router::classify(request, &self.origin);
        debug!(url = %request.url, ?decision, "routing request");

        let strategy: &dyn FetchStrategy = match decision {
            RouteDecision::Passthrough => return Ok(FetchOutcome::Passthrough),
            RouteDecision::NetworkFirst => &NetworkFirst,
            RouteDecision::CacheFirst => &CacheFirst,
        };

        let cx = StrategyContext {
            storage: Arc::clone(&self.storage),
            fetcher: Arc::clone(&self.fetcher),
            dynamic_store: self.names.dynamic_store().to_string(),
        };
        Ok(FetchOutcome::Response(strategy.handle(&cx, request).await))
    }

    /// One control message from the page. Fire-and-forget: failures are
    /// logged, never returned to the sender.
    pub async fn handle_message(&self, message: ControlMessage) {
        match message {
            ControlMessage::ActivateNow => {
                debug!("activate-now received");
                self.skip_waiting.store(true, Ordering::SeqCst);
            }
            ControlMessage::PurgeAll => {
                info!("purge-all received, deleting every store");
                let stores = match self.storage.list_stores().await {
                    Ok(stores) => stores,
                    Err(e) => {
                        warn!(error = %e, "failed to list stores for purge");
                        return;
                    }
                };
                for name in stores {
                    if let Err(e) = self.storage.delete_store(&name).await {
                        warn!(store = %name, error = %e, "failed to purge store");
                    }
                }
            }
        }
    }
}
