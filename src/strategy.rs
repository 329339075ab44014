//! Network-first and cache-first response strategies.
//!
//! A strategy always produces a response: network and store failures degrade
//! to a cached copy, then to the synthesized offline fallback. Nothing here
//! propagates an error back to the request source.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::fetch::Fetcher;
use crate::http::{HttpResponse, InterceptedRequest};
use crate::store::{CacheStorage, CachedEntry};

/// Dependencies a strategy needs for one request.
pub struct StrategyContext {
    pub storage: Arc<dyn CacheStorage>,
    pub fetcher: Arc<dyn Fetcher>,
    /// Name of the current dynamic store; successful fetches are copied here.
    pub dynamic_store: String,
}

#[async_trait]
pub trait FetchStrategy: Send + Sync {
    async fn handle(&self, cx: &StrategyContext, request: &InterceptedRequest) -> HttpResponse;
}

/// Prefer the live network response; fall back to any cached copy, then to
/// the offline fallback.
pub struct NetworkFirst;

/// Prefer a cached copy; consult the network only on a miss.
pub struct CacheFirst;

#[async_trait]
impl FetchStrategy for NetworkFirst {
    async fn handle(&self, cx: &StrategyContext, request: &InterceptedRequest) -> HttpResponse {
        match cx.fetcher.fetch(request).await {
            Ok(response) => {
                cache_if_ok(cx, request, &response).await;
                response
            }
            Err(e) => {
                debug!(url = %request.url, error = %e, "network-first fetch failed, trying cache");
                match lookup(cx, request).await {
                    Some(entry) => entry.response,
                    None => HttpResponse::offline_fallback(),
                }
            }
        }
    }
}

#[async_trait]
impl FetchStrategy for CacheFirst {
    async fn handle(&self, cx: &StrategyContext, request: &InterceptedRequest) -> HttpResponse {
        if let Some(entry) = lookup(cx, request).await {
            return entry.response;
        }
        match cx.fetcher.fetch(request).await {
            Ok(response) => {
                cache_if_ok(cx, request, &response).await;
                response
            }
            Err(e) => {
                debug!(url = %request.url, error = %e, "cache-first miss and fetch failed");
                HttpResponse::offline_fallback()
            }
        }
    }
}

/// Read across every store; a store error counts as a miss.
async fn lookup(cx: &StrategyContext, request: &InterceptedRequest) -> Option<CachedEntry> {
    match cx.storage.lookup_any(request.cache_key()).await {
        Ok(hit) => hit,
        Err(e) => {
            debug!(url = %request.url, error = %e, "cache lookup failed, treating as miss");
            None
        }
    }
}

/// Best-effort copy into the dynamic store. Only ok (2xx) GET responses are
/// cached; a failed write never blocks returning the live response.
async fn cache_if_ok(cx: &StrategyContext, request: &InterceptedRequest, response: &HttpResponse) {
    if request.method != "GET" || !response.is_ok() {
        return;
    }
    let entry = CachedEntry::new(response.clone());
    if let Err(e) = cx
        .storage
        .put(&cx.dynamic_store, request.cache_key(), entry)
        .await
    {
        warn!(
            url = %request.url,
            store = %cx.dynamic_store,
            error = %e,
            "failed to cache network response"
        );
    }
}
