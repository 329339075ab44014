//! Offline cache worker for the spendcache expense tracker.
//!
//! The worker runs as a single background context per application origin,
//! separate from any open page. The hosting environment delivers lifecycle
//! events (install, activate), one fetch event per outgoing request, and
//! out-of-band control messages from the page; [`CacheWorker`] exposes one
//! async handler per event kind and the dispatcher must await each handler
//! before considering the event settled.
//!
//! All durable state lives in the cache stores behind the
//! [`CacheStorage`](store::CacheStorage) trait; the worker itself keeps only
//! its lifecycle state and the skip-waiting signal. Two store tiers exist
//! per build version: a *static* store populated from the precache manifest
//! at install time, and a *dynamic* store populated opportunistically from
//! live network responses. Stores from older versions are garbage-collected
//! at activation.

pub mod config;
pub mod control;
pub mod error;
pub mod fetch;
pub mod http;
pub mod lifecycle;
pub mod router;
pub mod store;
pub mod strategy;
pub mod version;
pub mod worker;

pub use config::WorkerConfig;
pub use control::ControlMessage;
pub use error::{WorkerError, WorkerResult};
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use http::{HttpResponse, InterceptedRequest};
pub use lifecycle::WorkerState;
pub use router::RouteDecision;
pub use store::{CacheStorage, CachedEntry, FsStorage, MemoryStorage, StoreError};
pub use version::CacheNames;
pub use worker::{CacheWorker, ClientRegistry, FetchOutcome, NoopClients};
