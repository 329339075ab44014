use thiserror::Error;

use crate::fetch::FetchError;
use crate::lifecycle::WorkerState;
use crate::store::StoreError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("cache store error: {0}")]
    Store(#[from] StoreError),

    #[error("precache of {url} failed: {source}")]
    Precache {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("precache of {url} returned status {status}")]
    PrecacheStatus { url: String, status: u16 },

    #[error("invalid lifecycle transition: {from} -> {to}")]
    Lifecycle { from: WorkerState, to: WorkerState },

    #[error("worker is not active (state: {0})")]
    NotActive(WorkerState),

    #[error("client takeover failed: {0}")]
    Claim(#[source] anyhow::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
