//! Network access behind a trait so hosts and tests can supply their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::http::{HttpResponse, InterceptedRequest};

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unsupported method: {0}")]
    Method(String),

    /// Host-reported failure: connection refused, offline, or a scripted
    /// test fetcher with no answer for the URL.
    #[error("network unreachable: {0}")]
    Unreachable(String),
}

/// The worker's only path to the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &InterceptedRequest) -> Result<HttpResponse, FetchError>;
}

/// Production fetcher backed by reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &InterceptedRequest) -> Result<HttpResponse, FetchError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| FetchError::Method(request.method.clone()))?;

        let response = self
            .client
            .request(method, request.url.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
