//! Request and response types crossing the worker boundary.

use serde::{Deserialize, Serialize};
use url::Url;

/// Status returned when the network is down and no cached copy exists.
const OFFLINE_STATUS: u16 = 503;

/// Body of the synthesized offline response.
const OFFLINE_BODY: &str = "Offline: no cached copy of this resource is available.";

/// One outgoing request intercepted by the worker. Read-only to the worker.
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    pub method: String,
    pub url: Url,
    /// Host hint: true when the request loads a document rather than a
    /// subresource.
    pub navigation: bool,
}

impl InterceptedRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: "GET".to_string(),
            url,
            navigation: false,
        }
    }

    pub fn navigation(url: Url) -> Self {
        Self {
            method: "GET".to_string(),
            url,
            navigation: true,
        }
    }

    /// Cache entries are keyed by the full request URL.
    pub fn cache_key(&self) -> &str {
        self.url.as_str()
    }
}

/// A response as the worker sees it: live from the network, replayed from a
/// cache store, or synthesized when offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for 2xx. Only ok responses are ever written into a cache store.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Synthesized 503 returned when a fetch fails and no store has the key.
    pub fn offline_fallback() -> Self {
        Self {
            status: OFFLINE_STATUS,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: OFFLINE_BODY.as_bytes().to_vec(),
        }
    }
}
