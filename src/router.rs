//! Request classification.
//!
//! Content that changes per deploy without a version-bearing URL (HTML,
//! JSON, unversioned scripts) must never be served stale, so it always
//! revalidates against the network first. Content whose URL embeds a version
//! token is immutable for that token and can skip the round trip.

use url::{Origin, Url};

use crate::http::InterceptedRequest;

/// Suffixes that must revalidate on every load.
const DOCUMENT_SUFFIXES: [&str; 2] = [".html", ".json"];

/// Suffixes eligible for version pinning.
const VERSIONED_SUFFIXES: [&str; 2] = [".css", ".js"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Cross-origin: not intercepted, forwarded untouched.
    Passthrough,
    NetworkFirst,
    CacheFirst,
}

/// Ordered rules, first match wins.
pub fn classify(request: &InterceptedRequest, app_origin: &Origin) -> RouteDecision {
    if &request.url.origin() != app_origin {
        return RouteDecision::Passthrough;
    }

    let path = request.url.path();
    if request.navigation || has_suffix(path, &DOCUMENT_SUFFIXES) {
        return RouteDecision::NetworkFirst;
    }

    if has_suffix(path, &VERSIONED_SUFFIXES) {
        return if has_version_marker(&request.url) {
            RouteDecision::CacheFirst
        } else {
            RouteDecision::NetworkFirst
        };
    }

    // Images, fonts, and other static assets.
    RouteDecision::CacheFirst
}

fn has_suffix(path: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| path.ends_with(suffix))
}

/// A `v` query parameter marks the URL as version-pinned. Matching the
/// parameter key (not a raw `v=` substring) keeps `?nav=1` from pinning an
/// unversioned script.
fn has_version_marker(url: &Url) -> bool {
    url.query_pairs().any(|(key, _)| key == "v")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_origin() -> Origin {
        Url::parse("https://app.example.com").unwrap().origin()
    }

    fn get(url: &str) -> InterceptedRequest {
        InterceptedRequest::get(Url::parse(url).unwrap())
    }

    #[test]
    fn test_cross_origin_passthrough() {
        let request = get("https://fonts.example.org/roboto.css?v=1");
        assert_eq!(classify(&request, &app_origin()), RouteDecision::Passthrough);
    }

    #[test]
    fn test_navigation_is_network_first() {
        let request = InterceptedRequest::navigation(
            Url::parse("https://app.example.com/").unwrap(),
        );
        assert_eq!(classify(&request, &app_origin()), RouteDecision::NetworkFirst);
    }

    #[test]
    fn test_documents_are_network_first() {
        assert_eq!(
            classify(&get("https://app.example.com/index.html"), &app_origin()),
            RouteDecision::NetworkFirst
        );
        assert_eq!(
            classify(&get("https://app.example.com/api/data.json"), &app_origin()),
            RouteDecision::NetworkFirst
        );
    }

    #[test]
    fn test_versioned_assets_are_cache_first() {
        assert_eq!(
            classify(&get("https://app.example.com/app.css?v=3"), &app_origin()),
            RouteDecision::CacheFirst
        );
        assert_eq!(
            classify(&get("https://app.example.com/app.js?v=2026-08"), &app_origin()),
            RouteDecision::CacheFirst
        );
    }

    #[test]
    fn test_unversioned_assets_are_network_first() {
        assert_eq!(
            classify(&get("https://app.example.com/app.css"), &app_origin()),
            RouteDecision::NetworkFirst
        );
        assert_eq!(
            classify(&get("https://app.example.com/app.js?nav=1"), &app_origin()),
            RouteDecision::NetworkFirst
        );
    }

    #[test]
    fn test_everything_else_is_cache_first() {
        assert_eq!(
            classify(&get("https://app.example.com/logo.png"), &app_origin()),
            RouteDecision::CacheFirst
        );
        assert_eq!(
            classify(&get("https://app.example.com/fonts/inter.woff2"), &app_origin()),
            RouteDecision::CacheFirst
        );
    }

    #[test]
    fn test_document_rule_beats_version_marker() {
        // Ordered rules: a .json with ?v= still revalidates.
        assert_eq!(
            classify(&get("https://app.example.com/data.json?v=1"), &app_origin()),
            RouteDecision::NetworkFirst
        );
    }
}
