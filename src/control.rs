//! Out-of-band control messages posted by the page.
//!
//! These are fire-and-forget: the worker never answers the sender, and a
//! failed handler is logged rather than surfaced.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ControlMessage {
    /// Skip the waiting phase: the installed version takes effect
    /// immediately, even while old pages are still open.
    ActivateNow,
    /// Delete every cache store regardless of version. Used for a forced
    /// application refresh after a broken deploy.
    PurgeAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_page_messages() {
        let activate: ControlMessage =
            serde_json::from_str(r#"{"kind":"activate-now"}"#).unwrap();
        assert_eq!(activate, ControlMessage::ActivateNow);

        let purge: ControlMessage = serde_json::from_str(r#"{"kind":"purge-all"}"#).unwrap();
        assert_eq!(purge, ControlMessage::PurgeAll);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<ControlMessage, _> =
            serde_json::from_str(r#"{"kind":"self-destruct"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let json = serde_json::to_string(&ControlMessage::PurgeAll).unwrap();
        assert_eq!(json, r#"{"kind":"purge-all"}"#);
        let back: ControlMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ControlMessage::PurgeAll);
    }
}
