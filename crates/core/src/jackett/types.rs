use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One configured indexer as reported by `GET /api/v2.0/indexers`.
///
/// Ephemeral: fetched fresh on every sync pass, never cached or persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIndexerRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: IndexerKind,
}

/// Jackett's indexer access classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexerKind {
    #[default]
    Public,
    Private,
    SemiPrivate,
}

impl IndexerKind {
    pub fn is_public(self) -> bool {
        matches!(self, IndexerKind::Public)
    }
}

/// Errors from the Jackett HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Jackett connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Jackett request timed out")]
    Timeout,

    #[error("Jackett rejected the request with HTTP {0}; check the API key")]
    Unauthorized(u16),

    #[error("Jackett returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected Jackett response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether retrying the request can plausibly help. Authorization
    /// failures, other client errors and malformed payloads are permanent;
    /// transport failures and server errors are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::ConnectionFailed(_) | ClientError::Timeout => true,
            ClientError::Http { status, .. } => *status >= 500,
            ClientError::Unauthorized(_) | ClientError::InvalidResponse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_indexer_record() {
        let json = r#"{"id": "yts", "name": "YTS", "type": "public"}"#;
        let record: RawIndexerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "yts");
        assert_eq!(record.name, "YTS");
        assert_eq!(record.kind, IndexerKind::Public);
    }

    #[test]
    fn test_deserialize_semi_private_kind() {
        let json = r#"{"id": "x", "name": "X", "type": "semi-private"}"#;
        let record: RawIndexerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, IndexerKind::SemiPrivate);
        assert!(!record.kind.is_public());
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        // Jackett returns a much larger object; only the fields we care
        // about should be picked up.
        let json = r#"{
            "id": "1337x",
            "name": "1337x",
            "type": "public",
            "description": "general tracker",
            "configured": true,
            "site_link": "https://1337x.to/"
        }"#;
        let record: RawIndexerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1337x");
    }

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::Timeout.is_transient());
        assert!(ClientError::ConnectionFailed("refused".into()).is_transient());
        assert!(ClientError::Http {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(!ClientError::Http {
            status: 404,
            body: String::new()
        }
        .is_transient());
        assert!(!ClientError::Unauthorized(401).is_transient());
        assert!(!ClientError::InvalidResponse("not json".into()).is_transient());
    }
}
