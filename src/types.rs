//! Wire messages exchanged with the calling process.

use serde::{Deserialize, Serialize};

/// Request read from stdin. Missing fields decode to empty strings, so an
/// absent `action` is reported as an unknown action rather than a decode
/// failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignRequest {
    #[serde(default)]
    pub action: String,
    /// Hex-encoded bytes; the meaning depends on `action` (raw payload for
    /// dispersal, blob key for a status lookup).
    #[serde(default)]
    pub data: String,
}

/// Response written to stdout. Unset optional fields are omitted from the
/// JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignResponse {
    pub success: bool,
    /// Reserved for detached-signature responses; no current action
    /// populates it. Kept for wire compatibility with the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SignResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn with_blob_key(blob_key: String) -> Self {
        Self {
            success: true,
            blob_key: Some(blob_key),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
