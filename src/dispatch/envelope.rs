use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform JSON body for every function route
///
/// `{"success": true, "payload": ...}` or `{"success": false, "reason": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Envelope {
    pub fn success(payload: Value) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            reason: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            reason: Some(reason.into()),
        }
    }
}

/// Why a request did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The query string named parameters the route does not accept
    InvalidParameters,
    /// The function rejected the supplied argument values
    InvalidInput,
    /// The function ran and failed
    InvocationFailed,
    /// Anything else, such as an unserializable result
    Internal,
}

impl ErrorKind {
    /// HTTP status code sent for this kind of failure
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidParameters | Self::InvalidInput => 400,
            Self::InvocationFailed | Self::Internal => 500,
        }
    }
}

/// A shaped response: the envelope plus its failure classification
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// `None` on success
    pub kind: Option<ErrorKind>,
    pub envelope: Envelope,
}

impl Outcome {
    pub fn success(payload: Value) -> Self {
        Self {
            kind: None,
            envelope: Envelope::success(payload),
        }
    }

    pub fn failure(kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            envelope: Envelope::failure(reason),
        }
    }

    /// HTTP status code for this outcome
    pub fn status_code(&self) -> u16 {
        self.kind.map(|k| k.status_code()).unwrap_or(200)
    }
}
