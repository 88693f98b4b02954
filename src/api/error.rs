// ABOUTME: Control-plane client error types with SNAFU pattern.
// ABOUTME: Separates API rejections from transport failures for retry decisions.

use snafu::Snafu;

/// Errors produced by the control-plane client.
///
/// No retries happen at this layer; callers use [`ClientError::kind`] to
/// decide their own retry policy (polling loops absorb transient failures,
/// one-shot reads do not).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    /// The control plane answered with a non-2xx status.
    #[snafu(display("control plane returned {status}: {body}"))]
    Api { status: u16, body: String },

    /// The request never produced a response (timeout, DNS, refused).
    #[snafu(display("transport failure: {source}"))]
    Transport { source: reqwest::Error },

    /// The response body was not the JSON shape we expected.
    #[snafu(display("failed to decode response: {source}"))]
    Decode { source: serde_json::Error },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// Requested resource does not exist (404).
    NotFound,
    /// Credential rejected (401/403).
    Auth,
    /// Any other API rejection.
    Api,
    /// Network-level failure; retryable at caller discretion.
    Transport,
    /// Response decoding failure.
    Decode,
}

impl ClientError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            ClientError::Api { status, .. } => match status {
                404 => ClientErrorKind::NotFound,
                401 | 403 => ClientErrorKind::Auth,
                _ => ClientErrorKind::Api,
            },
            ClientError::Transport { .. } => ClientErrorKind::Transport,
            ClientError::Decode { .. } => ClientErrorKind::Decode,
        }
    }

    /// Whether a retry could plausibly succeed for an idempotent request.
    pub fn is_retryable(&self) -> bool {
        match self.kind() {
            ClientErrorKind::Transport => true,
            ClientErrorKind::Api => matches!(
                self,
                ClientError::Api { status, .. } if *status >= 500 || *status == 429
            ),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(source: reqwest::Error) -> Self {
        ClientError::Transport { source }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(source: serde_json::Error) -> Self {
        ClientError::Decode { source }
    }
}
