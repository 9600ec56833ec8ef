//! Error types for the AI crate.
//!
//! Local keyword classification is infallible; only the remote
//! classification capability can fail.

use std::fmt;

/// Errors from remote classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// No remote classifier backend is attached.
    NotConfigured,
    /// The backend is attached but no API credential is configured.
    MissingCredential,
    /// The classification request failed.
    RequestFailed {
        /// Why the request failed.
        reason: String,
    },
    /// The backend's response could not be parsed.
    ResponseParseFailed {
        /// Why parsing failed.
        reason: String,
    },
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "no remote classifier configured"),
            Self::MissingCredential => {
                write!(f, "remote classification requires an API credential")
            }
            Self::RequestFailed { reason } => {
                write!(f, "remote classification request failed: {reason}")
            }
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse remote classification response: {reason}")
            }
        }
    }
}

impl std::error::Error for RemoteError {}
