//! Error types for the terabox_relay crate.

use thiserror::Error;

/// Errors that can occur while resolving a share link.
///
/// Every variant is terminal for the request it belongs to; the HTTP facade
/// maps each one onto a `success: false` JSON body.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Could not extract file information from URL")]
    ExtractionFailed,

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TeraBox API error: {message}")]
    RemoteApi { errno: i64, message: String },

    #[error("No files found in the shared link")]
    EmptyShare,
}

impl RelayError {
    /// Remote error code, when the failure originated from the remote API.
    pub fn errno(&self) -> Option<i64> {
        match self {
            RelayError::RemoteApi { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}

/// Result type alias for RelayError.
pub type Result<T> = std::result::Result<T, RelayError>;
