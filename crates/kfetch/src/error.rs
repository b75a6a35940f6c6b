//! Kfetch error types

use thiserror::Error;

/// Errors returned by the verb methods of [`crate::Kfetch`]
///
/// Network and body failures are deliberately generic. The underlying cause is
/// only handed to the matching hook ([`crate::KfetchOptions::on_fetch_unresponsive`],
/// [`crate::KfetchOptions::on_parse_body_error`]).
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connection failure, abort, ...)
    #[error("The fetch was unresponsive!")]
    FetchUnresponsive,
    /// A response arrived but its body could not be decoded
    #[error("Parsing the response body has failed!")]
    ParseBodyFailed,
    /// The before-fetch hook failed; its error is passed through untouched
    #[error(transparent)]
    BeforeFetch(anyhow::Error),
    /// A JSON request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a request failed before a response was obtained
///
/// Handed to the on-fetch-unresponsive hook.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The per-call cancellation token fired before the response arrived
    #[error("The request was aborted")]
    Aborted,
    /// The transport failed (connect, DNS, TLS, invalid URL or header)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A body was supplied for a method that cannot carry one (GET, HEAD)
    #[error("Request with {0} method cannot have a body")]
    BodyNotAllowed(reqwest::Method),
}

impl FetchFailure {
    /// Whether the failure was caused by cancellation
    pub fn is_abort(&self) -> bool {
        matches!(self, FetchFailure::Aborted)
    }
}

/// Why decoding a response body failed
///
/// Handed to the on-parse-body-error hook.
#[derive(Debug, Error)]
pub enum ParseBodyError {
    /// Reading the body from the connection failed
    #[error("Failed to read response body: {0}")]
    Read(#[from] reqwest::Error),
    /// The body could not be turned into the requested type
    ///
    /// Covers malformed JSON bodies as well as text bodies the target type
    /// cannot be built from.
    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    /// The per-call cancellation token fired while the body was being read
    #[error("Reading the response body was aborted")]
    Aborted,
}

/// Kfetch result type
pub type Result<T, E = Error> = std::result::Result<T, E>;
