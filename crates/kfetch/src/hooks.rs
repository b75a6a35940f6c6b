//! Request lifecycle hooks

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{FetchFailure, ParseBodyError};
use crate::options::FetchOptions;

/// Hook awaited before every network call
///
/// Returning an error stops the request. The error reaches the caller as
/// [`crate::Error::BeforeFetch`] unchanged.
#[async_trait]
pub trait BeforeFetch: Send + Sync {
    /// Called with the per-call options, if any were supplied
    async fn before_fetch(&self, options: Option<&FetchOptions>) -> anyhow::Result<()>;
}

/// Hook called when the per-call cancellation token aborts a request
pub type OnFetchAbort = Arc<dyn Fn() + Send + Sync>;

/// Hook called when a request fails without producing a response
pub type OnFetchUnresponsive = Arc<dyn Fn(&FetchFailure) + Send + Sync>;

/// Hook called when a response body cannot be decoded
pub type OnParseBodyError = Arc<dyn Fn(&ParseBodyError) + Send + Sync>;

/// The set of hooks a client was configured with
#[derive(Clone, Default)]
pub(crate) struct Hooks {
    pub(crate) before_fetch: Option<Arc<dyn BeforeFetch>>,
    pub(crate) on_fetch_abort: Option<OnFetchAbort>,
    pub(crate) on_fetch_unresponsive: Option<OnFetchUnresponsive>,
    pub(crate) on_parse_body_error: Option<OnParseBodyError>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("before_fetch", &self.before_fetch.is_some())
            .field("on_fetch_abort", &self.on_fetch_abort.is_some())
            .field("on_fetch_unresponsive", &self.on_fetch_unresponsive.is_some())
            .field("on_parse_body_error", &self.on_parse_body_error.is_some())
            .finish()
    }
}

impl Hooks {
    /// Report a network failure
    ///
    /// An abort goes to the abort hook when one is set, every other case
    /// (including an abort without an abort hook) to the unresponsive hook.
    pub(crate) fn fetch_failed(&self, failure: &FetchFailure) {
        match (&self.on_fetch_abort, &self.on_fetch_unresponsive) {
            (Some(on_abort), _) if failure.is_abort() => on_abort(),
            (_, Some(on_unresponsive)) => on_unresponsive(failure),
            _ => {}
        }
    }

    pub(crate) fn parse_body_failed(&self, error: &ParseBodyError) {
        if let Some(on_parse_body_error) = &self.on_parse_body_error {
            on_parse_body_error(error);
        }
    }
}
