//! Client configuration and per-call options

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{FetchFailure, ParseBodyError, Result};
use crate::hooks::{BeforeFetch, Hooks};

/// Configuration for a [`crate::Kfetch`] client
///
/// Every field is optional. A missing base URL means paths are used as-is.
#[derive(Debug, Clone, Default)]
pub struct KfetchOptions {
    pub(crate) base_url: Option<String>,
    pub(crate) headers: Option<HashMap<String, String>>,
    pub(crate) hooks: Hooks,
}

impl KfetchOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended verbatim to every request path
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replace the default headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add a single default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Hook awaited before every network call
    pub fn on_before_fetch(mut self, hook: impl BeforeFetch + 'static) -> Self {
        self.hooks.before_fetch = Some(Arc::new(hook));
        self
    }

    /// Hook called when the per-call signal aborts a request
    pub fn on_fetch_abort(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hooks.on_fetch_abort = Some(Arc::new(hook));
        self
    }

    /// Hook called when a request fails without a response
    ///
    /// Also receives aborts when no abort hook is configured.
    pub fn on_fetch_unresponsive(
        mut self,
        hook: impl Fn(&FetchFailure) + Send + Sync + 'static,
    ) -> Self {
        self.hooks.on_fetch_unresponsive = Some(Arc::new(hook));
        self
    }

    /// Hook called when a response body cannot be decoded
    pub fn on_parse_body_error(
        mut self,
        hook: impl Fn(&ParseBodyError) + Send + Sync + 'static,
    ) -> Self {
        self.hooks.on_parse_body_error = Some(Arc::new(hook));
        self
    }
}

/// Options for a single request
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Raw request body
    pub body: Option<Vec<u8>>,
    /// Headers merged over (or replacing) the client defaults
    pub headers: Option<HashMap<String, String>>,
    /// Cancels the request when triggered
    pub signal: Option<CancellationToken>,
    /// Send only [`FetchOptions::headers`], ignoring the client defaults
    pub unset_initial_headers: bool,
}

impl FetchOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw request body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body
    ///
    /// No `content-type` header is added.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Replace the per-call headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add a single per-call header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Cancel the request with `signal`
    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Choose between replacing and merging the client default headers
    pub fn unset_initial_headers(mut self, unset: bool) -> Self {
        self.unset_initial_headers = unset;
        self
    }
}

/// Compute the headers sent with a request
///
/// In replace mode only `per_call` is used. Otherwise `per_call` is layered
/// over `defaults` and wins on equal keys.
pub fn merge_headers(
    defaults: Option<&HashMap<String, String>>,
    per_call: Option<&HashMap<String, String>>,
    replace: bool,
) -> HashMap<String, String> {
    let mut merged = HashMap::new();

    if !replace {
        if let Some(defaults) = defaults {
            merged.extend(defaults.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    if let Some(per_call) = per_call {
        merged.extend(per_call.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    merged
}
