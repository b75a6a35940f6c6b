//! Kfetch client

use std::collections::HashMap;
use std::future::Future;

use reqwest::header::{HeaderMap, HeaderName, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, FetchFailure, ParseBodyError, Result};
use crate::hooks::Hooks;
use crate::options::{merge_headers, FetchOptions, KfetchOptions};
use crate::response::{text_into, BodyKind, ResponseMeta, ResponseResult};

/// HTTP client with a base URL, default headers and lifecycle hooks
///
/// Only transport failures and body decoding failures are errors. A response
/// with any status code, 4xx and 5xx included, is returned as a
/// [`ResponseResult`].
#[derive(Debug, Clone)]
pub struct Kfetch {
    base_url: String,
    hooks: Hooks,
    inner: reqwest::Client,
    /// Default headers sent with every request unless a call replaces them
    pub headers: Option<HashMap<String, String>>,
}

impl Default for Kfetch {
    fn default() -> Self {
        Self::new(KfetchOptions::default())
    }
}

impl Kfetch {
    /// Create a new client from `options`
    pub fn new(options: KfetchOptions) -> Self {
        Self::with_client(options, reqwest::Client::new())
    }

    /// Create a new client on top of a preconfigured reqwest::Client
    pub fn with_client(options: KfetchOptions, client: reqwest::Client) -> Self {
        Self {
            base_url: options.base_url.unwrap_or_default(),
            hooks: options.hooks,
            inner: client,
            headers: options.headers,
        }
    }

    /// The prefix prepended to every path
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path`
    pub async fn get<T>(&self, path: &str, options: Option<FetchOptions>) -> Result<ResponseResult<T>>
    where
        T: DeserializeOwned,
    {
        self.fetch(Method::GET, path, options).await
    }

    /// POST `path`
    pub async fn post<T>(
        &self,
        path: &str,
        options: Option<FetchOptions>,
    ) -> Result<ResponseResult<T>>
    where
        T: DeserializeOwned,
    {
        self.fetch(Method::POST, path, options).await
    }

    /// PATCH `path`
    pub async fn patch<T>(
        &self,
        path: &str,
        options: Option<FetchOptions>,
    ) -> Result<ResponseResult<T>>
    where
        T: DeserializeOwned,
    {
        self.fetch(Method::PATCH, path, options).await
    }

    /// DELETE `path`
    pub async fn delete<T>(
        &self,
        path: &str,
        options: Option<FetchOptions>,
    ) -> Result<ResponseResult<T>>
    where
        T: DeserializeOwned,
    {
        self.fetch(Method::DELETE, path, options).await
    }

    /// Base URL and path, concatenated without any normalisation
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch<T>(
        &self,
        method: Method,
        path: &str,
        options: Option<FetchOptions>,
    ) -> Result<ResponseResult<T>>
    where
        T: DeserializeOwned,
    {
        if let Some(before_fetch) = &self.hooks.before_fetch {
            before_fetch
                .before_fetch(options.as_ref())
                .await
                .map_err(Error::BeforeFetch)?;
        }

        let options = options.unwrap_or_default();
        let url = self.url_for(path);
        let headers = merge_headers(
            self.headers.as_ref(),
            options.headers.as_ref(),
            options.unset_initial_headers,
        );

        if options.body.is_some() && (method == Method::GET || method == Method::HEAD) {
            return Err(self.fetch_failed(FetchFailure::BodyNotAllowed(method)));
        }

        tracing::debug!(method = %method, url = %url, "Dispatching request");

        // Invalid URLs and header names surface as transport errors on send
        let mut request = self.inner.request(method, url.as_str());
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = match cancellable(options.signal.as_ref(), request.send()).await {
            Some(Ok(response)) => response,
            Some(Err(err)) => return Err(self.fetch_failed(FetchFailure::Transport(err))),
            None => return Err(self.fetch_failed(FetchFailure::Aborted)),
        };

        let status = response.status().as_u16();
        let content_type = joined_header(response.headers(), CONTENT_TYPE);

        tracing::debug!(status, content_type = ?content_type, "Received response");

        let body = match parse_body(response, content_type.as_deref(), options.signal.as_ref())
            .await
        {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("Parsing response body from {} failed: {}", url, err);
                self.hooks.parse_body_failed(&err);
                return Err(Error::ParseBodyFailed);
            }
        };

        Ok(ResponseResult {
            body,
            response: ResponseMeta {
                content_type,
                status,
            },
        })
    }

    fn fetch_failed(&self, failure: FetchFailure) -> Error {
        tracing::warn!("Fetch was unresponsive: {}", failure);
        self.hooks.fetch_failed(&failure);
        Error::FetchUnresponsive
    }
}

/// All values of `name`, joined with `", "` the way fetch's `Headers::get` does
fn joined_header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    let values: Vec<_> = headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Run `future` unless `signal` fires first
///
/// Returns `None` when cancelled. An already cancelled signal wins without
/// polling `future`.
async fn cancellable<F>(signal: Option<&CancellationToken>, future: F) -> Option<F::Output>
where
    F: Future,
{
    match signal {
        Some(signal) => tokio::select! {
            biased;
            _ = signal.cancelled() => None,
            output = future => Some(output),
        },
        None => Some(future.await),
    }
}

async fn parse_body<T>(
    response: reqwest::Response,
    content_type: Option<&str>,
    signal: Option<&CancellationToken>,
) -> std::result::Result<Option<T>, ParseBodyError>
where
    T: DeserializeOwned,
{
    match BodyKind::from_content_type(content_type) {
        BodyKind::Json => {
            let bytes = cancellable(signal, response.bytes())
                .await
                .ok_or(ParseBodyError::Aborted)??;
            Ok(Some(serde_json::from_slice(&bytes)?))
        }
        BodyKind::Text => {
            let text = cancellable(signal, response.text())
                .await
                .ok_or(ParseBodyError::Aborted)??;
            Ok(Some(text_into(text)?))
        }
        BodyKind::Skip => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_default() {
        let client = Kfetch::default();
        assert_eq!(client.base_url(), "");
        assert!(client.headers.is_none());
    }

    #[test]
    fn test_url_is_concatenated_verbatim() {
        let client = Kfetch::new(KfetchOptions::new().base_url("https://api.example.com/v1"));

        assert_eq!(client.url_for("/items"), "https://api.example.com/v1/items");
        assert_eq!(client.url_for("items"), "https://api.example.com/v1items");
        assert_eq!(client.url_for("?q=1"), "https://api.example.com/v1?q=1");
        assert_eq!(client.url_for(""), "https://api.example.com/v1");
    }

    #[test]
    fn test_trailing_slash_is_not_collapsed() {
        let client = Kfetch::new(KfetchOptions::new().base_url("https://api.example.com/"));
        assert_eq!(client.url_for("/items"), "https://api.example.com//items");
    }

    #[test]
    fn test_without_base_url_path_is_used_as_is() {
        let client = Kfetch::default();
        assert_eq!(
            client.url_for("https://example.com/x"),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_headers_field_is_public_and_mutable() {
        let mut client = Kfetch::new(KfetchOptions::new().header("a", "1"));
        client
            .headers
            .get_or_insert_with(HashMap::new)
            .insert("b".to_string(), "2".to_string());

        let headers = client.headers.as_ref().expect("Headers were set");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_joined_header_single_and_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(joined_header(&headers, CONTENT_TYPE), None);

        headers.insert(
            CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("text/plain"),
        );
        assert_eq!(
            joined_header(&headers, CONTENT_TYPE).as_deref(),
            Some("text/plain")
        );
    }

    #[test]
    fn test_joined_header_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append(
            CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("image/png"),
        );
        headers.append(
            CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        assert_eq!(
            joined_header(&headers, CONTENT_TYPE).as_deref(),
            Some("image/png, application/json")
        );
    }

    #[tokio::test]
    async fn test_cancellable_without_signal_runs_future() {
        assert_eq!(cancellable(None, async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_cancellable_with_cancelled_signal() {
        let signal = CancellationToken::new();
        signal.cancel();
        assert_eq!(cancellable(Some(&signal), async { 7 }).await, None);
    }

    #[tokio::test]
    async fn test_cancellable_with_live_signal() {
        let signal = CancellationToken::new();
        assert_eq!(cancellable(Some(&signal), async { 7 }).await, Some(7));
    }
}
