//! Minimal HTTP client with a base URL, default headers and lifecycle hooks
//!
//! [`Kfetch`] layers a configurable base URL, default headers and four hooks
//! (before-fetch, abort, unresponsive, body-parse-error) over `reqwest`. The
//! verb methods decode the response body according to its `content-type`:
//! JSON for `application/json`, text for `text/plain`, nothing otherwise.
//!
//! # Example
//!
//! ```no_run
//! use kfetch::{FetchOptions, Kfetch, KfetchOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! async fn example() -> kfetch::Result<()> {
//!     let client = Kfetch::new(
//!         KfetchOptions::new()
//!             .base_url("https://api.example.com")
//!             .header("accept", "application/json")
//!             .on_fetch_unresponsive(|failure| eprintln!("request failed: {failure}")),
//!     );
//!
//!     let result = client
//!         .get::<User>("/users/1", Some(FetchOptions::new().header("x-trace", "1")))
//!         .await?;
//!
//!     if let Some(user) = result.body {
//!         println!("{} ({})", user.name, result.response.status);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod hooks;
mod options;
mod response;

pub use client::Kfetch;
pub use error::{Error, FetchFailure, ParseBodyError, Result};
pub use hooks::{BeforeFetch, OnFetchAbort, OnFetchUnresponsive, OnParseBodyError};
pub use options::{merge_headers, FetchOptions, KfetchOptions};
pub use response::{ResponseMeta, ResponseResult};
pub use tokio_util::sync::CancellationToken;
