//! Environment variables
//!
//! Values set here override the config file.

use std::env;

use crate::config::{parse_header, Settings};

pub const ENV_BASE_URL: &str = "KFETCH_BASE_URL";
/// Comma separated `name:value` pairs, merged over the configured headers
pub const ENV_HEADERS: &str = "KFETCH_HEADERS";

impl Settings {
    pub fn from_env(self) -> Self {
        self.with_env(|key| env::var(key).ok())
    }

    fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }

        if let Some(headers) = lookup(ENV_HEADERS) {
            for pair in headers.split(',').filter(|pair| !pair.trim().is_empty()) {
                match parse_header(pair) {
                    Ok((name, value)) => {
                        self.headers.insert(name, value);
                    }
                    Err(err) => tracing::warn!("Ignoring {}: {}", ENV_HEADERS, err),
                }
            }
        }

        self
    }
}
