use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigError, File, FileFormat, Source};
use kfetch::KfetchOptions;
use serde::{Deserialize, Serialize};

use crate::hooks::TraceBeforeFetch;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "kfetch";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Prefix prepended to every request path
    #[serde(default)]
    pub base_url: String,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Settings {
    /// Load settings from `config_file` (or `kfetch.toml` if present) and the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match config_file {
            Some(path) => Self::from_source(File::from(path).required(true))?,
            None => Self::from_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))?,
        };

        Ok(settings.from_env())
    }

    /// Parse settings from a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::from_source(File::from_str(contents, FileFormat::Toml))
    }

    fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let default = Settings::default();
        let config = Config::builder()
            // use defaults
            .add_source(Config::try_from(&default)?)
            // override with file contents
            .add_source(source)
            .build()?;

        config.try_deserialize()
    }

    /// Client options with hooks reporting through tracing
    pub fn to_options(&self) -> KfetchOptions {
        let mut options = KfetchOptions::new()
            .base_url(self.base_url.clone())
            .on_before_fetch(TraceBeforeFetch)
            .on_fetch_abort(|| tracing::warn!("Request aborted"))
            .on_fetch_unresponsive(|failure| tracing::error!("Request failed: {}", failure))
            .on_parse_body_error(|error| {
                tracing::error!("Could not parse response body: {}", error)
            });

        if !self.headers.is_empty() {
            options = options.headers(self.headers.clone());
        }

        options
    }
}

/// Parse a `name:value` header argument
pub fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("Header must be name:value, got `{}`", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Header name is empty in `{}`", s));
    }

    Ok((name.to_string(), value.trim().to_string()))
}
