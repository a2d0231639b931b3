//! Client configuration: where requests go and how the client identifies
//! itself.
//!
//! `ClientConfig` is the seam; `BaseUrlConfig` is the stock implementation
//! that joins relative paths onto a fixed base URL.

use url::Url;

use crate::error::BoxError;

/// Environment variable read by `BaseUrlConfig::from_env` for the base URL.
pub const BASE_URL_ENV: &str = "REST_REQUEST_BASE_URL";

/// Environment variable read by `BaseUrlConfig::from_env` for the version
/// string. Falls back to the crate version.
pub const VERSION_ENV: &str = "REST_REQUEST_VERSION";

/// Collaborator that resolves request paths and reports the client version.
///
/// Borrowed by `RequestSpec::new` for the duration of construction only.
pub trait ClientConfig {
    /// Turn a relative request path into an absolute URL.
    fn resolve_url(&self, path: &str) -> Result<Url, BoxError>;

    /// Version reported in the `User-Agent` header.
    fn version_string(&self) -> String;
}

/// Resolves every path against a single base URL.
#[derive(Debug, Clone)]
pub struct BaseUrlConfig {
    base_url: Url,
    version: String,
}

impl BaseUrlConfig {
    /// Parse `base_url` and report the crate version as the client version.
    ///
    /// The base is treated as a directory: `https://api.example.com/v1`
    /// resolves `users` to `https://api.example.com/v1/users`.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            base_url: Url::parse(&base)?,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Override the reported version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Build from `REST_REQUEST_BASE_URL` and, if set, `REST_REQUEST_VERSION`.
    pub fn from_env() -> Result<Self, BoxError> {
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|e| format!("{BASE_URL_ENV} is not set: {e}"))?;
        let config = Self::new(&base_url)?;
        Ok(match std::env::var(VERSION_ENV) {
            Ok(version) => config.with_version(version),
            Err(_) => config,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl ClientConfig for BaseUrlConfig {
    fn resolve_url(&self, path: &str) -> Result<Url, BoxError> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        Ok(url)
    }

    fn version_string(&self) -> String {
        self.version.clone()
    }
}
