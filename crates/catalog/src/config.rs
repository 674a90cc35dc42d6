use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CatalogError, Result};

/// Default base of the publisher catalog API.
pub const DEFAULT_BASE_URL: &str =
    "https://api.penguinrandomhouse.com/resources/v2/title/domains/PRH.UK/";

/// Credential for the catalog API.
///
/// Never printed: `Debug` and `Display` redact the value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: Url,
    /// Category listing endpoint, relative to `base_url`.
    pub categories_path: String,
    /// Ranked works endpoint, relative to `base_url`.
    pub works_path: String,
    /// Category set the genre list is drawn from.
    pub category_set: String,
    pub genre_rows: u32,
    pub api_key: ApiKey,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            categories_path: "categories".to_string(),
            works_path: "works/views/uk-list-display".to_string(),
            category_set: "PW".to_string(),
            genre_rows: 15,
            api_key: ApiKey::default(),
            timeout_secs: 10,
        }
    }
}

impl CatalogConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = ApiKey::new(key);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(CatalogError::Configuration {
                message: "api_key is not set".to_string(),
            });
        }

        if self.base_url.cannot_be_a_base() {
            return Err(CatalogError::Configuration {
                message: format!("base_url '{}' cannot be a base", self.base_url),
            });
        }

        if self.category_set.trim().is_empty() {
            return Err(CatalogError::Configuration {
                message: "category_set is empty".to_string(),
            });
        }

        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        base.join(path.trim_start_matches('/'))
            .map_err(|e| CatalogError::Configuration {
                message: format!("invalid endpoint path '{}': {}", path, e),
            })
    }
}
