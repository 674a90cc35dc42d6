use std::sync::Arc;

use bestseller_types::{CategoryList, WorkList};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::http::{HttpExecutor, Request};

/// Longest genre id forwarded to the catalog.
pub const MAX_GENRE_ID_LEN: usize = 256;

/// Rows requested from the ranked-works endpoint: only the top seller is used.
const TOP_WORK_ROWS: u32 = 1;

/// Stateless client for the two catalog queries the block needs.
///
/// Every call issues exactly one GET and never retries.
#[derive(Clone)]
pub struct CatalogClient {
    executor: Arc<dyn HttpExecutor>,
    config: Arc<CatalogConfig>,
}

impl CatalogClient {
    pub fn new(executor: Arc<dyn HttpExecutor>, config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            executor,
            config: Arc::new(config),
        })
    }

    /// Lists the genres of the configured category set.
    pub async fn list_genres(&self) -> Result<CategoryList> {
        let request = Request::get(self.config.endpoint(&self.config.categories_path)?)
            .param("rows", self.config.genre_rows.to_string())
            .param("catSetId", self.config.category_set.as_str());

        self.fetch(request, "genres").await
    }

    /// Fetches the ranked works of `genre_id`, best weekly seller first.
    pub async fn top_work(&self, genre_id: &str) -> Result<WorkList> {
        validate_genre_id(genre_id)?;

        let request = Request::get(self.config.endpoint(&self.config.works_path)?)
            .param("rows", TOP_WORK_ROWS.to_string())
            .param("catUri", genre_id)
            .param("sort", "weeklySales")
            .param("dir", "desc");

        self.fetch(request, "bestseller").await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request, what: &'static str) -> Result<T> {
        debug!(
            url = %request.url,
            params = ?request.params.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            "Requesting {} from catalog",
            what
        );

        let request = request
            .param("api_key", self.config.api_key.expose())
            .timeout(self.config.timeout());

        let response = self.executor.execute(request).await.map_err(|e| {
            warn!(kind = %e.kind, "Catalog request for {} failed: {}", what, e.message);
            CatalogError::from(e)
        })?;

        if !response.is_success() {
            warn!(status = response.status, "Catalog returned an error for {}", what);
            return Err(CatalogError::unavailable(
                format!("catalog responded with status {}", response.status),
                Some(response.status),
            ));
        }

        serde_json::from_slice(&response.data).map_err(|e| {
            warn!("Catalog {} payload did not match the schema: {}", what, e);
            CatalogError::MalformedPayload {
                message: e.to_string(),
            }
        })
    }
}

/// Checks that a caller-supplied genre id is a plausible opaque token.
///
/// The id is URL-encoded when sent, this only rejects values that can never
/// name a catalog category.
pub fn validate_genre_id(genre_id: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(CatalogError::InvalidGenreId {
            genre_id: genre_id.chars().take(64).collect(),
            reason: reason.to_string(),
        })
    };

    if genre_id.is_empty() {
        return reject("genre id cannot be empty");
    }

    if genre_id.len() > MAX_GENRE_ID_LEN {
        return reject("genre id is too long");
    }

    if genre_id
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return reject("genre id cannot contain whitespace or control characters");
    }

    Ok(())
}
