//! The two endpoints the widget talks to.
//!
//! In the editor the widget reaches the catalog through the proxy routes; the
//! CLI can also drive it in-process straight against a [`CatalogClient`].

use std::sync::Arc;

use async_trait::async_trait;
use bestseller_catalog::CatalogClient;
use bestseller_catalog::http::{HttpExecutor, Request};
use bestseller_types::{CategoryList, WorkList};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BlockError, Result};

/// Route of the genre listing, relative to the site root.
pub const GENRES_ROUTE: &str = "/pwn/v1/genres";

/// Route of the bestseller lookup, relative to the site root.
pub const BESTSELLER_ROUTE: &str = "/pwn/v1/bestseller";

/// Query parameter carrying the genre id on [`BESTSELLER_ROUTE`].
pub const GENRE_ID_PARAM: &str = "genreId";

#[async_trait]
pub trait BestsellerApi: Send + Sync {
    async fn genres(&self) -> Result<CategoryList>;

    async fn bestseller(&self, genre_id: &str) -> Result<WorkList>;
}

#[async_trait]
impl BestsellerApi for CatalogClient {
    async fn genres(&self) -> Result<CategoryList> {
        Ok(self.list_genres().await?)
    }

    async fn bestseller(&self, genre_id: &str) -> Result<WorkList> {
        Ok(self.top_work(genre_id).await?)
    }
}

#[async_trait]
impl<T: BestsellerApi + ?Sized> BestsellerApi for Arc<T> {
    async fn genres(&self) -> Result<CategoryList> {
        (**self).genres().await
    }

    async fn bestseller(&self, genre_id: &str) -> Result<WorkList> {
        (**self).bestseller(genre_id).await
    }
}

/// Error body returned by the proxy routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyErrorBody {
    pub code: String,
    pub message: String,
}

/// Client for a running proxy service.
pub struct ProxyClient {
    executor: Arc<dyn HttpExecutor>,
    site_url: Url,
}

impl ProxyClient {
    pub fn new(executor: Arc<dyn HttpExecutor>, site_url: Url) -> Self {
        Self { executor, site_url }
    }

    async fn get<T: DeserializeOwned>(&self, request: Request, what: &'static str) -> Result<T> {
        let fetch_error = |message: String| BlockError::Fetch { what, message };

        let response = self
            .executor
            .execute(request)
            .await
            .map_err(|e| fetch_error(e.message))?;

        if !response.is_success() {
            let message = match serde_json::from_slice::<ProxyErrorBody>(&response.data) {
                Ok(body) => format!("{} ({})", body.message, body.code),
                Err(_) => format!("proxy responded with status {}", response.status),
            };
            return Err(fetch_error(message));
        }

        serde_json::from_slice(&response.data).map_err(|e| fetch_error(e.to_string()))
    }

    /// Routes are resolved under the site URL, keeping any path prefix.
    fn route(&self, route: &str) -> Result<Url> {
        let mut base = self.site_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        base.join(route.trim_start_matches('/'))
            .map_err(|e| BlockError::Fetch {
                what: "route",
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl BestsellerApi for ProxyClient {
    async fn genres(&self) -> Result<CategoryList> {
        let request = Request::get(self.route(GENRES_ROUTE)?);
        self.get(request, "genres").await
    }

    async fn bestseller(&self, genre_id: &str) -> Result<WorkList> {
        let request = Request::get(self.route(BESTSELLER_ROUTE)?).param(GENRE_ID_PARAM, genre_id);
        self.get(request, "bestseller").await
    }
}
