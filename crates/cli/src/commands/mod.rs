pub mod bestseller;
pub mod genres;
pub mod render;
pub mod serve;

use std::sync::Arc;

use bestseller_api::Settings;
use bestseller_block::{BestsellerApi, ProxyClient};
use bestseller_catalog::CatalogClient;
use bestseller_catalog::http::ReqwestExecutor;
use eyre::Result;

use crate::cli::SourceArgs;

/// The widget's data source: a running proxy, or the catalog itself.
pub fn widget_api(settings: &Settings, source: SourceArgs) -> Result<Arc<dyn BestsellerApi>> {
    let executor = Arc::new(ReqwestExecutor::new());

    match source.proxy {
        Some(site_url) => {
            tracing::debug!(%site_url, "Using proxy service");
            Ok(Arc::new(ProxyClient::new(executor, site_url)))
        }
        None => {
            let client = CatalogClient::new(executor, settings.catalog.clone()).map_err(|e| {
                eyre::eyre!("{} (set BESTSELLER__CATALOG__API_KEY or use --proxy)", e)
            })?;
            Ok(Arc::new(client))
        }
    }
}
