//! Layered settings: built-in defaults, an optional file, then
//! `BESTSELLER__*` environment variables.
//!
//! The catalog credential is expected to come from the environment, e.g.
//! `BESTSELLER__CATALOG__API_KEY`.

use std::net::SocketAddr;
use std::path::Path;

use bestseller_block::RenderOptions;
use bestseller_catalog::CatalogConfig;
use config::{Config, Environment, File, Map};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "BESTSELLER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogConfig,
    pub render: RenderOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

impl Settings {
    /// Loads settings, reading `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), reading variables from `env` instead of the
    /// process environment when given.
    fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults =
            Config::try_from(&Settings::default()).wrap_err("Invalid default settings")?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .source(env),
            )
            .build()
            .wrap_err("Failed to read settings")?
            .try_deserialize()
            .wrap_err("Failed to parse settings")?;

        tracing::debug!(
            addr = %settings.server.addr,
            catalog = %settings.catalog.base_url,
            "Loaded settings"
        );
        Ok(settings)
    }
}
