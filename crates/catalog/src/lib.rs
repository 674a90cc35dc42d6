//! Client for the external book catalog.
//!
//! This crate is the outbound half of the proxy: it owns the catalog
//! credential, builds the two read-only queries the block needs, and decodes
//! the responses into the typed records of [`bestseller_types`].

mod client;
pub mod config;
pub mod error;
pub mod http;

pub use client::{CatalogClient, MAX_GENRE_ID_LEN, validate_genre_id};
pub use config::{ApiKey, CatalogConfig};
pub use error::{CatalogError, Result};
