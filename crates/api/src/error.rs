//! Errors returned by the proxy routes.
//!
//! Upstream details are logged and never sent to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bestseller_block::BlockError;
use bestseller_block::api::ProxyErrorBody;
use bestseller_catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("genre listing failed: {0}")]
    Genres(#[source] CatalogError),

    #[error("bestseller lookup failed: {0}")]
    Bestseller(#[source] CatalogError),

    #[error("missing genreId")]
    MissingGenreId,

    #[error("cannot render attributes: {0}")]
    Render(#[source] BlockError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            ApiError::Genres(CatalogError::MalformedPayload { .. })
            | ApiError::Bestseller(CatalogError::MalformedPayload { .. }) => (
                StatusCode::BAD_GATEWAY,
                "malformed_payload",
                "Catalog returned an unexpected response",
            ),
            ApiError::Genres(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "api_error",
                "Failed to fetch genres",
            ),
            ApiError::Bestseller(CatalogError::InvalidGenreId { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_genre", "Invalid genreId")
            }
            ApiError::Bestseller(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "api_error",
                "Failed to fetch bestseller",
            ),
            ApiError::MissingGenreId => {
                (StatusCode::BAD_REQUEST, "invalid_genre", "Missing genreId")
            }
            ApiError::Render(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_attributes",
                "Invalid block attributes",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(%status, "{}", self);
        } else {
            tracing::warn!(%status, "{}", self);
        }

        let body = ProxyErrorBody {
            code: code.to_string(),
            message: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
