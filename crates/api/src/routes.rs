use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use bestseller_block::metadata::attributes_schema;
use bestseller_block::{BLOCK_METADATA, BlockAttributes, BlockMetadata, render_display};
use bestseller_types::{CategoryList, WorkList};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SharedState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct BestsellerParams {
    #[serde(rename = "genreId")]
    genre_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlockDescription {
    #[serde(flatten)]
    metadata: BlockMetadata,
    attributes: schemars::Schema,
}

pub async fn genres(State(state): State<SharedState>) -> Result<Json<CategoryList>, ApiError> {
    let list = state.catalog.list_genres().await.map_err(ApiError::Genres)?;
    debug!(count = list.data.categories.len(), "Relaying genres");
    Ok(Json(list))
}

pub async fn bestseller(
    State(state): State<SharedState>,
    Query(params): Query<BestsellerParams>,
) -> Result<Json<WorkList>, ApiError> {
    let genre_id = params.genre_id.ok_or(ApiError::MissingGenreId)?;

    let list = state
        .catalog
        .top_work(&genre_id)
        .await
        .map_err(ApiError::Bestseller)?;
    debug!(genre = %genre_id, works = list.data.works.len(), "Relaying bestseller");
    Ok(Json(list))
}

pub async fn block() -> Json<BlockDescription> {
    Json(BlockDescription {
        metadata: BLOCK_METADATA,
        attributes: attributes_schema(),
    })
}

/// Saved markup for a stored attributes document.
pub async fn render(
    State(state): State<SharedState>,
    Json(document): Json<serde_json::Value>,
) -> Result<Html<String>, ApiError> {
    let attributes = BlockAttributes::from_value(document).map_err(ApiError::Render)?;
    Ok(Html(render_display(&attributes, &state.render)))
}

pub async fn health() -> impl IntoResponse {
    "ok"
}
