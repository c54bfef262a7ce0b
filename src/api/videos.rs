// Stock-video endpoints (Pexels passthrough)
// All of these answer 503 when no Pexels key is configured.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Error;
use crate::services::pexels::{PexelsClient, PexelsVideo, VideoSearchResults};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/Popular", get(popular))
        .route("/Search", get(search))
        .route("/Trailer", get(trailer))
        .route("/:id", get(get_video))
}

fn provider(state: &AppState) -> Result<&PexelsClient, Error> {
    state
        .pexels
        .as_ref()
        .ok_or(Error::ProviderUnavailable("stock video"))
}

#[derive(Debug, Deserialize)]
pub struct PagingQuery {
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSearchQuery {
    pub query: String,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TrailerQuery {
    pub title: String,
}

/// GET /Videos/Popular
async fn popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PagingQuery>,
) -> Result<Json<VideoSearchResults>, Error> {
    Ok(Json(provider(&state)?.popular(params.per_page).await?))
}

/// GET /Videos/Search?query=
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoSearchQuery>,
) -> Result<Json<VideoSearchResults>, Error> {
    Ok(Json(
        provider(&state)?
            .search(&params.query, params.per_page)
            .await?,
    ))
}

/// GET /Videos/Trailer?title= - best-effort stand-in clip for a movie
async fn trailer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrailerQuery>,
) -> Result<Json<PexelsVideo>, Error> {
    provider(&state)?
        .find_trailer(&params.title)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("trailer"))
}

/// GET /Videos/:id
async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PexelsVideo>, Error> {
    Ok(Json(provider(&state)?.video(id).await?))
}
