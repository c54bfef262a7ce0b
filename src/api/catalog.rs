// Catalog browsing endpoints backed by the TMDB client.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Error;
use crate::models::{Category, Movie};
use crate::AppState;

/// Queries shorter than this are not worth a round trip; the UI debounces
/// its input and short queries are answered with an empty list here, at
/// the call site, not inside the client.
const MIN_QUERY_LEN: usize = 3;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/Categories", get(list_categories))
        .route("/:categoryId", get(get_category))
}

pub fn movie_routes() -> Router<Arc<AppState>> {
    Router::new().route("/:id", get(get_movie))
}

pub fn search_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(search))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: &'static str,
    pub name: &'static str,
}

/// GET /Catalog/Categories
async fn list_categories() -> Json<Vec<CategoryDto>> {
    Json(
        Category::ALL
            .iter()
            .map(|c| CategoryDto {
                id: c.as_str(),
                name: c.display_name(),
            })
            .collect(),
    )
}

/// GET /Catalog/:categoryId
/// Unknown identifiers serve the popular listing (logged, not an error).
/// A listing superseded by a newer request on the same stream answers
/// 204 so the caller discards it.
async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Response, Error> {
    let category = Category::resolve(&category_id);

    match state.catalog.category(category).await? {
        Some(movies) => Ok(Json(movies).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// GET /Movies/:id
async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, Error> {
    Ok(Json(state.tmdb.movie(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /Search?query=
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, Error> {
    let query = params.query.unwrap_or_default();
    if below_min_length(&query) {
        return Ok(Json(Vec::<Movie>::new()).into_response());
    }

    match state.catalog.search(&query).await? {
        Some(movies) => Ok(Json(movies).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Threshold in characters, not bytes: a two-character CJK query is still
/// a two-character query.
fn below_min_length(query: &str) -> bool {
    query.chars().count() < MIN_QUERY_LEN
}
