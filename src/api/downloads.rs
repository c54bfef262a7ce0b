// Downloads endpoints

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use std::sync::Arc;

use crate::error::Error;
use crate::models::Movie;
use crate::{store, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_downloads).post(add_download))
        .route("/:id", delete(remove_download))
}

/// GET /Downloads
async fn get_downloads(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::downloads::get(&state.db).await?))
}

/// POST /Downloads - body is the movie to download; the entry gets a
/// download timestamp and synthetic size stamped on it
async fn add_download(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::downloads::add(&state.db, movie).await?))
}

/// DELETE /Downloads/:id
async fn remove_download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::downloads::remove(&state.db, &id).await?))
}
