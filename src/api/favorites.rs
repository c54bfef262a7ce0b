// Favorites endpoints
// Membership-keyed add/remove over the persisted list; every mutation
// echoes the updated collection.

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
        .route("/", get(get_favorites).post(add_favorite))
        .route("/:id", delete(remove_favorite))
}

/// GET /Favorites
async fn get_favorites(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::favorites::get(&state.db).await?))
}

/// POST /Favorites - body is the movie to add
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::favorites::add(&state.db, movie).await?))
}

/// DELETE /Favorites/:id
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::favorites::remove(&state.db, &id).await?))
}
