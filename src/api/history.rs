// Watch history endpoints

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::error::Error;
use crate::models::Movie;
use crate::{store, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_history).post(add_to_history))
}

/// GET /History - most recently watched first
async fn get_history(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::history::get(&state.db).await?))
}

/// POST /History - body is the movie just played
async fn add_to_history(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> Result<Json<Vec<Movie>>, Error> {
    Ok(Json(store::history::add(&state.db, movie).await?))
}
