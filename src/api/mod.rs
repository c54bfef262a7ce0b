use axum::Router;
use std::sync::Arc;

use crate::AppState;

mod catalog;
mod downloads;
mod favorites;
mod history;
mod users;
mod videos;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/Catalog", catalog::routes())
        .nest("/Movies", catalog::movie_routes())
        .nest("/Search", catalog::search_routes())
        .nest("/Videos", videos::routes())
        .nest("/Favorites", favorites::routes())
        .nest("/History", history::routes())
        .nest("/Downloads", downloads::routes())
        .nest("/Users", users::routes())
}
