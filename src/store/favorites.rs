// Favorites: set semantics keyed by movie id, insertion order preserved.

use sqlx::SqlitePool;

use crate::db::{self, keys};
use crate::error::Result;
use crate::models::Movie;

/// Current favorites, oldest first.
pub async fn get(pool: &SqlitePool) -> Result<Vec<Movie>> {
    Ok(db::get_document(pool, keys::FAVORITES)
        .await?
        .unwrap_or_default())
}

/// Add a movie to favorites. Adding an id that is already present leaves
/// the collection unchanged.
pub async fn add(pool: &SqlitePool, movie: Movie) -> Result<Vec<Movie>> {
    let mut tx = pool.begin().await?;

    let mut favorites: Vec<Movie> = db::get_document(&mut *tx, keys::FAVORITES)
        .await?
        .unwrap_or_default();

    if !favorites.iter().any(|m| m.id == movie.id) {
        tracing::debug!(movie = %movie.title, "adding to favorites");
        favorites.push(movie);
        db::put_document(&mut *tx, keys::FAVORITES, &favorites).await?;
    }

    tx.commit().await?;
    Ok(favorites)
}

/// Remove a movie by id. Removing an id that is not present is a no-op,
/// not an error.
pub async fn remove(pool: &SqlitePool, movie_id: &str) -> Result<Vec<Movie>> {
    let mut tx = pool.begin().await?;

    let mut favorites: Vec<Movie> = db::get_document(&mut *tx, keys::FAVORITES)
        .await?
        .unwrap_or_default();

    let before = favorites.len();
    favorites.retain(|m| m.id != movie_id);

    if favorites.len() != before {
        db::put_document(&mut *tx, keys::FAVORITES, &favorites).await?;
    }

    tx.commit().await?;
    Ok(favorites)
}
