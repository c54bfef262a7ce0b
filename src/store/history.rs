// Watch history: most-recently-watched first, capped.

use sqlx::SqlitePool;

use crate::db::{self, keys};
use crate::error::Result;
use crate::models::Movie;

/// Oldest entries beyond this are evicted.
const HISTORY_CAP: usize = 20;

/// Watch history, most recent first.
pub async fn get(pool: &SqlitePool) -> Result<Vec<Movie>> {
    Ok(db::get_document(pool, keys::HISTORY)
        .await?
        .unwrap_or_default())
}

/// Record a watch. A movie already in the history is moved to the front
/// rather than duplicated, the watch time is stamped, and the list is
/// truncated to the cap.
pub async fn add(pool: &SqlitePool, mut movie: Movie) -> Result<Vec<Movie>> {
    let mut tx = pool.begin().await?;

    let mut history: Vec<Movie> = db::get_document(&mut *tx, keys::HISTORY)
        .await?
        .unwrap_or_default();

    history.retain(|m| m.id != movie.id);
    movie.last_watched = Some(chrono::Utc::now().to_rfc3339());
    history.insert(0, movie);
    history.truncate(HISTORY_CAP);

    db::put_document(&mut *tx, keys::HISTORY, &history).await?;
    tx.commit().await?;

    Ok(history)
}
