// Downloads: set semantics keyed by movie id, with synthetic metadata
// stamped on add. No file is actually fetched; the size is a placeholder
// for a transfer this service never performs.

use rand::Rng;
use sqlx::SqlitePool;

use crate::db::{self, keys};
use crate::error::Result;
use crate::models::Movie;

const MIN_SIZE_MB: u32 = 500;
const MAX_SIZE_MB: u32 = 2500;

/// Current downloads, oldest first.
pub async fn get(pool: &SqlitePool) -> Result<Vec<Movie>> {
    Ok(db::get_document(pool, keys::DOWNLOADS)
        .await?
        .unwrap_or_default())
}

/// Add a movie to downloads, stamping the download time and a randomly
/// generated size in megabytes. Adding an id that is already present
/// leaves the collection unchanged.
pub async fn add(pool: &SqlitePool, mut movie: Movie) -> Result<Vec<Movie>> {
    let mut tx = pool.begin().await?;

    let mut downloads: Vec<Movie> = db::get_document(&mut *tx, keys::DOWNLOADS)
        .await?
        .unwrap_or_default();

    if !downloads.iter().any(|m| m.id == movie.id) {
        movie.download_date = Some(chrono::Utc::now().to_rfc3339());
        movie.download_size = Some(rand::thread_rng().gen_range(MIN_SIZE_MB..=MAX_SIZE_MB));
        tracing::debug!(movie = %movie.title, size_mb = movie.download_size, "adding to downloads");
        downloads.push(movie);
        db::put_document(&mut *tx, keys::DOWNLOADS, &downloads).await?;
    }

    tx.commit().await?;
    Ok(downloads)
}

/// Remove a download by id. Removing an id that is not present is a no-op.
pub async fn remove(pool: &SqlitePool, movie_id: &str) -> Result<Vec<Movie>> {
    let mut tx = pool.begin().await?;

    let mut downloads: Vec<Movie> = db::get_document(&mut *tx, keys::DOWNLOADS)
        .await?
        .unwrap_or_default();

    let before = downloads.len();
    downloads.retain(|m| m.id != movie_id);

    if downloads.len() != before {
        db::put_document(&mut *tx, keys::DOWNLOADS, &downloads).await?;
    }

    tx.commit().await?;
    Ok(downloads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{sample_movie, test_pool};

    #[tokio::test]
    async fn test_add_stamps_synthetic_metadata() {
        let pool = test_pool().await;

        let downloads = add(&pool, sample_movie("1")).await.unwrap();

        let entry = &downloads[0];
        assert!(entry.download_date.is_some());
        let size = entry.download_size.unwrap();
        assert!((MIN_SIZE_MB..=MAX_SIZE_MB).contains(&size));
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let pool = test_pool().await;

        let first = add(&pool, sample_movie("1")).await.unwrap();
        let second = add(&pool, sample_movie("1")).await.unwrap();

        assert_eq!(second.len(), 1);
        // re-adding must not restamp the original entry
        assert_eq!(first[0].download_date, second[0].download_date);
        assert_eq!(first[0].download_size, second[0].download_size);
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let pool = test_pool().await;

        add(&pool, sample_movie("1")).await.unwrap();
        let downloads = remove(&pool, "2").await.unwrap();

        assert_eq!(downloads.len(), 1);
    }
}
