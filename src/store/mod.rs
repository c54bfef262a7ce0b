// User-scoped collections persisted as whole JSON documents.
//
// Every mutation is a read-modify-write of one document, run inside a
// single SQLite transaction so two concurrent writers cannot interleave
// between the read and the write of the same collection.

pub mod downloads;
pub mod favorites;
pub mod history;
pub mod profile;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use crate::models::Movie;

    pub async fn test_pool() -> SqlitePool {
        // A single connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::migrate(&pool).await.unwrap();
        pool
    }

    pub fn sample_movie(id: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: format!("Movie {}", id),
            description: "A test movie".to_string(),
            poster_path: "https://image.tmdb.org/t/p/w500/poster.jpg".to_string(),
            backdrop_path: "https://image.tmdb.org/t/p/original/backdrop.jpg".to_string(),
            year: "2020".to_string(),
            rating: "PG".to_string(),
            duration: "1h 45m".to_string(),
            category: vec!["animation".to_string(), "family".to_string()],
            video_url: None,
            logo: None,
            last_watched: None,
            download_date: None,
            download_size: None,
        }
    }
}
