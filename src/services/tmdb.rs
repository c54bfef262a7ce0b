// TMDB metadata provider service
// API Documentation: https://developer.themoviedb.org/reference/intro/getting-started

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::{Error, Result};
use crate::models::{Category, Movie};

const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/original";
const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Image";
const BACKDROP_PLACEHOLDER: &str = "https://via.placeholder.com/1920x1080?text=No+Backdrop";

/// Vote average above which an item is treated as featured content.
const FEATURED_VOTE_THRESHOLD: f64 = 7.0;

/// Shown when the service supplies no runtime. An approximation, not data.
const DURATION_PLACEHOLDER: &str = "1h 45m";

/// Request descriptor for a category listing: a path under the API base
/// plus the fixed query parameters selecting that grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRequest {
    pub path: &'static str,
    pub params: &'static [(&'static str, &'static str)],
}

impl Category {
    /// Predetermined request descriptor for this category. Studio
    /// categories discover by TMDB company id, star-wars by keyword id,
    /// the rest by genre id or a dedicated listing path.
    pub fn request(&self) -> CategoryRequest {
        match self {
            Category::Trending => CategoryRequest {
                path: "/trending/movie/week",
                params: &[],
            },
            Category::Popular => CategoryRequest {
                path: "/movie/popular",
                params: &[],
            },
            Category::TopRated => CategoryRequest {
                path: "/movie/top_rated",
                params: &[],
            },
            Category::Disney => CategoryRequest {
                path: "/discover/movie",
                params: &[("with_companies", "2")],
            },
            Category::Pixar => CategoryRequest {
                path: "/discover/movie",
                params: &[("with_companies", "3")],
            },
            Category::Marvel => CategoryRequest {
                path: "/discover/movie",
                params: &[("with_companies", "420")],
            },
            Category::StarWars => CategoryRequest {
                path: "/discover/movie",
                params: &[("with_keywords", "4270")],
            },
            Category::Animation => CategoryRequest {
                path: "/discover/movie",
                params: &[("with_genres", "16")],
            },
            Category::Family => CategoryRequest {
                path: "/discover/movie",
                params: &[("with_genres", "10751")],
            },
            Category::Documentary => CategoryRequest {
                path: "/discover/movie",
                params: &[("with_genres", "99")],
            },
        }
    }
}

/// Envelope for list endpoints
#[derive(Debug, Deserialize)]
pub struct MovieListResponse {
    pub results: Vec<TmdbMovie>,
}

/// Raw movie record as TMDB returns it. Detail fetches also carry the
/// nested videos/credits sub-objects requested via append_to_response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub videos: Option<VideoList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Deterministic mapping from a raw TMDB record into the app's internal
/// movie shape.
///
/// The content rating and the runtime placeholder are heuristics standing
/// in for data the service does not supply; neither is authoritative.
pub fn normalize(raw: &TmdbMovie) -> Movie {
    let year: String = raw
        .release_date
        .as_deref()
        .map(|d| d.chars().take(4).collect())
        .unwrap_or_default();

    let duration = match raw.runtime {
        Some(minutes) if minutes > 0 => format!("{}h {}m", minutes / 60, minutes % 60),
        _ => DURATION_PLACEHOLDER.to_string(),
    };

    let mut category: Vec<String> = raw
        .genres
        .as_ref()
        .map(|genres| genres.iter().map(|g| g.name.to_lowercase()).collect())
        .unwrap_or_default();

    let looks_like_disney = raw
        .backdrop_path
        .as_deref()
        .map(|p| p.to_ascii_lowercase().contains("disney"))
        .unwrap_or(false)
        || raw.title.to_ascii_lowercase().contains("disney")
        || category.iter().any(|c| c == "animation");
    if looks_like_disney {
        push_tag(&mut category, "disney");
        push_tag(&mut category, "family");
    }

    let vote = raw.vote_average.unwrap_or(0.0);
    if vote > FEATURED_VOTE_THRESHOLD {
        push_tag(&mut category, "popular");
        push_tag(&mut category, "trending");
    }

    let video_url = raw
        .videos
        .as_ref()
        .and_then(|v| v.results.iter().find(|video| video.kind == "Trailer"))
        .map(|video| format!("{}{}", YOUTUBE_WATCH_BASE, video.key));

    Movie {
        id: raw.id.to_string(),
        title: raw.title.clone(),
        description: raw.overview.clone().unwrap_or_default(),
        poster_path: raw
            .poster_path
            .as_deref()
            .map(|p| format!("{}{}", IMAGE_BASE, p))
            .unwrap_or_else(|| POSTER_PLACEHOLDER.to_string()),
        backdrop_path: raw
            .backdrop_path
            .as_deref()
            .map(|p| format!("{}{}", BACKDROP_BASE, p))
            .unwrap_or_else(|| BACKDROP_PLACEHOLDER.to_string()),
        year,
        // Approximated rating: TMDB supplies no certification here
        rating: if vote > FEATURED_VOTE_THRESHOLD {
            "PG"
        } else {
            "PG-13"
        }
        .to_string(),
        duration,
        category,
        video_url,
        // TMDB does not provide logos
        logo: None,
        last_watched: None,
        download_date: None,
        download_size: None,
    }
}

fn push_tag(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// TMDB API client
pub struct TmdbClient {
    client: Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Error::from_upstream)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Request {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(Error::from_upstream)
    }

    /// Fetch a category listing and normalize every result, preserving
    /// the service's own ordering.
    pub async fn category(&self, category: Category) -> Result<Vec<Movie>> {
        let request = category.request();

        let mut url = format!(
            "{}{}?api_key={}",
            TMDB_API_BASE, request.path, self.api_key
        );
        for (name, value) in request.params {
            url.push_str(&format!("&{}={}", name, value));
        }

        let response: MovieListResponse = self.get_json(&url).await?;
        Ok(response.results.iter().map(normalize).collect())
    }

    /// Fetch full detail for one movie, including the nested video and
    /// credit sub-objects, and normalize it.
    pub async fn movie(&self, id: &str) -> Result<Movie> {
        let url = format!(
            "{}/movie/{}?api_key={}&append_to_response=videos,credits,similar",
            TMDB_API_BASE, id, self.api_key
        );

        let raw: TmdbMovie = self.get_json(&url).await?;
        Ok(normalize(&raw))
    }

    /// Free-text search in the service's own relevance order. The minimum
    /// query length is the caller's policy, not enforced here.
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>> {
        let url = format!(
            "{}/search/movie?api_key={}&query={}",
            TMDB_API_BASE,
            self.api_key,
            urlencoding::encode(query)
        );

        let response: MovieListResponse = self.get_json(&url).await?;
        Ok(response.results.iter().map(normalize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_movie() -> TmdbMovie {
        TmdbMovie {
            id: 550,
            title: "Some Movie".to_string(),
            overview: Some("An overview".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            release_date: Some("1999-10-15".to_string()),
            vote_average: Some(6.5),
            runtime: Some(139),
            genres: Some(vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }]),
            videos: None,
        }
    }

    #[test]
    fn test_year_is_first_four_chars_of_release_date() {
        let movie = normalize(&raw_movie());
        assert_eq!(movie.year, "1999");
    }

    #[test]
    fn test_year_empty_when_release_date_absent() {
        let mut raw = raw_movie();
        raw.release_date = None;
        assert_eq!(normalize(&raw).year, "");
    }

    #[test]
    fn test_runtime_formatted_as_hours_and_minutes() {
        let movie = normalize(&raw_movie());
        assert_eq!(movie.duration, "2h 19m");
    }

    #[test]
    fn test_missing_runtime_uses_placeholder() {
        let mut raw = raw_movie();
        raw.runtime = None;
        assert_eq!(normalize(&raw).duration, DURATION_PLACEHOLDER);
    }

    #[test]
    fn test_high_vote_adds_featured_tags_and_pg_rating() {
        let mut raw = raw_movie();
        raw.vote_average = Some(7.1);
        let movie = normalize(&raw);

        assert!(movie.category.iter().any(|c| c == "popular"));
        assert!(movie.category.iter().any(|c| c == "trending"));
        assert_eq!(movie.rating, "PG");
    }

    #[test]
    fn test_threshold_vote_is_not_featured() {
        let mut raw = raw_movie();
        raw.vote_average = Some(7.0);
        let movie = normalize(&raw);

        assert!(!movie.category.iter().any(|c| c == "popular"));
        assert!(!movie.category.iter().any(|c| c == "trending"));
        assert_eq!(movie.rating, "PG-13");
    }

    #[test]
    fn test_animation_genre_implies_disney_and_family_tags() {
        let mut raw = raw_movie();
        raw.genres = Some(vec![Genre {
            id: 16,
            name: "Animation".to_string(),
        }]);
        let movie = normalize(&raw);

        assert_eq!(movie.category, vec!["animation", "disney", "family"]);
    }

    #[test]
    fn test_disney_in_title_tags_without_duplicating() {
        let mut raw = raw_movie();
        raw.title = "A Disney Story".to_string();
        raw.genres = Some(vec![Genre {
            id: 10751,
            name: "Family".to_string(),
        }]);
        let movie = normalize(&raw);

        assert_eq!(movie.category, vec!["family", "disney"]);
    }

    #[test]
    fn test_missing_images_use_placeholders() {
        let mut raw = raw_movie();
        raw.poster_path = None;
        raw.backdrop_path = None;
        let movie = normalize(&raw);

        assert_eq!(movie.poster_path, POSTER_PLACEHOLDER);
        assert_eq!(movie.backdrop_path, BACKDROP_PLACEHOLDER);
    }

    #[test]
    fn test_image_paths_are_prefixed() {
        let movie = normalize(&raw_movie());
        assert_eq!(
            movie.poster_path,
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            movie.backdrop_path,
            "https://image.tmdb.org/t/p/original/backdrop.jpg"
        );
    }

    #[test]
    fn test_first_trailer_becomes_video_url() {
        let mut raw = raw_movie();
        raw.videos = Some(VideoList {
            results: vec![
                Video {
                    key: "teaser1".to_string(),
                    kind: "Teaser".to_string(),
                },
                Video {
                    key: "trailer1".to_string(),
                    kind: "Trailer".to_string(),
                },
                Video {
                    key: "trailer2".to_string(),
                    kind: "Trailer".to_string(),
                },
            ],
        });
        let movie = normalize(&raw);

        assert_eq!(
            movie.video_url.as_deref(),
            Some("https://www.youtube.com/watch?v=trailer1")
        );
        assert!(movie.logo.is_none());
    }

    #[test]
    fn test_unknown_category_resolves_to_popular_descriptor() {
        let fallback = Category::resolve("unknown-category").request();
        assert_eq!(fallback, Category::Popular.request());
        assert_eq!(fallback.path, "/movie/popular");
    }

    #[test]
    fn test_studio_descriptors_use_discover() {
        let disney = Category::Disney.request();
        assert_eq!(disney.path, "/discover/movie");
        assert_eq!(disney.params, &[("with_companies", "2")]);

        let star_wars = Category::StarWars.request();
        assert_eq!(star_wars.params, &[("with_keywords", "4270")]);
    }
}
