// Pexels stock-video provider service
// API Documentation: https://www.pexels.com/api/documentation/
//
// An alternate data source for preview clips. Unlike TMDB the key is
// sent as an Authorization header, not a query parameter.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{Error, Result};

const PEXELS_API_BASE: &str = "https://api.pexels.com/videos";
const DEFAULT_PER_PAGE: u32 = 15;

/// How many candidates to fetch per trailer-search attempt.
const TRAILER_CANDIDATES: u32 = 5;

/// Queries tried in order when looking for a stand-in trailer clip:
/// the title with a "trailer" suffix first, then the bare title.
fn trailer_queries(title: &str) -> [String; 2] {
    [format!("{} trailer", title), title.to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSearchResults {
    pub page: i64,
    pub per_page: i64,
    pub total_results: i64,
    pub videos: Vec<PexelsVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PexelsVideo {
    pub id: i64,
    pub width: i64,
    pub height: i64,
    pub duration: i64,
    pub image: String,
    pub url: String,
    pub video_files: Vec<VideoFile>,
    pub user: Uploader,
}

/// One resolution/format variant of a video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoFile {
    pub id: i64,
    pub quality: String,
    pub file_type: String,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    pub link: String,
}

/// Uploader attribution, required by the Pexels terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uploader {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// Pexels API client
pub struct PexelsClient {
    client: Client,
    api_key: String,
}

impl PexelsClient {
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
            .header("Authorization", &self.api_key)
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

    pub async fn search(&self, query: &str, per_page: Option<u32>) -> Result<VideoSearchResults> {
        let url = format!(
            "{}/search?query={}&per_page={}",
            PEXELS_API_BASE,
            urlencoding::encode(query),
            per_page.unwrap_or(DEFAULT_PER_PAGE)
        );
        self.get_json(&url).await
    }

    pub async fn popular(&self, per_page: Option<u32>) -> Result<VideoSearchResults> {
        let url = format!(
            "{}/popular?per_page={}",
            PEXELS_API_BASE,
            per_page.unwrap_or(DEFAULT_PER_PAGE)
        );
        self.get_json(&url).await
    }

    pub async fn video(&self, id: i64) -> Result<PexelsVideo> {
        let url = format!("{}/videos/{}", PEXELS_API_BASE, id);
        self.get_json(&url).await
    }

    /// Find a clip usable as a stand-in trailer for a movie: the first
    /// hit of the first query in `trailer_queries` that returns any.
    pub async fn find_trailer(&self, title: &str) -> Result<Option<PexelsVideo>> {
        for query in trailer_queries(title) {
            let results = self.search(&query, Some(TRAILER_CANDIDATES)).await?;
            if let Some(video) = results.videos.into_iter().next() {
                return Ok(Some(video));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailer_search_tries_suffixed_title_before_bare_title() {
        let [primary, fallback] = trailer_queries("Moana");
        assert_eq!(primary, "Moana trailer");
        assert_eq!(fallback, "Moana");
    }

    #[test]
    fn test_search_results_parse_and_first_hit_wins() {
        let body = r#"{
            "page": 1,
            "per_page": 5,
            "total_results": 2,
            "videos": [
                {
                    "id": 101,
                    "width": 1920,
                    "height": 1080,
                    "duration": 30,
                    "image": "https://images.pexels.com/101.jpg",
                    "url": "https://www.pexels.com/video/101/",
                    "video_files": [
                        {
                            "id": 1,
                            "quality": "hd",
                            "file_type": "video/mp4",
                            "width": 1920,
                            "height": 1080,
                            "link": "https://player.pexels.com/101.mp4"
                        }
                    ],
                    "user": { "id": 7, "name": "Someone", "url": "https://www.pexels.com/@someone" }
                },
                {
                    "id": 102,
                    "width": 1280,
                    "height": 720,
                    "duration": 12,
                    "image": "https://images.pexels.com/102.jpg",
                    "url": "https://www.pexels.com/video/102/",
                    "video_files": [],
                    "user": { "id": 8, "name": "Other", "url": "https://www.pexels.com/@other" }
                }
            ]
        }"#;

        let results: VideoSearchResults = serde_json::from_str(body).unwrap();
        let first = results.videos.into_iter().next().unwrap();
        assert_eq!(first.id, 101);
    }
}
