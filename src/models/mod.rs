use serde::{Deserialize, Serialize};

/// A catalog entry in the app's internal shape. Every provider record is
/// normalized into this before it reaches a caller or a stored collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub year: String,
    pub rating: String,
    pub duration: String,
    /// Lower-cased tags, insertion order preserved for display
    pub category: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watched: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_date: Option<String>,
    /// Synthetic size in megabytes, stamped when the movie is downloaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub member_since: String,
    pub notifications: NotificationSettings,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub new_content: bool,
    pub watchlist: bool,
    pub special_offers: bool,
    pub newsletters: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub autoplay: bool,
    pub playback_quality: PlaybackQuality,
    pub downloads: DownloadPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPreferences {
    pub wifi_only: bool,
    pub auto_delete: bool,
    pub video_quality: DownloadQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackQuality {
    Auto,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadQuality {
    Low,
    Medium,
    High,
}

/// Fixed content groupings the catalog can be browsed by. The set never
/// changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Trending,
    Popular,
    TopRated,
    Disney,
    Pixar,
    Marvel,
    StarWars,
    Animation,
    Family,
    Documentary,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Trending,
        Category::Popular,
        Category::TopRated,
        Category::Disney,
        Category::Pixar,
        Category::Marvel,
        Category::StarWars,
        Category::Animation,
        Category::Family,
        Category::Documentary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trending => "trending",
            Category::Popular => "popular",
            Category::TopRated => "top-rated",
            Category::Disney => "disney",
            Category::Pixar => "pixar",
            Category::Marvel => "marvel",
            Category::StarWars => "star-wars",
            Category::Animation => "animation",
            Category::Family => "family",
            Category::Documentary => "documentary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Trending => "Trending Now",
            Category::Popular => "Popular",
            Category::TopRated => "Top Rated",
            Category::Disney => "Disney",
            Category::Pixar => "Pixar",
            Category::Marvel => "Marvel",
            Category::StarWars => "Star Wars",
            Category::Animation => "Animation",
            Category::Family => "Family",
            Category::Documentary => "Documentary",
        }
    }

    /// Total mapping over the fixed category set. Unknown identifiers route
    /// to the popular listing; the default branch is logged so misrouted
    /// callers are visible instead of silently served the wrong content.
    pub fn resolve(id: &str) -> Category {
        match Category::ALL.iter().find(|c| c.as_str() == id) {
            Some(category) => *category,
            None => {
                tracing::warn!(category = id, "unknown category identifier, serving popular");
                Category::Popular
            }
        }
    }
}
