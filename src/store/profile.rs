// Active user profile: a single stored document, fabricated on sign-in.
//
// There is no authentication authority behind this. Sign-in accepts any
// email/password pair and persists the demo profile; this placeholder
// behavior is deliberate and kept as-is.

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::db::{self, keys};
use crate::error::{Error, Result};
use crate::models::{
    DownloadPreferences, DownloadQuality, NotificationSettings, PlaybackQuality, Preferences, User,
};

/// Fixed identity used by the fabricated sign-in.
const DEMO_USER_ID: &str = "123456";
const DEMO_AVATAR_URL: &str = "https://i.pravatar.cc/150?img=3";
const DEMO_MEMBER_SINCE: &str = "January 2022";

/// Partial profile update; unset fields are left as stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// The active profile, or `None` when nobody has signed in.
pub async fn get(pool: &SqlitePool) -> Result<Option<User>> {
    db::get_document(pool, keys::PROFILE).await
}

/// Fabricate the demo profile for the given email and persist it as the
/// active profile. The password is accepted unchecked.
pub async fn sign_in(pool: &SqlitePool, email: &str, _password: &str) -> Result<User> {
    let user = demo_profile(email);
    db::put_document(pool, keys::PROFILE, &user).await?;
    tracing::info!(email, "signed in demo profile");
    Ok(user)
}

/// Delete only the active profile. Favorites, history and downloads
/// survive sign-out by design.
pub async fn sign_out(pool: &SqlitePool) -> Result<()> {
    db::delete_document(pool, keys::PROFILE).await
}

/// Shallow-merge the given fields into the stored profile.
pub async fn update(pool: &SqlitePool, changes: ProfileUpdate) -> Result<User> {
    let mut tx = pool.begin().await?;

    let mut user: User = db::get_document(&mut *tx, keys::PROFILE)
        .await?
        .ok_or(Error::NotFound("profile"))?;

    if let Some(name) = changes.name {
        user.name = name;
    }
    if let Some(email) = changes.email {
        user.email = email;
    }

    db::put_document(&mut *tx, keys::PROFILE, &user).await?;
    tx.commit().await?;

    Ok(user)
}

/// Replace the notifications sub-record wholesale.
pub async fn update_notifications(pool: &SqlitePool, flags: NotificationSettings) -> Result<User> {
    let mut tx = pool.begin().await?;

    let mut user: User = db::get_document(&mut *tx, keys::PROFILE)
        .await?
        .ok_or(Error::NotFound("profile"))?;

    user.notifications = flags;

    db::put_document(&mut *tx, keys::PROFILE, &user).await?;
    tx.commit().await?;

    Ok(user)
}

/// Replace the preferences sub-record wholesale.
pub async fn update_preferences(pool: &SqlitePool, preferences: Preferences) -> Result<User> {
    let mut tx = pool.begin().await?;

    let mut user: User = db::get_document(&mut *tx, keys::PROFILE)
        .await?
        .ok_or(Error::NotFound("profile"))?;

    user.preferences = preferences;

    db::put_document(&mut *tx, keys::PROFILE, &user).await?;
    tx.commit().await?;

    Ok(user)
}

fn demo_profile(email: &str) -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        name: "Movie Fan".to_string(),
        email: email.to_string(),
        avatar: DEMO_AVATAR_URL.to_string(),
        member_since: DEMO_MEMBER_SINCE.to_string(),
        notifications: NotificationSettings {
            new_content: true,
            watchlist: true,
            special_offers: false,
            newsletters: false,
        },
        preferences: Preferences {
            autoplay: true,
            playback_quality: PlaybackQuality::Auto,
            downloads: DownloadPreferences {
                wifi_only: true,
                auto_delete: false,
                video_quality: DownloadQuality::Medium,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::favorites;
    use crate::store::test_support::{sample_movie, test_pool};

    #[tokio::test]
    async fn test_sign_in_persists_profile_with_given_email() {
        let pool = test_pool().await;

        sign_in(&pool, "fan@example.com", "hunter2").await.unwrap();

        let user = get(&pool).await.unwrap().unwrap();
        assert_eq!(user.email, "fan@example.com");
        assert_eq!(user.id, DEMO_USER_ID);
    }

    #[tokio::test]
    async fn test_update_without_profile_is_not_found() {
        let pool = test_pool().await;

        let result = update(
            &pool,
            ProfileUpdate {
                name: Some("Someone".to_string()),
                email: None,
            },
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_merges_only_given_fields() {
        let pool = test_pool().await;
        sign_in(&pool, "fan@example.com", "pw").await.unwrap();

        let user = update(
            &pool,
            ProfileUpdate {
                name: Some("Renamed".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(user.name, "Renamed");
        assert_eq!(user.email, "fan@example.com");
    }

    #[tokio::test]
    async fn test_notifications_round_trip_leaves_rest_unchanged() {
        let pool = test_pool().await;
        let before = sign_in(&pool, "fan@example.com", "pw").await.unwrap();

        let flags = NotificationSettings {
            new_content: false,
            watchlist: false,
            special_offers: true,
            newsletters: true,
        };
        update_notifications(&pool, flags.clone()).await.unwrap();

        let after = get(&pool).await.unwrap().unwrap();
        assert_eq!(after.notifications, flags);
        assert_eq!(after.name, before.name);
        assert_eq!(after.preferences, before.preferences);
    }

    #[tokio::test]
    async fn test_preferences_replaced_wholesale() {
        let pool = test_pool().await;
        sign_in(&pool, "fan@example.com", "pw").await.unwrap();

        let preferences = Preferences {
            autoplay: false,
            playback_quality: PlaybackQuality::High,
            downloads: DownloadPreferences {
                wifi_only: false,
                auto_delete: true,
                video_quality: DownloadQuality::High,
            },
        };
        let user = update_preferences(&pool, preferences.clone())
            .await
            .unwrap();

        assert_eq!(user.preferences, preferences);
    }

    #[tokio::test]
    async fn test_collections_survive_sign_out() {
        let pool = test_pool().await;
        sign_in(&pool, "fan@example.com", "pw").await.unwrap();
        favorites::add(&pool, sample_movie("1")).await.unwrap();

        sign_out(&pool).await.unwrap();

        assert!(get(&pool).await.unwrap().is_none());
        let kept = favorites::get(&pool).await.unwrap();
        assert_eq!(kept.len(), 1);
    }
}
