// Profile and account endpoints
// Sign-in is a demo placeholder: any credential pair succeeds and yields
// the fabricated profile.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Error;
use crate::models::{NotificationSettings, Preferences, User};
use crate::store::profile::{self, ProfileUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/SignIn", post(sign_in))
        .route("/SignOut", post(sign_out))
        .route("/Me", get(get_profile).post(update_profile))
        .route("/Me/Notifications", post(update_notifications))
        .route("/Me/Preferences", post(update_preferences))
        .route("/Me/Password", post(update_password))
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /Users/SignIn
async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<User>, Error> {
    Ok(Json(
        profile::sign_in(&state.db, &req.email, &req.password).await?,
    ))
}

/// POST /Users/SignOut
/// Removes only the profile; collections survive.
async fn sign_out(State(state): State<Arc<AppState>>) -> Result<StatusCode, Error> {
    profile::sign_out(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /Users/Me
async fn get_profile(State(state): State<Arc<AppState>>) -> Result<Json<User>, Error> {
    profile::get(&state.db)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("profile"))
}

/// POST /Users/Me - shallow merge of name/email
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(changes): Json<ProfileUpdate>,
) -> Result<Json<User>, Error> {
    Ok(Json(profile::update(&state.db, changes).await?))
}

/// POST /Users/Me/Notifications - replaces the sub-record wholesale
async fn update_notifications(
    State(state): State<Arc<AppState>>,
    Json(flags): Json<NotificationSettings>,
) -> Result<Json<User>, Error> {
    Ok(Json(profile::update_notifications(&state.db, flags).await?))
}

/// POST /Users/Me/Preferences - replaces the sub-record wholesale
async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<User>, Error> {
    Ok(Json(
        profile::update_preferences(&state.db, preferences).await?,
    ))
}

/// POST /Users/Me/Password
/// Simulated success: no credential is stored, so there is nothing to
/// verify or rewrite.
async fn update_password(Json(_req): Json<PasswordChangeRequest>) -> StatusCode {
    StatusCode::NO_CONTENT
}
