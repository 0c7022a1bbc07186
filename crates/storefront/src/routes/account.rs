//! Account route handlers.
//!
//! There is one local account per storefront. Registering replaces it,
//! signing in only checks the email against it, and signing out deletes it.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use boxpaper_core::User;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::RequireUser;
use crate::state::AppState;
use crate::storage;

/// Registration form.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login form.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The current account.
pub async fn show(RequireUser(user): RequireUser) -> Json<User> {
    Json(user)
}

/// Create the local account.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<User>)> {
    let name = form.name.trim().to_owned();
    let email = form.email.trim().to_owned();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest(
            "name and email are required".to_string(),
        ));
    }

    let identity = state.identity().clone();
    let user = storage::blocking(move || identity.create_account(&name, &email, &form.password))
        .await??;
    set_sentry_user(&user.id, Some(&user.email));
    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign in by email.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login(State(state): State<AppState>, Json(form): Json<LoginForm>) -> Result<Json<User>> {
    let identity = state.identity().clone();
    let user = storage::blocking(move || identity.login(form.email.trim(), &form.password))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    set_sentry_user(&user.id, Some(&user.email));
    Ok(Json(user))
}

/// Remove the local account.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode> {
    let identity = state.identity().clone();
    storage::blocking(move || identity.logout()).await??;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}
