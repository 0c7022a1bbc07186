//! Authentication extractors.
//!
//! The storefront has a single local account (see
//! [`IdentityStore`](crate::services::IdentityStore)). "Signed in" means that
//! account exists; there is no per-visitor login.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use boxpaper_core::User;

use crate::error::AppError;
use crate::state::AppState;
use crate::storage;

/// Extractor that requires the local account to exist.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub User);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = AppState::from_ref(state).identity().clone();
        storage::blocking(move || identity.current_user())
            .await?
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Not signed in".to_string()))
    }
}
