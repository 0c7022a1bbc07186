//! Local identity record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// The single locally stored user.
///
/// There is no server behind this record: the token is an opaque placeholder
/// generated on sign-up and nothing ever validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Process-unique user ID.
    pub id: UserId,
    /// Display name entered at sign-up.
    pub name: String,
    /// Email address, used as the login key.
    pub email: String,
    /// Opaque bearer token.
    pub token: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
