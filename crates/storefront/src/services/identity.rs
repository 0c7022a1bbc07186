//! Local identity store.
//!
//! Keeps at most one [`User`] under [`keys::AUTH`]. There is no backend: the
//! account exists only in local storage, the token is a placeholder that
//! nothing validates, and passwords are accepted but neither stored nor
//! checked. Do not treat a successful login here as proof of identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::instrument;

use boxpaper_core::{User, UserId};

use crate::storage::{self, KeyValueStore, StorageError, keys};

/// Prefix on every generated token.
const TOKEN_PREFIX: &str = "BXPP_";

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identity store over an injected key-value store.
#[derive(Clone)]
pub struct IdentityStore {
    store: Arc<dyn KeyValueStore>,
}

impl IdentityStore {
    /// Create an identity store backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create and persist a new local account, replacing any existing one.
    ///
    /// The password is accepted for interface compatibility only.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    #[instrument(skip(self, _password))]
    pub fn create_account(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<User, StorageError> {
        let now = Utc::now();
        let id = generate_user_id(now);
        let token = generate_token(&id, now);

        let user = User {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            token,
            created_at: now,
        };

        storage::save(self.store.as_ref(), keys::AUTH, &user)?;
        tracing::info!(user_id = %user.id, "Local account created");
        Ok(user)
    }

    /// Return the stored user if its email matches.
    ///
    /// No password check is performed.
    #[instrument(skip(self, _password))]
    pub fn login(&self, email: &str, _password: &str) -> Option<User> {
        self.current_user().filter(|user| user.email == email)
    }

    /// The stored user, or `None` if absent or unreadable.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        storage::load_lenient(self.store.as_ref(), keys::AUTH)
    }

    /// Remove the stored user unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be deleted.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(keys::AUTH)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// The stored user's bearer token, if any.
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.current_user().map(|user| user.token)
    }
}

/// `user_<unix millis>_<7 base36 chars>`
fn generate_user_id(now: DateTime<Utc>) -> UserId {
    UserId::new(format!(
        "user_{}_{}",
        now.timestamp_millis(),
        random_base36(7)
    ))
}

/// `BXPP_<first 8 of id>_<base36 millis>_<8 base36 chars>`, uppercased.
fn generate_token(user_id: &UserId, now: DateTime<Utc>) -> String {
    let id_prefix: String = user_id.as_str().chars().take(8).collect();
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!(
        "{TOKEN_PREFIX}{id_prefix}_{}_{}",
        to_base36(millis),
        random_base36(8)
    )
    .to_uppercase()
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect()
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        // value % 36 < 36, so the index is always in bounds
        #[allow(clippy::cast_possible_truncation, clippy::indexing_slicing)]
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
