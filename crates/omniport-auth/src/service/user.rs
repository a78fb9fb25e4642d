//! User service

use std::sync::LazyLock;

use dashmap::DashMap;

use crate::model::User;

const UNUSABLE_PASSWORD: &str = "omniport-unusable-password";

/// Verified against when the username is unknown, so a miss costs the same
/// bcrypt work as a wrong password
static DUMMY_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| bcrypt::hash(UNUSABLE_PASSWORD, 10).unwrap_or_default());

/// Lookup and credential verification for site users
pub trait UserStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;

    /// Verify a username/password pair against the stored bcrypt hash.
    ///
    /// Inactive users are still returned so the login form can decide how to
    /// reject them.
    fn authenticate(&self, username: &str, password: &str) -> anyhow::Result<Option<User>> {
        let Some(user) = self.find_by_username(username)? else {
            let _ = bcrypt::verify(password, &DUMMY_PASSWORD_HASH);
            return Ok(None);
        };

        if bcrypt::verify(password, &user.password).unwrap_or(false) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

/// User store held in memory, seeded from configuration
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    /// Insert or replace a user, assigning an id when the user has none
    pub fn insert(&self, mut user: User) {
        if user.id == 0 {
            user.id = self.users.len() as i64 + 1;
        }
        tracing::debug!(username = %user.username, "User stored");
        self.users.insert(user.username.clone(), user);
    }

    pub fn remove(&self, username: &str) -> Option<User> {
        self.users.remove(username).map(|(_, user)| user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }
}
