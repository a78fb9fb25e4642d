//! Authentication and authorization models
//!
//! This file defines data structures for users, role assignments and session tokens

use serde::{Deserialize, Serialize};

// Auth configuration keys
pub const OMNIPORT_AUTH_TOKEN_SECRET_KEY: &str = "omniport.auth.token.secret.key";
pub const OMNIPORT_AUTH_TOKEN_EXPIRE_SECONDS: &str = "omniport.auth.token.expire.seconds";
pub const DEFAULT_TOKEN_EXPIRE_SECONDS: i64 = 18000;

pub const MAINTAINER_ROLE: &str = "Maintainer";
pub const OMNIPOTENCE_RIGHT: &str = "omnipotence";

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const TOKEN_PREFIX: &str = "Bearer ";
pub const ACCESS_TOKEN: &str = "accessToken";
pub const SESSION_COOKIE: &str = "omniport_session";

/// Verbose name of the username field, used in login error messages
pub const USERNAME_VERBOSE_NAME: &str = "username";

fn default_true() -> bool {
    true
}

/// A role held by a user, e.g. an active `Maintainer` with a set of rights
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub rights: Vec<String>,
}

impl RoleAssignment {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            active: true,
            rights: Vec::new(),
        }
    }

    pub fn with_right(mut self, right: impl Into<String>) -> Self {
        self.rights.push(right.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn grants(&self, right: &str) -> bool {
        self.active && self.rights.iter().any(|r| r == right)
    }
}

/// A site user
///
/// The anonymous user (no session) has an empty username and is never active.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            roles: Vec::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_active: false,
            ..Self::default()
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_anonymous()
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password = hash.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub fn superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }

    pub fn with_role(mut self, role: RoleAssignment) -> Self {
        self.roles.push(role);
        self
    }
}

/// JWT payload for admin sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
    /// Unique per issued token, the key used when a session is revoked
    pub jti: String,
}

/// Auth context passed through request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    /// The token and claims the request authenticated with, if any
    pub session: Option<(String, SessionClaims)>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self {
            user: User::anonymous(),
            session: None,
        }
    }
}
