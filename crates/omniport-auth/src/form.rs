//! Admin login forms
//!
//! `LoginValidator::clean` runs the whole login pipeline: required fields,
//! credential verification, then the `confirm_login_allowed` hook. The base
//! [`AdminAuthenticationForm`] admits active staff users; the
//! [`OmnipotenceAuthenticationForm`] replaces the staff check with a
//! [`RightsPredicate`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use omniport_common::{PARAM_PASSWORD, PARAM_USERNAME, ValidationError};

use crate::model::{USERNAME_VERBOSE_NAME, User};
use crate::rights::{RightsPredicate, omnipotence_rights};
use crate::service::user::UserStore;

pub const INVALID_LOGIN: &str = "invalid_login";
pub const INACTIVE: &str = "inactive";
pub const REQUIRED: &str = "required";

/// Localized error message table of a login form, keyed by error code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorMessages {
    pub invalid_login: &'static str,
    pub inactive: &'static str,
    pub required: &'static str,
}

impl ErrorMessages {
    pub fn get(&self, code: &str) -> Option<&'static str> {
        match code {
            INVALID_LOGIN => Some(self.invalid_login),
            INACTIVE => Some(self.inactive),
            REQUIRED => Some(self.required),
            _ => None,
        }
    }
}

pub const AUTHENTICATION_FORM_MESSAGES: ErrorMessages = ErrorMessages {
    invalid_login: "Please enter a correct %(username)s and password. Note that both fields may be case-sensitive.",
    inactive: "This account is inactive.",
    required: "This field is required.",
};

pub const ADMIN_AUTHENTICATION_FORM_MESSAGES: ErrorMessages = ErrorMessages {
    invalid_login: "Please enter the correct %(username)s and password for a staff account. Note that both fields may be case-sensitive.",
    ..AUTHENTICATION_FORM_MESSAGES
};

/// Submitted login form data
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoginData {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginData {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Description of a form field for rendering a login page
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub required: bool,
}

pub const LOGIN_FIELDS: [FormField; 2] = [
    FormField {
        name: PARAM_USERNAME,
        label: "Username",
        input_type: "text",
        required: true,
    },
    FormField {
        name: PARAM_PASSWORD,
        label: "Password",
        input_type: "password",
        required: true,
    },
];

/// Login validation as performed by an admin site's login form
pub trait LoginValidator: Send + Sync {
    fn error_messages(&self) -> &ErrorMessages;

    /// Decide whether an authenticated user may log in
    fn confirm_login_allowed(&self, user: &User) -> Result<(), ValidationError>;

    fn username_verbose_name(&self) -> &str {
        USERNAME_VERBOSE_NAME
    }

    fn invalid_login_error(&self) -> ValidationError {
        ValidationError::new(INVALID_LOGIN, self.error_messages().invalid_login)
            .with_param(PARAM_USERNAME, self.username_verbose_name())
    }

    /// Validate submitted data and return the user allowed to log in.
    ///
    /// Unknown users and wrong passwords fail with the same `invalid_login`
    /// error as users rejected by `confirm_login_allowed`.
    fn clean(
        &self,
        store: &dyn UserStore,
        data: &LoginData,
    ) -> anyhow::Result<Result<User, Vec<ValidationError>>> {
        let username = data.username.as_deref().filter(|v| !v.is_empty());
        let password = data.password.as_deref().filter(|v| !v.is_empty());

        let mut errors = Vec::new();
        if username.is_none() {
            errors.push(
                ValidationError::new(REQUIRED, self.error_messages().required)
                    .for_field(PARAM_USERNAME),
            );
        }
        if password.is_none() {
            errors.push(
                ValidationError::new(REQUIRED, self.error_messages().required)
                    .for_field(PARAM_PASSWORD),
            );
        }

        let (Some(username), Some(password)) = (username, password) else {
            return Ok(Err(errors));
        };

        let Some(user) = store.authenticate(username, password)? else {
            tracing::info!(username = %username, "Login rejected: invalid credentials");
            return Ok(Err(vec![self.invalid_login_error()]));
        };

        if let Err(e) = self.confirm_login_allowed(&user) {
            tracing::info!(
                username = %username,
                code = e.code(),
                "Login rejected: not allowed"
            );
            return Ok(Err(vec![e]));
        }

        Ok(Ok(user))
    }
}

/// The framework's admin login form: active staff users only
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminAuthenticationForm;

impl LoginValidator for AdminAuthenticationForm {
    fn error_messages(&self) -> &ErrorMessages {
        &ADMIN_AUTHENTICATION_FORM_MESSAGES
    }

    fn confirm_login_allowed(&self, user: &User) -> Result<(), ValidationError> {
        if !user.is_active {
            return Err(ValidationError::new(
                INACTIVE,
                self.error_messages().inactive,
            ));
        }
        if !user.is_staff {
            return Err(self.invalid_login_error());
        }
        Ok(())
    }
}

/// Admin login form gated on omnipotence rights instead of the staff flag
#[derive(Clone)]
pub struct OmnipotenceAuthenticationForm {
    rights: Arc<dyn RightsPredicate>,
}

impl OmnipotenceAuthenticationForm {
    pub fn new(rights: Arc<dyn RightsPredicate>) -> Self {
        Self { rights }
    }
}

impl Default for OmnipotenceAuthenticationForm {
    fn default() -> Self {
        Self::new(omnipotence_rights())
    }
}

impl std::fmt::Debug for OmnipotenceAuthenticationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmnipotenceAuthenticationForm")
            .field("rights", &"<dyn RightsPredicate>")
            .finish()
    }
}

impl LoginValidator for OmnipotenceAuthenticationForm {
    fn error_messages(&self) -> &ErrorMessages {
        &ADMIN_AUTHENTICATION_FORM_MESSAGES
    }

    fn confirm_login_allowed(&self, user: &User) -> Result<(), ValidationError> {
        if !user.is_active || !self.rights.has_rights(user) {
            return Err(self.invalid_login_error());
        }
        Ok(())
    }
}
