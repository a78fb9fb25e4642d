//! Form validation errors
//!
//! Messages are templates with `%(name)s` placeholders filled from named
//! parameters when rendered, so a form can keep one message table and attach
//! the values at the point of failure.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A structured validation failure raised by a form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    code: String,
    template: String,
    params: BTreeMap<String, String>,
    field: Option<String>,
}

impl ValidationError {
    pub fn new(code: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            template: template.into(),
            params: BTreeMap::new(),
            field: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Attach the error to a single field instead of the whole form
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Render the message template with its parameters
    pub fn message(&self) -> String {
        let mut rendered = self.template.clone();
        for (name, value) in &self.params {
            rendered = rendered.replace(&format!("%({})s", name), value);
        }
        rendered
    }

    pub fn to_detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code.clone(),
            message: self.message(),
            field: self.field.clone(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Serializable view of a validation error for API responses
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_renders_params() {
        let err = ValidationError::new(
            "invalid_login",
            "Please enter the correct %(username)s and password.",
        )
        .with_param("username", "username");

        assert_eq!(err.code(), "invalid_login");
        assert_eq!(
            err.message(),
            "Please enter the correct username and password."
        );
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn test_message_without_params_is_template() {
        let err = ValidationError::new("inactive", "This account is inactive.");
        assert_eq!(err.message(), "This account is inactive.");
        assert!(err.params().is_empty());
    }

    #[test]
    fn test_unknown_placeholder_is_left_alone() {
        let err = ValidationError::new("x", "%(missing)s stays").with_param("other", "v");
        assert_eq!(err.message(), "%(missing)s stays");
    }

    #[test]
    fn test_field_error_detail() {
        let err = ValidationError::new("required", "This field is required.").for_field("password");
        let detail = err.to_detail();
        assert_eq!(detail.field.as_deref(), Some("password"));

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["code"], "required");
        assert_eq!(json["field"], "password");
    }

    #[test]
    fn test_form_error_detail_omits_field() {
        let detail = ValidationError::new("invalid_login", "bad").to_detail();
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("field").is_none());
    }

    proptest::proptest! {
        #[test]
        fn prop_rendered_message_contains_param_value(value in "[a-zA-Z ]{1,20}") {
            let err = ValidationError::new("invalid_login", "enter the %(username)s")
                .with_param("username", value.clone());
            proptest::prop_assert_eq!(err.message(), format!("enter the {}", value));
        }
    }
}
