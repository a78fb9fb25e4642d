//! Omniport Auth - Authentication and omnipotence rights
//!
//! This crate provides:
//! - User and role assignment models
//! - The omnipotence rights predicate
//! - Admin login forms (the staff-based base form and the omnipotence form)
//! - JWT session tokens and the in-memory user store

pub mod form;
pub mod model;
pub mod rights;
pub mod service;

// Re-export commonly used types
pub use form::{AdminAuthenticationForm, LoginData, LoginValidator, OmnipotenceAuthenticationForm};
pub use model::*;
pub use rights::{OmnipotenceRights, RightsPredicate, has_omnipotence_rights};
