//! Omniport Admin - Model registry and admin sites
//!
//! This crate provides:
//! - Model metadata (`ModelMeta`, `ModelKey`)
//! - The `ModelAdmin` capability trait, the framework default and the enhanced base admin
//! - `AdminRegistry`, the model to admin binding table
//! - The `AdminSite` capability trait, the framework `BaseAdminSite` and `OmnipotenceSite`

pub mod model;
pub mod model_admin;
pub mod registry;
pub mod site;

pub use model::{FieldKind, FieldMeta, ModelKey, ModelMeta, ModelSet};
pub use model_admin::{AdminOptions, ChangeList, DefaultModelAdmin, EnhancedModelAdmin, ModelAdmin};
pub use registry::{AdminRegistry, Registration};
pub use site::{
    AdminRequest, AdminSite, AppEntry, BaseAdminSite, Branding, ModelEntry, Nomenclature,
    OmnipotenceSite, SiteSettings,
};

/// Name under which the omnipotence site is mounted
pub const OMNIPOTENCE_SITE_NAME: &str = "omnipotence";
/// Name of the framework's default site
pub const DEFAULT_SITE_NAME: &str = "admin";
