//! Admin sites
//!
//! [`AdminSite`] is the capability interface the HTTP layer works against.
//! [`BaseAdminSite`] carries the framework's stock behavior (staff users,
//! stock admin class, stock branding). [`OmnipotenceSite`] composes its own
//! collaborators instead:
//!
//! - a [`RightsPredicate`] gating both login and every request,
//! - branding derived from the configured nomenclature,
//! - a registry seeded from a source registry, with [`EnhancedModelAdmin`]
//!   bound whenever no admin class is given.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};

use omniport_auth::form::{AdminAuthenticationForm, LoginValidator, OmnipotenceAuthenticationForm};
use omniport_auth::model::User;
use omniport_auth::rights::RightsPredicate;
use omniport_common::OmniportError;

use crate::model::{ModelKey, ModelSet, capfirst};
use crate::model_admin::{AdminOptions, ChangeList, DefaultModelAdmin, EnhancedModelAdmin, ModelAdmin};
use crate::registry::AdminRegistry;

/// Naming of the deployment, e.g. `Omniport`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomenclature {
    pub name: String,
    pub verbose_name: String,
}

/// Site-wide settings resolved once at startup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub nomenclature: Nomenclature,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            nomenclature: Nomenclature {
                name: "omniport".to_string(),
                verbose_name: "Omniport".to_string(),
            },
        }
    }
}

/// Display strings of an admin site
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub site_header: String,
    pub site_title: String,
    pub index_title: String,
}

impl Branding {
    /// `"<verbose_name> administration"` for header, title and index title
    pub fn administration(verbose_name: &str) -> Self {
        let text = format!("{} administration", verbose_name);
        Self {
            site_header: text.clone(),
            site_title: text.clone(),
            index_title: text,
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            site_header: "Site administration".to_string(),
            site_title: "Site admin".to_string(),
            index_title: "Site administration".to_string(),
        }
    }
}

/// The parts of an incoming request the admin site looks at
#[derive(Clone, Debug)]
pub struct AdminRequest {
    pub user: User,
    pub path: String,
}

impl AdminRequest {
    pub fn new(user: User, path: impl Into<String>) -> Self {
        Self {
            user,
            path: path.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub object_name: String,
    pub name: String,
    pub admin_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub app_label: String,
    pub name: String,
    pub app_url: String,
    pub models: Vec<ModelEntry>,
}

/// An admin site as mounted by the HTTP layer
pub trait AdminSite: Send + Sync {
    fn name(&self) -> &str;

    fn branding(&self) -> &Branding;

    /// Whether the request may access the site at all
    fn has_permission(&self, request: &AdminRequest) -> bool;

    fn login_form(&self) -> &dyn LoginValidator;

    fn registry(&self) -> RwLockReadGuard<'_, AdminRegistry>;

    fn register(
        &self,
        models: ModelSet,
        admin: Option<Arc<dyn ModelAdmin>>,
        options: AdminOptions,
    ) -> Result<(), OmniportError>;

    fn unregister(&self, models: ModelSet) -> Result<(), OmniportError>;

    fn is_registered(&self, key: &ModelKey) -> bool {
        self.registry().is_registered(key)
    }

    fn change_list(&self, key: &ModelKey) -> Option<ChangeList> {
        self.registry().get(key).map(|r| r.change_list())
    }

    /// Registered models grouped by app, sorted by app then model name.
    ///
    /// Empty when the request has no permission.
    fn app_list(&self, request: &AdminRequest, app_label: Option<&str>) -> Vec<AppEntry> {
        if !self.has_permission(request) {
            return Vec::new();
        }

        let mut apps: BTreeMap<String, Vec<ModelEntry>> = BTreeMap::new();
        for registration in self.registry().iter() {
            let model = &registration.model;
            if app_label.is_some_and(|label| label != model.app_label) {
                continue;
            }
            apps.entry(model.app_label.clone())
                .or_default()
                .push(ModelEntry {
                    object_name: model.object_name.clone(),
                    name: capfirst(&model.verbose_name_plural),
                    admin_url: format!(
                        "/{}/{}/{}/",
                        self.name(),
                        model.app_label,
                        model.model_name()
                    ),
                });
        }

        let mut entries: Vec<AppEntry> = apps
            .into_iter()
            .map(|(label, mut models)| {
                models.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                AppEntry {
                    name: capfirst(&label.replace('_', " ")),
                    app_url: format!("/{}/{}/", self.name(), label),
                    app_label: label,
                    models,
                }
            })
            .collect();
        entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        entries
    }
}

/// The framework's default site: active staff users, stock admin class
pub struct BaseAdminSite {
    name: String,
    branding: Branding,
    login_form: AdminAuthenticationForm,
    registry: RwLock<AdminRegistry>,
}

impl BaseAdminSite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branding: Branding::default(),
            login_form: AdminAuthenticationForm,
            registry: RwLock::new(AdminRegistry::new()),
        }
    }
}

impl AdminSite for BaseAdminSite {
    fn name(&self) -> &str {
        &self.name
    }

    fn branding(&self) -> &Branding {
        &self.branding
    }

    fn has_permission(&self, request: &AdminRequest) -> bool {
        request.user.is_active && request.user.is_staff
    }

    fn login_form(&self) -> &dyn LoginValidator {
        &self.login_form
    }

    fn registry(&self) -> RwLockReadGuard<'_, AdminRegistry> {
        self.registry.read()
    }

    fn register(
        &self,
        models: ModelSet,
        admin: Option<Arc<dyn ModelAdmin>>,
        options: AdminOptions,
    ) -> Result<(), OmniportError> {
        let admin = admin.unwrap_or_else(|| Arc::new(DefaultModelAdmin));
        self.registry.write().register(models, admin, options)
    }

    fn unregister(&self, models: ModelSet) -> Result<(), OmniportError> {
        self.registry.write().unregister(models)
    }
}

/// Admin site gated on omnipotence rights
pub struct OmnipotenceSite {
    name: String,
    branding: Branding,
    rights: Arc<dyn RightsPredicate>,
    login_form: OmnipotenceAuthenticationForm,
    registry: RwLock<AdminRegistry>,
}

impl OmnipotenceSite {
    /// Build the site and register every model of `source` with it.
    ///
    /// Only model identities are taken from `source`; its admin classes and
    /// options are not carried over, so each model gets the enhanced admin.
    pub fn new(
        name: impl Into<String>,
        settings: &SiteSettings,
        rights: Arc<dyn RightsPredicate>,
        source: &AdminRegistry,
    ) -> Result<Self, OmniportError> {
        let site = Self {
            name: name.into(),
            branding: Branding::administration(&settings.nomenclature.verbose_name),
            login_form: OmnipotenceAuthenticationForm::new(rights.clone()),
            rights,
            registry: RwLock::new(AdminRegistry::new()),
        };

        for registration in source.iter() {
            if !registration.options.is_empty() || registration.admin.name() != DefaultModelAdmin.name() {
                tracing::debug!(
                    model = %registration.model.key(),
                    admin = registration.admin.name(),
                    "Source admin customization not carried over"
                );
            }
            site.register(registration.model.clone().into(), None, AdminOptions::default())?;
        }

        tracing::info!(
            site = %site.name,
            models = site.registry.read().len(),
            "Admin site synchronized with default registry"
        );

        Ok(site)
    }

    pub fn rights(&self) -> &Arc<dyn RightsPredicate> {
        &self.rights
    }
}

impl std::fmt::Debug for OmnipotenceSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmnipotenceSite")
            .field("name", &self.name)
            .field("branding", &self.branding)
            .field("rights", &"<dyn RightsPredicate>")
            .field("models", &self.registry.read().len())
            .finish()
    }
}

impl AdminSite for OmnipotenceSite {
    fn name(&self) -> &str {
        &self.name
    }

    fn branding(&self) -> &Branding {
        &self.branding
    }

    fn has_permission(&self, request: &AdminRequest) -> bool {
        request.user.is_active && self.rights.has_rights(&request.user)
    }

    fn login_form(&self) -> &dyn LoginValidator {
        &self.login_form
    }

    fn registry(&self) -> RwLockReadGuard<'_, AdminRegistry> {
        self.registry.read()
    }

    fn register(
        &self,
        models: ModelSet,
        admin: Option<Arc<dyn ModelAdmin>>,
        options: AdminOptions,
    ) -> Result<(), OmniportError> {
        let admin = admin.unwrap_or_else(|| Arc::new(EnhancedModelAdmin));
        self.registry.write().register(models, admin, options)
    }

    fn unregister(&self, models: ModelSet) -> Result<(), OmniportError> {
        self.registry.write().unregister(models)
    }
}
