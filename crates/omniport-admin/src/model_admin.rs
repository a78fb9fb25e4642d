//! Admin behavior bound to a registered model

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::model::{ModelKey, ModelMeta};

pub const DATETIME_CREATED: &str = "datetime_created";
pub const DATETIME_MODIFIED: &str = "datetime_modified";

/// Controls how a model is listed and edited within an admin site
pub trait ModelAdmin: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn list_display(&self, model: &ModelMeta) -> Vec<String>;

    fn search_fields(&self, _model: &ModelMeta) -> Vec<String> {
        Vec::new()
    }

    fn readonly_fields(&self, _model: &ModelMeta) -> Vec<String> {
        Vec::new()
    }

    fn ordering(&self, _model: &ModelMeta) -> Vec<String> {
        Vec::new()
    }

    fn list_per_page(&self) -> usize {
        100
    }
}

/// The framework's stock admin: one `__str__` column, no search
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultModelAdmin;

impl ModelAdmin for DefaultModelAdmin {
    fn name(&self) -> &str {
        "ModelAdmin"
    }

    fn list_display(&self, _model: &ModelMeta) -> Vec<String> {
        vec!["__str__".to_string()]
    }
}

/// Enhanced base admin used by the omnipotence site.
///
/// Lists every concrete field, searches text fields, keeps audit timestamps
/// read-only and shows the newest rows first.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnhancedModelAdmin;

impl ModelAdmin for EnhancedModelAdmin {
    fn name(&self) -> &str {
        "EnhancedModelAdmin"
    }

    fn list_display(&self, model: &ModelMeta) -> Vec<String> {
        model.fields.iter().map(|f| f.name.clone()).collect()
    }

    fn search_fields(&self, model: &ModelMeta) -> Vec<String> {
        model
            .fields
            .iter()
            .filter(|f| f.kind.is_text())
            .map(|f| f.name.clone())
            .collect()
    }

    fn readonly_fields(&self, model: &ModelMeta) -> Vec<String> {
        [DATETIME_CREATED, DATETIME_MODIFIED]
            .into_iter()
            .filter(|name| model.has_field(name))
            .map(str::to_string)
            .collect()
    }

    fn ordering(&self, model: &ModelMeta) -> Vec<String> {
        model
            .pk()
            .map(|pk| vec![format!("-{}", pk.name)])
            .unwrap_or_default()
    }

    fn list_per_page(&self) -> usize {
        50
    }
}

/// Free-form overrides supplied with a registration call
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminOptions {
    pub list_display: Option<Vec<String>>,
    pub search_fields: Option<Vec<String>>,
    pub readonly_fields: Option<Vec<String>>,
    pub ordering: Option<Vec<String>>,
    pub list_per_page: Option<usize>,
}

impl AdminOptions {
    pub fn is_empty(&self) -> bool {
        *self == AdminOptions::default()
    }
}

/// Effective change-list configuration of a registered model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeList {
    pub model: ModelKey,
    pub verbose_name: String,
    pub verbose_name_plural: String,
    pub admin: String,
    pub list_display: Vec<String>,
    pub search_fields: Vec<String>,
    pub readonly_fields: Vec<String>,
    pub ordering: Vec<String>,
    pub list_per_page: usize,
}

impl ChangeList {
    /// Resolve `admin` for `model`, with `options` taking precedence
    pub fn resolve(model: &ModelMeta, admin: &dyn ModelAdmin, options: &AdminOptions) -> Self {
        Self {
            model: model.key(),
            verbose_name: model.verbose_name.clone(),
            verbose_name_plural: model.verbose_name_plural.clone(),
            admin: admin.name().to_string(),
            list_display: options
                .list_display
                .clone()
                .unwrap_or_else(|| admin.list_display(model)),
            search_fields: options
                .search_fields
                .clone()
                .unwrap_or_else(|| admin.search_fields(model)),
            readonly_fields: options
                .readonly_fields
                .clone()
                .unwrap_or_else(|| admin.readonly_fields(model)),
            ordering: options
                .ordering
                .clone()
                .unwrap_or_else(|| admin.ordering(model)),
            list_per_page: options.list_per_page.unwrap_or_else(|| admin.list_per_page()),
        }
    }
}
