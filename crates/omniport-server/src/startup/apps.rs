//! Models of the bundled apps, registered with the default site.
//!
//! The omnipotence site picks these up from the default registry when it is
//! built.

use std::sync::Arc;

use omniport_admin::{AdminOptions, AdminSite, FieldKind, ModelAdmin, ModelMeta};
use omniport_common::OmniportError;

fn timestamped(model: ModelMeta) -> ModelMeta {
    model
        .field("datetime_created", FieldKind::DateTime)
        .field("datetime_modified", FieldKind::DateTime)
}

pub fn person() -> ModelMeta {
    timestamped(
        ModelMeta::new("kernel", "Person")
            .verbose_name("person", "people")
            .field("full_name", FieldKind::Char)
            .field("short_biography", FieldKind::Text),
    )
}

pub fn kernel_models() -> Vec<ModelMeta> {
    vec![
        timestamped(
            ModelMeta::new("kernel", "Student")
                .field("person", FieldKind::ForeignKey)
                .field("enrolment_number", FieldKind::Char)
                .field("current_year", FieldKind::Integer),
        ),
        timestamped(
            ModelMeta::new("kernel", "FacultyMember")
                .field("person", FieldKind::ForeignKey)
                .field("employee_id", FieldKind::Char)
                .field("designation", FieldKind::Char),
        ),
        timestamped(
            ModelMeta::new("kernel", "Maintainer")
                .field("person", FieldKind::ForeignKey)
                .field("designation", FieldKind::Char)
                .field("post", FieldKind::Char),
        ),
    ]
}

pub fn helpcentre_models() -> Vec<ModelMeta> {
    vec![
        timestamped(
            ModelMeta::new("helpcentre", "Query")
                .verbose_name("query", "queries")
                .field("uploader", FieldKind::ForeignKey)
                .field("title", FieldKind::Char)
                .field("query", FieldKind::Text)
                .field("is_closed", FieldKind::Boolean),
        ),
        timestamped(
            ModelMeta::new("helpcentre", "Response")
                .field("query", FieldKind::ForeignKey)
                .field("content", FieldKind::Text),
        ),
    ]
}

pub fn categories_models() -> Vec<ModelMeta> {
    vec![
        ModelMeta::new("categories", "Category")
            .verbose_name("category", "categories")
            .field("name", FieldKind::Char)
            .field("slug", FieldKind::Char),
    ]
}

/// Admin for people on the default site
#[derive(Clone, Copy, Debug, Default)]
pub struct PersonAdmin;

impl ModelAdmin for PersonAdmin {
    fn name(&self) -> &str {
        "PersonAdmin"
    }

    fn list_display(&self, _model: &ModelMeta) -> Vec<String> {
        vec!["id".to_string(), "full_name".to_string()]
    }

    fn search_fields(&self, _model: &ModelMeta) -> Vec<String> {
        vec!["full_name".to_string()]
    }
}

/// Register the bundled apps with `site`
pub fn register_default_models(site: &dyn AdminSite) -> Result<(), OmniportError> {
    site.register(person().into(), Some(Arc::new(PersonAdmin)), AdminOptions::default())?;
    site.register(kernel_models().into(), None, AdminOptions::default())?;
    site.register(helpcentre_models().into(), None, AdminOptions::default())?;
    site.register(
        categories_models().into(),
        None,
        AdminOptions {
            ordering: Some(vec!["name".to_string()]),
            ..AdminOptions::default()
        },
    )?;

    tracing::info!(
        site = site.name(),
        models = site.registry().len(),
        "Default models registered"
    );
    Ok(())
}
