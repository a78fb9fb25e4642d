//! Model to admin binding table

use std::collections::HashMap;
use std::sync::Arc;

use omniport_common::OmniportError;

use crate::model::{ModelKey, ModelMeta, ModelSet};
use crate::model_admin::{AdminOptions, ChangeList, ModelAdmin};

/// A model bound to its admin behavior
#[derive(Clone, Debug)]
pub struct Registration {
    pub model: ModelMeta,
    pub admin: Arc<dyn ModelAdmin>,
    pub options: AdminOptions,
}

impl Registration {
    pub fn change_list(&self) -> ChangeList {
        ChangeList::resolve(&self.model, self.admin.as_ref(), &self.options)
    }
}

/// Registered models of one admin site, in registration order
#[derive(Clone, Debug, Default)]
pub struct AdminRegistry {
    order: Vec<ModelKey>,
    entries: HashMap<ModelKey, Registration>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every model in `models` to `admin`.
    ///
    /// Models are registered one at a time; on failure the models already
    /// bound by this call stay registered.
    pub fn register(
        &mut self,
        models: ModelSet,
        admin: Arc<dyn ModelAdmin>,
        options: AdminOptions,
    ) -> Result<(), OmniportError> {
        for model in models {
            if model.is_abstract {
                return Err(OmniportError::ImproperlyConfigured(format!(
                    "The model {} is abstract, so it cannot be registered with admin.",
                    model.object_name
                )));
            }

            let key = model.key();
            if let Some(existing) = self.entries.get(&key) {
                return Err(OmniportError::AlreadyRegistered(format!(
                    "The model {} is already registered with '{}'.",
                    model.object_name,
                    existing.admin.name()
                )));
            }

            tracing::debug!(model = %key, admin = admin.name(), "Model registered");
            self.order.push(key.clone());
            self.entries.insert(
                key,
                Registration {
                    model,
                    admin: admin.clone(),
                    options: options.clone(),
                },
            );
        }

        Ok(())
    }

    pub fn unregister(&mut self, models: ModelSet) -> Result<(), OmniportError> {
        for model in models {
            let key = model.key();
            if self.entries.remove(&key).is_none() {
                return Err(OmniportError::NotRegistered(format!(
                    "The model {} is not registered",
                    model.object_name
                )));
            }
            self.order.retain(|k| k != &key);
        }

        Ok(())
    }

    pub fn is_registered(&self, key: &ModelKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &ModelKey) -> Option<&Registration> {
        self.entries.get(key)
    }

    pub fn get_model_admin(&self, key: &ModelKey) -> Result<Arc<dyn ModelAdmin>, OmniportError> {
        self.entries
            .get(key)
            .map(|r| r.admin.clone())
            .ok_or_else(|| OmniportError::NotRegistered(format!("The model {} is not registered", key)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModelKey> {
        self.order.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.order.iter().filter_map(|k| self.entries.get(k))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
