//! Registry of admin declarations

use std::collections::BTreeMap;

use crate::error::AdminError;
use crate::options::ModelAdmin;

/// All registered model admins, keyed by model name
#[derive(Debug, Clone, Default)]
pub struct AdminSite {
    registry: BTreeMap<&'static str, ModelAdmin>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model admin. Each model may be registered once.
    pub fn register(&mut self, admin: ModelAdmin) -> Result<(), AdminError> {
        let name = admin.model().name;
        if self.registry.contains_key(name) {
            return Err(AdminError::AlreadyRegistered(name.to_string()));
        }

        tracing::debug!(model = name, "Registered model admin");
        self.registry.insert(name, admin);
        Ok(())
    }

    pub fn get(&self, model: &str) -> Result<&ModelAdmin, AdminError> {
        self.registry
            .get(model)
            .ok_or_else(|| AdminError::NotRegistered(model.to_string()))
    }

    pub fn is_registered(&self, model: &str) -> bool {
        self.registry.contains_key(model)
    }

    /// Registered model names in alphabetical order
    pub fn model_names(&self) -> Vec<&'static str> {
        self.registry.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelAdmin> {
        self.registry.values()
    }
}
