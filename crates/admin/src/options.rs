//! Per-model admin declarations

use crate::error::AdminError;
use crate::lookups::{FieldPath, ResolvedPath};
use crate::meta::{FieldKind, FieldMeta, ModelMeta};

/// Rows per changelist page unless a declaration overrides it
pub const DEFAULT_LIST_PER_PAGE: i64 = 100;

/// How one record type is presented in the back office.
///
/// Built through [`ModelAdminBuilder`], which checks every field against the
/// model metadata.
#[derive(Debug, Clone)]
pub struct ModelAdmin {
    model: &'static ModelMeta,
    list_display: Vec<&'static FieldMeta>,
    search_fields: Vec<(FieldPath, ResolvedPath)>,
    list_filter: Vec<&'static FieldMeta>,
    list_per_page: i64,
}

impl ModelAdmin {
    pub fn model(&self) -> &'static ModelMeta {
        self.model
    }

    pub fn list_display(&self) -> &[&'static FieldMeta] {
        &self.list_display
    }

    pub fn search_fields(&self) -> impl Iterator<Item = &ResolvedPath> {
        self.search_fields.iter().map(|(_, resolved)| resolved)
    }

    pub fn search_field_names(&self) -> Vec<&str> {
        self.search_fields
            .iter()
            .map(|(path, _)| path.as_str())
            .collect()
    }

    pub fn list_filter(&self) -> &[&'static FieldMeta] {
        &self.list_filter
    }

    pub fn list_per_page(&self) -> i64 {
        self.list_per_page
    }

    /// The declared filter with this name, if any
    pub fn filter(&self, name: &str) -> Option<&'static FieldMeta> {
        self.list_filter.iter().copied().find(|f| f.name == name)
    }

    pub fn is_searchable(&self) -> bool {
        !self.search_fields.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ModelAdminBuilder {
    model: &'static ModelMeta,
    list_display: Vec<String>,
    search_fields: Vec<String>,
    list_filter: Vec<String>,
    list_per_page: i64,
}

impl ModelAdminBuilder {
    pub fn new(model: &'static ModelMeta) -> Self {
        Self {
            model,
            list_display: Vec::new(),
            search_fields: Vec::new(),
            list_filter: Vec::new(),
            list_per_page: DEFAULT_LIST_PER_PAGE,
        }
    }

    pub fn list_display<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_display = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn list_filter<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_filter = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn list_per_page(mut self, per_page: i64) -> Self {
        self.list_per_page = per_page;
        self
    }

    /// Check every declared field against the model and build the admin
    pub fn build(self) -> Result<ModelAdmin, AdminError> {
        let model = self.model;

        // An empty list_display falls back to the primary key column
        let display_names = if self.list_display.is_empty() {
            vec![model.pk.to_string()]
        } else {
            self.list_display
        };

        let list_display = display_names
            .iter()
            .map(|name| {
                let field = local_field(model, name)?;
                if matches!(field.kind, FieldKind::ManyToMany { .. }) {
                    return Err(AdminError::unsupported(
                        name,
                        "many-to-many fields cannot be list columns",
                    ));
                }
                Ok(field)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let search_fields = self
            .search_fields
            .iter()
            .map(|raw| {
                let path = FieldPath::parse(raw)?;
                let resolved = path.resolve(model)?;
                if resolved.field().kind.is_relation() {
                    return Err(AdminError::unsupported(
                        raw,
                        "search must end at a non-relation field",
                    ));
                }
                Ok((path, resolved))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let list_filter = self
            .list_filter
            .iter()
            .map(|name| {
                let field = local_field(model, name)?;
                if matches!(field.kind, FieldKind::Json) {
                    return Err(AdminError::unsupported(
                        name,
                        "JSON fields cannot be filters",
                    ));
                }
                Ok(field)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.list_per_page < 1 {
            return Err(AdminError::unsupported(
                "list_per_page",
                "must be at least 1",
            ));
        }

        Ok(ModelAdmin {
            model,
            list_display,
            search_fields,
            list_filter,
            list_per_page: self.list_per_page,
        })
    }
}

/// A direct field of `model`; lookups across relations are rejected
fn local_field(model: &'static ModelMeta, name: &str) -> Result<&'static FieldMeta, AdminError> {
    let path = FieldPath::parse(name)?;
    match path.resolve(model)? {
        ResolvedPath::Local { field, .. } => Ok(field),
        ResolvedPath::Related { .. } => Err(AdminError::unsupported(
            name,
            "only direct fields are allowed here",
        )),
    }
}
