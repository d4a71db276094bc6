//! Field paths such as `name` or `project__name`
//!
//! A path names a field on the model, or a field on a related model reached
//! through one relation. Only one hop is supported.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AdminError;
use crate::meta::{FieldKind, FieldMeta, ModelMeta};
use crate::models;

lazy_static! {
    /// Lowercase identifiers joined by double underscores
    static ref FIELD_PATH_REGEX: Regex =
        Regex::new(r"^[a-z][a-z0-9]*(_[a-z0-9]+)*(__[a-z][a-z0-9]*(_[a-z0-9]+)*)*$").unwrap();
}

/// A syntactically valid field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, AdminError> {
        if !FIELD_PATH_REGEX.is_match(raw) {
            return Err(AdminError::InvalidFieldPath(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split("__")
    }

    /// Resolve the path against `model`
    pub fn resolve(&self, model: &'static ModelMeta) -> Result<ResolvedPath, AdminError> {
        let segments: Vec<&str> = self.segments().collect();

        let field = lookup_field(model, segments[0])?;

        match segments.as_slice() {
            [_] => Ok(ResolvedPath::Local { model, field }),
            [_, related_name] => {
                let target_name = field.kind.related_model().ok_or_else(|| {
                    AdminError::unsupported(
                        &self.raw,
                        format!("'{}' is not a relation", field.name),
                    )
                })?;
                let target = models::model(target_name)
                    .ok_or_else(|| AdminError::NotRegistered(target_name.to_string()))?;
                let target_field = lookup_field(target, related_name)?;
                if target_field.kind.is_relation() {
                    return Err(AdminError::unsupported(
                        &self.raw,
                        "lookups may cross only one relation",
                    ));
                }
                Ok(ResolvedPath::Related {
                    model,
                    via: field,
                    target,
                    field: target_field,
                })
            }
            _ => Err(AdminError::unsupported(
                &self.raw,
                "lookups may cross only one relation",
            )),
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn lookup_field(model: &ModelMeta, name: &str) -> Result<&'static FieldMeta, AdminError> {
    model.field(name).ok_or_else(|| AdminError::UnknownField {
        model: model.name.to_string(),
        field: name.to_string(),
    })
}

/// A field path bound to concrete metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedPath {
    Local {
        model: &'static ModelMeta,
        field: &'static FieldMeta,
    },
    Related {
        model: &'static ModelMeta,
        via: &'static FieldMeta,
        target: &'static ModelMeta,
        field: &'static FieldMeta,
    },
}

impl ResolvedPath {
    /// The field the path ends at
    pub fn field(&self) -> &'static FieldMeta {
        match self {
            ResolvedPath::Local { field, .. } | ResolvedPath::Related { field, .. } => field,
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        match self {
            ResolvedPath::Local { field, .. } => {
                matches!(field.kind, FieldKind::ManyToMany { .. })
            }
            ResolvedPath::Related { via, .. } => matches!(via.kind, FieldKind::ManyToMany { .. }),
        }
    }
}
