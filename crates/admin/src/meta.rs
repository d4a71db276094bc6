//! Model metadata consumed by the admin
//!
//! Describes how each record type is laid out in the database: table,
//! primary key, human-readable names and the kind of every field.

use serde_json::{Map, Value};

/// Storage kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
    Json,
    /// Column holding the primary key of `model`
    ForeignKey { model: &'static str },
    /// Link rows in `through`; `source_column` points back at this model and
    /// `target_column` at `model`
    ManyToMany {
        model: &'static str,
        through: &'static str,
        source_column: &'static str,
        target_column: &'static str,
    },
}

impl FieldKind {
    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            FieldKind::ForeignKey { .. } | FieldKind::ManyToMany { .. }
        )
    }

    /// Target model name of a relation
    pub fn related_model(&self) -> Option<&'static str> {
        match self {
            FieldKind::ForeignKey { model } | FieldKind::ManyToMany { model, .. } => Some(model),
            _ => None,
        }
    }
}

/// Initial value offered for a field when a record is added
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Text(&'static str),
    Integer(i64),
    Float(f64),
    /// JSON literal
    Json(&'static str),
}

impl FieldDefault {
    pub fn to_value(&self) -> Value {
        match self {
            FieldDefault::Text(s) => Value::String((*s).to_string()),
            FieldDefault::Integer(n) => Value::from(*n),
            FieldDefault::Float(f) => Value::from(*f),
            FieldDefault::Json(raw) => serde_json::from_str(raw).unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMeta {
    pub name: &'static str,
    /// Column on the model's own table; empty for many-to-many fields
    pub column: &'static str,
    pub label: &'static str,
    pub help_text: Option<&'static str>,
    pub kind: FieldKind,
    pub default: Option<FieldDefault>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelMeta {
    pub name: &'static str,
    pub table: &'static str,
    pub pk: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    /// Column rendered when a record is shown through a relation
    pub display_column: &'static str,
    pub fields: &'static [FieldMeta],
}

impl ModelMeta {
    pub fn field(&self, name: &str) -> Option<&'static FieldMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Defaults for the add form, keyed by field name
    pub fn initial_values(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter_map(|f| f.default.map(|d| (f.name.to_string(), d.to_value())))
            .collect()
    }
}
