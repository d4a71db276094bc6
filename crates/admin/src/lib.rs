//! Admin view mappings for Siteplan
//!
//! Declares, per record type, which fields appear as list columns, which are
//! free-text searchable and which act as discrete filters. The declarations
//! are checked against the model metadata when the [`AdminSite`] is built,
//! and [`ChangeList`] compiles them into the SQL a back-office host runs.

pub mod changelist;
pub mod error;
pub mod lookups;
pub mod meta;
pub mod models;
pub mod options;
pub mod registrations;
pub mod site;

pub use changelist::{
    filter_choices, ChangeList, ChangeListPage, ChangeListParams, ChangeListRow, FilterChoice,
};
pub use error::AdminError;
pub use lookups::{FieldPath, ResolvedPath};
pub use meta::{FieldDefault, FieldKind, FieldMeta, ModelMeta};
pub use options::{ModelAdmin, ModelAdminBuilder, DEFAULT_LIST_PER_PAGE};
pub use registrations::{building_admin, default_site, playground_admin, project_admin};
pub use site::AdminSite;
