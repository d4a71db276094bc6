//! Changelist: the paged, searchable, filterable list view of one model
//!
//! Compiles a [`ModelAdmin`] declaration plus the caller's search term and
//! filter selections into a page query and a count query.
//!
//! - every whitespace-separated search word must match at least one search
//!   field (`ILIKE '%word%'`)
//! - foreign-key lookups join the related table, many-to-many lookups use
//!   `EXISTS` over the link table
//! - rows are ordered by primary key, newest first

use serde::Serialize;
use serde_json::{Map, Value};
use siteplan_common::Pagination;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::AdminError;
use crate::lookups::ResolvedPath;
use crate::meta::{FieldKind, FieldMeta, ModelMeta};
use crate::models;
use crate::options::ModelAdmin;

/// Caller-supplied changelist state
#[derive(Debug, Clone, Default)]
pub struct ChangeListParams {
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub pagination: Pagination,
}

impl ChangeListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn page(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FilterValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl FilterValue {
    fn parse(field: &FieldMeta, raw: &str) -> Result<Self, AdminError> {
        let invalid = || AdminError::InvalidFilterValue {
            field: field.name.to_string(),
            value: raw.to_string(),
        };

        match field.kind {
            FieldKind::Integer | FieldKind::ForeignKey { .. } | FieldKind::ManyToMany { .. } => {
                raw.trim().parse().map(FilterValue::Integer).map_err(|_| invalid())
            }
            FieldKind::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(FilterValue::Float)
                .ok_or_else(invalid),
            FieldKind::Boolean => match raw.trim() {
                "1" | "true" | "True" => Ok(FilterValue::Boolean(true)),
                "0" | "false" | "False" => Ok(FilterValue::Boolean(false)),
                _ => Err(invalid()),
            },
            FieldKind::Text => Ok(FilterValue::Text(raw.to_string())),
            FieldKind::Json => Err(invalid()),
        }
    }

    fn push_bind(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            FilterValue::Integer(n) => qb.push_bind(*n),
            FilterValue::Float(f) => qb.push_bind(*f),
            FilterValue::Boolean(b) => qb.push_bind(*b),
            FilterValue::Text(s) => qb.push_bind(s.clone()),
        };
    }
}

#[derive(Debug, Clone)]
struct AppliedFilter {
    field: &'static FieldMeta,
    value: FilterValue,
}

/// `LEFT JOIN {table} AS {alias} ON {alias}.{pk} = t.{column}`
#[derive(Debug, Clone, PartialEq)]
struct Join {
    alias: String,
    table: &'static str,
    pk: &'static str,
    column: &'static str,
}

fn join_alias(via: &FieldMeta) -> String {
    format!("{}_rel", via.name)
}

fn related_model(field: &FieldMeta) -> Result<&'static ModelMeta, AdminError> {
    let name = field
        .kind
        .related_model()
        .ok_or_else(|| AdminError::unsupported(field.name, "not a relation"))?;
    models::model(name).ok_or_else(|| AdminError::NotRegistered(name.to_string()))
}

/// Escape LIKE wildcards and wrap the term for a substring match
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// A compiled changelist for one model
#[derive(Debug, Clone)]
pub struct ChangeList<'a> {
    admin: &'a ModelAdmin,
    columns: Vec<String>,
    joins: Vec<Join>,
    search_terms: Vec<String>,
    filters: Vec<AppliedFilter>,
    offset: i64,
    limit: i64,
}

impl<'a> ChangeList<'a> {
    pub fn new(admin: &'a ModelAdmin, params: &ChangeListParams) -> Result<Self, AdminError> {
        let model = admin.model();
        let mut joins: Vec<Join> = Vec::new();
        let mut add_join = |via: &'static FieldMeta, target: &'static ModelMeta| {
            let join = Join {
                alias: join_alias(via),
                table: target.table,
                pk: target.pk,
                column: via.column,
            };
            if !joins.contains(&join) {
                joins.push(join);
            }
        };

        let mut columns = Vec::with_capacity(admin.list_display().len());
        for &field in admin.list_display() {
            match field.kind {
                FieldKind::ForeignKey { .. } => {
                    let target = related_model(field)?;
                    add_join(field, target);
                    columns.push(format!("{}.{}", join_alias(field), target.display_column));
                }
                _ => columns.push(format!("t.{}", field.column)),
            }
        }

        for path in admin.search_fields() {
            if let ResolvedPath::Related { via, target, .. } = *path {
                if matches!(via.kind, FieldKind::ForeignKey { .. }) {
                    add_join(via, target);
                }
            }
        }

        let search_terms = if admin.is_searchable() {
            params
                .search
                .as_deref()
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let mut filters: Vec<AppliedFilter> = Vec::with_capacity(params.filters.len());
        for (name, raw) in &params.filters {
            let field = admin
                .filter(name)
                .ok_or_else(|| AdminError::FilterNotAllowed {
                    model: model.name.to_string(),
                    field: name.clone(),
                })?;
            let applied = AppliedFilter {
                field,
                value: FilterValue::parse(field, raw)?,
            };

            // A repeated filter replaces the earlier selection
            match filters.iter_mut().find(|f| f.field.name == field.name) {
                Some(existing) => *existing = applied,
                None => filters.push(applied),
            }
        }

        Ok(Self {
            admin,
            columns,
            joins,
            search_terms,
            filters,
            offset: params.pagination.offset(),
            limit: params.pagination.limit_or(admin.list_per_page()),
        })
    }

    fn model(&self) -> &'static ModelMeta {
        self.admin.model()
    }

    /// Column names in display order
    pub fn columns(&self) -> Vec<&'static str> {
        self.admin.list_display().iter().map(|f| f.name).collect()
    }

    /// Column headers in display order
    pub fn headers(&self) -> Vec<&'static str> {
        self.admin.list_display().iter().map(|f| f.label).collect()
    }

    fn from_clause(&self) -> String {
        let mut from = format!("{} AS t", self.model().table);
        for join in &self.joins {
            from.push_str(&format!(
                " LEFT JOIN {table} AS {alias} ON {alias}.{pk} = t.{column}",
                table = join.table,
                alias = join.alias,
                pk = join.pk,
                column = join.column,
            ));
        }
        from
    }

    fn push_filter(&self, qb: &mut QueryBuilder<'_, Postgres>, filter: &AppliedFilter) {
        let model = self.model();
        match filter.field.kind {
            FieldKind::ManyToMany {
                through,
                source_column,
                target_column,
                ..
            } => {
                qb.push(format!(
                    "EXISTS (SELECT 1 FROM {through} AS m WHERE m.{source_column} = t.{pk} AND m.{target_column} = ",
                    pk = model.pk,
                ));
                filter.value.push_bind(qb);
                qb.push(")");
            }
            _ => {
                qb.push(format!("t.{} = ", filter.field.column));
                filter.value.push_bind(qb);
            }
        }
    }

    fn push_search_predicate(
        &self,
        qb: &mut QueryBuilder<'_, Postgres>,
        path: &ResolvedPath,
        pattern: &str,
    ) {
        let model = self.model();
        match path {
            ResolvedPath::Local { field, .. } => {
                qb.push(format!("t.{}::text ILIKE ", field.column));
                qb.push_bind(pattern.to_string());
            }
            ResolvedPath::Related {
                via, target, field, ..
            } => match via.kind {
                FieldKind::ManyToMany {
                    through,
                    source_column,
                    target_column,
                    ..
                } => {
                    qb.push(format!(
                        "EXISTS (SELECT 1 FROM {through} AS m JOIN {table} AS r ON r.{target_pk} = m.{target_column} WHERE m.{source_column} = t.{pk} AND r.{column}::text ILIKE ",
                        table = target.table,
                        target_pk = target.pk,
                        pk = model.pk,
                        column = field.column,
                    ));
                    qb.push_bind(pattern.to_string());
                    qb.push(")");
                }
                _ => {
                    qb.push(format!("{}.{}::text ILIKE ", join_alias(via), field.column));
                    qb.push_bind(pattern.to_string());
                }
            },
        }
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut first = true;
        let mut next_clause = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(if first { " WHERE " } else { " AND " });
            first = false;
        };

        for filter in &self.filters {
            next_clause(qb);
            self.push_filter(qb, filter);
        }

        for term in &self.search_terms {
            let pattern = like_pattern(term);
            next_clause(qb);
            qb.push("(");
            for (i, path) in self.admin.search_fields().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                self.push_search_predicate(qb, path, &pattern);
            }
            qb.push(")");
        }
    }

    /// Query returning `(pk, cells)` for the current page
    pub fn page_query(&self) -> QueryBuilder<'static, Postgres> {
        let pk = self.model().pk;
        let mut qb = QueryBuilder::new(format!(
            "SELECT t.{pk} AS pk, jsonb_build_array({columns}) AS cells FROM {from}",
            columns = self.columns.join(", "),
            from = self.from_clause(),
        ));
        self.push_conditions(&mut qb);
        qb.push(format!(" ORDER BY t.{pk} DESC LIMIT "));
        qb.push_bind(self.limit);
        qb.push(" OFFSET ");
        qb.push_bind(self.offset);
        qb
    }

    /// Query returning the number of matching rows across all pages
    pub fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", self.from_clause()));
        self.push_conditions(&mut qb);
        qb
    }

    /// Run the page and count queries
    pub async fn fetch(&self, pool: &PgPool) -> Result<ChangeListPage, AdminError> {
        let mut page_query = self.page_query();
        tracing::debug!(
            model = self.model().name,
            sql = %page_query.sql(),
            "Compiled changelist query"
        );

        let rows = page_query
            .build_query_as::<(i64, Value)>()
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|(pk, cells)| ChangeListRow {
                pk,
                cells: match cells {
                    Value::Array(cells) => cells,
                    other => vec![other],
                },
            })
            .collect();

        let mut count_query = self.count_query();
        let result_count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;

        Ok(ChangeListPage {
            columns: self.columns(),
            headers: self.headers(),
            rows,
            result_count,
            offset: self.offset,
            limit: self.limit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeListRow {
    pub pk: i64,
    pub cells: Vec<Value>,
}

/// One page of a changelist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeListPage {
    pub columns: Vec<&'static str>,
    pub headers: Vec<&'static str>,
    pub rows: Vec<ChangeListRow>,
    pub result_count: i64,
    pub offset: i64,
    pub limit: i64,
}

impl ChangeListPage {
    /// Cell of `row` in the named column
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row)?.cells.get(index)
    }

    pub fn pks(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.pk).collect()
    }

    /// Rows as objects keyed by column name
    pub fn to_objects(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row.cells.iter())
                    .map(|(c, v)| (c.to_string(), v.clone()))
                    .collect()
            })
            .collect()
    }
}

/// One selectable value of a list filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChoice {
    pub value: Value,
    pub label: String,
}

/// Values offered for a declared list filter.
///
/// Scalar fields offer their distinct stored values in ascending order;
/// relations offer every related record, ordered by its display column.
pub async fn filter_choices(
    admin: &ModelAdmin,
    field_name: &str,
    pool: &PgPool,
) -> Result<Vec<FilterChoice>, AdminError> {
    let model = admin.model();
    let field = admin
        .filter(field_name)
        .ok_or_else(|| AdminError::FilterNotAllowed {
            model: model.name.to_string(),
            field: field_name.to_string(),
        })?;

    let sql = if field.kind.is_relation() {
        let target = related_model(field)?;
        format!(
            "SELECT to_jsonb(r.{pk}) AS value, r.{display}::text AS label FROM {table} AS r ORDER BY label, r.{pk}",
            pk = target.pk,
            display = target.display_column,
            table = target.table,
        )
    } else {
        format!(
            "SELECT DISTINCT to_jsonb(t.{column}) AS value, t.{column}::text AS label FROM {table} AS t WHERE t.{column} IS NOT NULL ORDER BY value",
            column = field.column,
            table = model.table,
        )
    };

    let choices = sqlx::query_as::<_, (Value, String)>(&sql)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(value, label)| FilterChoice { value, label })
        .collect();

    Ok(choices)
}
