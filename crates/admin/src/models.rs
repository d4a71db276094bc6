//! Metadata for every record type the admin knows about

use siteplan_projects::{DEFAULT_FLOORS, DEFAULT_FLOORS_HEIGHT, DEFAULT_PROJECT_NAME};

use crate::meta::{FieldDefault, FieldKind, FieldMeta, ModelMeta};

const COORDINATES_HELP: &str = "Координаты в формате [{x: 10, y: 10}]";
const ORIGIN_JSON: &str = r#"[{"x": 0, "y": 0}]"#;

const fn id_field() -> FieldMeta {
    FieldMeta {
        name: "id",
        column: "id",
        label: "ID",
        help_text: None,
        kind: FieldKind::Integer,
        default: None,
    }
}

const fn project_field() -> FieldMeta {
    FieldMeta {
        name: "project",
        column: "project_id",
        label: "Проект",
        help_text: None,
        kind: FieldKind::ForeignKey { model: "project" },
        default: None,
    }
}

const fn coordinates_field() -> FieldMeta {
    FieldMeta {
        name: "coordinates",
        column: "coordinates",
        label: "Координаты",
        help_text: Some(COORDINATES_HELP),
        kind: FieldKind::Json,
        default: Some(FieldDefault::Json(ORIGIN_JSON)),
    }
}

/// User accounts, owned by the external authentication subsystem
pub static USER: ModelMeta = ModelMeta {
    name: "user",
    table: "users",
    pk: "id",
    verbose_name: "Пользователь",
    verbose_name_plural: "Пользователи",
    display_column: "username",
    fields: &[
        id_field(),
        FieldMeta {
            name: "username",
            column: "username",
            label: "Имя пользователя",
            help_text: None,
            kind: FieldKind::Text,
            default: None,
        },
        FieldMeta {
            name: "is_active",
            column: "is_active",
            label: "Активен",
            help_text: None,
            kind: FieldKind::Boolean,
            default: None,
        },
        FieldMeta {
            name: "is_staff",
            column: "is_staff",
            label: "Статус персонала",
            help_text: None,
            kind: FieldKind::Boolean,
            default: None,
        },
    ],
};

pub static PROJECT: ModelMeta = ModelMeta {
    name: "project",
    table: "projects",
    pk: "id",
    verbose_name: "Проект",
    verbose_name_plural: "Проекты",
    display_column: "name",
    fields: &[
        id_field(),
        FieldMeta {
            name: "name",
            column: "name",
            label: "Название",
            help_text: None,
            kind: FieldKind::Text,
            default: Some(FieldDefault::Text(DEFAULT_PROJECT_NAME)),
        },
        FieldMeta {
            name: "user",
            column: "",
            label: "Пользователь",
            help_text: None,
            kind: FieldKind::ManyToMany {
                model: "user",
                through: "project_owners",
                source_column: "project_id",
                target_column: "user_id",
            },
            default: None,
        },
    ],
};

pub static PLAYGROUND: ModelMeta = ModelMeta {
    name: "playground",
    table: "playgrounds",
    pk: "id",
    verbose_name: "Площадка",
    verbose_name_plural: "Площадки",
    display_column: "id",
    fields: &[id_field(), project_field(), coordinates_field()],
};

pub static BUILDING: ModelMeta = ModelMeta {
    name: "building",
    table: "buildings",
    pk: "id",
    verbose_name: "Здание",
    verbose_name_plural: "Здания",
    display_column: "id",
    fields: &[
        id_field(),
        project_field(),
        coordinates_field(),
        FieldMeta {
            name: "floors",
            column: "floors",
            label: "Количество этажей",
            help_text: None,
            kind: FieldKind::Integer,
            default: Some(FieldDefault::Integer(DEFAULT_FLOORS as i64)),
        },
        FieldMeta {
            name: "floors_height",
            column: "floors_height",
            label: "Высота этажей",
            help_text: None,
            kind: FieldKind::Float,
            default: Some(FieldDefault::Float(DEFAULT_FLOORS_HEIGHT)),
        },
    ],
};

static ALL: [&ModelMeta; 4] = [&USER, &PROJECT, &PLAYGROUND, &BUILDING];

/// Look up model metadata by model name
pub fn model(name: &str) -> Option<&'static ModelMeta> {
    ALL.iter().copied().find(|m| m.name == name)
}
