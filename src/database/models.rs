// src/database/models.rs
use chrono::{DateTime, Utc};
use sqlx::types::Json;

use crate::models::{CustomDataEntry, CustomField};

pub(crate) const CUSTOM_FIELD_COLUMNS: &str =
    "id, header, headertype, custom_data, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CustomFieldRow {
    id: i64,
    header: String,
    headertype: String,
    custom_data: Json<Vec<CustomDataEntry>>, // Ordered JSONB array
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomFieldRow> for CustomField {
    fn from(row: CustomFieldRow) -> Self {
        CustomField {
            id: row.id,
            header: row.header,
            header_type: row.headertype,
            custom_data: row.custom_data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
