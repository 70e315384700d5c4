// src/database.rs
mod models;

use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use tracing::info;

use crate::{
    config::DatabaseConfig,
    errors::TrackerError,
    models::{CustomDataEntry, CustomField, CustomFieldUpdate, NewCustomField},
};
use self::models::{CustomFieldRow, CUSTOM_FIELD_COLUMNS};

/// Store for custom field documents
#[derive(Debug, Clone)]
pub struct CustomFieldStore {
    pool: PgPool,
}

impl CustomFieldStore {
    /// Wrap a pool, running pending migrations first
    pub async fn new(pool: PgPool) -> Result<Self, TrackerError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, TrackerError> {
        info!("Connecting to database");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| TrackerError::ConfigurationError {
                message: format!("Could not connect to database: {}", e),
            })?;
        Self::new(pool).await
    }

    /// Insert a new custom field
    ///
    /// Invalid documents are rejected before anything is written. Creation
    /// and modification time start out equal.
    pub async fn insert(&self, field: NewCustomField) -> Result<CustomField, TrackerError> {
        field.validate()?;

        let now = Utc::now();
        let row: CustomFieldRow = sqlx::query_as(&format!(
            "INSERT INTO custom_fields (header, headertype, custom_data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {CUSTOM_FIELD_COLUMNS}"
        ))
        .bind(&field.header)
        .bind(&field.header_type)
        .bind(Json(&field.custom_data))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let inserted = CustomField::from(row);
        info!("Inserted custom field {} ({})", inserted.id, inserted.header);
        Ok(inserted)
    }

    pub async fn get(&self, id: i64) -> Result<Option<CustomField>, TrackerError> {
        let row: Option<CustomFieldRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOM_FIELD_COLUMNS} FROM custom_fields WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomField::from))
    }

    /// Apply a partial update
    ///
    /// `updated_at` only moves when some field actually changes.
    pub async fn update(
        &self,
        id: i64,
        update: CustomFieldUpdate,
    ) -> Result<CustomField, TrackerError> {
        self.modify(id, |document| update.apply(document)).await
    }

    /// Append one entry to the custom data
    pub async fn add_entry(
        &self,
        id: i64,
        entry: CustomDataEntry,
    ) -> Result<CustomField, TrackerError> {
        self.modify(id, |document| {
            document.custom_data.push(entry);
            true
        })
        .await
    }

    /// Read-modify-write of one document under a row lock
    async fn modify<F>(&self, id: i64, change: F) -> Result<CustomField, TrackerError>
    where
        F: FnOnce(&mut NewCustomField) -> bool,
    {
        let mut tx = self.pool.begin().await?;

        let current: CustomField = sqlx::query_as::<_, CustomFieldRow>(&format!(
            "SELECT {CUSTOM_FIELD_COLUMNS} FROM custom_fields WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(TrackerError::CustomFieldNotFound(id))?
        .into();

        let mut document = current.document();
        if !change(&mut document) {
            tx.commit().await?;
            return Ok(current);
        }
        // Dropping the transaction on error rolls back
        document.validate()?;

        let row: CustomFieldRow = sqlx::query_as(&format!(
            "UPDATE custom_fields
            SET header = $2, headertype = $3, custom_data = $4, updated_at = $5
            WHERE id = $1
            RETURNING {CUSTOM_FIELD_COLUMNS}"
        ))
        .bind(id)
        .bind(&document.header)
        .bind(&document.header_type)
        .bind(Json(&document.custom_data))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Updated custom field {}", id);
        Ok(row.into())
    }
}
