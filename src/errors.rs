//! Errors for vessel tracker
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid custom field: {0}")]
    InvalidCustomField(#[from] ValidationError),

    #[error("Custom field {0} not found")]
    CustomFieldNotFound(i64),

    #[error("Database migration error")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),
}

/// Why a table row could not be mapped back to a vessel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Vessel name is empty")]
    EmptyName,

    #[error("Vessel data not found for: {0}")]
    NotFound(String),
}

/// A single required attribute that was missing from a custom field document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("`header` is required")]
    MissingHeader,

    #[error("`headertype` is required")]
    MissingHeaderType,

    #[error("`customData.{index}.imoNumber` is required")]
    MissingImoNumber { index: usize },

    #[error("`customData.{index}.data` is required")]
    MissingData { index: usize },
}

/// Every constraint a custom field document violates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
