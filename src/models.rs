//! Data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ValidationError, Violation};
use serde_helpers::*;

/// AIS identification block of a tracked vessel
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct AisData {
    /// International Maritime Organization (IMO) number, string or number upstream
    #[serde(rename = "IMO", default, deserialize_with = "deserialize_text")]
    pub imo: Option<String>,
    #[serde(rename = "NAME", default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    /// Estimated time of arrival, as sent by the tracking service
    #[serde(rename = "ETA", default, deserialize_with = "deserialize_text")]
    pub eta: Option<String>,
    #[serde(rename = "DESTINATION", default, deserialize_with = "deserialize_text")]
    pub destination: Option<String>,
}

/// Vessel record returned by `GET /api/get-tracked-vessels`
///
/// Every attribute is optional. Values that the service uses to mean
/// "nothing here" (`null`, `""`, `0`) are read as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct TrackedVessel {
    #[serde(rename = "AIS", default, deserialize_with = "deserialize_ais")]
    pub ais: Option<AisData>,
    #[serde(rename = "GeofenceStatus", default, deserialize_with = "deserialize_text")]
    pub geofence_status: Option<String>,
    /// Geofence category, e.g. Berth, Terminal or Anchorage
    #[serde(rename = "GeofenceType", default, deserialize_with = "deserialize_text")]
    pub geofence_type: Option<String>,
    #[serde(rename = "CaseId", default, deserialize_with = "deserialize_text")]
    pub case_id: Option<String>,
    #[serde(rename = "Info1", default, deserialize_with = "deserialize_text")]
    pub info1: Option<String>,
    #[serde(rename = "ETATime", default, deserialize_with = "deserialize_text")]
    pub eta_time: Option<String>,
    #[serde(rename = "ETADate", default, deserialize_with = "deserialize_text")]
    pub eta_date: Option<String>,
    #[serde(rename = "Agent", default, deserialize_with = "deserialize_text")]
    pub agent: Option<String>,
    #[serde(rename = "AgentName", default, deserialize_with = "deserialize_text")]
    pub agent_name: Option<String>,
}

/// Display row derived from a [`TrackedVessel`]
///
/// All values are display-ready; missing inputs carry a sentinel instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselRow {
    #[serde(rename = "IMO")]
    pub imo: String,
    #[serde(rename = "AISName")]
    pub ais_name: String,
    #[serde(rename = "GeofenceStatus")]
    pub geofence_status: String,
    #[serde(rename = "ETA")]
    pub eta: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "GeofenceType")]
    pub geofence_type: String,
    #[serde(rename = "CaseId")]
    pub case_id: String,
    #[serde(rename = "Info1")]
    pub info1: String,
    #[serde(rename = "ETATime")]
    pub eta_time: String,
    #[serde(rename = "ETADate")]
    pub eta_date: String,
    #[serde(rename = "Agent")]
    pub agent: String,
    #[serde(rename = "AgentName")]
    pub agent_name: String,
}

/// Anything a table row can be matched against by name
pub trait Named {
    fn name(&self) -> &str;
}

/// Full vessel object supplied by the caller of the vessel table
///
/// Only `name` is interpreted; all other attributes pass through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Vessel {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Vessel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
        }
    }
}

impl Named for Vessel {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One `(IMO, value)` pair of a custom field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDataEntry {
    pub imo_number: String,
    pub data: String,
}

impl CustomDataEntry {
    pub fn new(imo_number: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            imo_number: imo_number.into(),
            data: data.into(),
        }
    }
}

/// Custom field document as submitted by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomField {
    pub header: String,
    #[serde(rename = "headertype")]
    pub header_type: String,
    #[serde(default)]
    pub custom_data: Vec<CustomDataEntry>,
}

impl NewCustomField {
    /// Check every required attribute, reporting all violations at once
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.header.is_empty() {
            violations.push(Violation::MissingHeader);
        }
        if self.header_type.is_empty() {
            violations.push(Violation::MissingHeaderType);
        }
        for (index, entry) in self.custom_data.iter().enumerate() {
            if entry.imo_number.is_empty() {
                violations.push(Violation::MissingImoNumber { index });
            }
            if entry.data.is_empty() {
                violations.push(Violation::MissingData { index });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// Stored custom field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub id: i64,
    pub header: String,
    #[serde(rename = "headertype")]
    pub header_type: String,
    pub custom_data: Vec<CustomDataEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomField {
    /// Writable part of the stored document
    pub fn document(&self) -> NewCustomField {
        NewCustomField {
            header: self.header.clone(),
            header_type: self.header_type.clone(),
            custom_data: self.custom_data.clone(),
        }
    }
}

/// Partial change to a stored custom field; `None` leaves a field as it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldUpdate {
    pub header: Option<String>,
    #[serde(rename = "headertype")]
    pub header_type: Option<String>,
    pub custom_data: Option<Vec<CustomDataEntry>>,
}

impl CustomFieldUpdate {
    /// Apply the change, returning whether anything differs afterwards
    pub fn apply(self, document: &mut NewCustomField) -> bool {
        let before = document.clone();
        if let Some(header) = self.header {
            document.header = header;
        }
        if let Some(header_type) = self.header_type {
            document.header_type = header_type;
        }
        if let Some(custom_data) = self.custom_data {
            document.custom_data = custom_data;
        }
        *document != before
    }
}

/// Custom deserializers
mod serde_helpers {
    use super::AisData;
    use serde::{de::Error, Deserialize, Deserializer};
    use serde_json::Value;

    /// Read the AIS block; anything other than an object becomes `None`
    pub fn deserialize_ais<'de, D>(deserializer: D) -> Result<Option<AisData>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            Some(value @ Value::Object(_)) => AisData::deserialize(value)
                .map(Some)
                .map_err(D::Error::custom),
            _ => Ok(None),
        }
    }

    /// Read a loosely typed scalar as text
    ///
    /// `null`, `""`, `0` and `false` become `None`.
    pub fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => Some(other.to_string()),
        })
    }
}
