//! Table view over formatted vessel rows
//!
//! Rendering is left to the caller; this module decides what the table
//! shows: columns, cell text, highlight colors, pages and the row action.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::SelectionError;
use crate::formatter::{select_row, NOT_AVAILABLE};
use crate::models::{Named, VesselRow};

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const EMPTY_MESSAGE: &str = "No vessels data to display";

/// Row fields that can be shown as a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    CaseId,
    Imo,
    AisName,
    Eta,
    Destination,
    GeofenceType,
    GeofenceStatus,
}

impl RowField {
    /// Serialized key of the field in [`VesselRow`]
    pub fn key(&self) -> &'static str {
        match self {
            RowField::CaseId => "CaseId",
            RowField::Imo => "IMO",
            RowField::AisName => "AISName",
            RowField::Eta => "ETA",
            RowField::Destination => "Destination",
            RowField::GeofenceType => "GeofenceType",
            RowField::GeofenceStatus => "GeofenceStatus",
        }
    }

    fn value<'a>(&self, row: &'a VesselRow) -> &'a str {
        match self {
            RowField::CaseId => &row.case_id,
            RowField::Imo => &row.imo,
            RowField::AisName => &row.ais_name,
            RowField::Eta => &row.eta,
            RowField::Destination => &row.destination,
            RowField::GeofenceType => &row.geofence_type,
            RowField::GeofenceStatus => &row.geofence_status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub field: RowField,
}

pub const COLUMNS: [Column; 7] = [
    Column { header: "Case Id", field: RowField::CaseId },
    Column { header: "IMO Number", field: RowField::Imo },
    Column { header: "Vessel Name", field: RowField::AisName },
    Column { header: "ETA", field: RowField::Eta },
    Column { header: "Destination", field: RowField::Destination },
    Column { header: "Region Name", field: RowField::GeofenceType },
    Column { header: "Location", field: RowField::GeofenceStatus },
];

/// Actions offered in the per-row menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ViewVesselDetails,
}

impl RowAction {
    pub const ALL: [RowAction; 1] = [RowAction::ViewVesselDetails];

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::ViewVesselDetails => "View Vessel Details",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Red,
    Blue,
    Green,
}

/// Text for one cell
///
/// ETA is shown as `DD Mon YYYY HH:MM UTC` when it parses as a timestamp.
pub fn render_cell(row: &VesselRow, field: RowField) -> Cow<'_, str> {
    let value = field.value(row);
    match field {
        RowField::Eta => format_eta(value),
        _ => Cow::Borrowed(value),
    }
}

fn format_eta(raw: &str) -> Cow<'_, str> {
    if raw.is_empty() {
        return Cow::Borrowed(NOT_AVAILABLE);
    }
    match parse_timestamp(raw) {
        Some(eta) => Cow::Owned(eta.format("%d %b %Y %H:%M UTC").to_string()),
        None => Cow::Borrowed(raw),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Color of a row by geofence type
pub fn highlight(row: &VesselRow) -> Option<Highlight> {
    match row.geofence_type.as_str() {
        "Berth" => Some(Highlight::Red),
        "Terminal" => Some(Highlight::Blue),
        "Anchorage" => Some(Highlight::Green),
        _ => None,
    }
}

/// Paged view of vessel rows
#[derive(Debug, Clone)]
pub struct VesselTable {
    rows: Vec<VesselRow>,
    page_size: usize,
}

impl VesselTable {
    pub fn new(rows: Vec<VesselRow>) -> Self {
        Self {
            rows,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set rows per page; values below one are treated as one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn rows(&self) -> &[VesselRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Message to show instead of the grid, if any
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// Rows on a zero-based page; empty past the last page
    pub fn page(&self, index: usize) -> &[VesselRow] {
        let start = index.saturating_mul(self.page_size).min(self.rows.len());
        let end = start.saturating_add(self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Run a row action, handing the matching vessel to `on_select`
    ///
    /// The callback is not called when the row cannot be matched; the miss is
    /// returned instead.
    pub fn invoke<'a, V, F>(
        &self,
        action: RowAction,
        row: &VesselRow,
        vessels: &'a [V],
        on_select: F,
    ) -> Result<(), SelectionError>
    where
        V: Named,
        F: FnOnce(&'a V),
    {
        match action {
            RowAction::ViewVesselDetails => {
                let vessel = select_row(row, vessels)?;
                on_select(vessel);
                Ok(())
            }
        }
    }
}
