//! Row formatting, ordering and selection for the tracked-vessel table

use tracing::warn;

use crate::errors::SelectionError;
use crate::models::{Named, TrackedVessel, VesselRow};

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_VESSEL: &str = "Unknown Vessel";
pub const NO_VALUE: &str = "-";

/// Sort rank of a geofence type
///
/// - Berth = 1
/// - Terminal = 2
/// - Anchorage = 3
/// - "N/A" = 4
/// - anything else = 5
pub fn geofence_rank(geofence_type: &str) -> u8 {
    match geofence_type {
        "Berth" => 1,
        "Terminal" => 2,
        "Anchorage" => 3,
        NOT_AVAILABLE => 4,
        _ => 5,
    }
}

impl From<&TrackedVessel> for VesselRow {
    fn from(vessel: &TrackedVessel) -> Self {
        let ais = vessel.ais.as_ref();
        let or = |value: Option<&String>, sentinel: &str| -> String {
            value.cloned().unwrap_or_else(|| sentinel.to_string())
        };

        VesselRow {
            imo: or(ais.and_then(|a| a.imo.as_ref()), NOT_AVAILABLE),
            ais_name: or(ais.and_then(|a| a.name.as_ref()), UNKNOWN_VESSEL),
            geofence_status: or(vessel.geofence_status.as_ref(), NO_VALUE),
            eta: or(ais.and_then(|a| a.eta.as_ref()), NOT_AVAILABLE),
            destination: or(ais.and_then(|a| a.destination.as_ref()), NOT_AVAILABLE),
            geofence_type: or(vessel.geofence_type.as_ref(), NO_VALUE),
            case_id: or(vessel.case_id.as_ref(), NO_VALUE),
            info1: or(vessel.info1.as_ref(), NO_VALUE),
            eta_time: or(vessel.eta_time.as_ref(), NO_VALUE),
            eta_date: or(vessel.eta_date.as_ref(), NO_VALUE),
            agent: or(vessel.agent.as_ref(), NOT_AVAILABLE),
            agent_name: or(vessel.agent_name.as_ref(), NOT_AVAILABLE),
        }
    }
}

/// Build display rows, Berth first, then Terminal, Anchorage, "N/A" and the rest
///
/// Rows of equal rank keep their input order.
pub fn format_entries(vessels: &[TrackedVessel]) -> Vec<VesselRow> {
    let mut rows: Vec<VesselRow> = vessels.iter().map(VesselRow::from).collect();
    rows.sort_by_key(|row| geofence_rank(&row.geofence_type));
    rows
}

/// Find the vessel a table row refers to
///
/// Names are compared trimmed and case-sensitive; the first match wins.
pub fn select_row<'a, V: Named>(
    row: &VesselRow,
    vessels: &'a [V],
) -> Result<&'a V, SelectionError> {
    let name = row.ais_name.trim();
    if name.is_empty() {
        warn!("Vessel name is empty in row: {:?}", row);
        return Err(SelectionError::EmptyName);
    }

    vessels
        .iter()
        .find(|vessel| vessel.name().trim() == name)
        .ok_or_else(|| {
            warn!("Vessel data not found for: {}", name);
            SelectionError::NotFound(name.to_string())
        })
}
