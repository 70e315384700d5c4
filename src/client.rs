//! Tracked-vessel service client

use reqwest::Client;
use tracing::{error, info};

use crate::{
    config::ApiConfig,
    errors::TrackerError,
    formatter::format_entries,
    models::{TrackedVessel, VesselRow},
};

pub const TRACKED_VESSELS_PATH: &str = "/api/get-tracked-vessels";

/// HTTP client for the tracking service
#[derive(Debug, Clone)]
pub struct TrackedVesselsClient {
    client: Client,
    base_url: String,
}

impl TrackedVesselsClient {
    /// Create a client from validated configuration
    pub fn new(config: &ApiConfig) -> Result<Self, TrackerError> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(&config.base_url, builder.build()?))
    }

    /// Use a preconfigured `reqwest` client
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn tracked_vessels_url(&self) -> String {
        format!("{}{}", self.base_url, TRACKED_VESSELS_PATH)
    }

    /// Fetch the current tracked-vessel list
    ///
    /// Non-2xx responses are errors.
    pub async fn fetch_tracked_vessels(&self) -> Result<Vec<TrackedVessel>, TrackerError> {
        let url = self.tracked_vessels_url();
        let vessels: Vec<TrackedVessel> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!("Fetched {} tracked vessels from {}", vessels.len(), url);
        Ok(vessels)
    }
}

/// Formatted tracked-vessel rows, loaded once per instance
#[derive(Debug)]
pub struct TrackedVesselList {
    client: TrackedVesselsClient,
    rows: Vec<VesselRow>,
    mounted: bool,
}

impl TrackedVesselList {
    pub fn new(client: TrackedVesselsClient) -> Self {
        Self {
            client,
            rows: Vec::new(),
            mounted: false,
        }
    }

    /// Fetch and format the vessel list on first call
    ///
    /// A failed fetch is logged and leaves the list empty. Later calls
    /// return the rows of the first one without fetching.
    pub async fn mount(&mut self) -> &[VesselRow] {
        if !self.mounted {
            self.mounted = true;
            match self.client.fetch_tracked_vessels().await {
                Ok(vessels) => self.rows = format_entries(&vessels),
                Err(e) => error!("Error fetching tracked vessels: {}", e),
            }
        }
        &self.rows
    }

    pub fn rows(&self) -> &[VesselRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<VesselRow> {
        self.rows
    }
}
