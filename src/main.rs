//! Vessel tracker utility

use tracing::info;

use vessel_tracker::{
    client::{TrackedVesselList, TrackedVesselsClient},
    config::AppConfig,
    database::CustomFieldStore,
    errors::TrackerError,
    table::{highlight, render_cell, VesselTable, COLUMNS},
};

#[tokio::main]
async fn main() -> Result<(), TrackerError> {
    #[cfg(feature = "dotenvy")]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration, preferring environment variables and config files
    let config = AppConfig::load()?;

    if let Some(database) = &config.database {
        let _store = CustomFieldStore::connect(database).await?;
        info!("Custom field store migrated");
    }

    let client = TrackedVesselsClient::new(&config.api)?;
    let mut list = TrackedVesselList::new(client);
    list.mount().await;

    let table = VesselTable::new(list.into_rows());
    if let Some(message) = table.empty_message() {
        info!("{}", message);
        return Ok(());
    }

    let headers: Vec<&str> = COLUMNS.iter().map(|c| c.header).collect();
    info!("{}", headers.join(" | "));
    for page in 0..table.page_count() {
        for row in table.page(page) {
            let cells: Vec<String> = COLUMNS
                .iter()
                .map(|c| render_cell(row, c.field).into_owned())
                .collect();
            info!(page, highlight = ?highlight(row), "{}", cells.join(" | "));
        }
    }

    Ok(())
}
