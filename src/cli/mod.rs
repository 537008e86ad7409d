pub mod detail;
pub mod overview;
pub mod setup;
pub mod ui;

use crate::core::{OlympicService, Snapshot};
use anyhow::{Result, anyhow};
use ui::LoadingIndicator;

const LOADING_MESSAGE: &str = "Loading Olympic data...";

/// Loads the dataset behind a spinner, printing the error state on failure.
async fn load_snapshot(service: &OlympicService) -> Result<Snapshot> {
    let indicator = LoadingIndicator::spawn(service.is_loading(), LOADING_MESSAGE);
    let result = service.load_initial_data().await;
    indicator.stop().await;

    result.map_err(|e| {
        eprintln!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
        anyhow!(e)
    })
}
