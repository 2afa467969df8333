// engine/src/services/report_service/mod.rs
// Holds the current dataset for a session and replaces it on every successful load.

use crate::config::EngineSettings;
use crate::data::Dataset;
use crate::error::EngineError;
use shared::models::Unit;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod load_report;

pub use load_report::ReportSource;

pub struct ReportService {
    dataset: Arc<RwLock<Arc<Dataset>>>,
    client: reqwest::Client,
}

impl ReportService {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().user_agent(settings.user_agent.clone()).build()?;
        Ok(ReportService {
            dataset: Arc::new(RwLock::new(Arc::new(Dataset::empty()))),
            client,
        })
    }

    /// Fetches and installs a fresh dataset. A refresh is the same call.
    pub async fn load(&self, source: &ReportSource) -> Result<Arc<Dataset>, EngineError> {
        tracing::info!(source = %source, "Loading report");
        load_report::handle_load_report(&self.client, source, self.dataset.clone()).await
    }

    /// The dataset as of now; later loads do not affect the returned snapshot.
    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.dataset.read().await.clone()
    }

    pub async fn detail(&self, sequence_index: usize) -> Option<Unit> {
        self.snapshot().await.get(sequence_index).cloned()
    }
}
