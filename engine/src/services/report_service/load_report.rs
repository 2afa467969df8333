// Fetches the report text and turns it into a dataset.
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::{parse_report, Dataset};
use crate::error::EngineError;

/// Where the report CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    Http(String),
    File(PathBuf),
}

impl ReportSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            ReportSource::Http(raw.to_string())
        } else {
            ReportSource::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for ReportSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportSource::Http(url) => write!(f, "{}", url),
            ReportSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub(super) async fn fetch_text(client: &reqwest::Client, source: &ReportSource) -> Result<String, EngineError> {
    match source {
        ReportSource::Http(url) => {
            let response = client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(EngineError::FetchStatus {
                    url: url.clone(),
                    status: response.status().as_u16(),
                });
            }
            Ok(response.text().await?)
        }
        ReportSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
    }
}

/// Loads `source` and swaps the resulting dataset in. On any error the
/// previously held dataset stays in place.
pub async fn handle_load_report(
    client: &reqwest::Client,
    source: &ReportSource,
    current: Arc<RwLock<Arc<Dataset>>>,
) -> Result<Arc<Dataset>, EngineError> {
    let text = match fetch_text(client, source).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(source = %source, error = %e, "Failed to fetch report");
            return Err(e);
        }
    };

    let dataset = Arc::new(parse_report(&source.to_string(), &text));
    *current.write().await = dataset.clone();

    tracing::info!(
        source = %source,
        load_id = %dataset.load_id(),
        units = dataset.len(),
        bytes = text.len(),
        "Report loaded"
    );
    Ok(dataset)
}
