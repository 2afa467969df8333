// Engine settings, loaded from an optional JSON file and the environment
use crate::error::EngineError;
use serde::Deserialize;
use shared::models::{SortDirection, SortKey};
use std::path::Path;

/// Environment variable that overrides the report source.
pub const SOURCE_ENV: &str = "REPORT_SOURCE";

pub const DEFAULT_SOURCE: &str =
    "https://docs.google.com/spreadsheets/d/1Qcvxk7tC9k7l3kjUlw5AgzuVb8aprbJvzrsGEvG4CMA/export?format=csv&gid=305762792";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// URL (http/https) or local path of the report CSV.
    pub source: String,
    /// Column name as in the report header, e.g. "nte" or "saldoDisponivel".
    pub default_sort_key: Option<String>,
    /// "asc" or "desc".
    pub default_sort_direction: String,
    pub user_agent: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            source: DEFAULT_SOURCE.to_string(),
            default_sort_key: Some("nte".to_string()),
            default_sort_direction: "asc".to_string(),
            user_agent: format!("school-balances-engine/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EngineSettings {
    /// Reads settings from `path` when given, then applies `REPORT_SOURCE`.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Ok(source) = std::env::var(SOURCE_ENV) {
            if !source.trim().is_empty() {
                settings.source = source.trim().to_string();
            }
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e)))?;
        Self::from_json(&content)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings in '{}': {}", path.display(), e)))
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Default sort key; an unknown name leaves results unsorted.
    pub fn sort_key(&self) -> Option<SortKey> {
        let name = self.default_sort_key.as_deref()?;
        match name.parse() {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring configured default sort key");
                None
            }
        }
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.default_sort_direction.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring configured default sort direction");
            SortDirection::Ascending
        })
    }
}
