use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV writing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("HTTP error: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Report source '{url}' answered with status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Text shown to the user when a load or export fails.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::FetchStatus { .. } | EngineError::HttpError { .. } => {
                "Falha ao carregar dados. Verifique o link e o compartilhamento da planilha.".to_string()
            }
            EngineError::IoError { source } => format!("Falha ao ler o arquivo: {}", source),
            EngineError::ConfigError(msg) => format!("Configuração inválida: {}", msg),
            EngineError::CsvSystemError { source } => format!("Falha ao gerar CSV: {}", source),
            EngineError::ProcessingError(msg) => format!("Erro de processamento: {}", msg),
            EngineError::AnyhowError(source) => format!("Erro inesperado: {}", source),
        }
    }
}
