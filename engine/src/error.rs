use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // A sheet could not be retrieved; aborts the whole view.
    #[error("Failed to fetch sheet '{sheet}': {status}")]
    SourceFetch { sheet: String, status: String },

    #[error("Timed out after {timeout_ms} ms fetching sheet '{sheet}'")]
    SourceTimeout { sheet: String, timeout_ms: u64 },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV export error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Sheet identifier for transport failures, if any.
    pub fn sheet(&self) -> Option<&str> {
        match self {
            EngineError::SourceFetch { sheet, .. } | EngineError::SourceTimeout { sheet, .. } => {
                Some(sheet)
            }
            _ => None,
        }
    }
}
