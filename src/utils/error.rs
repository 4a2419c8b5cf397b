use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Dataset request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No data in response from {url}")]
    EmptyPayload { url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Record {index} cannot be plotted: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Cannot build scales from an empty dataset")]
    EmptyDataset,

    #[error("No marker at index {index} (plot has {count} markers)")]
    UnknownMarker { index: usize, count: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlotError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlotError::Transport(_) | PlotError::EmptyPayload { .. } => ErrorSeverity::Medium,
            PlotError::Serialization(_)
            | PlotError::Csv(_)
            | PlotError::InvalidRecord { .. }
            | PlotError::EmptyDataset
            | PlotError::UnknownMarker { .. } => ErrorSeverity::High,
            PlotError::Config { .. } | PlotError::InvalidConfigValue { .. } => ErrorSeverity::High,
            PlotError::Io(_) | PlotError::Zip(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlotError::Transport(_) => "Check network connectivity and the --data-url value",
            PlotError::EmptyPayload { .. } => "Verify the dataset URL returns a non-empty JSON array",
            PlotError::Serialization(_) => {
                "The dataset must be a JSON array of {Year, Seconds, Name, ...} records"
            }
            PlotError::InvalidRecord { .. } => "Fix the offending record's Year or Seconds value",
            PlotError::EmptyDataset => "Provide at least one record to plot",
            PlotError::UnknownMarker { .. } => "Use a marker index within the rendered dataset",
            PlotError::Config { .. } | PlotError::InvalidConfigValue { .. } => {
                "Review the CLI flags or the TOML configuration file"
            }
            PlotError::Io(_) | PlotError::Zip(_) | PlotError::Csv(_) => {
                "Check that the output path exists and is writable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlotError::Transport(_) | PlotError::EmptyPayload { .. } => {
                format!("Could not load the dataset, nothing was rendered ({})", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
