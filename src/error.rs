use thiserror::Error;

/// Main error type for relchart
#[derive(Error, Debug)]
pub enum ChartError {
    /// A hero filter entry matched more than one hero
    #[error("Ambiguous hero filter '{entry}': matches {}", .candidates.join(", "))]
    FilterAmbiguity {
        entry: String,
        candidates: Vec<String>,
    },

    /// A filter entry matched nothing. Reported as a warning, never returned as `Err`.
    #[error("Filter entry '{entry}' matches nothing")]
    UnknownFilterTarget { entry: String },

    /// Malformed filter entry
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Internal invariant violation while assembling the graph model
    #[error("Inconsistent graph model: {0}")]
    InconsistentModel(String),

    /// Legacy export could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input file kind the loader does not handle
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// External renderer failure
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip archive errors
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Convenient Result type using ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
