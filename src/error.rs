use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Config directory not found at {0}. Run 'statement init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Records file not found: {0}")]
    RecordsNotFound(PathBuf),

    #[error("Failed to parse records file {path}: {source}")]
    RecordsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {index}: invalid date '{value}'. Expected YYYY/MM/DD (e.g., '2024/05/10')")]
    InvalidDate { index: usize, value: String },

    #[error("Record {index}: invalid price '{value}'. Expected a number")]
    InvalidPrice { index: usize, value: String },

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("Print request was cancelled before it ran")]
    PrintCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatementError>;
