// ⚠️ Error Taxonomy - every input failure is fatal and bubbles up to main

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// Input file does not exist
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Non-numeric (or out of range) value where an integer is expected
    #[error("{}:{}: column '{}' expects an integer, got '{}'", path.display(), line, column, value)]
    MalformedInteger {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    /// Required header is absent from the CSV
    #[error("{}: missing required column '{}'", path.display(), column)]
    MissingColumn { path: PathBuf, column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ranking JSON could not be parsed
    #[error("invalid ranking config: {0}")]
    RankingConfig(#[from] serde_json::Error),

    /// Ranking config parsed but breaks a table invariant
    #[error("invalid ranking table: {0}")]
    InvalidRanking(String),
}

impl PlannerError {
    /// Map a failed open: NotFound becomes MissingFile, anything else stays I/O
    pub fn from_open(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => PlannerError::MissingFile {
                path: path.to_path_buf(),
            },
            _ => PlannerError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
