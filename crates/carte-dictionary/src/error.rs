use std::path::PathBuf;

use carte_core::VocabularyError;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Line {line} has no values")]
    EmptyRow { line: usize },

    #[error("Line {line}: column '{column}' must not be empty")]
    EmptyCell { line: usize, column: String },

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}
