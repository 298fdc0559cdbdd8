use crate::models::FieldName;
use std::path::PathBuf;
use thiserror::Error;

/// Rejections from the quiz engine. The engine state is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("row {} / {field} is not a blank in this quiz", .row_index + 1)]
    InvalidCell { row_index: usize, field: FieldName },
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deck header is missing column '{0}'")]
    MissingColumn(FieldName),

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("deck contains no medications")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
