use std::path::PathBuf;

use crate::WIDTH;

/// Errors raised by the board, the search and the game record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid move, column {column} out of range. Columns must be between 0 and {max}", max = WIDTH - 1)]
    ColumnOutOfRange { column: usize },

    #[error("invalid move, column {column} full")]
    ColumnFull { column: usize },

    #[error("no valid moves remain in this position")]
    NoValidMoves,

    #[error("cannot undo column {column}, the latest move was {latest:?}")]
    UndoMismatch {
        column: usize,
        latest: Option<(usize, usize)>,
    },

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
