use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the I/O boundary (config loading, CSV input, output files).
///
/// The geometry and color functions themselves never fail; they return empty or
/// degenerate results instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color {0:?}, expected #RRGGBB or #RGB")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("input needs at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
}
