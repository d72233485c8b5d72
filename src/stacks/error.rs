use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, tabulating or plotting stack logs
#[derive(Debug, Error)]
pub enum StackPlotError {
    /// Filesystem error on the input log or the output image
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field that is not a base-10 integer (line and field are 1-based)
    #[error("Line {line}, field {field}: '{token}' is not an integer ({source})")]
    Parse {
        line: usize,
        field: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A round whose hand count differs from the first round
    #[error("Round {round} has {found} hands, expected {expected}")]
    JaggedRows {
        round: u32,
        expected: usize,
        found: usize,
    },

    /// Polars rejected the table
    #[error("Table error: {0}")]
    Table(#[from] polars::error::PolarsError),

    /// The plotting backend failed to draw or encode the chart
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration error (unreadable override file, malformed JSON, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StackPlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StackPlotError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for Results using StackPlotError
pub type Result<T> = std::result::Result<T, StackPlotError>;
