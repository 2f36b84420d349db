//! Error types for the output crate.

use std::path::PathBuf;

use ocm_pager::PagerError;
use thiserror::Error;

/// Errors raised while building printers and tables, or writing to them.
#[derive(Debug, Error)]
pub enum OutputError {
    /// No writer was given to the printer or table.
    #[error("output writer is mandatory")]
    MissingWriter,

    /// No table name was given.
    #[error("table name is mandatory")]
    MissingName,

    /// The column specs didn't name any column.
    #[error("table '{0}' has no columns")]
    NoColumns(String),

    /// The bundled description of a table can't be parsed.
    #[error("can't parse description of table '{table}': {source}")]
    InvalidDescription {
        table: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A row was written with a different number of values than columns.
    #[error("table has {columns} columns but row has {values} values")]
    ColumnCountMismatch { columns: usize, values: usize },

    /// The pager was found but couldn't be started.
    #[error(transparent)]
    Pager(#[from] PagerError),

    /// Writing to the destination failed.
    #[error("can't write output: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file exists but can't be read.
    #[error("can't read configuration file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file isn't valid JSON.
    #[error("can't parse configuration file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_names_both_counts() {
        let err = OutputError::ColumnCountMismatch {
            columns: 3,
            values: 2,
        };
        let text = err.to_string();
        assert!(text.contains('3'));
        assert!(text.contains('2'));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: OutputError = io_err.into();
        assert!(matches!(err, OutputError::Io(_)));
    }
}
