//! Error types for word bank records and the card store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing a single `=`-delimited record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected at least 2 '=' separated fields, found {found}")]
    TooFewFields { found: usize },
}

/// Errors raised while loading or saving the card store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed record at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
