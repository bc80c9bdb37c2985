//! Error types for schema extraction.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal extraction errors. Any of these aborts the whole run, so no
/// partial schema is ever returned.
#[derive(Debug, Error)]
pub enum Error {
    /// `#elif`, `#else` or `#endif` with no open `#if`.
    #[error("no #if block at line {line} in {file}")]
    Unbalanced { file: String, line: usize },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
