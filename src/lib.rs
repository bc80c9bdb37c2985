//! Extract a structured schema from annotated configuration headers.
//!
//! Each `#define` in the configuration files becomes a [`model::Define`]
//! carrying its current value and inferred type, whether it is enabled, the
//! preprocessor conditions guarding it, and the documentation written around
//! it. Records are collected into a [`model::Schema`] indexed by file key,
//! `@section` label and option name.
//!
//! ```no_run
//! let mut schema = cfgschema::extract("Marlin")?;
//! cfgschema::group_options(&mut schema);
//! # Ok::<(), cfgschema::Error>(())
//! ```

pub mod boards;
pub mod error;
pub mod group;
pub mod model;
pub mod parser;
pub mod render;
pub mod schema;

pub use boards::load_boards;
pub use error::{Error, Result};
pub use group::group_options;
pub use model::{Define, Entry, Group, Options, Schema, Value, ValueType};
pub use parser::Extractor;

use std::fs;
use std::path::Path;
use tracing::info;

/// The configuration files and their shorthand keys, in output order.
pub const CONFIG_FILES: &[(&str, &str)] = &[
    ("Configuration.h", "basic"),
    ("Configuration_adv.h", "advanced"),
];

/// Extract the schema of the standard configuration files under `root`.
pub fn extract(root: impl AsRef<Path>) -> Result<Schema> {
    let root = root.as_ref();
    let boards = load_boards(&root.join(boards::BOARDS_FILE))?;
    extract_files(root, CONFIG_FILES, boards)
}

/// Extract the schema of `files` (`(file name, key)` pairs) under `root`.
///
/// Any unreadable file or unbalanced conditional aborts the whole extraction.
pub fn extract_files(root: &Path, files: &[(&str, &str)], boards: Vec<String>) -> Result<Schema> {
    let mut extractor = Extractor::new(files.iter().map(|(_, key)| *key), boards);

    for (name, key) in files {
        let path = root.join(name);
        let content = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        info!(file = %path.display(), key, "parsing");
        extractor.parse(key, &content)?;
    }

    Ok(extractor.finish())
}
