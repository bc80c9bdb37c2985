//! Board identifiers for the `MOTHERBOARD` option.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Board file location relative to the configuration root.
pub const BOARDS_FILE: &str = "src/core/boards.h";

const UNKNOWN_BOARD: &str = "BOARD_UNKNOWN";

/// Collect every `#define BOARD_*` name from `path`, in file order.
///
/// A missing file yields an empty list, which disables the override.
pub fn load_boards(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_boards(&content))
}

pub fn parse_boards(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| line.starts_with("#define BOARD_"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter(|name| *name != UNKNOWN_BOARD)
        .map(str::to_string)
        .collect()
}
