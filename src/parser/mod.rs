//! Header parsing: logical lines in, schema records out.

pub mod comment;
pub mod conditions;
pub mod define;
pub mod lines;
mod machine;

use crate::error::Result;
use crate::model::Schema;
use crate::schema::SchemaBuilder;
use lines::LineAssembler;
use machine::{FileParser, State};
use tracing::debug;

/// Parses a sequence of configuration files into one schema.
///
/// Serial IDs are shared across every file given to the same extractor, so
/// they order all definitions globally.
pub struct Extractor {
    pub(crate) builder: SchemaBuilder,
    sid: u32,
    boards: Vec<String>,
}

impl Extractor {
    /// `keys` are the file shorthands, in output order. `boards` becomes the
    /// `options` of `MOTHERBOARD` when non-empty.
    pub fn new<I, S>(keys: I, boards: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            builder: SchemaBuilder::new(keys),
            sid: 0,
            boards,
        }
    }

    /// Parse one file's contents into the schema under `key`.
    pub fn parse(&mut self, key: &str, content: &str) -> Result<()> {
        let mut parser = FileParser::new(self, key);
        let mut state = State::Normal;

        for line in LineAssembler::new(content) {
            state = parser.step(state, &line)?;
        }

        parser.finish(state);
        debug!(file = key, last_sid = self.sid, "parsed");
        Ok(())
    }

    pub fn finish(self) -> Schema {
        self.builder.finish()
    }

    pub(crate) fn next_sid(&mut self) -> u32 {
        self.sid += 1;
        self.sid
    }

    pub(crate) fn boards(&self) -> &[String] {
        &self.boards
    }
}

/// Parse a single file's text under `key` with no board list.
pub fn parse_str(key: &str, content: &str) -> Result<Schema> {
    let mut extractor = Extractor::new([key], Vec::new());
    extractor.parse(key, content)?;
    Ok(extractor.finish())
}
