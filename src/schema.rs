//! Incremental schema construction during extraction.

use crate::model::{Define, Entry, FileSchema, Schema};
use indexmap::IndexMap;

/// Accumulates records into `schema[file][section][name]`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    files: IndexMap<String, FileSchema>,
}

impl SchemaBuilder {
    /// Seed the builder with every file key so files without definitions
    /// still show up, in the given order.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files = keys
            .into_iter()
            .map(|k| (k.into(), FileSchema::new()))
            .collect();
        Self { files }
    }

    /// Insert a record under its file, section and name.
    ///
    /// A name seen before in the same section never overwrites: the existing
    /// record becomes the first element of a sequence and later ones are
    /// appended in encounter order.
    pub fn insert(&mut self, file: &str, section: &str, name: &str, record: Define) {
        let sections = self.files.entry(file.to_string()).or_default();
        let options = sections.entry(section.to_string()).or_default();

        match options.get_mut(name) {
            None => {
                options.insert(name.to_string(), Entry::Define(record));
            }
            Some(Entry::Repeated(list)) => list.push(record),
            Some(slot) => {
                let first = std::mem::replace(slot, Entry::Repeated(Vec::new()));
                let mut list = match first {
                    Entry::Define(d) => vec![d],
                    // Group keys contain '*' and never collide with a define name
                    Entry::Group(_) | Entry::Repeated(_) => Vec::new(),
                };
                list.push(record);
                *slot = Entry::Repeated(list);
            }
        }
    }

    pub fn finish(self) -> Schema {
        Schema(self.files)
    }
}
