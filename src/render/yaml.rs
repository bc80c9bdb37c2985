//! YAML output. Multi-line strings are written as literal blocks.

use crate::model::Schema;
use crate::render::Renderer;
use anyhow::{Context, Result};
use serde_yaml::Value;

pub struct YamlRenderer;

impl Renderer for YamlRenderer {
    fn render(&self, schema: &Schema) -> Result<String> {
        let mut value = serde_yaml::to_value(schema).context("failed to convert schema to YAML")?;
        terminate_multiline(&mut value);
        serde_yaml::to_string(&value).context("failed to serialize schema")
    }

    fn file_extension(&self) -> &str {
        "yml"
    }
}

/// Give every multi-line string a final newline so it is emitted as a `|`
/// block that keeps its line breaks.
fn terminate_multiline(value: &mut Value) {
    match value {
        Value::String(s) if s.contains('\n') && !s.ends_with('\n') => s.push('\n'),
        Value::Sequence(items) => items.iter_mut().for_each(terminate_multiline),
        Value::Mapping(map) => map.values_mut().for_each(terminate_multiline),
        _ => {}
    }
}
