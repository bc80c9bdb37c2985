//! Pretty-printed JSON output.

use crate::model::Schema;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, schema: &Schema) -> Result<String> {
        let mut out = serde_json::to_string_pretty(schema).context("failed to serialize schema")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
