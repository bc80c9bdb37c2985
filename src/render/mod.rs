//! Output formats, selected by name.

pub mod json;
#[cfg(feature = "yaml")]
pub mod yaml;

use crate::model::Schema;
use anyhow::{anyhow, Result};

/// Trait for rendering a Schema into a specific output format.
pub trait Renderer {
    fn render(&self, schema: &Schema) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(yaml::YamlRenderer)),
        #[cfg(not(feature = "yaml"))]
        "yaml" | "yml" => Err(anyhow!(
            "YAML support is not available (built without the `yaml` feature)"
        )),
        _ => Err(anyhow!("unknown format: {}. Use json or yaml", format)),
    }
}
