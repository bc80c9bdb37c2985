//! Command-line front end: write JSON and YAML schemas of the configuration headers.
//!
//! ```text
//! cfgschema [some|json|jsons|group|yml|yaml]... [-r Marlin] [-o .]
//! ```
//!
//! - `some` (default): `schema.json` + `schema.yml`
//! - `json`: `schema.json`
//! - `jsons`: `schema.json` + `schema_grouped.json`
//! - `group`: `schema_grouped.json`
//! - `yml`, `yaml`: `schema.yml`

use anyhow::{Context, Result};
use cfgschema::model::Schema;
use cfgschema::render::{self, Renderer};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// json + yml
    #[value(name = "some")]
    Both,
    /// Plain JSON schema
    Json,
    /// json + group
    Jsons,
    /// JSON schema with wildcard groups
    Group,
    /// YAML schema
    Yml,
    /// YAML schema
    Yaml,
}

#[derive(Parser)]
#[command(
    name = "cfgschema",
    about = "Extract a schema from annotated configuration headers"
)]
struct Cli {
    /// Outputs to generate. Defaults to `some`.
    #[arg(value_enum)]
    targets: Vec<Target>,

    /// Directory holding Configuration.h and Configuration_adv.h
    #[arg(short = 'r', long, default_value = "Marlin")]
    root: PathBuf,

    /// Directory to write schema files into
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,
}

impl Cli {
    fn wants(&self, any: &[Target]) -> bool {
        if self.targets.is_empty() {
            return any.contains(&Target::Both);
        }
        self.targets.iter().any(|t| any.contains(t))
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let schema = match cfgschema::extract(&cli.root) {
        Ok(schema) => schema,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    fs::create_dir_all(&cli.output).with_context(|| {
        format!("failed to create output directory: {}", cli.output.display())
    })?;

    if cli.wants(&[Target::Both, Target::Json, Target::Jsons]) {
        info!("Generating JSON ...");
        let renderer = render::create_renderer("json")?;
        write_schema(renderer.as_ref(), &schema, &cli.output, "schema")?;
    }

    if cli.wants(&[Target::Group, Target::Jsons]) {
        info!("Generating grouped JSON ...");
        let mut grouped = schema.clone();
        cfgschema::group_options(&mut grouped);
        let renderer = render::create_renderer("json")?;
        write_schema(renderer.as_ref(), &grouped, &cli.output, "schema_grouped")?;
    }

    if cli.wants(&[Target::Both, Target::Yml, Target::Yaml]) {
        match render::create_renderer("yaml") {
            Ok(renderer) => {
                info!("Generating YML ...");
                write_schema(renderer.as_ref(), &schema, &cli.output, "schema")?;
            }
            Err(e) => warn!("{e}; skipping schema.yml"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn write_schema(renderer: &dyn Renderer, schema: &Schema, dir: &Path, stem: &str) -> Result<()> {
    let path = dir.join(format!("{}.{}", stem, renderer.file_extension()));
    let output = renderer.render(schema)?;
    fs::write(&path, output).with_context(|| format!("failed to write {}", path.display()))
}
