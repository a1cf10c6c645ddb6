//! Building the source and pipeline from input flags, and the shared
//! load-and-resolve step every command starts with.

use std::path::PathBuf;

use avrogen_core::Colors;
use avrogen_lib::pipeline::{AvroResolution, Pipeline};
use avrogen_lib::remap::NamespaceRemap;
use avrogen_lib::source::{FileSource, RegistrySource, Source};
use regex::Regex;

pub struct InputArgs {
    pub schema_dir: Option<PathBuf>,
    pub registry: Option<String>,
    pub filter: Option<String>,
    pub glob: String,
    pub concurrency: usize,
    pub remap: Vec<String>,
    pub fuel: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid --match pattern: {0}")]
    Filter(#[from] regex::Error),

    #[error("either a schema directory or --registry is required")]
    MissingInput,

    #[error(transparent)]
    Run(#[from] avrogen_lib::Error),
}

impl From<avrogen_lib::source::SourceError> for InputError {
    fn from(err: avrogen_lib::source::SourceError) -> Self {
        InputError::Run(err.into())
    }
}

impl From<avrogen_lib::remap::RemapError> for InputError {
    fn from(err: avrogen_lib::remap::RemapError) -> Self {
        InputError::Run(err.into())
    }
}

impl InputArgs {
    pub fn source(&self) -> Result<Source, InputError> {
        let filter = self.filter.as_deref().map(Regex::new).transpose()?;

        if let Some(url) = &self.registry {
            let registry = RegistrySource::new(url)?
                .with_filter(filter)
                .with_concurrency(self.concurrency);
            return Ok(registry.into());
        }

        let dir = self.schema_dir.as_ref().ok_or(InputError::MissingInput)?;
        Ok(FileSource::new(dir)
            .with_glob(self.glob.as_str())
            .with_filter(filter)
            .into())
    }

    pub fn pipeline(&self) -> Result<Pipeline, InputError> {
        let remap = NamespaceRemap::parse(&self.remap)?;
        Ok(Pipeline::new()
            .with_remap(remap)
            .with_attempt_fuel(self.fuel))
    }

    /// Load definitions and resolve them.
    pub async fn resolve(&self) -> Result<(Pipeline, AvroResolution), InputError> {
        let source = self.source()?;
        let pipeline = self.pipeline()?;
        let definitions = pipeline.load(&source).await?;
        let resolution = pipeline.resolve(definitions)?;
        Ok((pipeline, resolution))
    }
}

/// Diagnostics and the unresolved line, both on stderr. Silent when
/// everything resolved.
pub fn render_unresolved(resolution: &AvroResolution, colored: bool) -> String {
    if resolution.is_complete() {
        return String::new();
    }
    let c = Colors::new(colored);
    let mut out = resolution.diagnostics().render_colored(colored);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    let ids: Vec<String> = resolution
        .unresolved_ids()
        .iter()
        .map(|id| format!("{}{id}{}", c.yellow, c.reset))
        .collect();
    out.push_str(&format!("warning: unresolved definitions: {}\n", ids.join(", ")));
    out
}

pub fn exit_with(err: impl std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
