//! Source -> resolver -> generator, wired the way the CLI runs it.

use tracing::info;

use crate::Result;
use crate::remap::NamespaceRemap;
use crate::resolve::{Definition, Resolution, Resolver};
use crate::schema::{AvroParser, ParseError, Schema};
use crate::source::Source;
use crate::typegen::{Artifact, CodeGenerator};

/// Resolution of Avro schema definitions.
pub type AvroResolution = Resolution<Schema, ParseError>;

/// Everything a full run produced.
#[derive(Debug)]
pub struct Output {
    pub resolution: AvroResolution,
    pub artifacts: Vec<Artifact>,
}

#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    remap: NamespaceRemap,
    attempt_fuel: Option<u32>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remap(mut self, remap: NamespaceRemap) -> Self {
        self.remap = remap;
        self
    }

    pub fn with_attempt_fuel(mut self, fuel: Option<u32>) -> Self {
        self.attempt_fuel = fuel;
        self
    }

    pub fn remap(&self) -> &NamespaceRemap {
        &self.remap
    }

    pub async fn load(&self, source: &Source) -> Result<Vec<Definition>> {
        let definitions = source.load().await?;
        info!(source = %source.describe(), count = definitions.len(), "loaded definitions");
        Ok(definitions)
    }

    pub fn resolve(&self, definitions: Vec<Definition>) -> Result<AvroResolution> {
        let resolution = Resolver::new(AvroParser::new())
            .with_attempt_fuel(self.attempt_fuel)
            .resolve(definitions)?;
        info!("{}", resolution.summary());
        Ok(resolution)
    }

    /// Hand the resolved batch to `generator` in one call.
    pub fn generate<G: CodeGenerator>(&self, resolution: &AvroResolution, generator: &G) -> Result<Vec<Artifact>> {
        Ok(generator.generate(resolution.resolved(), &self.remap)?)
    }

    pub async fn run<G: CodeGenerator>(&self, source: &Source, generator: &G) -> Result<Output> {
        let definitions = self.load(source).await?;
        let resolution = self.resolve(definitions)?;
        let artifacts = self.generate(&resolution, generator)?;
        Ok(Output {
            resolution,
            artifacts,
        })
    }
}
