//! Order-independent Avro schema resolution and TypeScript generation.
//!
//! - `namespace` - registry of resolved named types with snapshot/restore
//! - `resolve` - fixpoint resolver over a pluggable schema parser
//! - `schema` - Avro JSON model and parser
//! - `source` - filesystem and schema registry inputs
//! - `remap` - namespace prefix rewriting
//! - `typegen` - code generators (TypeScript)
//! - `diagnostics` - error reporting for unresolved definitions
//! - `pipeline` - the whole flow behind one facade

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod namespace;
pub mod pipeline;
pub mod remap;
pub mod resolve;
pub mod schema;
pub mod source;
pub mod typegen;

#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
mod remap_tests;
#[cfg(test)]
pub mod test_utils;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use namespace::Namespace;
pub use pipeline::{AvroResolution, Pipeline};
pub use remap::NamespaceRemap;
pub use resolve::{Definition, Resolution, Resolver, SchemaParser};
pub use schema::{AvroParser, ParseError, Schema};

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] source::SourceError),

    #[error(transparent)]
    Remap(#[from] remap::RemapError),

    #[error(transparent)]
    Generate(#[from] typegen::GenError),

    /// Attempt fuel exhausted before the fixpoint.
    #[error("parse attempt limit of {0} exceeded")]
    AttemptFuelExhausted(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
