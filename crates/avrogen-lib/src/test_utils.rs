//! Test helpers shared across modules.

use crate::namespace::Namespace;
use crate::pipeline::{AvroResolution, Pipeline};
use crate::remap::NamespaceRemap;
use crate::resolve::{Definition, SchemaParser};
use crate::schema::{AvroParser, ParseError, Schema};
use crate::typegen::CodeGenerator;
use crate::typegen::typescript::{Config, Generator};

pub fn definitions(pairs: &[(&str, &str)]) -> Vec<Definition> {
    pairs
        .iter()
        .map(|(id, content)| Definition::new(*id, *content))
        .collect()
}

/// Parse one document against a fresh namespace.
pub fn parse_one(content: &str) -> (Result<Schema, ParseError>, Namespace) {
    let mut namespace = Namespace::new();
    let result = AvroParser::new().parse(content, &mut namespace);
    (result, namespace)
}

pub fn resolve_avro(pairs: &[(&str, &str)]) -> AvroResolution {
    Pipeline::new()
        .resolve(definitions(pairs))
        .expect("resolution without fuel never aborts")
}

/// Resolve `schemas` and render every generated file under a path header.
pub fn generate_ts(schemas: &[&str], config: Config, remap: &NamespaceRemap) -> String {
    let pairs: Vec<(String, &str)> = schemas
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("schema{i}.avsc"), *s))
        .collect();
    let pairs: Vec<(&str, &str)> = pairs.iter().map(|(id, s)| (id.as_str(), *s)).collect();

    let resolution = resolve_avro(&pairs);
    assert!(
        resolution.is_complete(),
        "fixture did not resolve: {:?}",
        resolution.unresolved_line()
    );

    let artifacts = Generator::new(config)
        .generate(resolution.resolved(), remap)
        .expect("generation should succeed");

    artifacts
        .iter()
        .map(|a| format!("==> {}\n{}", a.path.display(), a.contents))
        .collect::<Vec<_>>()
        .join("\n")
}
