//! Code generation from resolved schemas.
//!
//! A [`CodeGenerator`] receives the complete resolved batch once per run and
//! returns in-memory [`Artifact`]s; [`write_artifacts`] puts them on disk.

pub mod typescript;

#[cfg(test)]
mod typegen_tests;

use std::path::{Path, PathBuf};

use avrogen_core::FullName;
use indexmap::IndexMap;

use crate::remap::NamespaceRemap;
use crate::schema::Schema;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("`{0}` is defined more than once in the generated batch")]
    DuplicateType(FullName),

    #[error("cannot write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One generated file, with a path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

pub trait CodeGenerator {
    fn generate(&self, types: &[Schema], remap: &NamespaceRemap) -> Result<Vec<Artifact>, GenError>;
}

/// Every named type defined anywhere in `types`, keyed by remapped full name.
///
/// Two definitions that end up under the same remapped name are a
/// [`GenError::DuplicateType`].
pub fn collect_named<'s>(
    types: &'s [Schema],
    remap: &NamespaceRemap,
) -> Result<IndexMap<FullName, &'s Schema>, GenError> {
    let mut named = IndexMap::new();
    for schema in types {
        for definition in schema.named_definitions() {
            let Some(name) = definition.name() else {
                continue;
            };
            let name = remap.apply_name(name);
            if named.contains_key(&name) {
                return Err(GenError::DuplicateType(name));
            }
            named.insert(name, definition);
        }
    }
    Ok(named)
}

/// Write `artifacts` below `dir`, creating directories as needed.
///
/// Returns the written paths in artifact order.
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, GenError> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| GenError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, &artifact.contents).map_err(|source| GenError::Io {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}
