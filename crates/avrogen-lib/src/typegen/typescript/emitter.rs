//! Generator entry point and per-file emitter state.

use std::collections::BTreeMap;
use std::path::PathBuf;

use avrogen_core::FullName;
use avrogen_core::utils::to_pascal_case;
use indexmap::IndexMap;
use tracing::debug;

use super::Config;
use crate::remap::NamespaceRemap;
use crate::schema::Schema;
use crate::typegen::{Artifact, CodeGenerator, GenError, collect_named};

/// TypeScript code generator.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl CodeGenerator for Generator {
    fn generate(&self, types: &[Schema], remap: &NamespaceRemap) -> Result<Vec<Artifact>, GenError> {
        let named = collect_named(types, remap)?;
        let artifacts: Vec<Artifact> = named
            .iter()
            .map(|(name, schema)| FileEmitter::new(&self.config, remap, name).emit(schema))
            .collect();
        debug!(count = artifacts.len(), "generated typescript files");
        Ok(artifacts)
    }
}

/// Emits the file declaring one named type.
pub(super) struct FileEmitter<'a> {
    pub(super) config: &'a Config,
    remap: &'a NamespaceRemap,
    /// Remapped name of the declared type
    pub(super) name: &'a FullName,
    /// Identifier the declared type is exported under
    pub(super) ident: String,
    /// Remapped referenced type -> identifier used in this file
    locals: IndexMap<FullName, String>,
    /// Import path -> (exported name, local name)
    imports: BTreeMap<String, (String, String)>,
    pub(super) output: String,
}

impl<'a> FileEmitter<'a> {
    pub(super) fn new(config: &'a Config, remap: &'a NamespaceRemap, name: &'a FullName) -> Self {
        Self {
            config,
            remap,
            name,
            ident: declared_identifier(name),
            locals: IndexMap::new(),
            imports: BTreeMap::new(),
            output: String::new(),
        }
    }

    pub(super) fn emit(mut self, schema: &Schema) -> Artifact {
        self.render_declaration(schema);

        let mut contents = String::new();
        if let Some(header) = &self.config.header {
            for line in header.lines() {
                if line.is_empty() {
                    contents.push_str("//\n");
                } else {
                    contents.push_str(&format!("// {line}\n"));
                }
            }
            contents.push('\n');
        }
        if !self.imports.is_empty() {
            for (path, (exported, local)) in &self.imports {
                if exported == local {
                    contents.push_str(&format!("import type {{ {exported} }} from \"{path}\";\n"));
                } else {
                    contents.push_str(&format!(
                        "import type {{ {exported} as {local} }} from \"{path}\";\n"
                    ));
                }
            }
            contents.push('\n');
        }
        contents.push_str(&self.output);

        // Exactly one trailing newline
        contents.truncate(contents.trim_end().len());
        contents.push('\n');

        Artifact {
            path: file_path(self.name),
            contents,
        }
    }

    /// Identifier for a named type referenced from this file, importing it
    /// when it lives elsewhere.
    pub(super) fn reference(&mut self, target: &FullName) -> String {
        let target = self.remap.apply_name(target);
        if &target == self.name {
            return self.ident.clone();
        }
        if let Some(local) = self.locals.get(&target) {
            return local.clone();
        }

        let exported = declared_identifier(&target);
        let base = if self.is_taken(&exported) {
            qualified_identifier(&target)
        } else {
            exported.clone()
        };
        let mut local = base.clone();
        let mut n = 2;
        while self.is_taken(&local) {
            local = format!("{base}{n}");
            n += 1;
        }

        self.imports
            .insert(import_path(self.name, &target), (exported, local.clone()));
        self.locals.insert(target, local.clone());
        local
    }

    fn is_taken(&self, ident: &str) -> bool {
        ident == self.ident || BUILTINS.contains(&ident) || self.locals.values().any(|v| v == ident)
    }
}

/// Global types the generated code names directly.
const BUILTINS: &[&str] = &["Record", "Uint8Array"];

/// Identifier a named type is declared and exported under. Names that
/// would shadow a global the generated code relies on are qualified, or
/// suffixed with `Type` in the null namespace.
pub(super) fn declared_identifier(name: &FullName) -> String {
    let simple = name.name();
    if !BUILTINS.contains(&simple) {
        return simple.to_owned();
    }
    match name.namespace() {
        Some(_) => qualified_identifier(name),
        None => format!("{simple}Type"),
    }
}

/// `com.acme.Order` -> `com/acme/Order.ts`
pub(super) fn file_path(name: &FullName) -> PathBuf {
    let mut path: PathBuf = name.namespace().into_iter().flat_map(|ns| ns.split('.')).collect();
    path.push(format!("{}.ts", name.name()));
    path
}

/// Module specifier for `to`, relative to the file declaring `from`.
pub(super) fn import_path(from: &FullName, to: &FullName) -> String {
    let from_dirs: Vec<&str> = from.namespace().map(|ns| ns.split('.').collect()).unwrap_or_default();
    let to_dirs: Vec<&str> = to.namespace().map(|ns| ns.split('.').collect()).unwrap_or_default();

    let common = from_dirs
        .iter()
        .zip(&to_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_dirs.len() - common];
    parts.extend(&to_dirs[common..]);
    parts.push(to.name());

    let path = parts.join("/");
    if path.starts_with("..") {
        path
    } else {
        format!("./{path}")
    }
}

/// `com.other.Order` -> `ComOtherOrder`
fn qualified_identifier(name: &FullName) -> String {
    let mut out: String = name
        .namespace()
        .into_iter()
        .flat_map(|ns| ns.split('.'))
        .map(to_pascal_case)
        .collect();
    out.push_str(name.name());
    out
}
