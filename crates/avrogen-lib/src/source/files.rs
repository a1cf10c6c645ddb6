use std::path::{Component, Path, PathBuf};

use regex::Regex;
use tracing::debug;

use super::SourceError;
use crate::resolve::Definition;

pub const DEFAULT_GLOB: &str = "**/*.avsc";

/// Reads definitions from files under a root directory.
///
/// Identifiers are paths relative to the root with `/` separators.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
    glob: String,
    filter: Option<Regex>,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            glob: DEFAULT_GLOB.to_owned(),
            filter: None,
        }
    }

    pub fn with_glob(mut self, glob: impl Into<String>) -> Self {
        self.glob = glob.into();
        self
    }

    /// Keep only identifiers the regex matches somewhere.
    pub fn with_filter(mut self, filter: Option<Regex>) -> Self {
        self.filter = filter;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load(&self) -> Result<Vec<Definition>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::MissingRoot(self.root.clone()));
        }

        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = format!("{}/{}", root.trim_end_matches('/'), self.glob);
        let entries = glob::glob(&pattern).map_err(|source| SourceError::Pattern {
            pattern: self.glob.clone(),
            source,
        })?;

        let mut definitions = Vec::new();
        for entry in entries {
            let path = entry?;
            if !path.is_file() {
                continue;
            }

            let id = identifier(&self.root, &path);
            if self.filter.as_ref().is_some_and(|re| !re.is_match(&id)) {
                debug!(definition = %id, "skipped by filter");
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
            definitions.push(Definition::new(id, content));
        }

        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(root = %self.root.display(), count = definitions.len(), "loaded definitions");
        Ok(definitions)
    }
}

fn identifier(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
