//! Namespace prefix remapping applied before emission.
//!
//! Each rule maps a namespace prefix to another, e.g. `com.acme:app.models`
//! turns `com.acme.billing` into `app.models.billing`. Prefixes only match on
//! whole segments, so `com.acme` leaves `com.acmecorp` alone.

use std::borrow::Cow;

use avrogen_core::{FullName, is_valid_namespace};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemapError {
    #[error("remap `{0}` must have the form `source:target`")]
    Malformed(String),

    #[error("remap `{entry}`: `{namespace}` is not a valid namespace")]
    InvalidNamespace { entry: String, namespace: String },
}

/// Table of `source -> target` namespace prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceRemap {
    rules: IndexMap<String, String>,
}

impl NamespaceRemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source:target` entries. A repeated source keeps its last target.
    pub fn parse<I, S>(entries: I) -> Result<Self, RemapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut remap = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let Some((source, target)) = entry.split_once(':') else {
                return Err(RemapError::Malformed(entry.to_owned()));
            };
            if target.contains(':') {
                return Err(RemapError::Malformed(entry.to_owned()));
            }
            for side in [source, target] {
                if !is_valid_namespace(side) {
                    return Err(RemapError::InvalidNamespace {
                        entry: entry.to_owned(),
                        namespace: side.to_owned(),
                    });
                }
            }
            remap.insert(source, target);
        }
        Ok(remap)
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.rules.insert(source.into(), target.into());
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    /// Rewrite `namespace` using the longest matching source prefix.
    pub fn apply<'a>(&self, namespace: &'a str) -> Cow<'a, str> {
        let best = self
            .rules
            .iter()
            .filter(|(source, _)| is_segment_prefix(source, namespace))
            .max_by_key(|(source, _)| source.len());

        match best {
            Some((source, target)) => Cow::Owned(format!("{target}{}", &namespace[source.len()..])),
            None => Cow::Borrowed(namespace),
        }
    }

    /// `name` with its namespace remapped. The null namespace never matches.
    pub fn apply_name(&self, name: &FullName) -> FullName {
        match name.namespace() {
            Some(ns) => name.with_namespace(Some(&self.apply(ns))),
            None => name.clone(),
        }
    }
}

fn is_segment_prefix(prefix: &str, namespace: &str) -> bool {
    match namespace.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
