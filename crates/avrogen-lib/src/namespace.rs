//! Named-type namespace: registry of resolved named types.
//!
//! The resolver owns one namespace per run. Parsers look names up and
//! register the named types they define; the resolver takes a
//! [`snapshot`](Namespace::snapshot) before every parse attempt and
//! [`restore`](Namespace::restore)s it when the attempt fails, so names
//! registered by a failed parse never leak into later attempts.

use avrogen_core::FullName;
use indexmap::IndexMap;

use crate::schema::Schema;

/// Errors raised when registering a named type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("`{0}` is already defined")]
    AlreadyDefined(FullName),

    #[error("only record, enum and fixed schemas can be registered, got {0}")]
    Unnamed(&'static str),
}

/// Registry of named types keyed by full name, in registration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Namespace {
    types: IndexMap<FullName, Schema>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &FullName) -> Option<&Schema> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &FullName) -> bool {
        self.types.contains_key(name)
    }

    /// Register a named schema under its full name.
    ///
    /// A name can be registered at most once.
    pub fn register(&mut self, schema: Schema) -> Result<(), RegisterError> {
        let Some(name) = schema.name() else {
            return Err(RegisterError::Unnamed(schema.kind()));
        };
        if self.types.contains_key(name) {
            return Err(RegisterError::AlreadyDefined(name.clone()));
        }
        self.types.insert(name.clone(), schema);
        Ok(())
    }

    /// Independent copy of the current state.
    ///
    /// Holds owned schemas only, so mutating either side never shows up in
    /// the other.
    pub fn snapshot(&self) -> Namespace {
        self.clone()
    }

    /// Replace the current state with `snapshot`, discarding everything
    /// registered since it was taken.
    pub fn restore(&mut self, snapshot: Namespace) {
        *self = snapshot;
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &FullName> {
        self.types.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FullName, &Schema)> {
        self.types.iter()
    }
}
