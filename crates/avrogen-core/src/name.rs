//! Avro full names.
//!
//! A named type (record, enum, fixed) is identified by its full name: an
//! optional dotted namespace plus a simple name. A name that already contains
//! a dot is fully qualified and ignores any enclosing namespace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced when a name or namespace breaks the Avro naming rules.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("`{0}` is not a valid name")]
    InvalidName(String),

    #[error("`{0}` is not a valid namespace")]
    InvalidNamespace(String),
}

/// Fully-qualified identity of a named Avro type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FullName {
    namespace: Option<String>,
    name: String,
}

impl FullName {
    /// Build a full name from a (possibly dotted) name and an enclosing namespace.
    ///
    /// Dotted names carry their own namespace, so `namespace` is only consulted
    /// for simple names. An empty namespace means the null namespace.
    pub fn new(name: &str, namespace: Option<&str>) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }

        let (namespace, simple) = match name.rsplit_once('.') {
            Some((ns, simple)) => (Some(ns), simple),
            None => (namespace, name),
        };

        if !is_valid_name(simple) {
            return Err(NameError::InvalidName(name.to_owned()));
        }

        let namespace = match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) if !is_valid_namespace(ns) => {
                return Err(NameError::InvalidNamespace(ns.to_owned()));
            }
            other => other.map(str::to_owned),
        };

        Ok(Self {
            namespace,
            name: simple.to_owned(),
        })
    }

    /// Parse a full name with no enclosing namespace.
    pub fn parse(full: &str) -> Result<Self, NameError> {
        Self::new(full, None)
    }

    /// The simple (last) component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace, `None` for the null namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Same simple name in a different namespace.
    pub fn with_namespace(&self, namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_owned),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<FullName> for String {
    fn from(name: FullName) -> Self {
        name.to_string()
    }
}

impl TryFrom<String> for FullName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl std::str::FromStr for FullName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Dot-separated sequence of valid names.
pub fn is_valid_namespace(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_valid_name)
}
