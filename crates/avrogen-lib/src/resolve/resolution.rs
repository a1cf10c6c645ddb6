use std::fmt;

use crate::diagnostics::Diagnostics;
use crate::namespace::Namespace;
use crate::schema::ParseError;

use super::Definition;

/// A definition still pending at the fixpoint, with its last failure.
#[derive(Clone, Debug, PartialEq)]
pub struct Unresolved<E> {
    pub definition: Definition,
    pub error: E,
}

/// Result of a resolver run that reached its fixpoint.
#[derive(Clone, Debug)]
pub struct Resolution<T, E> {
    pub(super) resolved: Vec<T>,
    pub(super) unresolved: Vec<Unresolved<E>>,
    pub(super) namespace: Namespace,
    pub(super) passes: usize,
    pub(super) attempts: u32,
}

impl<T, E> Resolution<T, E> {
    /// Parsed outputs in the order they were committed.
    pub fn resolved(&self) -> &[T] {
        &self.resolved
    }

    pub fn unresolved(&self) -> &[Unresolved<E>] {
        &self.unresolved
    }

    /// Identifiers of unresolved definitions, in input order.
    pub fn unresolved_ids(&self) -> Vec<&str> {
        self.unresolved
            .iter()
            .map(|u| u.definition.id.as_str())
            .collect()
    }

    /// Last failure of each unresolved definition.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &E)> {
        self.unresolved
            .iter()
            .map(|u| (u.definition.id.as_str(), &u.error))
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// `unresolved definitions: a, b` or `None` when everything resolved.
    pub fn unresolved_line(&self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        Some(format!(
            "unresolved definitions: {}",
            self.unresolved_ids().join(", ")
        ))
    }

    /// One-line run summary for logs and CLI output.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "resolved {} of {} definitions in {} {} ({} attempts)",
            self.resolved.len(),
            self.resolved.len() + self.unresolved.len(),
            self.passes,
            if self.passes == 1 { "pass" } else { "passes" },
            self.attempts,
        );
        if !self.is_complete() {
            out.push_str(&format!(", {} unresolved", self.unresolved.len()));
        }
        out
    }
}

impl<T> Resolution<T, ParseError> {
    /// One error per unresolved definition, pointing into its text.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        for Unresolved { definition, error } in &self.unresolved {
            let mut builder = diagnostics
                .error(&definition.id, error.to_string())
                .source(&definition.content);
            if let Some(span) = error.span() {
                builder = builder.span(span);
            }
            if let ParseError::UnknownType { name, .. } = error {
                builder = builder.hint(format!(
                    "no resolved definition introduces `{name}`; check its namespace or add the schema that defines it"
                ));
            }
            builder.emit();
        }
        diagnostics
    }
}

impl<T, E> fmt::Display for Resolution<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
