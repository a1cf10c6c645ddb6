//! Order-independent dependency resolution.
//!
//! Definitions arrive in arbitrary order and may reference named types that
//! other definitions introduce. The resolver sweeps the pending definitions
//! in passes. Each parse attempt runs against the live namespace behind a
//! snapshot: success commits immediately (later definitions in the same pass
//! already see the new names), failure restores the snapshot and leaves the
//! definition pending. Passes stop once nothing is pending or a whole pass
//! resolves nothing.

mod resolution;

#[cfg(test)]
mod resolve_tests;

use std::fmt;

use tracing::{debug, info, warn};

use crate::namespace::Namespace;
use crate::{Error, Result};

pub use resolution::{Resolution, Unresolved};

/// One input unit: raw schema text plus the identifier it was read under.
///
/// The identifier is only used for reporting and need not be unique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub id: String,
    pub content: String,
}

impl Definition {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Parses one definition against the namespace.
///
/// Implementations may register named types in `namespace` as a side
/// effect, also on failure; the resolver undoes those on a failed attempt.
pub trait SchemaParser {
    type Output;
    type Error: fmt::Display;

    fn parse(&self, content: &str, namespace: &mut Namespace) -> std::result::Result<Self::Output, Self::Error>;
}

/// Outcome of a single parse attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Attempt<T, E> {
    /// Parsed; namespace changes are kept.
    Committed(T),
    /// Failed; namespace equals the pre-attempt snapshot again.
    RolledBack(E),
}

/// Fixpoint resolver over a [`SchemaParser`].
pub struct Resolver<P> {
    parser: P,
    attempt_fuel: Option<u32>,
}

impl<P: SchemaParser> Resolver<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            attempt_fuel: None,
        }
    }

    /// Cap the total number of parse attempts per run.
    pub fn with_attempt_fuel(mut self, fuel: Option<u32>) -> Self {
        self.attempt_fuel = fuel;
        self
    }

    /// Parse `definition` behind a snapshot of `namespace`.
    pub fn attempt(&self, definition: &Definition, namespace: &mut Namespace) -> Attempt<P::Output, P::Error> {
        let snapshot = namespace.snapshot();
        match self.parser.parse(&definition.content, namespace) {
            Ok(output) => Attempt::Committed(output),
            Err(err) => {
                namespace.restore(snapshot);
                Attempt::RolledBack(err)
            }
        }
    }

    /// Resolve `definitions` starting from an empty namespace.
    pub fn resolve(&self, definitions: Vec<Definition>) -> Result<Resolution<P::Output, P::Error>> {
        self.resolve_with(definitions, Namespace::new())
    }

    /// Resolve `definitions` on top of names already in `namespace`.
    pub fn resolve_with(
        &self,
        definitions: Vec<Definition>,
        mut namespace: Namespace,
    ) -> Result<Resolution<P::Output, P::Error>> {
        let mut resolved = Vec::with_capacity(definitions.len());
        let mut failed: Vec<Unresolved<P::Error>> = Vec::new();
        let mut pending = definitions;
        let mut passes: usize = 0;
        let mut attempts: u32 = 0;

        while !pending.is_empty() {
            passes += 1;
            let before = pending.len();

            for definition in pending {
                if let Some(limit) = self.attempt_fuel {
                    if attempts >= limit {
                        return Err(Error::AttemptFuelExhausted(limit));
                    }
                }
                attempts += 1;

                match self.attempt(&definition, &mut namespace) {
                    Attempt::Committed(output) => {
                        debug!(pass = passes, definition = %definition.id, "resolved");
                        resolved.push(output);
                    }
                    Attempt::RolledBack(error) => {
                        debug!(pass = passes, definition = %definition.id, %error, "rolled back");
                        failed.push(Unresolved { definition, error });
                    }
                }
            }

            let progressed = before - failed.len();
            info!(pass = passes, progressed, pending = failed.len(), "pass finished");
            if progressed == 0 {
                break;
            }
            pending = std::mem::take(&mut failed)
                .into_iter()
                .map(|u| u.definition)
                .collect();
        }

        if !failed.is_empty() {
            let ids: Vec<&str> = failed.iter().map(|u| u.definition.id.as_str()).collect();
            warn!(unresolved = %ids.join(", "), "fixpoint reached with unresolved definitions");
        }

        Ok(Resolution {
            resolved,
            unresolved: failed,
            namespace,
            passes,
            attempts,
        })
    }
}
