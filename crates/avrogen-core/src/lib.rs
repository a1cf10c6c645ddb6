#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared building blocks for avrogen.
//!
//! - [`FullName`]: the dotted `namespace.name` identity of an Avro named type
//! - [`utils`]: case conversion used by code generators
//! - [`Colors`]: ANSI palette for CLI output

mod colors;
mod name;
pub mod utils;


pub use colors::Colors;
pub use name::{FullName, NameError, is_valid_name, is_valid_namespace};
