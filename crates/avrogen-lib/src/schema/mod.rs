//! Avro schema model and JSON parser.
//!
//! [`AvroParser`] turns one Avro JSON document into a [`Schema`], looking up
//! referenced names in a [`Namespace`](crate::Namespace) and registering every
//! named type it defines.

mod error;
mod parser;
mod types;


pub use error::ParseError;
pub use parser::AvroParser;
pub use types::{EnumSchema, Field, FixedSchema, LogicalType, RecordSchema, Schema};
