//! TypeScript declarations for Avro named types.
//!
//! Each record, enum and fixed lands in its own `.ts` file under a directory
//! tree mirroring its (remapped) namespace. Cross-file references become
//! `import type` lines.

mod config;
mod emitter;
mod render;


pub use config::{Config, EnumStyle, Optional};
pub use emitter::Generator;
