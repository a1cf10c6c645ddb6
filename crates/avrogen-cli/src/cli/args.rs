//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use avrogen_lib::source::DEFAULT_GLOB;
use clap::{Arg, ArgAction, value_parser};

/// Schema directory (positional).
pub fn schema_dir_arg() -> Arg {
    Arg::new("schema_dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory containing Avro schema files")
}

/// Schema registry base URL (--registry).
pub fn registry_arg() -> Arg {
    Arg::new("registry")
        .long("registry")
        .value_name("URL")
        .help("Load latest subject versions from a schema registry")
}

/// Identifier filter (--match).
pub fn match_arg() -> Arg {
    Arg::new("match")
        .long("match")
        .value_name("REGEX")
        .help("Only load files or subjects whose name matches")
}

/// File pattern below DIR (--glob).
pub fn glob_arg() -> Arg {
    Arg::new("glob")
        .long("glob")
        .value_name("PATTERN")
        .default_value(DEFAULT_GLOB)
        .help("Schema file pattern, relative to DIR")
}

/// Namespace remapping (--remap, repeatable).
pub fn remap_arg() -> Arg {
    Arg::new("remap")
        .long("remap")
        .value_name("SRC:DST")
        .action(ArgAction::Append)
        .help("Rewrite namespace prefix SRC to DST (repeatable)")
}

/// Registry request concurrency (--concurrency).
pub fn concurrency_arg() -> Arg {
    Arg::new("concurrency")
        .long("concurrency")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Maximum parallel schema registry requests (default: 8)")
}

/// Parse attempt limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Abort after N parse attempts (default: unlimited)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Log more (-v info, -vv debug, -vvv trace)")
}

/// Fail when anything is unresolved (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Exit with an error when any definition is unresolved")
}

/// Output directory (-o/--output).
pub fn output_dir_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Write generated files below DIR (default: print to stdout)")
}

/// Don't export types (--no-export).
pub fn no_export_arg() -> Arg {
    Arg::new("no_export")
        .long("no-export")
        .action(ArgAction::SetTrue)
        .help("Don't export types")
}

/// Optional field style (--optional).
pub fn optional_arg() -> Arg {
    Arg::new("optional")
        .long("optional")
        .value_name("STYLE")
        .default_value("undefined")
        .value_parser(["undefined", "null"])
        .help("How nullable fields are declared: `name?: T` or `name: T | null`")
}

/// Enum declaration style (--enum-style).
pub fn enum_style_arg() -> Arg {
    Arg::new("enum_style")
        .long("enum-style")
        .value_name("STYLE")
        .default_value("union")
        .value_parser(["union", "enum"])
        .help("Declare Avro enums as string unions or TypeScript enums")
}

/// Skip the generated-file header (--no-header).
pub fn no_header_arg() -> Arg {
    Arg::new("no_header")
        .long("no-header")
        .action(ArgAction::SetTrue)
        .help("Don't write the generated-file header comment")
}

/// JSON listing (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print names as JSON")
}
