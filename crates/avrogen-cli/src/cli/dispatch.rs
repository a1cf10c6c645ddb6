//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `From<*Params>` impls bridge dispatch to command handlers

use std::path::PathBuf;

use avrogen_lib::source::DEFAULT_CONCURRENCY;
use avrogen_lib::typegen::typescript::{EnumStyle, Optional};
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::generate::GenArgs;
use crate::commands::input::InputArgs;
use crate::commands::names::NamesArgs;

/// Input and resolution flags shared by every command.
#[derive(Debug)]
pub struct InputParams {
    pub schema_dir: Option<PathBuf>,
    pub registry: Option<String>,
    pub filter: Option<String>,
    pub glob: String,
    pub concurrency: usize,
    pub remap: Vec<String>,
    pub fuel: Option<u32>,
}

impl InputParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_dir: m.get_one::<PathBuf>("schema_dir").cloned(),
            registry: m.get_one::<String>("registry").cloned(),
            filter: m.get_one::<String>("match").cloned(),
            glob: m
                .get_one::<String>("glob")
                .cloned()
                .unwrap_or_else(|| avrogen_lib::source::DEFAULT_GLOB.to_owned()),
            concurrency: m
                .get_one::<usize>("concurrency")
                .copied()
                .unwrap_or(DEFAULT_CONCURRENCY),
            remap: m
                .get_many::<String>("remap")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            fuel: m.get_one::<u32>("fuel").copied(),
        }
    }
}

impl From<InputParams> for InputArgs {
    fn from(p: InputParams) -> Self {
        Self {
            schema_dir: p.schema_dir,
            registry: p.registry,
            filter: p.filter,
            glob: p.glob,
            concurrency: p.concurrency,
            remap: p.remap,
            fuel: p.fuel,
        }
    }
}

pub struct CheckParams {
    pub input: InputParams,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input.into(),
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct GenParams {
    pub input: InputParams,
    pub output: Option<PathBuf>,
    pub no_export: bool,
    pub optional: Optional,
    pub enum_style: EnumStyle,
    pub no_header: bool,
    pub color: ColorChoice,
}

impl GenParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            no_export: m.get_flag("no_export"),
            optional: parse_optional(m),
            enum_style: parse_enum_style(m),
            no_header: m.get_flag("no_header"),
            color: parse_color(m),
        }
    }
}

impl From<GenParams> for GenArgs {
    fn from(p: GenParams) -> Self {
        Self {
            input: p.input.into(),
            output: p.output,
            export: !p.no_export,
            optional: p.optional,
            enum_style: p.enum_style,
            header: !p.no_header,
            color: p.color.should_colorize(),
        }
    }
}

pub struct NamesParams {
    pub input: InputParams,
    pub json: bool,
    pub color: ColorChoice,
}

impl NamesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<NamesParams> for NamesArgs {
    fn from(p: NamesParams) -> Self {
        Self {
            input: p.input.into(),
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

/// Number of `-v` flags on the chosen subcommand.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(String::as_str) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_optional(m: &ArgMatches) -> Optional {
    match m.get_one::<String>("optional").map(String::as_str) {
        Some("null") => Optional::Null,
        _ => Optional::Undefined,
    }
}

fn parse_enum_style(m: &ArgMatches) -> EnumStyle {
    match m.get_one::<String>("enum_style").map(String::as_str) {
        Some("enum") => EnumStyle::Enum,
        _ => EnumStyle::Union,
    }
}
