//! Command builders for the CLI.
//!
//! Every command takes the same input flags (a schema directory or a
//! registry, plus filtering, remapping and logging options).

use clap::{ArgGroup, Command};

use super::args::*;

/// Add input, resolution and logging args shared by all commands.
fn with_input_args(cmd: Command) -> Command {
    cmd.arg(schema_dir_arg())
        .arg(registry_arg())
        .group(
            ArgGroup::new("input")
                .args(["schema_dir", "registry"])
                .required(true),
        )
        .arg(match_arg())
        .arg(glob_arg())
        .arg(concurrency_arg())
        .arg(remap_arg())
        .arg(fuel_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("avrogen")
        .about("Resolve Avro schemas in any order and generate TypeScript")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(gen_command())
        .subcommand(names_command())
}

/// Resolve only and report what did not resolve.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Resolve schemas and report unresolved definitions")
        .override_usage(
            "\
  avrogen check <DIR>
  avrogen check --registry <URL>",
        )
        .after_help(
            r#"EXAMPLES:
  avrogen check schemas/                          # every *.avsc below schemas/
  avrogen check schemas/ --match '^billing/'      # one subtree
  avrogen check --registry http://localhost:8081  # latest registry versions
  avrogen check schemas/ --strict                 # exit 1 if anything is unresolved"#,
        )
        .arg(strict_arg());

    with_input_args(cmd)
}

/// Resolve, then generate TypeScript.
pub fn gen_command() -> Command {
    let cmd = Command::new("gen")
        .about("Generate TypeScript declarations")
        .override_usage(
            "\
  avrogen gen <DIR> [-o <OUT>]
  avrogen gen --registry <URL> [-o <OUT>]",
        )
        .after_help(
            r#"EXAMPLES:
  avrogen gen schemas/ -o src/models                      # one .ts file per type
  avrogen gen schemas/ --remap com.acme:models -o src     # com/acme/X -> models/X
  avrogen gen schemas/ --optional null --enum-style enum  # alternative shapes
  avrogen gen schemas/                                    # print to stdout"#,
        )
        .arg(output_dir_arg())
        .arg(no_export_arg())
        .arg(optional_arg())
        .arg(enum_style_arg())
        .arg(no_header_arg());

    with_input_args(cmd)
}

/// List resolved named types.
pub fn names_command() -> Command {
    let cmd = Command::new("names")
        .about("List resolved named types")
        .override_usage(
            "\
  avrogen names <DIR> [--json]
  avrogen names --registry <URL> [--json]",
        )
        .arg(json_arg());

    with_input_args(cmd)
}
