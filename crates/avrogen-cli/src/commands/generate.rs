use std::path::PathBuf;

use avrogen_core::Colors;
use avrogen_lib::typegen::typescript::{Config, EnumStyle, Generator, Optional};
use avrogen_lib::typegen::{Artifact, write_artifacts};

use super::input::{InputArgs, exit_with, render_unresolved};

pub const HEADER: &str = "Code generated by avrogen. DO NOT EDIT.";

pub struct GenArgs {
    pub input: InputArgs,
    pub output: Option<PathBuf>,
    pub export: bool,
    pub optional: Optional,
    pub enum_style: EnumStyle,
    pub header: bool,
    pub color: bool,
}

impl GenArgs {
    pub fn config(&self) -> Config {
        Config::new()
            .export(self.export)
            .optional(self.optional)
            .enums(self.enum_style)
            .header(self.header.then(|| HEADER.to_owned()))
    }
}

pub async fn run(args: GenArgs) {
    let (pipeline, resolution) = args
        .input
        .resolve()
        .await
        .unwrap_or_else(|err| exit_with(err));

    eprint!("{}", render_unresolved(&resolution, args.color));

    let generator = Generator::new(args.config());
    let artifacts = pipeline
        .generate(&resolution, &generator)
        .unwrap_or_else(|err| exit_with(err));

    match &args.output {
        Some(dir) => {
            let written = write_artifacts(dir, &artifacts).unwrap_or_else(|err| exit_with(err));
            tracing::info!(count = written.len(), dir = %dir.display(), "wrote artifacts");
            for path in written {
                println!("{}", path.display());
            }
        }
        None => print!("{}", render_artifacts(&artifacts, Colors::new(args.color))),
    }
}

/// All artifacts in one stream, each under a `// ==> path` header.
pub fn render_artifacts(artifacts: &[Artifact], c: Colors) -> String {
    artifacts
        .iter()
        .map(|a| {
            format!(
                "{}// ==> {}{}\n{}",
                c.dim,
                a.path.display(),
                c.reset,
                a.contents
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
