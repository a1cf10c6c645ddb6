use avrogen_core::{Colors, FullName};
use avrogen_lib::Namespace;
use serde::Serialize;

use super::input::{InputArgs, exit_with, render_unresolved};

pub struct NamesArgs {
    pub input: InputArgs,
    pub json: bool,
    pub color: bool,
}

#[derive(Serialize)]
struct NameEntry<'a> {
    name: &'a FullName,
    kind: &'static str,
}

pub async fn run(args: NamesArgs) {
    let (_, resolution) = args
        .input
        .resolve()
        .await
        .unwrap_or_else(|err| exit_with(err));

    eprint!("{}", render_unresolved(&resolution, args.color));

    if args.json {
        println!("{}", render_json(resolution.namespace()));
    } else {
        print!("{}", render_listing(resolution.namespace(), Colors::new(args.color)));
    }
}

/// One `kind name` line per registered type, in registration order.
pub fn render_listing(namespace: &Namespace, c: Colors) -> String {
    let mut out = String::new();
    for (name, schema) in namespace.iter() {
        out.push_str(&format!(
            "{}{:<6}{} {}{}{}\n",
            c.dim,
            schema.kind(),
            c.reset,
            c.blue,
            name,
            c.reset
        ));
    }
    out
}

pub fn render_json(namespace: &Namespace) -> String {
    let entries: Vec<NameEntry<'_>> = namespace
        .iter()
        .map(|(name, schema)| NameEntry {
            name,
            kind: schema.kind(),
        })
        .collect();
    serde_json::to_string_pretty(&entries).unwrap_or_else(|err| exit_with(err))
}
