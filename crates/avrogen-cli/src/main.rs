mod cli;
mod commands;

use cli::{CheckParams, GenParams, NamesParams, build_cli, verbosity};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this");
    };

    init_logging(verbosity(m));

    match name {
        "check" => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into()).await;
        }
        "gen" => {
            let params = GenParams::from_matches(m);
            commands::generate::run(params.into()).await;
        }
        "names" => {
            let params = NamesParams::from_matches(m);
            commands::names::run(params.into()).await;
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,avrogen={level},avrogen_lib={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
