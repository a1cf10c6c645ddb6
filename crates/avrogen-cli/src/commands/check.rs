use super::input::{InputArgs, exit_with, render_unresolved};

pub struct CheckArgs {
    pub input: InputArgs,
    pub strict: bool,
    pub color: bool,
}

pub async fn run(args: CheckArgs) {
    let (_, resolution) = args
        .input
        .resolve()
        .await
        .unwrap_or_else(|err| exit_with(err));

    eprint!("{}", render_unresolved(&resolution, args.color));

    if args.strict && !resolution.is_complete() {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
