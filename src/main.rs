// src/main.rs
use anyhow::Context;
use asset_tidy::app::{self, Outcome};
use asset_tidy::args::Args;
use asset_tidy::logging;
use clap::Parser;
use std::process::ExitCode;

fn run(args: &Args) -> anyhow::Result<Outcome> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    app::run(args, &mut input, &mut output).context("asset_tidy failed")
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.global.verbose, args.global.quiet);

    match run(&args) {
        Ok(outcome) if args.global.strict && outcome.failures > 0 => {
            eprintln!("{} item(s) failed", outcome.failures);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
