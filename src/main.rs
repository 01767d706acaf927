use authctl::{cmd, logging};
use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = cmd::Cli::parse();
    logging::init(cli.debug);

    match cmd::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.red());
            ExitCode::FAILURE
        }
    }
}
