mod cli;
mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    match platform::app::run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("siteops: {err:#}");
            ExitCode::FAILURE
        }
    }
}
