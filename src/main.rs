//! Binary entrypoint for the `tapsite` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording is handled in commands::generate via TAPSITE_RECORD=<file>.
    match tapsite::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
