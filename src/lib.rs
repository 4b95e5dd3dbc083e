//! Core library entry for the `tapsite` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod tap;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// Variables from a `.env` file in the working directory are loaded first,
/// without overriding the process environment.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
/// Help and version requests are printed to stdout and are not errors.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    dotenvy::dotenv().ok();
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["tapsite", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn help_and_version_succeed() {
        assert!(run(["tapsite", "--help"]).is_ok());
        assert!(run(["tapsite", "generate", "--help"]).is_ok());
        assert!(run(["tapsite", "--version"]).is_ok());
    }

    #[test]
    fn run_errors_without_subcommand() {
        assert!(run(["tapsite"]).is_err());
    }
}
