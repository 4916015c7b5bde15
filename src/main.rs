//! Main entry point for the `draft-pr` CLI.

use draft_pr::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => cli::report_error(&e),
    }
}
