//! Feedback demo entry point: load defaults, parse, print data or errors.

use std::{io, process::ExitCode};

use feedback::{Outcome, config::load_overrides, error::FeedbackError, run};
use form_args::FormError;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let outcome = run(
        std::env::args_os(),
        load_overrides(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    match outcome {
        Ok(Outcome::Accepted) => Ok(ExitCode::SUCCESS),
        Ok(Outcome::Rejected) => Ok(ExitCode::FAILURE),
        // clap renders its own help, version and usage errors.
        Err(FeedbackError::Form(FormError::CliParsing(err))) => err.exit(),
        Err(err) => Err(err.into()),
    }
}
