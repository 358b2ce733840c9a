//! Run pdata calls against a primitive's attribute arrays, one call per line.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    process::ExitCode,
};

use clap::Parser;
use pdata::script::{self, ScriptValue};

mod cli;
mod parse;

use cli::Cli;

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(error) => {
                tracing::error!(?path, %error, "couldn't open script");
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let mut store = cli.build_store();
    tracing::info!(
        layout = %cli.layout,
        arrays = store.len(),
        size = ?store.size().ok(),
        "created primitive"
    );

    match run(&mut store, input, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "couldn't run script");
            ExitCode::FAILURE
        }
    }
}

/// Run every line of `input`, writing the results of calls that return something to `output`.
///
/// Lines that fail to parse, and calls that fail, are reported and skipped.
fn run(
    store: &mut pdata::AttributeStore,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let call = match parse::parse_line(&line) {
            Ok(Some(call)) => call,
            Ok(None) => continue,
            Err(error) => {
                tracing::warn!(line = number + 1, %error, "skipping line");
                continue;
            }
        };
        match script::dispatch(store, &call) {
            ScriptValue::Void => {}
            value => writeln!(output, "{value}")?,
        }
    }
    Ok(())
}
