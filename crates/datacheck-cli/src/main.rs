mod errors;
mod logging;
mod parser;
mod rules_doc;
mod runner;
mod writer;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use datacheck_core::Overall;

const EXIT_PASS: i32 = 0;
const EXIT_FAIL: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `[STATUS] RULE - message` line per check (human-readable)
    Stdout,
    /// Bordered table of check results
    Table,
    /// JSON document written to --out
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the catalog of available rules and their parameters
    Rules,
}

#[derive(Parser, Debug)]
#[command(
    name = "datacheck",
    version,
    about = "DataCheck CLI - validate a cleaned dataset against declarative rules",
    long_about = "DataCheck loads a delimited text dataset, runs an ordered list of rule checks \
                  against it (optionally comparing it with the reference dataset it was derived \
                  from) and reports Pass, Fail or Error for every check.\n\n\
                  Exit codes: 0 every check passed, 1 at least one check did not pass, \
                  2 the run itself failed.\n\n\
                  Example usage:\n  \
                  datacheck --config cleaning.toml --output stdout"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the TOML (or .json) configuration file that lists the checks
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dataset to validate, overrides [dataset].path
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Reference (pre-transformation) dataset, overrides [dataset].reference
    #[arg(long, value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Output format for validation results
    #[arg(short, long, value_enum, default_value = "stdout")]
    pub output: OutputFormat,

    /// JSON destination: a file, a directory, or '-' for stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(err) = logging::init(args.verbose, args.log_json) {
        eprintln!("Warning: logging disabled: {:#}", err);
    }

    if let Some(Command::Rules) = args.command {
        rules_doc::print_rules_documentation();
        std::process::exit(EXIT_PASS);
    }

    let code = match runner::run(&args) {
        Ok(Overall::Pass) => EXIT_PASS,
        Ok(Overall::Fail) => EXIT_FAIL,
        Err(err) => {
            tracing::error!(error = %err, "validation run aborted");
            eprintln!("Error: {:#}", err);
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}
