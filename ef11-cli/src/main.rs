//! ef11: certify two-agent allocations for EF[1,1] fairness.
//!
//! # Quick Start
//!
//! ```bash
//! ef11 check case.yaml
//! ef11 check case.json --json --exhaustive
//! ef11 validate case.yaml
//! ef11 demo
//! ```
//!
//! Exit codes: `0` EF[1,1] holds, `1` it does not, `2` input or
//! configuration error.

use clap::{ArgAction, Args, Parser, Subcommand};
use ef11_cli::{ConfigArgs, EXIT_ERROR, OutputFormat, Report, cmd_check, cmd_demo, cmd_validate};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ef11",
    version,
    about = "Certify two-agent allocations for EF[1,1] fairness",
    long_about = "ef11 decides whether an allocation of goods and chores between two agents\n\
        is envy-free up to one same-category chore and one same-category good.\n\n\
        Cases are YAML (or JSON, by extension) documents with valuations, optional\n\
        item categories, and the allocation to check."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    /// Log certifier decisions to stderr
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Certify the allocation in a case file
    Check(CheckArgs),

    /// Validate a case file without certifying it
    Validate(ValidateArgs),

    /// Certify the built-in worked example under both reference allocations
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to the case file
    case: PathBuf,

    /// Also print the item table
    #[arg(long)]
    items: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Path to the case file
    case: PathBuf,
}

#[derive(Args, Debug)]
struct DemoArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn output_format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else if std::io::stdout().is_terminal() {
        OutputFormat::Ansi
    } else {
        OutputFormat::Plain
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = output_format(cli.json);

    let result = match cli.command {
        Command::Check(args) => cmd_check(&args.case, &args.config, format, args.items),
        Command::Validate(args) => cmd_validate(&args.case, format),
        Command::Demo(args) => cmd_demo(&args.config, format),
    };

    match result {
        Ok(Report { text, code }) => {
            println!("{text}");
            ExitCode::from(code)
        }
        Err(msg) => {
            eprintln!("Error: {msg}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
