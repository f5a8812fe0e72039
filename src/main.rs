//! Purpose: `postdeck` CLI entry point.
//! Role: Binary crate root; parses args, bootstraps the store, runs the shell.
//! Invariants: Fatal errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.

use clap::{Parser, ValueEnum};
use postdeck::api::{DEFAULT_BASE_URL, Error, ErrorStyle, RemoteClient, Store, to_exit_code};
use postdeck::shell::Shell;
use serde_json::json;
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "postdeck", version, about = "Manage posts on a remote REST service")]
struct Cli {
    #[arg(
        long,
        default_value = DEFAULT_BASE_URL,
        help = "Base URL of the posts service"
    )]
    base_url: String,
    #[arg(
        long,
        default_value = "fixed",
        value_enum,
        help = "Error message detail: fixed|detailed"
    )]
    errors: ErrorStyleCli,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ErrorStyleCli {
    Fixed,
    Detailed,
}

impl From<ErrorStyleCli> for ErrorStyle {
    fn from(style: ErrorStyleCli) -> Self {
        match style {
            ErrorStyleCli::Fixed => ErrorStyle::Fixed,
            ErrorStyleCli::Detailed => ErrorStyle::Detailed,
        }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let client = RemoteClient::new(cli.base_url)?;
    let store = Store::new(client).with_error_style(cli.errors.into());
    let stdin = io::stdin();
    Shell::new(store).run(stdin.lock(), io::stdout())
}

fn emit_error(err: &Error) {
    let envelope = json!({
        "error": {
            "kind": err.kind().as_str(),
            "message": err.to_string(),
        }
    });
    eprintln!("{envelope}");
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
