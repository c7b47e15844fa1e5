mod repl;
mod runner;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    /// Print the tokens of each input.
    Lexer,
    /// Print the parsed program in its canonical form.
    Parser,
    /// Evaluate each input and print the result.
    Interpreter,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, value_enum, default_value_t = Mode::Interpreter)]
    mode: Mode,
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log: String,
    /// Source file to run. Starts a REPL when omitted.
    path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log)
            .with_context(|| format!("invalid log filter `{}`", cli.log))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.path {
        None => repl::start(cli.mode),
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            runner::execute(&source, cli.mode)
        }
    }
}
