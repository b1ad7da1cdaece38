mod cli;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli::predict::{cmd_predict, PredictArgs};
use cli::replay::{cmd_replay, ReplayArgs};

#[derive(Parser)]
#[command(
    name = "seqvm",
    version,
    about = "Predict integer sequences by synthesizing tiny tape-machine programs"
)]
struct Cli {
    /// Log search progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a program reproducing the target and predict what follows
    Predict(PredictArgs),
    /// Re-run a saved program bundle
    Replay(ReplayArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "seqvm=debug" } else { "seqvm=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Predict(args) => cmd_predict(args),
        Command::Replay(args) => cmd_replay(args),
    }
}
