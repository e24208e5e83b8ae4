use crate::demo::{run_batch_file, run_demo, run_evaluate, BatchArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_cards::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Card Applications",
    about = "Run the credit card application intake service or evaluate applications offline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single applicant with the loyalty scheme validator
    Evaluate(EvaluateArgs),
    /// Evaluate every row of an applications CSV file
    Batch(BatchArgs),
    /// Print the reference scenarios and their decisions
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch_file(args),
        Command::Demo => run_demo(),
    }
}
