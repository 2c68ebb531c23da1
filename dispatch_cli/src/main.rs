use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio::runtime::{Builder, Runtime};

use crate::solve::SolveArgs;

mod parsers;
mod solve;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign the rides of a problem file to its drivers
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Print the JSON schema of the problem file
    Schema,
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve { args } => {
            let runtime = Builder::new_multi_thread().enable_all().build()?;
            run_to_completion(runtime, solve::run(args))?
        }
        Commands::Schema => {
            println!(
                "{}",
                dispatch_optimizer::json::schema::generate_json_schema()?
            );
        }
    }

    Ok(())
}

/// Drives `future` to completion, then drops the runtime without joining blocking
/// tasks that are still running, such as candidates past their budget.
fn run_to_completion<F: Future>(runtime: Runtime, future: F) -> F::Output {
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    output
}
