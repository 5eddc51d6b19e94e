use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use focusview::commands::{Command, RenderCommand};
use focusview::config::{build_engine, resolve_root_folder, resolve_source};
use focusview::error::AppResult;

/// Focusview - Render filtered views of an OmniFocus task hierarchy
#[derive(Parser)]
#[command(name = "fv")]
#[command(version = "0.1.0")]
#[command(about = "Render filtered views of an OmniFocus task hierarchy", long_about = None)]
struct Args {
    /// JSON snapshot file to query instead of the live application
    /// (can also be set via FV_SNAPSHOT env var)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Query the running OmniFocus application even if a snapshot is configured
    #[arg(long, global = true)]
    live: bool,

    /// Folder name that ends ancestry walks (can also be set via FV_ROOT_FOLDER env var)
    #[arg(long, global = true)]
    root_folder: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Initialize logging from the RUST_LOG environment variable
///
/// Examples:
/// - `RUST_LOG=trace` - show all trace logs, including ancestry walks
/// - `RUST_LOG=debug` - show lookups and misses
/// - `RUST_LOG=warn` - show absorbed data source failures only (default)
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> AppResult<()> {
    let args = Args::parse();
    run_with_args(&args).await
}

/// Run the application with the given arguments
async fn run_with_args(args: &Args) -> AppResult<()> {
    let source = resolve_source(args.snapshot.clone(), args.live);
    let root_folder = resolve_root_folder(args.root_folder.clone());
    let engine = build_engine(source, root_folder);

    match &args.command {
        Some(Command::Render(
            cmd @ RenderCommand {
                watch: Some(seconds),
                ..
            },
        )) => {
            let interval = Duration::from_secs(*seconds);
            cmd.watch(&engine, interval, |output| println!("{}\n", output))
                .await?;
        }
        Some(cmd) => {
            let output = cmd.execute(&engine).await?;
            println!("{}", output);
        }
        None => {
            println!("Welcome to Focusview!");
            println!("Use 'fv --help' for usage information.");
        }
    }

    Ok(())
}
