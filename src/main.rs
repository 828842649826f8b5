//! hostmerge - merge domain blocklists into one Pi-hole hosts file.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use hostmerge::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Update {
            dry_run,
            output,
            summary,
        } => hostmerge::commands::update::run(dry_run, output, summary, &cli.config).await,
        Commands::Parse { file, format } => hostmerge::commands::parse::run(&file, format),
        Commands::Check { token } => hostmerge::commands::check::run(&token),
        Commands::Sources => hostmerge::commands::sources::run(&cli.config),
        Commands::Version => {
            println!("hostmerge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
