//! Parlor CLI
//!
//! Serves the content API, live invalidation stream and client site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Parlor.
#[derive(Parser)]
#[command(name = "parlor", version, about = "Live content server for Parlor")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "parlor.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },
    /// Validate configuration
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    parlor::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { port, open } => {
            parlor::cmd::serve::run(&cli.config, port, open).await?;
        }
        Commands::Check { strict } => {
            parlor::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
