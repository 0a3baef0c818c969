//! Ministry Suite command-line tool.
//!
//! Usage:
//!   ministry --user <uuid> sermon list
//!   ministry --user <uuid> sermon edit <id> --title "Amazing Grace"
//!
//! The user may also be given through `MINISTRY_USER` and the database path
//! through `MINISTRY_DB`.

use anyhow::Result;
use clap::Parser;
use ministry_cli::{run, Cli};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    run(cli, &mut std::io::stdout()).await
}
