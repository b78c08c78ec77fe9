//! Strictly Ladders - terminal snakes and ladders
//!
//! Drives the `strictly_ladders` engine from the terminal with human and AI
//! players and a simulated piece animator.

#![warn(missing_docs)]

mod cli;
mod console;
mod driver;
mod mover;
mod players;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use driver::Driver;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.game_config()?;
    info!(
        players = config.number_of_players(),
        ai = config.number_of_ai_players(),
        seed = ?cli.seed,
        "Starting Strictly Ladders"
    );

    let mut driver = Driver::new(&config, cli.seed)?;
    driver.run().await
}
