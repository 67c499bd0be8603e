//! Affinity CLI
//!
//! Command-line interface for the affinity ranking service: run the API
//! server, or run one-shot rankings and comparisons against the Steam API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use affinity_api::{ApiConfig, ApiServer, AppState};
use affinity_rank::compare;

/// Affinity - game library affinity ranking over the Steam Web API
#[derive(Parser)]
#[command(name = "affinity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Rank every friend of a player by affinity
    Rank {
        /// The subject's steamid
        steamid: String,
        /// Include the matching games per friend
        #[arg(long)]
        list_games: bool,
    },

    /// Compare two players' libraries
    Compare {
        /// First player's steamid
        player1: String,
        /// Second player's steamid
        player2: String,
        /// Include the matching games
        #[arg(long)]
        list_games: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "affinity=debug,info"
    } else {
        "affinity=info,warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    match cli.command {
        Commands::Serve { port, bind } => {
            let addr: SocketAddr = format!("{bind}:{port}")
                .parse()
                .with_context(|| format!("invalid bind address {bind}:{port}"))?;

            let server = ApiServer::new(config);
            // Handles keep the sweepers running for the process lifetime
            let _sweepers = server.start_sweepers();

            println!("{} http://{}", "Serving on".green().bold(), addr);
            server.run(addr).await.context("server failed")?;
        }

        Commands::Rank { steamid, list_games } => {
            let state = AppState::new(config);
            let response = state
                .ranker
                .rank(&steamid, list_games)
                .await
                .context("ranking failed")?;

            println!(
                "{} {} friends ranked",
                "OK".green().bold(),
                response.ranking.len()
            );
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Compare {
            player1,
            player2,
            list_games,
        } => {
            let state = AppState::new(config);
            let subject = state
                .ranker
                .owned_collection(&player1)
                .await
                .with_context(|| format!("failed to fetch library for {player1}"))?;
            let peer = state
                .ranker
                .owned_collection(&player2)
                .await
                .with_context(|| format!("failed to fetch library for {player2}"))?;

            let result = compare(&subject, &peer, list_games);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
