//! `rlstats` queries the Rocket League Stats API from the command line.
//!
//! The binary is a thin wrapper around `rlstats-lib`; it builds a client
//! from the flags, runs one subcommand, and prints the result.
//!
//! Look up a player:
//! ```sh
//! rlstats player 76561198033338223 --platform steam
//! ```
//!
//! Search for a display name:
//! ```sh
//! rlstats search Mike --page 0
//! ```
//!
//! The API key is taken from `--api-key` or the `RLSTATS_API_KEY`
//! environment variable.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use secrecy::SecretString;
use serde_json::to_string_pretty;

use rlstats_lib::{Client, ClientBuilder};

mod options;

use options::{Command, RlstatsOptions};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_module("rlstats", level)
        .filter_module("rlstats_lib", level)
        .init();
}

fn client(options: &RlstatsOptions) -> Result<Client> {
    ClientBuilder::builder()
        .api_key(SecretString::from(options.api_key.clone()))
        .rate_limited(!options.no_rate_limit)
        .timeout(Duration::from_secs(options.timeout))
        .build()
        .client()
        .context("cannot create the API client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = RlstatsOptions::parse();
    init_logging(options.verbose);
    let client = client(&options)?;

    match &options.command {
        Command::Platforms => {
            let platforms = client.platforms().await?;
            if options.json {
                println!("{}", to_string_pretty(&platforms)?);
            } else {
                for platform in platforms {
                    println!("{} (id {})", platform, platform.id());
                }
            }
        }
        Command::Playlists => {
            let playlists = client.playlists().await?;
            if options.json {
                println!("{}", to_string_pretty(&playlists)?);
            } else {
                for playlist in playlists {
                    let platform = playlist
                        .platform()
                        .map_or_else(|| format!("platform {}", playlist.platform_id), |p| p.to_string());
                    println!(
                        "{} on {}: {} players",
                        playlist.name, platform, playlist.population.players
                    );
                }
            }
        }
        Command::Seasons => {
            let seasons = client.seasons().await?;
            if options.json {
                println!("{}", to_string_pretty(&seasons)?);
            } else {
                for season in seasons {
                    let state = if season.is_current() { "running" } else { "ended" };
                    println!("Season {} ({state})", season.season_id);
                }
            }
        }
        Command::Tiers => {
            let tiers = client.tiers().await?;
            if options.json {
                println!("{}", to_string_pretty(&tiers)?);
            } else {
                for tier in tiers {
                    println!("{:>2}: {}", tier.tier_id, tier.tier_name);
                }
            }
        }
        Command::Player {
            unique_id,
            platform,
        } => {
            let player = client.player(unique_id, *platform).await?;
            if options.json {
                println!("{}", to_string_pretty(&player)?);
            } else {
                println!("{player}");
            }
        }
        Command::Search { display_name, page } => {
            let results = client.search_players(display_name, *page).await?;
            if options.json {
                println!("{}", to_string_pretty(&results)?);
            } else {
                println!(
                    "Page {} of {} total results:",
                    results.page, results.total_results
                );
                for player in &results.data {
                    println!("{player}");
                }
                if results.has_more() {
                    println!("(more pages available)");
                }
            }
        }
        Command::Ranked { playlist } => {
            let players = client.ranked_leaderboard(*playlist).await?;
            print_leaderboard(&players, options.json)?;
        }
        Command::Stat { stat } => {
            let players = client.stat_leaderboard(*stat).await?;
            print_leaderboard(&players, options.json)?;
        }
    }

    Ok(())
}

fn print_leaderboard(players: &[rlstats_lib::Player], json: bool) -> Result<()> {
    if json {
        println!("{}", to_string_pretty(players)?);
    } else {
        for (position, player) in players.iter().enumerate() {
            println!("{:>3}. {player}", position + 1);
        }
    }
    Ok(())
}
