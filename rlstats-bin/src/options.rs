use clap::{Parser, Subcommand};
use rlstats_lib::{Platform, Stat, RANKED_DOUBLES};

/// Command-line interface for the Rocket League Stats API
#[derive(Parser, Debug)]
#[command(name = "rlstats", version, about)]
pub(crate) struct RlstatsOptions {
    /// API key for rocketleaguestats.com
    #[arg(long, env = "RLSTATS_API_KEY", hide_env_values = true)]
    pub(crate) api_key: String,

    /// Dispatch requests immediately instead of spacing them out per key
    /// and retrying on throttling
    #[arg(long)]
    pub(crate) no_rate_limit: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = rlstats_lib::DEFAULT_TIMEOUT_SECS)]
    pub(crate) timeout: u64,

    /// Print raw JSON instead of a human-readable summary
    #[arg(long)]
    pub(crate) json: bool,

    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// List the platforms the API knows about
    Platforms,
    /// List all playlists with their current populations
    Playlists,
    /// List all competitive seasons
    Seasons,
    /// List the ranked tiers of the latest season
    Tiers,
    /// Look up a single player
    Player {
        /// Steam id, gamertag, or PSN name
        unique_id: String,
        /// Platform the player plays on (steam, ps4, xboxone)
        #[arg(long)]
        platform: Platform,
    },
    /// Search players by display name
    Search {
        /// Display name to search for
        display_name: String,
        /// Zero-based result page
        #[arg(long, default_value_t = 0)]
        page: u64,
    },
    /// Show the top 100 of a ranked playlist
    Ranked {
        /// Ranked playlist id (10: duel, 11: doubles, 12: solo standard,
        /// 13: standard)
        #[arg(long, default_value_t = RANKED_DOUBLES)]
        playlist: u64,
    },
    /// Show the top 100 players by a lifetime stat
    Stat {
        /// Stat to rank by (wins, goals, mvps, saves, shots, assists)
        stat: Stat,
    },
}
