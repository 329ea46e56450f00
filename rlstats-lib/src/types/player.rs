use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::PlatformInfo;

/// Ranked standings of one player: season id → playlist id → rank.
pub type RankedSeasons = HashMap<u64, HashMap<u64, PlaylistRank>>;

/// A player record.
///
/// Not every endpoint populates every field; leaderboard entries for
/// example omit the profile URLs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Platform-specific id, e.g. a 64-bit Steam id or a gamertag
    pub unique_id: String,
    /// Current display name
    pub display_name: String,
    /// The platform the player plays on
    pub platform: PlatformInfo,
    /// URL of the player's avatar image
    #[serde(default)]
    pub avatar: Option<String>,
    /// URL of the player's profile on rocketleaguestats.com
    #[serde(default)]
    pub profile_url: Option<String>,
    /// URL of the player's signature image
    #[serde(default)]
    pub signature_url: Option<String>,
    /// Lifetime stat counters
    #[serde(default)]
    pub stats: PlayerStats,
    /// Ranked standings, keyed by season id and playlist id
    #[serde(default)]
    pub ranked_seasons: RankedSeasons,
}

/// Lifetime stat counters of a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerStats {
    /// Total wins
    #[serde(default)]
    pub wins: u64,
    /// Total goals scored
    #[serde(default)]
    pub goals: u64,
    /// Total MVP awards
    #[serde(default)]
    pub mvps: u64,
    /// Total saves
    #[serde(default)]
    pub saves: u64,
    /// Total shots taken
    #[serde(default)]
    pub shots: u64,
    /// Total assists
    #[serde(default)]
    pub assists: u64,
}

/// A player's rank in one playlist of one season.
///
/// Fields the API did not report are `None`; early seasons tracked fewer
/// of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRank {
    /// Current rank points / MMR
    #[serde(default)]
    pub rank_points: Option<i64>,
    /// Matches played this season
    #[serde(default)]
    pub matches_played: Option<u64>,
    /// Tier id, resolvable via `/data/tiers`
    #[serde(default)]
    pub tier: Option<u64>,
    /// Division within the tier
    #[serde(default)]
    pub division: Option<u64>,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | wins: {}, goals: {}, mvps: {}, saves: {}, shots: {}, assists: {}",
            self.display_name,
            self.platform.name,
            self.stats.wins,
            self.stats.goals,
            self.stats.mvps,
            self.stats.saves,
            self.stats.shots,
            self.stats.assists,
        )
    }
}
