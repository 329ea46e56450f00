use serde::{Deserialize, Serialize};

use super::Platform;

/// Playlist id of ranked duel (1v1)
pub const RANKED_DUEL: u64 = 10;
/// Playlist id of ranked doubles (2v2)
pub const RANKED_DOUBLES: u64 = 11;
/// Playlist id of ranked solo standard (3v3 solo queue)
pub const RANKED_SOLO_STANDARD: u64 = 12;
/// Playlist id of ranked standard (3v3)
pub const RANKED_STANDARD: u64 = 13;

/// All ranked playlist ids
pub const RANKED_PLAYLISTS: [u64; 4] = [
    RANKED_DUEL,
    RANKED_DOUBLES,
    RANKED_SOLO_STANDARD,
    RANKED_STANDARD,
];

/// A playlist as returned by `/data/playlists`.
///
/// There is one record per combination of game mode and platform, so the
/// `id` alone does not identify a record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Game mode id, shared across platforms
    pub id: u64,
    /// Game mode name, e.g. `Ranked Duels` or `Hoops`
    pub name: String,
    /// Upstream id of the platform this record counts players for
    pub platform_id: u64,
    /// Current player population on this platform
    pub population: Population,
}

/// Player count of a playlist on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Population {
    /// Number of players in the playlist when last sampled
    pub players: u64,
    /// Unix timestamp of the last population sample
    pub updated_at: i64,
}

impl Playlist {
    /// The known [`Platform`] this record belongs to, if any
    #[must_use]
    pub const fn platform(&self) -> Option<Platform> {
        Platform::from_id(self.platform_id)
    }

    /// Whether this playlist is one of the four ranked queues
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        RANKED_PLAYLISTS.contains(&self.id)
    }
}
