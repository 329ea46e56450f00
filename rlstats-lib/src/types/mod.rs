mod error;
mod leaderboard;
mod platform;
mod player;
mod playlist;
mod search;
mod season;
mod tier;

pub use error::{DispatchError, ErrorKind};
pub use leaderboard::{Stat, UnknownStat};
pub use platform::{Platform, PlatformInfo, UnknownPlatform};
pub use player::{Player, PlayerStats, PlaylistRank, RankedSeasons};
pub use playlist::{
    Playlist, Population, RANKED_DOUBLES, RANKED_DUEL, RANKED_PLAYLISTS, RANKED_SOLO_STANDARD,
    RANKED_STANDARD,
};
pub use search::SearchPage;
pub use season::Season;
pub use tier::Tier;

/// The rlstats `Result` type
pub type Result<T> = std::result::Result<T, crate::ErrorKind>;
