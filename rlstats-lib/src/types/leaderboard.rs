use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stat the `/leaderboard/stat` endpoint can rank players by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Matches won
    Wins,
    /// Goals scored
    Goals,
    /// MVP awards
    Mvps,
    /// Saves made
    Saves,
    /// Shots taken
    Shots,
    /// Assists given
    Assists,
}

/// The given string does not name a known leaderboard stat
#[derive(Debug, Error, PartialEq)]
#[error("unknown stat `{0}`, expected one of: wins, goals, mvps, saves, shots, assists")]
pub struct UnknownStat(String);

impl Stat {
    /// The stat name as the API spells it in the `type` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wins => "wins",
            Self::Goals => "goals",
            Self::Mvps => "mvps",
            Self::Saves => "saves",
            Self::Shots => "shots",
            Self::Assists => "assists",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = UnknownStat;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "wins" => Ok(Self::Wins),
            "goals" => Ok(Self::Goals),
            "mvps" => Ok(Self::Mvps),
            "saves" => Ok(Self::Saves),
            "shots" => Ok(Self::Shots),
            "assists" => Ok(Self::Assists),
            _ => Err(UnknownStat(input.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_matches_parse() {
        for stat in [
            Stat::Wins,
            Stat::Goals,
            Stat::Mvps,
            Stat::Saves,
            Stat::Shots,
            Stat::Assists,
        ] {
            assert_eq!(stat.as_str().parse(), Ok(stat));
        }
    }

    #[test]
    fn test_unknown() {
        assert!("demos".parse::<Stat>().is_err());
    }
}
