use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A platform Rocket League is played on.
///
/// The numeric ids are fixed upstream and used as the `platform_id`
/// query parameter of the player endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    /// Steam (id 1)
    Steam,
    /// PlayStation 4 (id 2)
    Ps4,
    /// Xbox One (id 3)
    XboxOne,
}

/// The given string does not name a known platform
#[derive(Debug, Error, PartialEq)]
#[error("unknown platform `{0}`, expected one of: steam, ps4, xboxone")]
pub struct UnknownPlatform(String);

impl Platform {
    /// The upstream id of this platform
    #[must_use]
    pub const fn id(self) -> u64 {
        match self {
            Self::Steam => 1,
            Self::Ps4 => 2,
            Self::XboxOne => 3,
        }
    }

    /// Resolve an upstream platform id; unknown ids yield `None`
    #[must_use]
    pub const fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Self::Steam),
            2 => Some(Self::Ps4),
            3 => Some(Self::XboxOne),
            _ => None,
        }
    }

    /// The platform name as the API spells it
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Steam => "Steam",
            Self::Ps4 => "PS4",
            Self::XboxOne => "XboxOne",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "steam" => Ok(Self::Steam),
            "ps4" | "psn" => Ok(Self::Ps4),
            "xboxone" | "xbox" => Ok(Self::XboxOne),
            _ => Err(UnknownPlatform(input.to_string())),
        }
    }
}

/// Wire form of a platform as returned by `/data/platforms` and embedded
/// in player records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlatformInfo {
    /// Upstream platform id
    pub id: u64,
    /// Display name of the platform
    pub name: String,
}

impl PlatformInfo {
    /// The known [`Platform`] this record describes, if any
    #[must_use]
    pub const fn platform(&self) -> Option<Platform> {
        Platform::from_id(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for platform in [Platform::Steam, Platform::Ps4, Platform::XboxOne] {
            assert_eq!(Platform::from_id(platform.id()), Some(platform));
        }
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(Platform::from_id(0), None);
        assert_eq!(Platform::from_id(42), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("steam".parse(), Ok(Platform::Steam));
        assert_eq!("XBOX".parse(), Ok(Platform::XboxOne));
        assert!("wii".parse::<Platform>().is_err());
    }

    #[test]
    fn test_wire_form() {
        let info: PlatformInfo = serde_json::from_str(r#"{"id":2,"name":"PS4"}"#).unwrap();
        assert_eq!(info.platform(), Some(Platform::Ps4));
    }
}
