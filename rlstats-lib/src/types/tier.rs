use serde::{Deserialize, Serialize};

/// A ranked tier as returned by `/data/tiers`.
///
/// Unless a season is given upstream, tiers describe the latest season.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// Id of the tier, ascending with skill
    pub tier_id: u64,
    /// Human-readable tier name, e.g. `Champion I`
    pub tier_name: String,
}
