use serde::{Deserialize, Serialize};

/// A competitive season as returned by `/data/seasons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    /// Unique id of the season
    pub season_id: u64,
    /// Unix timestamp of the season start
    pub started_on: i64,
    /// Unix timestamp of the season end; `None` while the season is running
    pub ended_on: Option<i64>,
}

impl Season {
    /// Whether this season is still running
    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.ended_on.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_season_has_no_end() {
        let seasons: Vec<Season> = serde_json::from_str(
            r#"[{"seasonId":1,"startedOn":1470000000,"endedOn":1480000000},
                {"seasonId":5,"startedOn":1499212800,"endedOn":null}]"#,
        )
        .unwrap();
        assert!(!seasons[0].is_current());
        assert!(seasons[1].is_current());
    }
}
