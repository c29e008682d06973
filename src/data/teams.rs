use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::TeamId;

/// Sentinel id used by the single-select dropdowns to mean "every team".
pub const ALL_TEAMS_ID: TeamId = 0;
pub const ALL_TEAMS_LABEL: &str = "ALL TEAMS";

/// Default id → code table for the 2022-23 season.
pub const NHL_TEAM_CODES: &[(TeamId, &str)] = &[
    (1, "NJD"),
    (2, "NYI"),
    (3, "NYR"),
    (4, "PHI"),
    (5, "PIT"),
    (6, "BOS"),
    (7, "BUF"),
    (8, "MTL"),
    (9, "OTT"),
    (10, "TOR"),
    (12, "CAR"),
    (13, "FLA"),
    (14, "TBL"),
    (15, "WSH"),
    (16, "CHI"),
    (17, "DET"),
    (18, "NSH"),
    (19, "STL"),
    (20, "CGY"),
    (21, "COL"),
    (22, "EDM"),
    (23, "VAN"),
    (24, "ANA"),
    (25, "DAL"),
    (26, "LAK"),
    (28, "SJS"),
    (29, "CBJ"),
    (30, "MIN"),
    (52, "WPG"),
    (53, "ARI"),
    (54, "VGK"),
    (55, "SEA"),
];

/// Full franchise names for the same ids, as `team.name` carries them.
pub const NHL_TEAM_NAMES: &[(TeamId, &str)] = &[
    (1, "New Jersey Devils"),
    (2, "New York Islanders"),
    (3, "New York Rangers"),
    (4, "Philadelphia Flyers"),
    (5, "Pittsburgh Penguins"),
    (6, "Boston Bruins"),
    (7, "Buffalo Sabres"),
    (8, "Montréal Canadiens"),
    (9, "Ottawa Senators"),
    (10, "Toronto Maple Leafs"),
    (12, "Carolina Hurricanes"),
    (13, "Florida Panthers"),
    (14, "Tampa Bay Lightning"),
    (15, "Washington Capitals"),
    (16, "Chicago Blackhawks"),
    (17, "Detroit Red Wings"),
    (18, "Nashville Predators"),
    (19, "St. Louis Blues"),
    (20, "Calgary Flames"),
    (21, "Colorado Avalanche"),
    (22, "Edmonton Oilers"),
    (23, "Vancouver Canucks"),
    (24, "Anaheim Ducks"),
    (25, "Dallas Stars"),
    (26, "Los Angeles Kings"),
    (28, "San Jose Sharks"),
    (29, "Columbus Blue Jackets"),
    (30, "Minnesota Wild"),
    (52, "Winnipeg Jets"),
    (53, "Arizona Coyotes"),
    (54, "Vegas Golden Knights"),
    (55, "Seattle Kraken"),
];

#[derive(Debug, Error)]
pub enum TeamCodeError {
    #[error("failed to read team code file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse team code file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid code '{code}' for team {id}: expected three uppercase letters")]
    InvalidCode { id: TeamId, code: String },

    #[error("team id 0 is reserved for 'ALL TEAMS'")]
    ReservedId,
}

// ---------------------------------------------------------------------------
// TeamCodeTable
// ---------------------------------------------------------------------------

/// Static mapping from numeric team id to three-letter code.
///
/// Configuration data only: used to label filter options and the table's
/// team column, never to decide which rows match.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCodeTable {
    codes: BTreeMap<TeamId, String>,
}

impl Default for TeamCodeTable {
    fn default() -> Self {
        Self {
            codes: NHL_TEAM_CODES
                .iter()
                .map(|&(id, code)| (id, code.to_string()))
                .collect(),
        }
    }
}

impl TeamCodeTable {
    /// Build a table from arbitrary pairs, validating every code.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, TeamCodeError>
    where
        I: IntoIterator<Item = (TeamId, String)>,
    {
        let mut codes = BTreeMap::new();
        for (id, code) in pairs {
            if id == ALL_TEAMS_ID {
                return Err(TeamCodeError::ReservedId);
            }
            let valid = code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase());
            if !valid {
                return Err(TeamCodeError::InvalidCode { id, code });
            }
            codes.insert(id, code);
        }
        Ok(Self { codes })
    }

    /// Parse a JSON object of the form `{ "1": "NJD", "2": "NYI", ... }`.
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self, TeamCodeError> {
        let raw: BTreeMap<TeamId, String> =
            serde_json::from_str(text).map_err(|source| TeamCodeError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_pairs(raw)
    }

    /// Load a JSON team code file from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, TeamCodeError> {
        let text = std::fs::read_to_string(path).map_err(|source| TeamCodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    pub fn code(&self, id: TeamId) -> Option<&str> {
        self.codes.get(&id).map(String::as_str)
    }

    /// Display label for a team id: its code, the sentinel label for id 0,
    /// or the bare number when the id is unknown.
    pub fn label(&self, id: TeamId) -> String {
        if id == ALL_TEAMS_ID {
            return ALL_TEAMS_LABEL.to_string();
        }
        self.code(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    /// Every configured id, ascending.
    pub fn ids(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.codes.keys().copied()
    }

    /// Dropdown options for the single-select variant: the sentinel first,
    /// then every team.
    pub fn options_with_sentinel(&self) -> Vec<(TeamId, String)> {
        std::iter::once((ALL_TEAMS_ID, ALL_TEAMS_LABEL.to_string()))
            .chain(self.codes.iter().map(|(id, code)| (*id, code.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_the_league() {
        let table = TeamCodeTable::default();
        assert_eq!(table.len(), 32);
        assert_eq!(table.code(10), Some("TOR"));
        assert_eq!(table.code(11), None);
    }

    #[test]
    fn test_franchise_names_line_up_with_codes() {
        let code_ids: Vec<TeamId> = NHL_TEAM_CODES.iter().map(|&(id, _)| id).collect();
        let name_ids: Vec<TeamId> = NHL_TEAM_NAMES.iter().map(|&(id, _)| id).collect();
        assert_eq!(code_ids, name_ids);
    }

    #[test]
    fn test_labels() {
        let table = TeamCodeTable::default();
        assert_eq!(table.label(55), "SEA");
        assert_eq!(table.label(ALL_TEAMS_ID), "ALL TEAMS");
        assert_eq!(table.label(99), "99");
    }

    #[test]
    fn test_sentinel_option_comes_first() {
        let options = TeamCodeTable::default().options_with_sentinel();
        assert_eq!(options.len(), 33);
        assert_eq!(options[0], (0, "ALL TEAMS".to_string()));
        assert_eq!(options[1], (1, "NJD".to_string()));
    }

    #[test]
    fn test_json_override() {
        let table =
            TeamCodeTable::from_json_str(r#"{"1": "AAA", "2": "BBB"}"#, Path::new("codes.json"))
                .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.label(2), "BBB");
    }

    #[test]
    fn test_invalid_code_rejected() {
        let err = TeamCodeTable::from_json_str(r#"{"1": "nj"}"#, Path::new("codes.json"))
            .unwrap_err();
        assert!(matches!(err, TeamCodeError::InvalidCode { id: 1, .. }));
    }

    #[test]
    fn test_sentinel_id_reserved() {
        let err = TeamCodeTable::from_pairs([(0, "ALL".to_string())]).unwrap_err();
        assert!(matches!(err, TeamCodeError::ReservedId));
    }

    #[test]
    fn test_bad_json_reports_path() {
        let err = TeamCodeTable::from_json_str("[1, 2]", Path::new("codes.json")).unwrap_err();
        assert!(err.to_string().contains("codes.json"));
    }
}
