use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Numeric team identifier as used by the NHL stats API (`team.id`).
pub type TeamId = u32;

// ---------------------------------------------------------------------------
// GameStart – one row of the game log
// ---------------------------------------------------------------------------

/// A single goalie appearance (one row of the source table).
///
/// Column names follow the flattened NHL API export the FPTS column was
/// computed from (`person.fullName`, `team.id`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GameStartRecord")]
pub struct GameStart {
    #[serde(rename = "person.fullName")]
    pub player_name: String,

    #[serde(rename = "team.id")]
    pub team_id: TeamId,

    #[serde(rename = "team.name")]
    pub team_name: String,

    #[serde(rename = "opponent.id")]
    pub opponent_id: TeamId,

    #[serde(rename = "opponent.name")]
    pub opponent_name: String,

    #[serde(rename = "isHome")]
    pub is_home: bool,

    /// 0 or 1 per row; summed to get total starts.
    #[serde(rename = "stat.gamesStarted")]
    pub games_started: u32,

    #[serde(rename = "FPTS")]
    pub fantasy_points: f64,
}

/// Row as it appears on disk, before the team name columns are merged.
#[derive(Deserialize)]
struct GameStartRecord {
    #[serde(rename = "person.fullName")]
    player_name: String,

    #[serde(rename = "team.id")]
    team_id: TeamId,

    #[serde(rename = "team.name", default)]
    team_name: String,

    /// Older exports carry the team name in a plain `name` column, sometimes
    /// next to `team.name`.
    #[serde(rename = "name", default)]
    legacy_team_name: String,

    #[serde(rename = "opponent.id")]
    opponent_id: TeamId,

    #[serde(rename = "opponent.name", default)]
    opponent_name: String,

    #[serde(rename = "isHome", deserialize_with = "deserialize_flag")]
    is_home: bool,

    #[serde(rename = "stat.gamesStarted", deserialize_with = "deserialize_count")]
    games_started: u32,

    #[serde(rename = "FPTS")]
    fantasy_points: f64,
}

impl From<GameStartRecord> for GameStart {
    fn from(rec: GameStartRecord) -> Self {
        let team_name = if rec.team_name.is_empty() {
            rec.legacy_team_name
        } else {
            rec.team_name
        };
        GameStart {
            player_name: rec.player_name,
            team_id: rec.team_id,
            team_name,
            opponent_id: rec.opponent_id,
            opponent_name: rec.opponent_name,
            is_home: rec.is_home,
            games_started: rec.games_started,
            fantasy_points: rec.fantasy_points,
        }
    }
}

// -- Lenient scalar parsing --
//
// Pandas writes booleans as `True`/`False` and integer columns that once held
// a NaN as `1.0`, so both need more than the default serde impls.

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Int(u64),
    Float(f64),
    Text(String),
}

pub(crate) fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Some(true),
        "false" | "f" | "0" | "no" => Some(false),
        _ => None,
    }
}

pub(crate) fn count_from_f64(v: f64) -> Option<u32> {
    (v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64).then_some(v as u32)
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    use serde::de::Error;
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Int(0) => Ok(false),
        FlagRepr::Int(1) => Ok(true),
        FlagRepr::Int(i) => Err(D::Error::custom(format!("expected boolean flag, got {i}"))),
        FlagRepr::Text(s) => {
            parse_flag(&s).ok_or_else(|| D::Error::custom(format!("expected boolean flag, got '{s}'")))
        }
    }
}

fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    use serde::de::Error;
    let value = match CountRepr::deserialize(deserializer)? {
        CountRepr::Int(i) => u32::try_from(i).ok(),
        CountRepr::Float(f) => count_from_f64(f),
        CountRepr::Text(s) => s.trim().parse::<f64>().ok().and_then(count_from_f64),
    };
    value.ok_or_else(|| D::Error::custom("expected a non-negative whole number of games"))
}

// ---------------------------------------------------------------------------
// GoalieDataset – the complete loaded game log
// ---------------------------------------------------------------------------

/// The full parsed game log with pre-computed filter options.
///
/// Built once at load time and shared read-only (behind an `Arc`) for the
/// rest of the process.
#[derive(Debug, Clone, Default)]
pub struct GoalieDataset {
    /// All appearances, in file order.
    pub starts: Vec<GameStart>,
    /// Every team id appearing as either side of a game.
    pub team_ids: BTreeSet<TeamId>,
    /// Team name for each id, when the source carried names.
    pub team_names: BTreeMap<TeamId, String>,
}

impl GoalieDataset {
    /// Build the option indices from the loaded rows.
    ///
    /// Names missing on one side of a row (most exports only name the team
    /// side) are filled in from the id → name index, so name-keyed filters
    /// see the same teams on both sides.
    pub fn from_starts(mut starts: Vec<GameStart>) -> Self {
        let mut team_ids = BTreeSet::new();
        let mut team_names = BTreeMap::new();

        for gs in &starts {
            team_ids.insert(gs.team_id);
            team_ids.insert(gs.opponent_id);
            if !gs.team_name.is_empty() {
                team_names
                    .entry(gs.team_id)
                    .or_insert_with(|| gs.team_name.clone());
            }
            if !gs.opponent_name.is_empty() {
                team_names
                    .entry(gs.opponent_id)
                    .or_insert_with(|| gs.opponent_name.clone());
            }
        }

        for gs in &mut starts {
            if gs.team_name.is_empty() {
                if let Some(name) = team_names.get(&gs.team_id) {
                    gs.team_name = name.clone();
                }
            }
            if gs.opponent_name.is_empty() {
                if let Some(name) = team_names.get(&gs.opponent_id) {
                    gs.opponent_name = name.clone();
                }
            }
        }

        GoalieDataset {
            starts,
            team_ids,
            team_names,
        }
    }

    /// Sorted, de-duplicated team names (single-select dropdown options).
    pub fn sorted_team_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.team_names.values().collect();
        names.into_iter().cloned().collect()
    }

    /// Number of appearances.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::start;
    use super::*;

    #[test]
    fn test_flag_parsing_accepts_pandas_spelling() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_count_from_float_rejects_fractions() {
        assert_eq!(count_from_f64(1.0), Some(1));
        assert_eq!(count_from_f64(0.5), None);
        assert_eq!(count_from_f64(-1.0), None);
        assert_eq!(count_from_f64(f64::NAN), None);
    }

    #[test]
    fn test_dataset_indexes_both_sides() {
        let ds = GoalieDataset::from_starts(vec![
            start("A", 6, 10, true, 1, 5.0),
            start("B", 3, 6, false, 1, 2.0),
        ]);
        assert_eq!(ds.team_ids.iter().copied().collect::<Vec<_>>(), vec![3, 6, 10]);
        assert_eq!(ds.team_names.get(&10).map(String::as_str), Some("Team 10"));
        assert_eq!(ds.sorted_team_names(), vec!["Team 10", "Team 3", "Team 6"]);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_missing_side_names_filled_by_id() {
        let mut home = start("Linus Ullmark", 6, 10, true, 1, 5.0);
        home.opponent_name.clear();
        let mut away = start("Ilya Samsonov", 10, 6, false, 1, 2.0);
        away.opponent_name.clear();
        let mut unnamed = start("Jake Allen", 8, 6, true, 1, 1.0);
        unnamed.team_name.clear();
        unnamed.opponent_name.clear();

        let ds = GoalieDataset::from_starts(vec![home, away, unnamed]);
        assert_eq!(ds.starts[0].opponent_name, "Team 10");
        assert_eq!(ds.starts[1].opponent_name, "Team 6");
        assert_eq!(ds.starts[2].team_name, "");
        assert_eq!(ds.starts[2].opponent_name, "Team 6");
        assert_eq!(ds.sorted_team_names(), vec!["Team 10", "Team 6"]);
    }
}
