use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{GameStart, TeamId};
use super::teams::TeamCodeTable;

// ---------------------------------------------------------------------------
// AggregateRow – one line of the per-player summary table
// ---------------------------------------------------------------------------

/// Per-player summary, serialized with the table's display headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    #[serde(rename = "Name")]
    pub name: String,
    /// Three-letter team code (or the raw id when it has no code).
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "# Starts")]
    pub starts: u32,
    /// Mean FPTS, rounded to 2 decimals.
    #[serde(rename = "Av. PTS")]
    pub avg_points: f64,
}

impl AggregateRow {
    pub const HEADERS: [&'static str; 4] = ["Name", "Team", "# Starts", "Av. PTS"];
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    starts: u32,
    points_sum: f64,
    appearances: usize,
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Group filtered rows by (player, team id), then sum starts and average
/// FPTS per group.
///
/// The mean is taken on the raw points and only rounded afterwards. Rows come
/// back ordered by starts, then average, both descending; exact ties fall
/// back to name and team code ascending.
pub fn aggregate(rows: &[&GameStart], codes: &TeamCodeTable) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(&str, TeamId), GroupAccumulator> = BTreeMap::new();

    for gs in rows {
        let acc = groups
            .entry((gs.player_name.as_str(), gs.team_id))
            .or_default();
        acc.starts += gs.games_started;
        acc.points_sum += gs.fantasy_points;
        acc.appearances += 1;
    }

    let mut table: Vec<AggregateRow> = groups
        .into_iter()
        .map(|((name, team_id), acc)| {
            let mean = acc.points_sum / acc.appearances as f64;
            AggregateRow {
                name: name.to_string(),
                team: codes.label(team_id),
                starts: acc.starts,
                avg_points: round_to(mean, 2),
            }
        })
        .collect();

    table.sort_by(compare_rank);
    table
}

fn compare_rank(a: &AggregateRow, b: &AggregateRow) -> Ordering {
    b.starts
        .cmp(&a.starts)
        .then_with(|| b.avg_points.total_cmp(&a.avg_points))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.team.cmp(&b.team))
}
