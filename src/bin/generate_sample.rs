use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use goalie_dash::data::model::{GameStart, TeamId};
use goalie_dash::data::teams::NHL_TEAM_NAMES;

const GAMES_PER_TEAM: usize = 82;

// Fantasy scoring used to derive FPTS from a goalie's line.
const PTS_WIN: f64 = 5.0;
const PTS_SAVE: f64 = 0.2;
const PTS_GOAL_AGAINST: f64 = -1.0;
const PTS_SHUTOUT: f64 = 3.0;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jake", "Igor", "Linus", "Juuse", "Connor", "Thatcher", "Sam", "Anton", "Ville",
    "Logan", "Jordan", "Filip", "Cal", "Ukko", "Kevin",
];
const LAST_NAMES: &[&str] = &[
    "Lindqvist", "Berg", "Halloran", "Koivu", "Marsh", "Novak", "Price", "Reimer", "Saros",
    "Talbot", "Varga", "Wedgewood", "Yates", "Zadina", "Oettinger", "Demko",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Three goalies per team: a starter, a backup and a call-up.
struct Goalie {
    name: String,
    /// Chance of being picked to start.
    weight: f64,
    /// Save percentage around which this goalie's nights vary.
    skill: f64,
}

fn roster(team_idx: usize, rng: &mut SimpleRng) -> Vec<Goalie> {
    [0.65, 0.3, 0.05]
        .iter()
        .enumerate()
        .map(|(slot, &weight)| {
            let first = FIRST_NAMES[(team_idx * 3 + slot) % FIRST_NAMES.len()];
            let last = LAST_NAMES[(team_idx * 5 + slot * 7) % LAST_NAMES.len()];
            Goalie {
                name: format!("{first} {last}"),
                weight,
                skill: 0.905 + rng.gauss(0.0, 0.006),
            }
        })
        .collect()
}

fn pick_starter(goalies: &[Goalie], rng: &mut SimpleRng) -> usize {
    let mut roll = rng.next_f64();
    for (i, g) in goalies.iter().enumerate() {
        if roll < g.weight {
            return i;
        }
        roll -= g.weight;
    }
    0
}

/// Shots faced and goals against for one goalie night.
fn goalie_line(skill: f64, rng: &mut SimpleRng) -> (u32, u32) {
    let shots = rng.gauss(30.0, 5.0).round().clamp(12.0, 50.0) as u32;
    let sv_pct = (skill + rng.gauss(0.0, 0.04)).clamp(0.7, 1.0);
    let goals = ((1.0 - sv_pct) * shots as f64).round() as u32;
    (shots, goals.min(shots))
}

fn fantasy_points(saves: u32, goals_against: u32, won: bool) -> f64 {
    let mut pts = PTS_SAVE * saves as f64 + PTS_GOAL_AGAINST * goals_against as f64;
    if won {
        pts += PTS_WIN;
    }
    if goals_against == 0 {
        pts += PTS_SHUTOUT;
    }
    (pts * 10.0).round() / 10.0
}

fn generate_season(rng: &mut SimpleRng) -> Vec<GameStart> {
    let teams: Vec<(TeamId, &str)> = NHL_TEAM_NAMES.to_vec();
    let rosters: Vec<Vec<Goalie>> = (0..teams.len()).map(|i| roster(i, rng)).collect();

    let n_games = teams.len() * GAMES_PER_TEAM / 2;
    let mut starts = Vec::with_capacity(n_games * 2);

    for _ in 0..n_games {
        let home = rng.below(teams.len());
        let mut away = rng.below(teams.len() - 1);
        if away >= home {
            away += 1;
        }

        let home_goalie = pick_starter(&rosters[home], rng);
        let away_goalie = pick_starter(&rosters[away], rng);
        let (home_shots, home_ga) = goalie_line(rosters[home][home_goalie].skill, rng);
        let (away_shots, away_ga) = goalie_line(rosters[away][away_goalie].skill, rng);

        // Goals against one goalie are the other team's goals for.
        let home_won = match home_ga.cmp(&away_ga) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => rng.next_f64() < 0.55,
        };

        for (side, goalie, opp, shots, ga, won, is_home) in [
            (home, home_goalie, away, home_shots, home_ga, home_won, true),
            (away, away_goalie, home, away_shots, away_ga, !home_won, false),
        ] {
            let (team_id, _) = teams[side];
            let (opponent_id, _) = teams[opp];
            starts.push(GameStart {
                player_name: rosters[side][goalie].name.clone(),
                team_id,
                team_name: teams[side].1.to_string(),
                opponent_id,
                opponent_name: teams[opp].1.to_string(),
                is_home,
                games_started: 1,
                fantasy_points: fantasy_points(shots - ga, ga, won),
            });
        }

        // Occasional relief appearance: pulled starter's backup, no start credited.
        if rng.next_f64() < 0.04 {
            let relief = (home_goalie + 1) % rosters[home].len();
            let (shots, ga) = goalie_line(rosters[home][relief].skill, rng);
            let (shots, ga) = (shots / 3, ga / 3);
            starts.push(GameStart {
                player_name: rosters[home][relief].name.clone(),
                team_id: teams[home].0,
                team_name: teams[home].1.to_string(),
                opponent_id: teams[away].0,
                opponent_name: teams[away].1.to_string(),
                is_home: true,
                games_started: 0,
                fantasy_points: fantasy_points(shots - ga, ga, false),
            });
        }
    }

    starts
}

fn write_csv(starts: &[GameStart], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for gs in starts {
        writer.serialize(gs).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(starts: &[GameStart], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("person.fullName", DataType::Utf8, false),
        Field::new("team.id", DataType::Int64, false),
        Field::new("team.name", DataType::Utf8, false),
        Field::new("opponent.id", DataType::Int64, false),
        Field::new("opponent.name", DataType::Utf8, false),
        Field::new("isHome", DataType::Boolean, false),
        Field::new("stat.gamesStarted", DataType::Int64, false),
        Field::new("FPTS", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(starts.iter().map(|s| s.player_name.as_str()))),
            Arc::new(Int64Array::from_iter_values(starts.iter().map(|s| s.team_id as i64))),
            Arc::new(StringArray::from_iter_values(starts.iter().map(|s| s.team_name.as_str()))),
            Arc::new(Int64Array::from_iter_values(starts.iter().map(|s| s.opponent_id as i64))),
            Arc::new(StringArray::from_iter_values(starts.iter().map(|s| s.opponent_name.as_str()))),
            Arc::new(BooleanArray::from(starts.iter().map(|s| s.is_home).collect::<Vec<_>>())),
            Arc::new(Int64Array::from_iter_values(starts.iter().map(|s| s.games_started as i64))),
            Arc::new(Float64Array::from_iter_values(starts.iter().map(|s| s.fantasy_points))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let starts = generate_season(&mut rng);

    let csv_path = Path::new("all_goalie_starts.csv");
    let parquet_path = Path::new("all_goalie_starts.parquet");
    write_csv(&starts, csv_path)?;
    write_parquet(&starts, parquet_path)?;

    println!(
        "Wrote {} goalie appearances to {} and {}",
        starts.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
