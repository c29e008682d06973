use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{GameStart, GoalieDataset, TeamId, count_from_f64};

/// Columns every source must provide. Team and opponent names are optional.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "person.fullName",
    "team.id",
    "opponent.id",
    "isHome",
    "stat.gamesStarted",
    "FPTS",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a goalie game log from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the columns in [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "person.fullName": ..., "FPTS": ..., ... }, ...]`
/// * `.parquet` – same column names, any integer/float/bool/string types
pub fn load_file(path: &Path) -> Result<GoalieDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: the pandas export of the game log, one appearance per row.
/// Extra columns (an unnamed index, raw stat columns) are ignored.
fn load_csv(path: &Path) -> Result<GoalieDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

pub fn read_csv<R: std::io::Read>(input: R) -> Result<GoalieDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("CSV missing '{column}' column");
        }
    }

    let mut starts = Vec::new();
    for (row_no, result) in reader.deserialize::<GameStart>().enumerate() {
        let start = result.with_context(|| format!("CSV row {row_no}"))?;
        starts.push(start);
    }

    Ok(GoalieDataset::from_starts(starts))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "person.fullName": "Linus Ullmark",
///     "team.id": 6,
///     "opponent.id": 10,
///     "isHome": true,
///     "stat.gamesStarted": 1,
///     "FPTS": 12.2
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<GoalieDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<GoalieDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let starts = records
        .iter()
        .enumerate()
        .map(|(i, rec)| json_record(rec).with_context(|| format!("Row {i}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(GoalieDataset::from_starts(starts))
}

fn json_record(value: &JsonValue) -> Result<GameStart> {
    if !value.is_object() {
        bail!("not a JSON object");
    }
    Ok(GameStart::deserialize(value)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the game log.
///
/// Columns are cast to the types the model needs, so files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`) work
/// whether ids came out as Int32/Int64 and flags as bool or text.
fn load_parquet(path: &Path) -> Result<GoalieDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut starts = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = BatchColumns::from_batch(&batch)?;

        for row in 0..batch.num_rows() {
            let start = columns
                .row(row)
                .with_context(|| format!("Row {}", starts.len()))?;
            starts.push(start);
        }
    }

    Ok(GoalieDataset::from_starts(starts))
}

// -- Parquet / Arrow helpers --

/// The game-log columns of one record batch, already cast to target types.
struct BatchColumns {
    player_name: StringArray,
    team_id: Int64Array,
    team_name: Option<StringArray>,
    opponent_id: Int64Array,
    opponent_name: Option<StringArray>,
    is_home: BooleanArray,
    games_started: Float64Array,
    fantasy_points: Float64Array,
}

impl BatchColumns {
    fn from_batch(batch: &RecordBatch) -> Result<Self> {
        let team_name = optional_column(batch, &["team.name", "name"], &DataType::Utf8)?;
        let opponent_name = optional_column(batch, &["opponent.name"], &DataType::Utf8)?;

        Ok(Self {
            player_name: required_column(batch, "person.fullName", &DataType::Utf8)?
                .as_string::<i32>()
                .clone(),
            team_id: required_column(batch, "team.id", &DataType::Int64)?
                .as_primitive::<Int64Type>()
                .clone(),
            team_name: team_name.map(|c| c.as_string::<i32>().clone()),
            opponent_id: required_column(batch, "opponent.id", &DataType::Int64)?
                .as_primitive::<Int64Type>()
                .clone(),
            opponent_name: opponent_name.map(|c| c.as_string::<i32>().clone()),
            is_home: required_column(batch, "isHome", &DataType::Boolean)?
                .as_boolean()
                .clone(),
            games_started: required_column(batch, "stat.gamesStarted", &DataType::Float64)?
                .as_primitive::<Float64Type>()
                .clone(),
            fantasy_points: required_column(batch, "FPTS", &DataType::Float64)?
                .as_primitive::<Float64Type>()
                .clone(),
        })
    }

    fn row(&self, row: usize) -> Result<GameStart> {
        let required: [(&dyn Array, &str); 6] = [
            (&self.player_name, "person.fullName"),
            (&self.team_id, "team.id"),
            (&self.opponent_id, "opponent.id"),
            (&self.is_home, "isHome"),
            (&self.games_started, "stat.gamesStarted"),
            (&self.fantasy_points, "FPTS"),
        ];
        for (array, name) in required {
            if array.is_null(row) {
                bail!("null value in '{name}'");
            }
        }

        let games_started = self.games_started.value(row);

        Ok(GameStart {
            player_name: self.player_name.value(row).to_string(),
            team_id: team_id(self.team_id.value(row))?,
            team_name: optional_text(self.team_name.as_ref(), row),
            opponent_id: team_id(self.opponent_id.value(row))?,
            opponent_name: optional_text(self.opponent_name.as_ref(), row),
            is_home: self.is_home.value(row),
            games_started: count_from_f64(games_started).with_context(|| {
                format!("'stat.gamesStarted' is not a whole number: {games_started}")
            })?,
            fantasy_points: self.fantasy_points.value(row),
        })
    }
}

fn required_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| anyhow!("Parquet file missing '{name}' column"))?;
    cast(col, to).with_context(|| format!("column '{name}' cannot be read as {to:?}"))
}

fn optional_column(batch: &RecordBatch, names: &[&str], to: &DataType) -> Result<Option<ArrayRef>> {
    match names.iter().find_map(|n| batch.column_by_name(n).map(|c| (n, c))) {
        Some((name, col)) => cast(col, to)
            .map(Some)
            .with_context(|| format!("column '{name}' cannot be read as {to:?}")),
        None => Ok(None),
    }
}

fn optional_text(array: Option<&StringArray>, row: usize) -> String {
    match array {
        Some(a) if !a.is_null(row) => a.value(row).to_string(),
        _ => String::new(),
    }
}

fn team_id(raw: i64) -> Result<TeamId> {
    TeamId::try_from(raw).with_context(|| format!("team id {raw} out of range"))
}
