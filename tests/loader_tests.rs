use std::io::Write;
use std::sync::Arc;

use arrow::array::{BooleanArray, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use goalie_dash::data::export::export_table;
use goalie_dash::data::filter::{FilterSelection, Location, Selection};
use goalie_dash::data::loader::load_file;
use goalie_dash::data::pipeline::FilterAggregatePipeline;
use goalie_dash::data::teams::TeamCodeTable;
use pretty_assertions::assert_eq;

const CSV: &str = "\
person.fullName,team.id,name,opponent.id,isHome,stat.gamesStarted,FPTS
Linus Ullmark,6,Boston Bruins,10,True,1,12.2
Linus Ullmark,6,Boston Bruins,8,False,1,9.0
Ilya Samsonov,10,Toronto Maple Leafs,6,False,1,-1.6
";

#[test]
fn test_load_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all_goalie_starts.csv");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(CSV.as_bytes())
        .unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(
        ds.sorted_team_names(),
        vec!["Boston Bruins", "Toronto Maple Leafs"]
    );
    assert_eq!(ds.team_ids.iter().copied().collect::<Vec<_>>(), vec![6, 8, 10]);
}

#[test]
fn test_load_parquet_with_narrow_types() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("person.fullName", DataType::Utf8, false),
        Field::new("team.id", DataType::Int32, false),
        Field::new("opponent.id", DataType::Int32, false),
        Field::new("isHome", DataType::Boolean, false),
        Field::new("stat.gamesStarted", DataType::Int64, false),
        Field::new("FPTS", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["A", "A", "B"])),
            Arc::new(Int32Array::from(vec![6, 6, 10])),
            Arc::new(Int32Array::from(vec![10, 8, 6])),
            Arc::new(BooleanArray::from(vec![true, false, false])),
            Arc::new(Int64Array::from(vec![1, 1, 0])),
            Arc::new(Float64Array::from(vec![10.0, 4.0, 2.5])),
        ],
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("starts.parquet");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.starts[0].team_id, 6);
    assert!(!ds.starts[1].is_home);
    assert_eq!(ds.starts[2].games_started, 0);
    assert_eq!(ds.starts[2].team_name, "");
}

#[test]
fn test_parquet_missing_column() {
    let schema = Arc::new(Schema::new(vec![Field::new("FPTS", DataType::Float64, false)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Float64Array::from(vec![1.0]))],
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.parquet");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let err = load_file(&path).unwrap_err();
    assert!(err.to_string().contains("person.fullName"), "{err:#}");
}

#[test]
fn test_opponent_name_filter_with_team_side_names_only() {
    let ds = goalie_dash::data::loader::read_csv(CSV.as_bytes()).unwrap();
    let pipeline =
        FilterAggregatePipeline::new(Arc::new(ds), Arc::new(TeamCodeTable::default()));

    let out = pipeline.run(&FilterSelection {
        teams: Selection::All,
        opponents: Selection::from_name(Some("Boston Bruins")),
        location: Location::All,
    });
    assert_eq!(out.matched, 1);
    assert_eq!(out.table[0].name, "Ilya Samsonov");

    let out = pipeline.run(&FilterSelection {
        teams: Selection::All,
        opponents: Selection::from_name(Some("Toronto Maple Leafs")),
        location: Location::All,
    });
    assert_eq!(out.matched, 1);
    assert_eq!(out.table[0].name, "Linus Ullmark");
}

#[test]
fn test_load_filter_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("starts.csv");
    std::fs::write(&input, CSV).unwrap();

    let pipeline = FilterAggregatePipeline::new(
        Arc::new(load_file(&input).unwrap()),
        Arc::new(TeamCodeTable::default()),
    );
    let out = pipeline.run(&FilterSelection {
        teams: Selection::from_name(Some("Boston Bruins")),
        opponents: Selection::All,
        location: Location::All,
    });
    assert_eq!(out.matched, 2);

    let output = dir.path().join("table.json");
    export_table(&out.table, &output).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"Name": "Linus Ullmark", "Team": "BOS", "# Starts": 2, "Av. PTS": 10.6}
        ])
    );
}
