use std::collections::BTreeSet;
use std::sync::Arc;

use goalie_dash::data::aggregate::{AggregateRow, aggregate};
use goalie_dash::data::filter::{FilterSelection, Location, Selection, filter_records};
use goalie_dash::data::model::{GameStart, GoalieDataset, TeamId};
use goalie_dash::data::pipeline::FilterAggregatePipeline;
use goalie_dash::data::teams::TeamCodeTable;
use pretty_assertions::assert_eq;

fn gs(name: &str, team: TeamId, opp: TeamId, home: bool, started: u32, pts: f64) -> GameStart {
    GameStart {
        player_name: name.to_string(),
        team_id: team,
        team_name: String::new(),
        opponent_id: opp,
        opponent_name: String::new(),
        is_home: home,
        games_started: started,
        fantasy_points: pts,
    }
}

/// A small Atlantic-division slice of a season.
fn season() -> GoalieDataset {
    GoalieDataset::from_starts(vec![
        gs("Linus Ullmark", 6, 10, true, 1, 12.2),
        gs("Linus Ullmark", 6, 8, false, 1, 9.0),
        gs("Jeremy Swayman", 6, 14, true, 1, 4.4),
        gs("Ilya Samsonov", 10, 6, false, 1, -1.6),
        gs("Ilya Samsonov", 10, 14, true, 1, 7.8),
        gs("Joseph Woll", 10, 8, true, 0, 2.0),
        gs("Andrei Vasilevskiy", 14, 6, false, 1, 11.0),
        gs("Andrei Vasilevskiy", 14, 10, false, 1, 15.5),
        gs("Jake Allen", 8, 6, true, 1, 0.4),
    ])
}

fn names(rows: &[&GameStart]) -> Vec<String> {
    rows.iter().map(|r| r.player_name.clone()).collect()
}

fn ids(values: &[TeamId]) -> Selection<TeamId> {
    Selection::OneOf(values.iter().copied().collect::<BTreeSet<_>>())
}

#[test]
fn test_filter_order_does_not_matter() {
    let ds = season();
    let full = FilterSelection {
        teams: ids(&[6, 10]),
        opponents: ids(&[8, 14]),
        location: Location::Home,
    };

    // Apply the three predicates one at a time, in two different orders.
    let location_only = FilterSelection::<TeamId> {
        location: Location::Home,
        ..Default::default()
    };
    let team_only = FilterSelection {
        teams: ids(&[6, 10]),
        ..Default::default()
    };
    let opp_only = FilterSelection {
        opponents: ids(&[8, 14]),
        ..Default::default()
    };

    let staged_a: Vec<&GameStart> = filter_records(&ds, &location_only)
        .into_iter()
        .filter(|r| team_only.accepts(r))
        .filter(|r| opp_only.accepts(r))
        .collect();
    let staged_b: Vec<&GameStart> = filter_records(&ds, &opp_only)
        .into_iter()
        .filter(|r| team_only.accepts(r))
        .filter(|r| location_only.accepts(r))
        .collect();

    let combined = filter_records(&ds, &full);
    assert_eq!(names(&combined), vec!["Jeremy Swayman", "Ilya Samsonov", "Joseph Woll"]);
    assert_eq!(names(&staged_a), names(&combined));
    assert_eq!(names(&staged_b), names(&combined));
}

#[test]
fn test_mean_over_appearances_starts_summed() {
    let rows = vec![
        gs("A", 1, 2, true, 1, 10.0),
        gs("A", 1, 2, true, 1, 4.0),
        gs("A", 1, 2, true, 0, 6.0),
    ];
    let refs: Vec<&GameStart> = rows.iter().collect();
    let table = aggregate(&refs, &TeamCodeTable::default());
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].starts, 2);
    assert_eq!(table[0].avg_points, 6.67);
}

#[test]
fn test_full_table_ranking() {
    let pipeline =
        FilterAggregatePipeline::new(Arc::new(season()), Arc::new(TeamCodeTable::default()));
    let out = pipeline.run(&FilterSelection::<TeamId>::default());

    assert_eq!(
        out.table,
        vec![
            AggregateRow {
                name: "Andrei Vasilevskiy".into(),
                team: "TBL".into(),
                starts: 2,
                avg_points: 13.25,
            },
            AggregateRow {
                name: "Linus Ullmark".into(),
                team: "BOS".into(),
                starts: 2,
                avg_points: 10.6,
            },
            AggregateRow {
                name: "Ilya Samsonov".into(),
                team: "TOR".into(),
                starts: 2,
                avg_points: 3.1,
            },
            AggregateRow {
                name: "Jeremy Swayman".into(),
                team: "BOS".into(),
                starts: 1,
                avg_points: 4.4,
            },
            AggregateRow {
                name: "Jake Allen".into(),
                team: "MTL".into(),
                starts: 1,
                avg_points: 0.4,
            },
            AggregateRow {
                name: "Joseph Woll".into(),
                team: "TOR".into(),
                starts: 0,
                avg_points: 2.0,
            },
        ]
    );
    assert_eq!(out.histogram.outside, 1);
    assert_eq!(out.histogram.binned(), 8);
}

#[test]
fn test_repeated_runs_are_identical() {
    let pipeline =
        FilterAggregatePipeline::new(Arc::new(season()), Arc::new(TeamCodeTable::default()));
    let sel = FilterSelection::<TeamId> {
        teams: ids(&[6, 14]),
        opponents: Selection::All,
        location: Location::Away,
    };
    let first = pipeline.run(&sel);
    for _ in 0..5 {
        assert_eq!(pipeline.run(&sel), first);
    }
}

#[test]
fn test_no_match_yields_empty_outputs() {
    let pipeline =
        FilterAggregatePipeline::new(Arc::new(season()), Arc::new(TeamCodeTable::default()));
    let sel = FilterSelection::<TeamId> {
        teams: Selection::single(55),
        ..Default::default()
    };
    assert!(pipeline.filter(&sel).is_empty());

    let out = pipeline.run(&sel);
    assert_eq!(out.matched, 0);
    assert!(out.table.is_empty());
    assert_eq!(out.histogram.binned(), 0);
    assert_eq!(out.histogram.mean, None);
}

#[test]
fn test_location_exclusivity() {
    let ds = GoalieDataset::from_starts(vec![
        gs("A", 1, 2, true, 1, 1.0),
        gs("B", 1, 2, false, 1, 2.0),
        gs("C", 1, 2, true, 1, 3.0),
    ]);
    let count = |location| {
        filter_records(
            &ds,
            &FilterSelection::<TeamId> {
                location,
                ..Default::default()
            },
        )
        .len()
    };
    assert_eq!(count(Location::Home), 2);
    assert_eq!(count(Location::Away), 1);
    assert_eq!(count(Location::All), 3);
}

#[test]
fn test_dropdown_variant_matches_multi_select() {
    let ds = season();
    let single = FilterSelection {
        teams: Selection::from_dropdown(10),
        opponents: Selection::from_dropdown(0),
        location: Location::All,
    };
    let multi = FilterSelection {
        teams: ids(&[10]),
        opponents: Selection::OneOf(ds.team_ids.clone()),
        location: Location::All,
    };
    assert_eq!(names(&filter_records(&ds, &single)), names(&filter_records(&ds, &multi)));
}
