use std::collections::BTreeSet;
use std::fmt;

use super::model::{GameStart, GoalieDataset, TeamId};
use super::teams::ALL_TEAMS_ID;

// ---------------------------------------------------------------------------
// Selection: which teams pass a team/opponent filter
// ---------------------------------------------------------------------------

/// Team or opponent selection.
///
/// `OneOf` with a single element is plain equality; an empty set matches
/// nothing (every box unticked in the multi-select panel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<K: Ord> {
    All,
    OneOf(BTreeSet<K>),
}

impl<K: Ord> Default for Selection<K> {
    fn default() -> Self {
        Selection::All
    }
}

impl<K: Ord> Selection<K> {
    pub fn single(key: K) -> Self {
        Selection::OneOf(BTreeSet::from([key]))
    }

    pub fn matches(&self, key: &K) -> bool {
        match self {
            Selection::All => true,
            Selection::OneOf(keys) => keys.contains(key),
        }
    }
}

impl Selection<TeamId> {
    /// Translate a single-select dropdown value, where id 0 is "ALL TEAMS".
    pub fn from_dropdown(id: TeamId) -> Self {
        if id == ALL_TEAMS_ID {
            Selection::All
        } else {
            Selection::single(id)
        }
    }
}

impl Selection<String> {
    /// Name-keyed dropdown: `None` stands for the "ALL TEAMS" entry.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None => Selection::All,
            Some(n) => Selection::single(n.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// TeamKey: how a selection identifies teams on a row
// ---------------------------------------------------------------------------

/// Identity scheme used to match a row's team and opponent against a
/// [`Selection`]. Implemented for numeric ids and for team names.
pub trait TeamKey: Ord {
    fn team_key(start: &GameStart) -> &Self;
    fn opponent_key(start: &GameStart) -> &Self;
}

impl TeamKey for TeamId {
    fn team_key(start: &GameStart) -> &Self {
        &start.team_id
    }

    fn opponent_key(start: &GameStart) -> &Self {
        &start.opponent_id
    }
}

impl TeamKey for String {
    fn team_key(start: &GameStart) -> &Self {
        &start.team_name
    }

    fn opponent_key(start: &GameStart) -> &Self {
        &start.opponent_name
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    All,
    Home,
    Away,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::All, Location::Home, Location::Away];

    pub fn matches(self, is_home: bool) -> bool {
        match self {
            Location::All => true,
            Location::Home => is_home,
            Location::Away => !is_home,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::All => write!(f, "All Locations"),
            Location::Home => write!(f, "Home"),
            Location::Away => write!(f, "Away"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSelection
// ---------------------------------------------------------------------------

/// Everything the user picked in the filter panel for one recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection<K: Ord> {
    pub teams: Selection<K>,
    pub opponents: Selection<K>,
    pub location: Location,
}

impl<K: Ord> Default for FilterSelection<K> {
    fn default() -> Self {
        Self {
            teams: Selection::All,
            opponents: Selection::All,
            location: Location::All,
        }
    }
}

impl<K: TeamKey> FilterSelection<K> {
    /// A row passes when it satisfies the location, team and opponent
    /// predicates together.
    pub fn accepts(&self, start: &GameStart) -> bool {
        self.location.matches(start.is_home)
            && self.teams.matches(K::team_key(start))
            && self.opponents.matches(K::opponent_key(start))
    }
}

/// Return the rows that pass `selection`, in dataset order.
pub fn filter_records<'a, K: TeamKey>(
    dataset: &'a GoalieDataset,
    selection: &FilterSelection<K>,
) -> Vec<&'a GameStart> {
    dataset
        .starts
        .iter()
        .filter(|gs| selection.accepts(gs))
        .collect()
}
