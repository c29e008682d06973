use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::data::aggregate::AggregateRow;
use crate::data::filter::{FilterSelection, Location, Selection};
use crate::data::model::{GoalieDataset, TeamId};
use crate::data::pipeline::{FilterAggregatePipeline, PipelineOutput};
use crate::data::teams::{ALL_TEAMS_ID, TeamCodeTable};

// ---------------------------------------------------------------------------
// Filter widgets
// ---------------------------------------------------------------------------

/// Which filter-panel layout is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SelectionMode {
    /// Checkbox lists keyed by team id; several teams at once.
    #[value(name = "multi")]
    MultiById,
    /// One dropdown per side over team codes, "ALL TEAMS" (id 0) first.
    #[value(name = "single-id")]
    SingleById,
    /// One dropdown per side keyed by team name, with an "ALL TEAMS" entry.
    #[value(name = "single-name")]
    SingleByName,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 3] = [
        SelectionMode::MultiById,
        SelectionMode::SingleById,
        SelectionMode::SingleByName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SelectionMode::MultiById => "Multi-select teams",
            SelectionMode::SingleById => "Single team (code)",
            SelectionMode::SingleByName => "Single team (name)",
        }
    }
}

/// Team side of a game a filter widget applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Team,
    Opponent,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Pipeline over the loaded dataset (None until a file is loaded).
    pub pipeline: Option<FilterAggregatePipeline>,

    /// Team code table shared with the pipeline.
    pub codes: Arc<TeamCodeTable>,

    pub mode: SelectionMode,

    /// Multi-select: ticked team / opponent ids.
    pub teams: BTreeSet<TeamId>,
    pub opponents: BTreeSet<TeamId>,

    /// Single-select by code: chosen ids, `ALL_TEAMS_ID` for every team.
    pub team_choice: TeamId,
    pub opponent_choice: TeamId,

    /// Single-select by name: chosen names, `None` for "ALL TEAMS".
    pub team_name: Option<String>,
    pub opponent_name: Option<String>,

    pub location: Location,

    /// Output of the last recomputation (cached until a filter changes).
    pub view: Option<PipelineOutput>,

    /// Zero-based table page.
    pub page: usize,
    pub page_size: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let codes = Arc::new(config.team_codes.clone());
        let all: BTreeSet<TeamId> = codes.ids().collect();
        Self {
            pipeline: None,
            codes,
            mode: config.mode,
            teams: all.clone(),
            opponents: all,
            team_choice: ALL_TEAMS_ID,
            opponent_choice: ALL_TEAMS_ID,
            team_name: None,
            opponent_name: None,
            location: Location::All,
            view: None,
            page: 0,
            page_size: config.page_size.max(1),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset filters and recompute.
    pub fn set_dataset(&mut self, dataset: GoalieDataset) {
        let pipeline = FilterAggregatePipeline::new(Arc::new(dataset), Arc::clone(&self.codes));
        self.pipeline = Some(pipeline);

        let all = self.team_options();
        self.teams = all.clone();
        self.opponents = all;
        self.team_choice = ALL_TEAMS_ID;
        self.opponent_choice = ALL_TEAMS_ID;
        self.team_name = None;
        self.opponent_name = None;
        self.location = Location::All;

        self.status_message = None;
        self.refresh();
    }

    /// Load a game log from disk, reporting failures in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} goalie starts ({} teams) from {}",
                    dataset.len(),
                    dataset.team_ids.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn dataset(&self) -> Option<&GoalieDataset> {
        self.pipeline.as_ref().map(|p| p.dataset())
    }

    /// Team ids offered in the multi-select lists: every coded team plus any
    /// id that only appears in the data.
    pub fn team_options(&self) -> BTreeSet<TeamId> {
        let mut ids: BTreeSet<TeamId> = self.codes.ids().collect();
        if let Some(ds) = self.dataset() {
            ids.extend(ds.team_ids.iter().copied());
        }
        ids
    }

    /// Team names offered in the single-select dropdowns.
    pub fn team_name_options(&self) -> Vec<String> {
        self.dataset()
            .map(GoalieDataset::sorted_team_names)
            .unwrap_or_default()
    }

    /// Recompute the histogram and table after a filter change.
    pub fn refresh(&mut self) {
        let Some(pipeline) = &self.pipeline else {
            self.view = None;
            return;
        };

        let view = match self.mode {
            SelectionMode::MultiById => pipeline.run(&self.id_selection()),
            SelectionMode::SingleById => pipeline.run(&self.dropdown_selection()),
            SelectionMode::SingleByName => pipeline.run(&self.name_selection()),
        };
        self.view = Some(view);
        self.page = 0;
    }

    pub fn id_selection(&self) -> FilterSelection<TeamId> {
        FilterSelection {
            teams: Selection::OneOf(self.teams.clone()),
            opponents: Selection::OneOf(self.opponents.clone()),
            location: self.location,
        }
    }

    pub fn dropdown_selection(&self) -> FilterSelection<TeamId> {
        FilterSelection {
            teams: Selection::from_dropdown(self.team_choice),
            opponents: Selection::from_dropdown(self.opponent_choice),
            location: self.location,
        }
    }

    pub fn name_selection(&self) -> FilterSelection<String> {
        FilterSelection {
            teams: Selection::from_name(self.team_name.as_deref()),
            opponents: Selection::from_name(self.opponent_name.as_deref()),
            location: self.location,
        }
    }

    fn ids_mut(&mut self, side: Side) -> &mut BTreeSet<TeamId> {
        match side {
            Side::Team => &mut self.teams,
            Side::Opponent => &mut self.opponents,
        }
    }

    pub fn ids(&self, side: Side) -> &BTreeSet<TeamId> {
        match side {
            Side::Team => &self.teams,
            Side::Opponent => &self.opponents,
        }
    }

    /// Toggle a single team id in a multi-select list.
    pub fn toggle_team(&mut self, side: Side, id: TeamId) {
        let ids = self.ids_mut(side);
        if !ids.remove(&id) {
            ids.insert(id);
        }
        self.refresh();
    }

    /// Tick every team in a list.
    pub fn select_all(&mut self, side: Side) {
        let all = self.team_options();
        *self.ids_mut(side) = all;
        self.refresh();
    }

    /// Untick every team in a list.
    pub fn select_none(&mut self, side: Side) {
        self.ids_mut(side).clear();
        self.refresh();
    }

    /// Pick a team from the code dropdown (`ALL_TEAMS_ID` = every team).
    pub fn set_team_choice(&mut self, side: Side, id: TeamId) {
        match side {
            Side::Team => self.team_choice = id,
            Side::Opponent => self.opponent_choice = id,
        }
        self.refresh();
    }

    /// Pick a team by name in single-select mode (`None` = ALL TEAMS).
    pub fn set_team_name(&mut self, side: Side, name: Option<String>) {
        match side {
            Side::Team => self.team_name = name,
            Side::Opponent => self.opponent_name = name,
        }
        self.refresh();
    }

    pub fn set_location(&mut self, location: Location) {
        if self.location != location {
            self.location = location;
            self.refresh();
        }
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh();
        }
    }

    // -- Table pagination --

    pub fn table(&self) -> &[AggregateRow] {
        self.view.as_ref().map(|v| v.table.as_slice()).unwrap_or(&[])
    }

    pub fn page_count(&self) -> usize {
        self.table().len().div_ceil(self.page_size).max(1)
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[AggregateRow] {
        let table = self.table();
        let start = (self.page * self.page_size).min(table.len());
        let end = (start + self.page_size).min(table.len());
        &table[start..end]
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}
