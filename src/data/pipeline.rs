use std::sync::Arc;

use super::aggregate::{AggregateRow, aggregate};
use super::filter::{FilterSelection, TeamKey, filter_records};
use super::histogram::{Histogram, HistogramSpec};
use super::model::{GameStart, GoalieDataset};
use super::teams::TeamCodeTable;

/// Everything the dashboard draws for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Appearances that passed the filters.
    pub matched: usize,
    pub histogram: Histogram,
    pub table: Vec<AggregateRow>,
}

impl PipelineOutput {
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

/// Stateless filter → aggregate transform over a shared, read-only dataset.
///
/// Cheap to clone; every clone points at the same dataset and code table, so
/// independent recomputations can run from any thread.
#[derive(Debug, Clone)]
pub struct FilterAggregatePipeline {
    dataset: Arc<GoalieDataset>,
    codes: Arc<TeamCodeTable>,
    histogram_spec: HistogramSpec,
}

impl FilterAggregatePipeline {
    pub fn new(dataset: Arc<GoalieDataset>, codes: Arc<TeamCodeTable>) -> Self {
        Self {
            dataset,
            codes,
            histogram_spec: HistogramSpec::default(),
        }
    }

    pub fn dataset(&self) -> &GoalieDataset {
        &self.dataset
    }

    pub fn filter<K: TeamKey>(&self, selection: &FilterSelection<K>) -> Vec<&GameStart> {
        filter_records(&self.dataset, selection)
    }

    pub fn aggregate(&self, rows: &[&GameStart]) -> Vec<AggregateRow> {
        aggregate(rows, &self.codes)
    }

    /// Filter once, then feed the same rows to the histogram and the table.
    pub fn run<K: TeamKey>(&self, selection: &FilterSelection<K>) -> PipelineOutput {
        let rows = self.filter(selection);
        let histogram = Histogram::from_starts(&rows, self.histogram_spec);
        let table = self.aggregate(&rows);

        log::debug!(
            "pipeline: {} of {} starts matched, {} players",
            rows.len(),
            self.dataset.len(),
            table.len()
        );

        PipelineOutput {
            matched: rows.len(),
            histogram,
            table,
        }
    }
}
