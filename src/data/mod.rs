/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GoalieDataset (loaded once, Arc-shared)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  location ∧ team ∧ opponent → filtered rows
///   └──────────┘
///      │      │
///      ▼      ▼
///  histogram  aggregate   bins + mean marker / ranked per-player table
///                 │
///                 ▼
///              export     table → CSV / JSON records
/// ```
///
/// `pipeline` wires filter, histogram and aggregate together over a shared
/// dataset; `teams` holds the id → code table used for labels.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod teams;
