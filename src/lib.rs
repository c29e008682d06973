//! Goalie Dash: filter an NHL goalie game log by team, opponent and
//! location, then chart the fantasy-point distribution and rank goalies.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
