use std::collections::HashSet;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the stat-table core. All of these are locally
/// recoverable: the render layer degrades to a placeholder pane and a
/// console warning instead of tearing the session down.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("unknown statistic column: {name}")]
    SchemaMismatch { name: String },
    #[error("statistic requested twice in one ranking call: {name}")]
    DuplicateStat { name: String },
    #[error("non-positive 90s for {player}: cannot divide per 90")]
    InvalidDivisor { player: String },
    #[error("player not found: {player}")]
    LookupMiss { player: String },
}

/// How a statistic column behaves under per-90 normalization.
///
/// `Counting` stats are cumulative totals (goals, clearances) and get divided
/// by playing time. `Rate` stats are already normalized (percentages, per-90
/// figures from the source) and must never be divided again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    Counting,
    Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatColumn {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    pub role: ColumnRole,
}

impl StatColumn {
    pub fn counting(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            role: ColumnRole::Counting,
        }
    }

    pub fn rate(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            role: ColumnRole::Rate,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// One player-season. `values` is parallel to `PlayerTable::columns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub player: String,
    pub team: String,
    pub nineties: f64,
    pub values: Vec<f64>,
}

impl PlayerRow {
    pub fn value(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }
}

/// The season dataset: identifying fields plus an open-ended set of numeric
/// statistic columns, each carrying an explicit role flag. Loaded once per
/// session and never written back; every page derives fresh vectors from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTable {
    pub columns: Vec<StatColumn>,
    pub rows: Vec<PlayerRow>,
    #[serde(default)]
    pub as_of: Option<SystemTime>,
}

impl PlayerTable {
    pub fn new(columns: Vec<StatColumn>, rows: Vec<PlayerRow>) -> Self {
        Self {
            columns,
            rows,
            as_of: None,
        }
    }

    pub fn stat_index(&self, name: &str) -> Result<usize, StatsError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| StatsError::SchemaMismatch {
                name: name.to_string(),
            })
    }

    pub fn column(&self, name: &str) -> Result<&StatColumn, StatsError> {
        let index = self.stat_index(name)?;
        Ok(&self.columns[index])
    }

    pub fn is_rate(&self, index: usize) -> bool {
        self.columns
            .get(index)
            .map(|c| c.role == ColumnRole::Rate)
            .unwrap_or(false)
    }

    pub fn stat_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Teams in first-appearance order.
    pub fn teams(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            if seen.insert(row.team.as_str()) {
                out.push(row.team.clone());
            }
        }
        out
    }

    pub fn players_for_team(&self, team: &str) -> Vec<&PlayerRow> {
        self.rows.iter().filter(|r| r.team == team).collect()
    }

    pub fn rows_in_nineties_range(&self, lo: f64, hi: f64) -> Vec<&PlayerRow> {
        self.rows
            .iter()
            .filter(|r| r.nineties >= lo && r.nineties <= hi)
            .collect()
    }

    /// Distinct `90s` values, ascending. Drives the range-filter stepper on
    /// the scatter page.
    pub fn nineties_steps(&self) -> Vec<f64> {
        let mut steps: Vec<f64> = self.rows.iter().map(|r| r.nineties).collect();
        steps.sort_by(|a, b| a.total_cmp(b));
        steps.dedup();
        steps
    }
}
