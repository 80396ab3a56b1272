//! Percentile ranking of player statistics against the eligible league pool.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::env;

use serde::{Deserialize, Serialize};

use crate::dataset::{PlayerTable, StatsError};
use crate::normalize::per90_value;

/// Minimum playing time (in 90s) for a player to enter a ranked pool.
pub const DEFAULT_MIN_NINETIES: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    pub min_nineties: f64,
    /// Historical display policy: a player missing from a stat's eligible
    /// pool is shown as rank 0.0 instead of being marked ineligible. The
    /// ranker always reports `RankOutcome::Ineligible` either way; this flag
    /// only decides what the presentation layer collapses it to.
    pub legacy_zero_ranks: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            min_nineties: DEFAULT_MIN_NINETIES,
            legacy_zero_ranks: true,
        }
    }
}

impl RankConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(min) = env::var("SCOUT_MIN_NINETIES")
            .ok()
            .and_then(|val| val.parse::<f64>().ok())
        {
            config.min_nineties = min;
        }
        if let Ok(raw) = env::var("SCOUT_LEGACY_ZERO_RANKS") {
            config.legacy_zero_ranks = !matches!(raw.trim(), "0" | "false" | "off");
        }
        config
    }
}

/// Rank of the selected player for one statistic. `Ineligible` means the
/// player was filtered out of the pool (zero raw value, too few minutes, or
/// not in the dataset) — distinct from a genuine 0th percentile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RankOutcome {
    Ranked(f64),
    Ineligible,
}

impl RankOutcome {
    pub fn is_eligible(&self) -> bool {
        matches!(self, RankOutcome::Ranked(_))
    }

    /// Chart value under the legacy policy: ineligible collapses to 0.0.
    pub fn value_or_zero(&self) -> f64 {
        match self {
            RankOutcome::Ranked(rank) => *rank,
            RankOutcome::Ineligible => 0.0,
        }
    }
}

/// Per-player audit table: one row per input player, one `Option<f64>` rank
/// cell per ranked statistic. Players absent from a statistic's eligible
/// pool keep an empty cell, never a zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankTable {
    pub stats: Vec<String>,
    pub rows: Vec<RankTableRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankTableRow {
    pub player: String,
    pub team: String,
    pub nineties: f64,
    pub ranks: Vec<Option<f64>>,
}

impl RankTableRow {
    fn key_matches(&self, other: &RankTableRow) -> bool {
        self.player == other.player
            && self.team == other.team
            && self.nineties == other.nineties
    }
}

impl RankTable {
    /// Left join on (player, team, 90s): this table keeps its rows and gains
    /// the other table's rank columns. Rows the other table does not know
    /// get empty cells for its columns.
    pub fn merge(&mut self, other: &RankTable) {
        self.stats.extend(other.stats.iter().cloned());
        for row in &mut self.rows {
            match other.rows.iter().find(|o| o.key_matches(row)) {
                Some(found) => row.ranks.extend(found.ranks.iter().copied()),
                None => row.ranks.extend(std::iter::repeat(None).take(other.stats.len())),
            }
        }
    }

    pub fn rank_for(&self, player: &str, stat: &str) -> Option<f64> {
        let col = self.stats.iter().position(|s| s == stat)?;
        let row = self.rows.iter().find(|r| r.player == player)?;
        row.ranks.get(col).copied().flatten()
    }
}

/// Result of ranking one ordered statistic list: the target player's outcome
/// per statistic (input order preserved) plus the audit table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRanks {
    pub stats: Vec<String>,
    pub target: Vec<RankOutcome>,
    pub table: RankTable,
}

/// Percentile-rank each statistic over its eligible pool and report the
/// target player's rank for every entry of `stats`, in order.
///
/// Per statistic: rows with a raw value of exactly zero are dropped (no
/// recorded activity), rows under `config.min_nineties` are dropped, the
/// survivors are per-90 normalized, and each survivor gets the percentile
/// rank of its normalized value (average-rank ties, two decimals).
pub fn rank_statistics(
    table: &PlayerTable,
    stats: &[String],
    target: &str,
    config: &RankConfig,
) -> Result<CategoryRanks, StatsError> {
    let mut seen = HashSet::new();
    for stat in stats {
        if !seen.insert(stat.as_str()) {
            return Err(StatsError::DuplicateStat { name: stat.clone() });
        }
    }

    let mut audit = RankTable {
        stats: Vec::with_capacity(stats.len()),
        rows: table
            .rows
            .iter()
            .map(|row| RankTableRow {
                player: row.player.clone(),
                team: row.team.clone(),
                nineties: row.nineties,
                ranks: Vec::with_capacity(stats.len()),
            })
            .collect(),
    };
    let mut target_outcomes = Vec::with_capacity(stats.len());

    for stat in stats {
        let index = table.stat_index(stat)?;
        let role = table.columns[index].role;

        let mut pool: Vec<(usize, f64)> = Vec::new();
        for (row_index, row) in table.rows.iter().enumerate() {
            let raw = row.value(index);
            if raw == 0.0 {
                continue;
            }
            if row.nineties < config.min_nineties {
                continue;
            }
            pool.push((row_index, per90_value(row, raw, role)?));
        }

        let values: Vec<f64> = pool.iter().map(|(_, v)| *v).collect();
        let ranks = percentile_ranks(&values);

        let mut cells: Vec<Option<f64>> = vec![None; table.rows.len()];
        for ((row_index, _), rank) in pool.iter().zip(&ranks) {
            cells[*row_index] = Some(*rank);
        }
        for (row, cell) in audit.rows.iter_mut().zip(&cells) {
            row.ranks.push(*cell);
        }
        audit.stats.push(stat.clone());

        let outcome = pool
            .iter()
            .zip(&ranks)
            .find(|((row_index, _), _)| table.rows[*row_index].player == target)
            .map(|(_, rank)| RankOutcome::Ranked(*rank))
            .unwrap_or(RankOutcome::Ineligible);
        target_outcomes.push(outcome);
    }

    Ok(CategoryRanks {
        stats: stats.to_vec(),
        target: target_outcomes,
        table: audit,
    })
}

/// Percentile rank of every value within `values`: average ordinal rank of
/// the value (ties share the mean of their ordinal ranks) divided by the
/// population size, times 100, rounded to two decimals.
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start;
        while end + 1 < n && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        // 1-based ordinal ranks start+1 ..= end+1 averaged across the tie run.
        let avg_rank = (start + end) as f64 / 2.0 + 1.0;
        let pct = round2(avg_rank / n as f64 * 100.0);
        for k in start..=end {
            ranks[order[k]] = pct;
        }
        start = end + 1;
    }
    ranks
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
